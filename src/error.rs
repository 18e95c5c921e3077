//! Error types for persistence and import operations.
//!
//! Editing operations on the route editor never fail; only the paths that
//! touch serialized data or a backing store return these.

use thiserror::Error;

/// Errors from a key-value storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend refused the write (e.g. a browser store over quota).
    #[error("Storage quota exceeded writing '{key}'")]
    QuotaExceeded {
        /// Key being written
        key: String,
    },

    /// The backend is not reachable.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the project and preset stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Project id not present in the store
    #[error("Project not found: {id}")]
    ProjectNotFound {
        /// The missing project id
        id: String,
    },

    /// Preset id not present in the store
    #[error("Preset not found: {id}")]
    PresetNotFound {
        /// The missing preset id
        id: String,
    },

    /// Built-in presets cannot be removed
    #[error("Built-in preset '{id}' cannot be deleted")]
    BuiltInPreset {
        /// The preset id
        id: String,
    },

    /// Imported or stored JSON could not be parsed
    #[error("Invalid data: {0}")]
    InvalidData(#[from] serde_json::Error),

    /// Backend failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl StoreError {
    pub fn project_not_found(id: impl Into<String>) -> Self {
        Self::ProjectNotFound { id: id.into() }
    }

    pub fn preset_not_found(id: impl Into<String>) -> Self {
        Self::PresetNotFound { id: id.into() }
    }
}
