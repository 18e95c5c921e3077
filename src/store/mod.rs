//! Stores: the live tour being edited, saved projects, and their persistence.

mod auto_save;
mod project_store;
mod storage;
mod tour_store;

pub use auto_save::AutoSaveManager;
pub use project_store::{ProjectQuery, ProjectStore, SortKey, SortOrder};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use tour_store::{ListenerId, TourEvent, TourStore};
