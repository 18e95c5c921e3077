//! Buho - route editor core for climbing virtual tours
//!
//! Holds the tour/scene state, the route drawing state machine with per-scene
//! undo, a display-list renderer and pointer/keyboard input handling. Hosts
//! (web canvas, native UI) replay the draw commands and feed input back in.

pub mod color_utils;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod keybindings;
pub mod model;
pub mod presets;
pub mod store;
pub mod surface;
pub mod validation;

pub use config::EditorConfig;
pub use editor::{EditorSession, RouteEditor};
pub use error::{StorageError, StoreError};
pub use store::{ProjectStore, TourStore};
