//! Route editing: tools, stroke style, layer visibility, per-scene history
//! and the drawing state machine.

mod history;
mod layers;
mod route_editor;
mod session;
mod style;
mod tools;

pub use history::{RouteCommand, SceneHistory, UndoStack};
pub use layers::LayerVisibility;
pub use route_editor::{DrawState, EditorSnapshot, RouteEditor};
pub use session::EditorSession;
pub use style::{StrokeStyle, clamp_width};
pub use tools::{DrawTool, EditTool, EditorMode};
