//! Global constants for the route editor

/// Upper bound of the normalized scene coordinate space (both axes).
pub const NORMALIZED_EXTENT: f64 = 100.0;

/// Default stroke color for new routes.
pub const DEFAULT_STROKE_COLOR: &str = "#FF6B6B";

/// Default stroke width for new routes.
pub const DEFAULT_STROKE_WIDTH: u8 = 3;

/// Smallest allowed stroke width.
pub const MIN_STROKE_WIDTH: u8 = 1;

/// Largest allowed stroke width.
pub const MAX_STROKE_WIDTH: u8 = 8;

/// Grade assigned to freshly drawn routes.
pub const DEFAULT_GRADE: &str = "V3";

/// Hit-test tolerance for route selection, in normalized units.
pub const HIT_TOLERANCE: f64 = 10.0;

/// Arrowhead length in screen pixels.
pub const ARROW_LENGTH_PX: f64 = 15.0;

/// Arrowhead half-angle in degrees.
pub const ARROW_HALF_ANGLE_DEG: f64 = 30.0;

/// Extra stroke width applied to the selected route.
pub const SELECTED_EXTRA_WIDTH: f64 = 2.0;

/// Glow blur radius around the selected route.
pub const SELECTED_GLOW_BLUR: f64 = 10.0;

/// Radius of the control-point handles drawn on the selected route.
pub const HANDLE_RADIUS_PX: f64 = 4.0;

/// Radius of the dots drawn on the in-progress buffer.
pub const BUFFER_DOT_RADIUS_PX: f64 = 3.0;

/// Color of selection glow and handles.
pub const SELECTION_COLOR: &str = "#FFFFFF";

/// Number of undoable route edits kept per scene.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Key under which the project list is persisted.
pub const PROJECTS_STORAGE_KEY: &str = "buho-projects-storage";

/// Key under which user-created presets are persisted.
pub const PRESETS_STORAGE_KEY: &str = "buho-presets-storage";
