//! The drawing surface: coordinate mapping, rendering, hit testing and input.

mod coords;
mod input;
mod render;

pub use coords::SurfaceSize;
pub use hit_test::{RouteHit, hit_test, hit_test_default};
pub use input::{DrawingSurface, PointerEvent};
pub use render::{DrawCommand, Glow, PixelPoint, RenderOptions, arrowhead, render_frame};
