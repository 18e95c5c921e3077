//! Data models for tours, scenes, hotspots and routes.

mod geometry;
pub mod grade;
mod hotspot;
mod id;
mod project;
mod route;
mod scene;

pub use geometry::{Position2D, Position3D};
pub use hotspot::{Hotspot, HotspotKind, HotspotPatch};
pub use id::{IdGenerator, now_millis, now_rfc3339};
pub use project::{
    ClimbingCategory, DifficultyRange, Project, ProjectDraft, ProjectMetadata, ProjectPatch,
};
pub use route::{Route, RoutePatch, RouteType};
pub use scene::{Scene, SceneMetadata, ScenePatch, Tour};
