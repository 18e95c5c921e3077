//! Climbing routes drawn over a scene image.

use serde::{Deserialize, Serialize};

use super::geometry::Position2D;

/// Kind of climbing line. Controls whether an arrowhead is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    #[default]
    Boulder,
    Route,
    Traverse,
}

impl RouteType {
    pub fn name(&self) -> &'static str {
        match self {
            RouteType::Boulder => "Boulder",
            RouteType::Route => "Route",
            RouteType::Traverse => "Traverse",
        }
    }

    /// Whether routes of this type get an arrowhead at their last point.
    pub fn renders_arrowhead(&self) -> bool {
        matches!(self, RouteType::Route)
    }
}

/// A persisted climbing line in normalized scene coordinates.
///
/// Serialized as `{id, name, difficulty, color, strokeWidth, points, type,
/// description?}` so projects saved by earlier editors load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub name: String,
    /// Grade string, used as the layer key and for color lookup.
    pub difficulty: String,
    /// Stroke color as a hex string.
    pub color: String,
    pub stroke_width: u8,
    pub points: Vec<Position2D>,
    #[serde(rename = "type")]
    pub route_type: RouteType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Route {
    /// Minimum number of points for a drawn line.
    pub const MIN_LINE_POINTS: usize = 2;

    /// A single-point route is a point marker rather than a line.
    pub fn is_point_marker(&self) -> bool {
        self.points.len() == 1
    }

    /// Whether this route may be stored in a scene.
    pub fn is_committable(&self) -> bool {
        self.is_point_marker() || self.points.len() >= Self::MIN_LINE_POINTS
    }

    /// The last two points, used to orient an arrowhead.
    pub fn terminal_segment(&self) -> Option<(Position2D, Position2D)> {
        match self.points.as_slice() {
            [.., from, to] => Some((*from, *to)),
            _ => None,
        }
    }

    /// Translate every point, clamped into the normalized extent.
    pub fn translated(&self, dx: f64, dy: f64) -> Route {
        Route {
            points: self.points.iter().map(|p| p.offset_clamped(dx, dy)).collect(),
            ..self.clone()
        }
    }

    /// Apply a partial update.
    pub fn apply(&mut self, patch: RoutePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(width) = patch.stroke_width {
            self.stroke_width = width;
        }
        if let Some(points) = patch.points {
            self.points = points;
        }
        if let Some(route_type) = patch.route_type {
            self.route_type = route_type;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Partial update for a route, as sent by the properties panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePatch {
    pub name: Option<String>,
    pub difficulty: Option<String>,
    pub color: Option<String>,
    pub stroke_width: Option<u8>,
    pub points: Option<Vec<Position2D>>,
    pub route_type: Option<RouteType>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
}

impl RoutePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
