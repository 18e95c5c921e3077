//! Position types shared by routes and hotspots.

use serde::{Deserialize, Serialize};

use crate::constants::NORMALIZED_EXTENT;

/// A point in normalized scene coordinates (0-100 on both axes).
///
/// Routes are stored in this space so they survive canvas resizes and
/// device-pixel-ratio changes untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point, in normalized units.
    pub fn distance_to(&self, other: &Position2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Translate by a delta, keeping the result inside the normalized extent.
    pub fn offset_clamped(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: (self.x + dx).clamp(0.0, NORMALIZED_EXTENT),
            y: (self.y + dy).clamp(0.0, NORMALIZED_EXTENT),
        }
    }

    /// The nearest position inside the normalized extent.
    pub fn clamped(&self) -> Self {
        self.offset_clamped(0.0, 0.0)
    }

    /// Whether both coordinates lie inside 0-100.
    pub fn is_in_bounds(&self) -> bool {
        (0.0..=NORMALIZED_EXTENT).contains(&self.x) && (0.0..=NORMALIZED_EXTENT).contains(&self.y)
    }
}

/// A direction on the panorama sphere, used to anchor hotspots.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Project onto the unit sphere. A zero vector is returned unchanged.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return *self;
        }
        Self::new(self.x / len, self.y / len, self.z / len)
    }
}
