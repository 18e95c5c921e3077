//! Pixel <-> normalized coordinate mapping.
//!
//! Pointer positions arrive in CSS pixels relative to the surface's bounding
//! box. Stored points live in a 0-100 space on both axes:
//!
//! ```text
//! x_norm = px / W * 100        px = x_norm / 100 * W
//! y_norm = py / H * 100        py = y_norm / 100 * H
//! ```
//!
//! Persisted points are never rescaled; a resize only changes `W` and `H`.

use crate::constants::NORMALIZED_EXTENT;
use crate::model::Position2D;

/// Rendered size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Width in CSS pixels
    pub width: f64,
    /// Height in CSS pixels
    pub height: f64,
    /// Physical pixels per CSS pixel
    pub device_pixel_ratio: f64,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    pub fn with_device_pixel_ratio(mut self, dpr: f64) -> Self {
        self.device_pixel_ratio = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self
    }

    /// Whether the surface has no drawable area (not yet laid out).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Backing-store size in physical pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width * self.device_pixel_ratio).round().max(0.0);
        let h = (self.height * self.device_pixel_ratio).round().max(0.0);
        (w as u32, h as u32)
    }

    /// Map a surface pixel to normalized coordinates.
    ///
    /// A surface with no area maps everything to the origin.
    pub fn to_normalized(&self, px: f64, py: f64) -> Position2D {
        if self.is_empty() {
            return Position2D::default();
        }
        Position2D::new(
            px / self.width * NORMALIZED_EXTENT,
            py / self.height * NORMALIZED_EXTENT,
        )
    }

    /// Map a normalized point back to surface pixels.
    pub fn to_pixels(&self, point: Position2D) -> (f64, f64) {
        (
            point.x / NORMALIZED_EXTENT * self.width,
            point.y / NORMALIZED_EXTENT * self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_mapping() {
        let size = SurfaceSize::new(200.0, 100.0);
        assert_eq!(size.to_normalized(50.0, 50.0), Position2D::new(25.0, 50.0));
        assert_eq!(size.to_normalized(150.0, 50.0), Position2D::new(75.0, 50.0));
        assert_eq!(size.to_pixels(Position2D::new(75.0, 50.0)), (150.0, 50.0));
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for &(w, h) in &[(200.0, 100.0), (1920.0, 1080.0), (333.0, 777.0), (1.0, 3.0)] {
            let size = SurfaceSize::new(w, h);
            for i in 0..=20 {
                let px = w * i as f64 / 20.0;
                let py = h * (20 - i) as f64 / 20.0;
                let (rx, ry) = size.to_pixels(size.to_normalized(px, py));
                assert!((rx - px).abs() <= 0.01, "x {px} -> {rx} on {w}x{h}");
                assert!((ry - py).abs() <= 0.01, "y {py} -> {ry} on {w}x{h}");
            }
        }
    }

    #[test]
    fn test_resize_changes_only_rendering() {
        let point = Position2D::new(25.0, 50.0);
        assert_eq!(SurfaceSize::new(200.0, 100.0).to_pixels(point), (50.0, 50.0));
        assert_eq!(SurfaceSize::new(400.0, 300.0).to_pixels(point), (100.0, 150.0));
    }

    #[test]
    fn test_zero_size_maps_to_origin() {
        let size = SurfaceSize::new(0.0, 100.0);
        assert_eq!(size.to_normalized(10.0, 10.0), Position2D::default());
    }

    #[test]
    fn test_backing_size_uses_dpr() {
        let size = SurfaceSize::new(200.0, 100.0).with_device_pixel_ratio(2.0);
        assert_eq!(size.backing_size(), (400, 200));
        let bogus = SurfaceSize::new(10.0, 10.0).with_device_pixel_ratio(0.0);
        assert_eq!(bogus.device_pixel_ratio, 1.0);
    }
}
