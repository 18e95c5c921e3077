//! Current stroke settings applied to new routes.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GRADE, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH,
};

/// Stroke color, width and grade used for the next committed route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub color: String,
    width: u8,
    pub grade: String,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_STROKE_COLOR.to_string(),
            width: DEFAULT_STROKE_WIDTH,
            grade: DEFAULT_GRADE.to_string(),
        }
    }
}

impl StrokeStyle {
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Set the width, clamped to the supported range.
    pub fn set_width(&mut self, width: u8) {
        self.width = clamp_width(width);
    }

    pub fn with_width(mut self, width: u8) -> Self {
        self.set_width(width);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = grade.into();
        self
    }
}

pub fn clamp_width(width: u8) -> u8 {
    width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, "#FF6B6B");
        assert_eq!(style.width(), 3);
        assert_eq!(style.grade, "V3");
    }

    #[test]
    fn test_width_is_clamped() {
        assert_eq!(StrokeStyle::default().with_width(0).width(), 1);
        assert_eq!(StrokeStyle::default().with_width(20).width(), 8);
        assert_eq!(StrokeStyle::default().with_width(5).width(), 5);
    }
}
