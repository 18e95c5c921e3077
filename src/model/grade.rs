//! Difficulty grade vocabulary.
//!
//! Grades are opaque strings to the route model. This table only supplies
//! ordering, display colors and the default layer set for the bouldering
//! V-scale; sport and trad grades pass through untouched.

use crate::color_utils::{hsv_to_rgb, rgb_f32_to_hex};

/// Display information for a known grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeInfo {
    pub grade: &'static str,
    pub color: &'static str,
    pub label: &'static str,
}

/// The V-scale, easiest first.
pub const V_SCALE: &[GradeInfo] = &[
    GradeInfo { grade: "V0", color: "#4CAF50", label: "Beginner" },
    GradeInfo { grade: "V1", color: "#8BC34A", label: "Easy" },
    GradeInfo { grade: "V2", color: "#CDDC39", label: "Basic" },
    GradeInfo { grade: "V3", color: "#FFEB3B", label: "Intermediate" },
    GradeInfo { grade: "V4", color: "#FFC107", label: "Intermediate+" },
    GradeInfo { grade: "V5", color: "#FF9800", label: "Advanced" },
    GradeInfo { grade: "V6", color: "#FF5722", label: "Advanced+" },
    GradeInfo { grade: "V7", color: "#F44336", label: "Expert" },
    GradeInfo { grade: "V8", color: "#E91E63", label: "Expert+" },
    GradeInfo { grade: "V9", color: "#9C27B0", label: "Elite" },
    GradeInfo { grade: "V10", color: "#673AB7", label: "Elite+" },
];

/// Look up a grade in the V-scale table.
pub fn grade_info(grade: &str) -> Option<&'static GradeInfo> {
    V_SCALE.iter().find(|info| info.grade == grade)
}

/// Position of a grade in the V-scale, if it belongs to it.
pub fn grade_rank(grade: &str) -> Option<usize> {
    V_SCALE.iter().position(|info| info.grade == grade)
}

/// Display color for a grade.
///
/// Unknown grades get a stable color derived from the grade text with the
/// golden-angle hue walk, so two different sport grades rarely collide.
pub fn grade_color(grade: &str) -> String {
    if let Some(info) = grade_info(grade) {
        return info.color.to_string();
    }
    let seed = grade
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    let hue = (seed % 360) as f32 * 137.5 % 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 0.7, 0.9);
    rgb_f32_to_hex(r, g, b)
}

/// Grades that get a layer entry out of the box.
pub fn default_layer_grades() -> impl Iterator<Item = &'static str> {
    V_SCALE.iter().map(|info| info.grade)
}
