//! Per-grade layer visibility.
//!
//! Transient view state: toggling a layer never touches persisted routes.

use std::collections::BTreeMap;

/// Visibility flag per grade. Grades without an entry are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerVisibility {
    layers: BTreeMap<String, bool>,
}

impl LayerVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed entries for the given grades, all visible.
    pub fn with_grades<I, S>(grades: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            layers: grades.into_iter().map(|g| (g.into(), true)).collect(),
        }
    }

    pub fn is_visible(&self, grade: &str) -> bool {
        self.layers.get(grade).copied().unwrap_or(true)
    }

    pub fn set_visible(&mut self, grade: &str, visible: bool) {
        self.layers.insert(grade.to_string(), visible);
    }

    /// Flip one grade's flag. A grade without an entry becomes hidden.
    pub fn toggle(&mut self, grade: &str) -> bool {
        let visible = !self.is_visible(grade);
        self.set_visible(grade, visible);
        visible
    }

    pub fn set_all(&mut self, visible: bool) {
        for flag in self.layers.values_mut() {
            *flag = visible;
        }
    }

    /// Snapshot of every explicit entry.
    pub fn entries(&self) -> &BTreeMap<String, bool> {
        &self.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_grade_is_visible_and_toggles_hidden() {
        let mut layers = LayerVisibility::new();
        assert!(layers.is_visible("V5"));
        assert!(!layers.toggle("V5"));
        assert!(!layers.is_visible("V5"));
        assert!(layers.toggle("V5"));
    }

    #[test]
    fn test_toggle_leaves_other_grades_alone() {
        let mut layers = LayerVisibility::with_grades(["V0", "V1", "V2"]);
        layers.set_visible("V1", false);
        let before = layers.clone();
        layers.toggle("V0");
        assert_eq!(layers.entries().get("V1"), before.entries().get("V1"));
        assert_eq!(layers.entries().get("V2"), before.entries().get("V2"));
    }

    #[test]
    fn test_set_all() {
        let mut layers = LayerVisibility::with_grades(["V0", "V1"]);
        layers.set_all(false);
        assert!(!layers.is_visible("V0") && !layers.is_visible("V1"));
    }
}
