//! Interactive markers anchored on the panorama sphere.

use serde::{Deserialize, Serialize};

use super::geometry::Position3D;

/// What a hotspot does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotspotKind {
    /// Jumps to another scene.
    Navigation,
    /// Shows an information popup.
    Info,
    /// References a climbing route.
    Route,
}

impl HotspotKind {
    pub fn name(&self) -> &'static str {
        match self {
            HotspotKind::Navigation => "Navigation",
            HotspotKind::Info => "Info",
            HotspotKind::Route => "Route",
        }
    }

    /// Title given to a freshly placed hotspot.
    pub fn default_title(&self) -> &'static str {
        match self {
            HotspotKind::Navigation => "Go to scene",
            HotspotKind::Info => "Information",
            HotspotKind::Route => "Climbing route",
        }
    }

    /// Icon key given to a freshly placed hotspot.
    pub fn default_icon(&self) -> &'static str {
        match self {
            HotspotKind::Navigation => "arrow",
            HotspotKind::Info => "info",
            HotspotKind::Route => "route",
        }
    }

    pub fn all() -> &'static [HotspotKind] {
        &[HotspotKind::Navigation, HotspotKind::Info, HotspotKind::Route]
    }
}

/// A marker on a scene's sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HotspotKind,
    pub position: Position3D,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Scene id this hotspot navigates to. Dangling targets are reported by
    /// validation, never rejected here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl Hotspot {
    /// Create a hotspot with the defaults used by the placement tool.
    pub fn new(id: impl Into<String>, kind: HotspotKind, position: Position3D) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            title: kind.default_title().to_string(),
            content: None,
            target: None,
            icon: kind.default_icon().to_string(),
            route_id: None,
            difficulty: None,
            grade: None,
        }
    }

    pub fn with_target(mut self, scene_id: impl Into<String>) -> Self {
        self.target = Some(scene_id.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn apply(&mut self, patch: HotspotPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(target) = patch.target {
            self.target = target;
        }
        if let Some(grade) = patch.grade {
            self.grade = grade;
        }
    }
}

/// Partial update for a hotspot. Nested options clear the field with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotspotPatch {
    pub kind: Option<HotspotKind>,
    pub position: Option<Position3D>,
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub target: Option<Option<String>>,
    pub grade: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_kind() {
        let h = Hotspot::new("hotspot-1", HotspotKind::Info, Position3D::new(0.0, 0.3, 0.9));
        assert_eq!(h.icon, "info");
        assert_eq!(h.title, "Information");
    }

    #[test]
    fn test_roundtrip_wire_names() {
        let h = Hotspot::new("hotspot-1", HotspotKind::Navigation, Position3D::new(0.5, 0.2, 0.8))
            .with_target("scene-002");
        let json = serde_json::to_value(&h).expect("serialize");
        assert_eq!(json["type"], "navigation");
        assert_eq!(json["target"], "scene-002");
        assert!(json.get("routeId").is_none());
    }

    #[test]
    fn test_patch_clears_target() {
        let mut h = Hotspot::new("h", HotspotKind::Navigation, Position3D::default())
            .with_target("scene-9");
        h.apply(HotspotPatch {
            target: Some(None),
            title: Some("Back".to_string()),
            ..Default::default()
        });
        assert!(h.target.is_none());
        assert_eq!(h.title, "Back");
    }
}
