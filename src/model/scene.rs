//! Scenes and tours.

use serde::{Deserialize, Serialize};

use super::hotspot::Hotspot;
use super::route::Route;

/// Free-form information about a scene's capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
}

/// One panoramic viewpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Panorama image reference. Empty until an image is uploaded.
    #[serde(default)]
    pub panorama_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SceneMetadata>,
}

impl Scene {
    /// Create an empty scene with no panorama yet.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            panorama_url: String::new(),
            thumbnail: None,
            hotspots: Vec::new(),
            routes: Vec::new(),
            metadata: None,
        }
    }

    pub fn with_panorama(mut self, url: impl Into<String>) -> Self {
        self.panorama_url = url.into();
        self
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn with_hotspot(mut self, hotspot: Hotspot) -> Self {
        self.hotspots.push(hotspot);
        self
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    pub fn route_index(&self, id: &str) -> Option<usize> {
        self.routes.iter().position(|r| r.id == id)
    }

    pub fn hotspot(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    /// Number of routes carrying a grade.
    pub fn route_count_for_grade(&self, grade: &str) -> usize {
        self.routes.iter().filter(|r| r.difficulty == grade).count()
    }

    /// Merge a partial update. Only fields present in the patch change.
    pub fn apply(&mut self, patch: ScenePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(url) = patch.panorama_url {
            self.panorama_url = url;
        }
        if let Some(thumbnail) = patch.thumbnail {
            self.thumbnail = thumbnail;
        }
        if let Some(hotspots) = patch.hotspots {
            self.hotspots = hotspots;
        }
        if let Some(routes) = patch.routes {
            self.routes = routes;
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
    }
}

/// The `partialScene` argument of `update_scene`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenePatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub panorama_url: Option<String>,
    pub thumbnail: Option<Option<String>>,
    pub hotspots: Option<Vec<Hotspot>>,
    pub routes: Option<Vec<Route>>,
    pub metadata: Option<Option<SceneMetadata>>,
}

impl ScenePatch {
    /// Patch that replaces only the route list.
    pub fn routes(routes: Vec<Route>) -> Self {
        Self {
            routes: Some(routes),
            ..Default::default()
        }
    }

    /// Patch that replaces only the hotspot list.
    pub fn hotspots(hotspots: Vec<Hotspot>) -> Self {
        Self {
            hotspots: Some(hotspots),
            ..Default::default()
        }
    }
}

/// An ordered collection of scenes forming a walkthrough.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub version: String,
}

impl Tour {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            name: title.clone(),
            title,
            version: "1.0".to_string(),
            ..Default::default()
        }
    }

    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn total_routes(&self) -> usize {
        self.scenes.iter().map(|s| s.routes.len()).sum()
    }
}
