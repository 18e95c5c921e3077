//! Projects: named collections of tours for one climbing area.

use serde::{Deserialize, Serialize};

use super::scene::Tour;

/// Discipline a project covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimbingCategory {
    #[default]
    Boulder,
    Sport,
    Trad,
    Mixed,
}

impl ClimbingCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ClimbingCategory::Boulder => "Boulder",
            ClimbingCategory::Sport => "Sport",
            ClimbingCategory::Trad => "Trad",
            ClimbingCategory::Mixed => "Mixed",
        }
    }
}

/// Inclusive grade span covered by a project or preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRange {
    pub min: String,
    pub max: String,
}

impl DifficultyRange {
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn is_single_grade(&self) -> bool {
        self.min == self.max
    }
}

impl Default for DifficultyRange {
    fn default() -> Self {
        Self::new("V0", "V3")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub total_scenes: usize,
    #[serde(default)]
    pub total_routes: usize,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            author: String::new(),
            version: "1.0.0".to_string(),
            total_scenes: 0,
            total_routes: 0,
        }
    }
}

/// A saved project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: ClimbingCategory,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub difficulty: DifficultyRange,
    #[serde(default)]
    pub tours: Vec<Tour>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub metadata: ProjectMetadata,
}

impl Project {
    /// Recompute the scene and route totals from the tours.
    pub fn refresh_totals(&mut self) {
        self.metadata.total_scenes = self.tours.iter().map(|t| t.scenes.len()).sum();
        self.metadata.total_routes = self.tours.iter().map(Tour::total_routes).sum();
    }

    /// Case-insensitive match over name, description, location and tags.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.location.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

/// Input for creating a project; id, timestamps and totals are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub category: ClimbingCategory,
    pub location: String,
    pub difficulty: DifficultyRange,
    pub tours: Vec<Tour>,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub author: String,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            name: "New project".to_string(),
            description: String::new(),
            category: ClimbingCategory::Boulder,
            location: String::new(),
            difficulty: DifficultyRange::default(),
            tours: Vec::new(),
            tags: Vec::new(),
            is_public: false,
            author: String::new(),
        }
    }
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Partial update for a project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ClimbingCategory>,
    pub location: Option<String>,
    pub difficulty: Option<DifficultyRange>,
    pub tours: Option<Vec<Tour>>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub thumbnail: Option<Option<String>>,
}

impl ProjectPatch {
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(category) = self.category {
            project.category = category;
        }
        if let Some(location) = self.location {
            project.location = location;
        }
        if let Some(difficulty) = self.difficulty {
            project.difficulty = difficulty;
        }
        if let Some(tours) = self.tours {
            project.tours = tours;
        }
        if let Some(tags) = self.tags {
            project.tags = tags;
        }
        if let Some(is_public) = self.is_public {
            project.is_public = is_public;
        }
        if let Some(thumbnail) = self.thumbnail {
            project.thumbnail = thumbnail;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scene;

    fn project() -> Project {
        Project {
            id: "project-1".to_string(),
            name: "El Mirador".to_string(),
            description: "Granite boulders".to_string(),
            category: ClimbingCategory::Boulder,
            location: "Sierra Norte".to_string(),
            difficulty: DifficultyRange::default(),
            tours: vec![Tour::new("t", "T").with_scene(Scene::new("s1", "S1"))],
            thumbnail: None,
            created: String::new(),
            modified: String::new(),
            tags: vec!["granite".to_string()],
            is_public: false,
            metadata: ProjectMetadata::default(),
        }
    }

    #[test]
    fn test_refresh_totals() {
        let mut p = project();
        p.refresh_totals();
        assert_eq!(p.metadata.total_scenes, 1);
        assert_eq!(p.metadata.total_routes, 0);
    }

    #[test]
    fn test_query_matches_tags_case_insensitively() {
        let p = project();
        assert!(p.matches_query("GRANITE"));
        assert!(p.matches_query("norte"));
        assert!(!p.matches_query("limestone"));
    }
}
