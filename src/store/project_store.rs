//! Project CRUD, search and persistence.

use serde::{Deserialize, Serialize};

use crate::constants::PROJECTS_STORAGE_KEY;
use crate::error::StoreError;
use crate::model::{
    ClimbingCategory, IdGenerator, Project, ProjectDraft, ProjectMetadata, ProjectPatch,
    now_rfc3339,
};

use super::storage::KeyValueStorage;

/// Field used to order the project list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    Created,
    #[default]
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Search, filter and sort settings for the project list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectQuery {
    pub search: String,
    pub category: Option<ClimbingCategory>,
    pub sort_by: SortKey,
    pub order: SortOrder,
}

/// On-disk layout of the persisted project list.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedProjects {
    projects: Vec<Project>,
    #[serde(default)]
    current_project: Option<Project>,
}

/// Holds every project and the one being edited.
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    current_id: Option<String>,
    ids: IdGenerator,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn project_mut(&mut self, id: &str) -> Result<&mut Project, StoreError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::project_not_found(id))
    }

    pub fn current(&self) -> Option<&Project> {
        self.current_id.as_deref().and_then(|id| self.project(id))
    }

    /// Make a project current, or clear the selection with `None`.
    pub fn set_current(&mut self, id: Option<&str>) {
        self.current_id = id.filter(|id| self.project(id).is_some()).map(str::to_string);
    }

    /// Load a project by id; unknown ids clear the current project.
    pub fn load_project(&mut self, id: &str) -> Option<&Project> {
        self.set_current(Some(id));
        self.current()
    }

    /// Create a project from a draft and make it current.
    pub fn create_project(&mut self, draft: ProjectDraft) -> &Project {
        let now = now_rfc3339();
        let mut project = Project {
            id: self.ids.next("project"),
            name: draft.name,
            description: draft.description,
            category: draft.category,
            location: draft.location,
            difficulty: draft.difficulty,
            tours: draft.tours,
            thumbnail: None,
            created: now.clone(),
            modified: now,
            tags: draft.tags,
            is_public: draft.is_public,
            metadata: ProjectMetadata {
                author: draft.author,
                ..ProjectMetadata::default()
            },
        };
        project.refresh_totals();
        log::debug!("Created project {} '{}'", project.id, project.name);
        self.current_id = Some(project.id.clone());
        self.projects.push(project);
        &self.projects[self.projects.len() - 1]
    }

    /// Apply a partial update and bump the modified timestamp.
    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> Result<(), StoreError> {
        let project = self.project_mut(id)?;
        patch.apply_to(project);
        project.refresh_totals();
        project.modified = now_rfc3339();
        log::debug!("Updated project {}", id);
        Ok(())
    }

    /// Replace a whole project record (the editor's save action).
    pub fn save_project(&mut self, mut project: Project) -> Result<(), StoreError> {
        let slot = self.project_mut(&project.id.clone())?;
        project.refresh_totals();
        project.modified = now_rfc3339();
        *slot = project;
        Ok(())
    }

    pub fn delete_project(&mut self, id: &str) -> Result<Project, StoreError> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::project_not_found(id))?;
        if self.current_id.as_deref() == Some(id) {
            self.current_id = None;
        }
        log::debug!("Deleted project {}", id);
        Ok(self.projects.remove(index))
    }

    /// Copy a project under a fresh id. The copy does not become current.
    pub fn duplicate_project(&mut self, id: &str) -> Result<&Project, StoreError> {
        let original = self
            .project(id)
            .cloned()
            .ok_or_else(|| StoreError::project_not_found(id))?;
        let now = now_rfc3339();
        let copy = Project {
            id: self.ids.next("project"),
            name: format!("{} (Copy)", original.name),
            created: now.clone(),
            modified: now,
            ..original
        };
        self.projects.push(copy);
        Ok(&self.projects[self.projects.len() - 1])
    }

    /// Serialize one project as pretty JSON.
    pub fn export_project(&self, id: &str) -> Result<String, StoreError> {
        let project = self
            .project(id)
            .ok_or_else(|| StoreError::project_not_found(id))?;
        Ok(serde_json::to_string_pretty(project)?)
    }

    /// Import a project from JSON under a fresh id.
    pub fn import_project(&mut self, json: &str) -> Result<&Project, StoreError> {
        let mut project: Project = serde_json::from_str(json).inspect_err(|e| {
            log::warn!("Rejected project import: {}", e);
        })?;
        let now = now_rfc3339();
        project.id = self.ids.next("project");
        project.name = format!("{} (Imported)", project.name);
        project.created = now.clone();
        project.modified = now;
        project.refresh_totals();
        log::debug!("Imported project {} '{}'", project.id, project.name);
        self.projects.push(project);
        Ok(&self.projects[self.projects.len() - 1])
    }

    /// Projects matching a query, in the requested order.
    pub fn filtered(&self, query: &ProjectQuery) -> Vec<&Project> {
        let mut list: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| query.search.is_empty() || p.matches_query(&query.search))
            .filter(|p| query.category.is_none_or(|c| p.category == c))
            .collect();

        list.sort_by(|a, b| {
            let ord = match query.sort_by {
                SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortKey::Created => timestamp_key(&a.created).cmp(&timestamp_key(&b.created)),
                SortKey::Modified => timestamp_key(&a.modified).cmp(&timestamp_key(&b.modified)),
            };
            match query.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        list
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Write all projects and the current one to storage.
    pub fn save(&self, storage: &mut dyn KeyValueStorage) -> Result<(), StoreError> {
        let payload = PersistedProjects {
            projects: self.projects.clone(),
            current_project: self.current().cloned(),
        };
        let json = serde_json::to_string(&payload)?;
        storage.set_item(PROJECTS_STORAGE_KEY, &json)?;
        log::debug!("Saved {} projects ({} bytes)", self.projects.len(), json.len());
        Ok(())
    }

    /// Restore projects from storage. An empty store loads as empty.
    pub fn load(storage: &dyn KeyValueStorage) -> Result<Self, StoreError> {
        let mut store = Self::new();
        let Some(json) = storage.get_item(PROJECTS_STORAGE_KEY)? else {
            return Ok(store);
        };
        let payload: PersistedProjects = serde_json::from_str(&json)?;
        store.projects = payload.projects;
        store.current_id = payload
            .current_project
            .map(|p| p.id)
            .filter(|id| store.project(id).is_some());
        log::debug!("Loaded {} projects", store.projects.len());
        Ok(store)
    }
}

/// Sort key for stored timestamps; unparsable values sort first.
fn timestamp_key(ts: &str) -> i64 {
    chrono::DateTime::parse_from_rfc3339(ts)
        .map(|t| t.timestamp_millis())
        .unwrap_or(i64::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Scene, Tour};
    use crate::store::MemoryStorage;

    fn draft(name: &str) -> ProjectDraft {
        ProjectDraft {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_sets_current_and_totals() {
        let mut store = ProjectStore::new();
        let tour = Tour::new("t", "T").with_scene(Scene::new("s", "S"));
        let id = store
            .create_project(ProjectDraft {
                tours: vec![tour],
                ..draft("Mirador")
            })
            .id
            .clone();
        assert_eq!(store.current().map(|p| p.id.as_str()), Some(id.as_str()));
        assert_eq!(store.current().map(|p| p.metadata.total_scenes), Some(1));
    }

    #[test]
    fn test_update_and_delete() {
        let mut store = ProjectStore::new();
        let id = store.create_project(draft("A")).id.clone();
        store
            .update_project(
                &id,
                ProjectPatch {
                    location: Some("Valle".to_string()),
                    ..Default::default()
                },
            )
            .expect("update");
        assert_eq!(store.project(&id).map(|p| p.location.as_str()), Some("Valle"));

        store.delete_project(&id).expect("delete");
        assert!(store.current().is_none());
        assert!(matches!(
            store.delete_project(&id),
            Err(StoreError::ProjectNotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_and_import_get_fresh_ids() {
        let mut store = ProjectStore::new();
        let id = store.create_project(draft("Crag")).id.clone();
        let copy_id = store.duplicate_project(&id).expect("duplicate").id.clone();
        assert_ne!(copy_id, id);
        assert_eq!(store.project(&copy_id).map(|p| p.name.as_str()), Some("Crag (Copy)"));

        let json = store.export_project(&id).expect("export");
        let imported = store.import_project(&json).expect("import");
        assert_eq!(imported.name, "Crag (Imported)");
        assert_eq!(store.projects().len(), 3);
    }

    #[test]
    fn test_import_rejects_garbage() {
        let mut store = ProjectStore::new();
        assert!(matches!(
            store.import_project("{not json"),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_filter_and_sort() {
        let mut store = ProjectStore::new();
        store.create_project(draft("beta"));
        store.create_project(ProjectDraft {
            category: ClimbingCategory::Sport,
            ..draft("Alpha")
        });
        store.create_project(draft("gamma"));

        let by_name = store.filtered(&ProjectQuery {
            sort_by: SortKey::Name,
            order: SortOrder::Asc,
            ..Default::default()
        });
        let names: Vec<_> = by_name.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "gamma"]);

        let sport = store.filtered(&ProjectQuery {
            category: Some(ClimbingCategory::Sport),
            ..Default::default()
        });
        assert_eq!(sport.len(), 1);

        let search = store.filtered(&ProjectQuery {
            search: "AMM".to_string(),
            ..Default::default()
        });
        assert_eq!(search.len(), 1);
    }

    #[test]
    fn test_save_load_roundtrip_keeps_current() {
        let mut storage = MemoryStorage::new();
        let mut store = ProjectStore::new();
        store.create_project(draft("One"));
        let id = store.create_project(draft("Two")).id.clone();
        store.save(&mut storage).expect("save");

        let loaded = ProjectStore::load(&storage).expect("load");
        assert_eq!(loaded.projects().len(), 2);
        assert_eq!(loaded.current().map(|p| p.id.as_str()), Some(id.as_str()));
    }

    #[test]
    fn test_save_surfaces_quota_errors() {
        let mut storage = MemoryStorage::new().with_quota(16);
        let mut store = ProjectStore::new();
        store.create_project(draft("Too big to fit"));
        assert!(matches!(store.save(&mut storage), Err(StoreError::Storage(_))));
    }
}
