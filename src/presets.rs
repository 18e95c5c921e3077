//! Climbing presets: reusable grade ranges and per-grade route colors.
//!
//! A fixed set of built-in presets is always available and cannot be
//! deleted. User presets are created, duplicated or imported alongside them
//! and are the only ones written to storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::PRESETS_STORAGE_KEY;
use crate::editor::RouteEditor;
use crate::error::StoreError;
use crate::model::grade::grade_color;
use crate::model::{ClimbingCategory, DifficultyRange, IdGenerator, now_rfc3339};
use crate::store::KeyValueStorage;

const BUILT_IN_AUTHOR: &str = "Buho Editor";
const USER_AUTHOR: &str = "User";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetMetadata {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_count: Option<u32>,
}

impl PresetMetadata {
    fn user() -> Self {
        Self {
            author: USER_AUTHOR.to_string(),
            created: now_rfc3339(),
            version: "1.0".to_string(),
            is_default: false,
            download_count: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimbingPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: ClimbingCategory,
    #[serde(default)]
    pub icon: String,
    /// Accent color for the preset itself.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub difficulty_range: DifficultyRange,
    /// Stroke color per grade.
    #[serde(default)]
    pub route_colors: BTreeMap<String, String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub metadata: PresetMetadata,
}

impl ClimbingPreset {
    pub fn is_built_in(&self) -> bool {
        self.metadata.is_default
    }

    /// Stroke color for a grade, falling back to the shared grade palette.
    pub fn route_color(&self, grade: &str) -> String {
        self.route_colors
            .get(grade)
            .cloned()
            .unwrap_or_else(|| grade_color(grade))
    }

    /// Make this preset the editor's default: the easiest grade in range and
    /// its color become the stroke style for new routes.
    pub fn apply_to(&self, editor: &mut RouteEditor) {
        let grade = self.difficulty_range.min.clone();
        editor.set_stroke_color(self.route_color(&grade));
        editor.set_grade(grade);
        log::debug!("Applied preset {}", self.id);
    }
}

/// Fields supplied when creating a preset; id and metadata are assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetDraft {
    pub name: String,
    pub description: String,
    pub category: ClimbingCategory,
    pub icon: String,
    pub color: String,
    pub difficulty_range: DifficultyRange,
    pub route_colors: BTreeMap<String, String>,
    pub equipment: Vec<String>,
    pub tags: Vec<String>,
}

/// Partial update for a preset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ClimbingCategory>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub difficulty_range: Option<DifficultyRange>,
    pub route_colors: Option<BTreeMap<String, String>>,
    pub equipment: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

impl PresetPatch {
    fn apply_to(self, preset: &mut ClimbingPreset) {
        if let Some(name) = self.name {
            preset.name = name;
        }
        if let Some(description) = self.description {
            preset.description = description;
        }
        if let Some(category) = self.category {
            preset.category = category;
        }
        if let Some(icon) = self.icon {
            preset.icon = icon;
        }
        if let Some(color) = self.color {
            preset.color = color;
        }
        if let Some(range) = self.difficulty_range {
            preset.difficulty_range = range;
        }
        if let Some(route_colors) = self.route_colors {
            preset.route_colors = route_colors;
        }
        if let Some(equipment) = self.equipment {
            preset.equipment = equipment;
        }
        if let Some(tags) = self.tags {
            preset.tags = tags;
        }
    }
}

/// Export envelope: the preset plus who exported it and when.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedPreset<'a> {
    #[serde(flatten)]
    preset: &'a ClimbingPreset,
    exported_at: String,
    exported_by: &'static str,
}

/// Lenient import shape; anything missing gets a default.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedPreset {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: ClimbingCategory,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    difficulty_range: DifficultyRange,
    #[serde(default)]
    route_colors: BTreeMap<String, String>,
    #[serde(default)]
    equipment: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    metadata: Option<ImportedMetadata>,
}

#[derive(Deserialize)]
struct ImportedMetadata {
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedPresets {
    #[serde(default)]
    presets: Vec<ClimbingPreset>,
    #[serde(default)]
    selected_preset_id: Option<String>,
}

fn colors(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(grade, color)| (grade.to_string(), color.to_string()))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[expect(clippy::too_many_arguments)]
fn built_in(
    id: &str,
    name: &str,
    description: &str,
    category: ClimbingCategory,
    icon: &str,
    color: &str,
    range: (&str, &str),
    route_colors: &[(&str, &str)],
    equipment: &[&str],
    tags: &[&str],
) -> ClimbingPreset {
    ClimbingPreset {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        icon: icon.to_string(),
        color: color.to_string(),
        difficulty_range: DifficultyRange::new(range.0, range.1),
        route_colors: colors(route_colors),
        equipment: strings(equipment),
        tags: strings(tags),
        metadata: PresetMetadata {
            author: BUILT_IN_AUTHOR.to_string(),
            created: "2025-08-26".to_string(),
            version: "1.0".to_string(),
            is_default: true,
            download_count: None,
        },
    }
}

/// The presets every installation ships with.
pub fn default_presets() -> Vec<ClimbingPreset> {
    vec![
        built_in(
            "boulder-beginner",
            "Beginner Boulder",
            "Introductory problems from V0 to V3",
            ClimbingCategory::Boulder,
            "🪨",
            "#4CAF50",
            ("V0", "V3"),
            &[("V0", "#4CAF50"), ("V1", "#8BC34A"), ("V2", "#CDDC39"), ("V3", "#FFEB3B")],
            &["Chalk", "Climbing shoes", "Crash pad"],
            &["beginner", "boulder"],
        ),
        built_in(
            "boulder-intermediate",
            "Intermediate Boulder",
            "Problems of intermediate difficulty, V4 to V7",
            ClimbingCategory::Boulder,
            "🧗",
            "#FF9800",
            ("V4", "V7"),
            &[("V4", "#FFC107"), ("V5", "#FF9800"), ("V6", "#FF5722"), ("V7", "#F44336")],
            &["Chalk", "Climbing shoes", "Crash pad", "Brush"],
            &["intermediate", "boulder", "technical"],
        ),
        built_in(
            "boulder-advanced",
            "Advanced Boulder",
            "Hard problems, V8 to V12 and beyond",
            ClimbingCategory::Boulder,
            "💪",
            "#9C27B0",
            ("V8", "V12"),
            &[
                ("V8", "#E91E63"),
                ("V9", "#9C27B0"),
                ("V10", "#673AB7"),
                ("V11", "#3F51B5"),
                ("V12", "#2196F3"),
            ],
            &["Chalk", "Performance shoes", "Several crash pads", "Brush"],
            &["advanced", "boulder"],
        ),
        built_in(
            "sport-single-pitch",
            "Single-pitch Sport",
            "Bolted single-pitch routes",
            ClimbingCategory::Sport,
            "🧗‍♀️",
            "#2196F3",
            ("5.6", "5.12d"),
            &[
                ("5.6", "#4CAF50"),
                ("5.7", "#8BC34A"),
                ("5.8", "#CDDC39"),
                ("5.9", "#FFEB3B"),
                ("5.10a", "#FFC107"),
                ("5.10b", "#FFC107"),
                ("5.10c", "#FF9800"),
                ("5.10d", "#FF9800"),
                ("5.11a", "#FF5722"),
                ("5.11b", "#FF5722"),
                ("5.11c", "#F44336"),
                ("5.11d", "#F44336"),
                ("5.12a", "#E91E63"),
                ("5.12b", "#E91E63"),
                ("5.12c", "#9C27B0"),
                ("5.12d", "#9C27B0"),
            ],
            &["Dynamic rope", "Harness", "Helmet", "Shoes", "Chalk", "Belay device"],
            &["sport", "single pitch", "bolts"],
        ),
        built_in(
            "trad-classic",
            "Classic Trad",
            "Traditional climbing on self-placed protection",
            ClimbingCategory::Trad,
            "⚙️",
            "#795548",
            ("5.4", "5.11c"),
            &[
                ("5.4", "#4CAF50"),
                ("5.5", "#4CAF50"),
                ("5.6", "#8BC34A"),
                ("5.7", "#CDDC39"),
                ("5.8", "#FFEB3B"),
                ("5.9", "#FFC107"),
                ("5.10a", "#FF9800"),
                ("5.10b", "#FF9800"),
                ("5.10c", "#FF5722"),
                ("5.10d", "#FF5722"),
                ("5.11a", "#F44336"),
                ("5.11b", "#F44336"),
                ("5.11c", "#E91E63"),
            ],
            &["Dynamic rope", "Harness", "Helmet", "Cams", "Nuts", "Quickdraws"],
            &["trad", "cams", "nuts", "classic"],
        ),
        built_in(
            "mixed-alpine",
            "Alpine Mixed",
            "Mountain routes on rock, snow and ice",
            ClimbingCategory::Mixed,
            "🏔️",
            "#607D8B",
            ("M1", "M8"),
            &[
                ("M1", "#4CAF50"),
                ("M2", "#8BC34A"),
                ("M3", "#CDDC39"),
                ("M4", "#FFEB3B"),
                ("M5", "#FFC107"),
                ("M6", "#FF9800"),
                ("M7", "#FF5722"),
                ("M8", "#F44336"),
            ],
            &["Dynamic rope", "Harness", "Helmet", "Crampons", "Ice axe", "Ice screws", "Cams"],
            &["mixed", "alpine", "ice", "mountain"],
        ),
    ]
}

#[derive(Debug, Clone)]
pub struct PresetStore {
    presets: Vec<ClimbingPreset>,
    selected_id: Option<String>,
    ids: IdGenerator,
}

impl Default for PresetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetStore {
    /// A store holding only the built-in presets.
    pub fn new() -> Self {
        Self {
            presets: default_presets(),
            selected_id: None,
            ids: IdGenerator::new(),
        }
    }

    pub fn presets(&self) -> &[ClimbingPreset] {
        &self.presets
    }

    pub fn preset(&self, id: &str) -> Option<&ClimbingPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    fn preset_mut(&mut self, id: &str) -> Result<&mut ClimbingPreset, StoreError> {
        self.presets
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::preset_not_found(id))
    }

    pub fn by_category(&self, category: ClimbingCategory) -> impl Iterator<Item = &ClimbingPreset> {
        self.presets.iter().filter(move |p| p.category == category)
    }

    pub fn selected(&self) -> Option<&ClimbingPreset> {
        self.selected_id.as_deref().and_then(|id| self.preset(id))
    }

    pub fn set_selected(&mut self, id: Option<&str>) {
        self.selected_id = id.filter(|id| self.preset(id).is_some()).map(str::to_string);
    }

    fn push(&mut self, preset: ClimbingPreset) -> &ClimbingPreset {
        log::debug!("Added preset {} '{}'", preset.id, preset.name);
        self.presets.push(preset);
        &self.presets[self.presets.len() - 1]
    }

    pub fn create(&mut self, draft: PresetDraft) -> &ClimbingPreset {
        let preset = ClimbingPreset {
            id: self.ids.next("preset"),
            name: draft.name,
            description: draft.description,
            category: draft.category,
            icon: draft.icon,
            color: draft.color,
            difficulty_range: draft.difficulty_range,
            route_colors: draft.route_colors,
            equipment: draft.equipment,
            tags: draft.tags,
            metadata: PresetMetadata::user(),
        };
        self.push(preset)
    }

    pub fn update(&mut self, id: &str, patch: PresetPatch) -> Result<(), StoreError> {
        patch.apply_to(self.preset_mut(id)?);
        Ok(())
    }

    /// Remove a user preset. Built-in presets are refused.
    pub fn delete(&mut self, id: &str) -> Result<ClimbingPreset, StoreError> {
        let index = self
            .presets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::preset_not_found(id))?;
        if self.presets[index].is_built_in() {
            return Err(StoreError::BuiltInPreset { id: id.to_string() });
        }
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
        Ok(self.presets.remove(index))
    }

    /// Copy any preset (built-in included) as a new user preset.
    pub fn duplicate(&mut self, id: &str) -> Result<&ClimbingPreset, StoreError> {
        let mut copy = self
            .preset(id)
            .cloned()
            .ok_or_else(|| StoreError::preset_not_found(id))?;
        copy.id = self.ids.next("preset");
        copy.name = format!("{} (Copy)", copy.name);
        copy.metadata = PresetMetadata {
            version: copy.metadata.version,
            ..PresetMetadata::user()
        };
        Ok(self.push(copy))
    }

    pub fn export(&self, id: &str) -> Result<String, StoreError> {
        let preset = self
            .preset(id)
            .ok_or_else(|| StoreError::preset_not_found(id))?;
        let envelope = ExportedPreset {
            preset,
            exported_at: now_rfc3339(),
            exported_by: BUILT_IN_AUTHOR,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    /// Import a preset as a new user preset with a fresh id.
    pub fn import(&mut self, json: &str) -> Result<&ClimbingPreset, StoreError> {
        let imported: ImportedPreset = serde_json::from_str(json)
            .inspect_err(|e| log::warn!("Rejected preset import: {}", e))?;
        let metadata = imported.metadata;
        let preset = ClimbingPreset {
            id: self.ids.next("preset"),
            name: imported
                .name
                .map_or_else(|| "Imported preset".to_string(), |n| format!("{n} (Imported)")),
            description: imported.description,
            category: imported.category,
            icon: imported.icon,
            color: imported.color,
            difficulty_range: imported.difficulty_range,
            route_colors: imported.route_colors,
            equipment: imported.equipment,
            tags: imported.tags,
            metadata: PresetMetadata {
                author: metadata
                    .as_ref()
                    .and_then(|m| m.author.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                version: metadata
                    .and_then(|m| m.version)
                    .unwrap_or_else(|| "1.0".to_string()),
                ..PresetMetadata::user()
            },
        };
        Ok(self.push(preset))
    }

    /// Drop all user presets.
    pub fn reset_to_defaults(&mut self) {
        self.presets = default_presets();
        self.selected_id = None;
    }

    /// Persist user presets and the selection. Built-ins are never written.
    pub fn save(&self, storage: &mut dyn KeyValueStorage) -> Result<(), StoreError> {
        let persisted = PersistedPresets {
            presets: self
                .presets
                .iter()
                .filter(|p| !p.is_built_in())
                .cloned()
                .collect(),
            selected_preset_id: self.selected_id.clone(),
        };
        storage.set_item(PRESETS_STORAGE_KEY, &serde_json::to_string(&persisted)?)?;
        Ok(())
    }

    /// Built-ins followed by whatever user presets were saved.
    pub fn load(storage: &dyn KeyValueStorage) -> Result<Self, StoreError> {
        let mut store = Self::new();
        let Some(json) = storage.get_item(PRESETS_STORAGE_KEY)? else {
            return Ok(store);
        };
        let persisted: PersistedPresets = serde_json::from_str(&json)?;
        store
            .presets
            .extend(persisted.presets.into_iter().filter(|p| !p.is_built_in()));
        store.set_selected(persisted.selected_preset_id.as_deref());
        log::info!("Loaded {} presets", store.presets.len());
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    fn draft() -> PresetDraft {
        PresetDraft {
            name: "Gym".to_string(),
            difficulty_range: DifficultyRange::new("V2", "V5"),
            route_colors: colors(&[("V2", "#123456")]),
            ..Default::default()
        }
    }

    #[test]
    fn test_built_ins() {
        let store = PresetStore::new();
        assert_eq!(store.presets().len(), 6);
        assert_eq!(store.by_category(ClimbingCategory::Boulder).count(), 3);
        assert!(store.presets().iter().all(ClimbingPreset::is_built_in));
    }

    #[test]
    fn test_built_in_cannot_be_deleted() {
        let mut store = PresetStore::new();
        assert!(matches!(
            store.delete("boulder-beginner"),
            Err(StoreError::BuiltInPreset { .. })
        ));
        assert!(matches!(store.delete("nope"), Err(StoreError::PresetNotFound { .. })));
    }

    #[test]
    fn test_create_update_delete() {
        let mut store = PresetStore::new();
        let id = store.create(draft()).id.clone();
        store.set_selected(Some(&id));
        store
            .update(&id, PresetPatch {
                name: Some("Home wall".to_string()),
                ..Default::default()
            })
            .expect("update");
        assert_eq!(store.preset(&id).map(|p| p.name.as_str()), Some("Home wall"));
        let removed = store.delete(&id).expect("delete");
        assert!(!removed.is_built_in());
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_duplicate_built_in_is_user_preset() {
        let mut store = PresetStore::new();
        let copy = store.duplicate("trad-classic").expect("duplicate");
        assert_eq!(copy.name, "Classic Trad (Copy)");
        assert!(!copy.is_built_in());
        assert_eq!(copy.metadata.author, "User");
    }

    #[test]
    fn test_export_import() {
        let mut store = PresetStore::new();
        let json = store.export("mixed-alpine").expect("export");
        assert!(json.contains("exportedAt"));
        let imported = store.import(&json).expect("import");
        assert_eq!(imported.name, "Alpine Mixed (Imported)");
        assert_eq!(imported.metadata.author, "Buho Editor");
        assert!(!imported.is_built_in());
        assert_eq!(imported.route_colors.len(), 8);

        let bare = store.import("{}").expect("import");
        assert_eq!(bare.name, "Imported preset");
        assert_eq!(bare.metadata.author, "Unknown");
        assert!(store.import("[1, 2]").is_err());
    }

    #[test]
    fn test_route_color_falls_back_to_palette() {
        let store = PresetStore::new();
        let preset = store.preset("boulder-intermediate").expect("preset");
        assert_eq!(preset.route_color("V6"), "#FF5722");
        assert_eq!(preset.route_color("V0"), grade_color("V0"));
    }

    #[test]
    fn test_apply_sets_editor_style() {
        let store = PresetStore::new();
        let mut editor = RouteEditor::new();
        store
            .preset("boulder-advanced")
            .expect("preset")
            .apply_to(&mut editor);
        assert_eq!(editor.style().grade, "V8");
        assert_eq!(editor.style().color, "#E91E63");
    }

    #[test]
    fn test_only_user_presets_are_persisted() {
        let mut store = PresetStore::new();
        let id = store.create(draft()).id.clone();
        store.set_selected(Some(&id));
        let mut storage = MemoryStorage::new();
        store.save(&mut storage).expect("save");

        let json = storage
            .get_item(PRESETS_STORAGE_KEY)
            .expect("get")
            .expect("present");
        assert!(!json.contains("boulder-beginner"));

        let loaded = PresetStore::load(&storage).expect("load");
        assert_eq!(loaded.presets().len(), 7);
        assert_eq!(loaded.selected().map(|p| p.id.as_str()), Some(id.as_str()));
    }
}
