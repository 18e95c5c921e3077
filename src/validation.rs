//! Advisory checks over a project and its tour.
//!
//! Validation never blocks editing. It is run on demand (e.g. before
//! publishing) and produces a list of findings grouped by severity.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::color_utils::is_valid_hex_color;
use crate::model::{HotspotKind, Project, Scene, Tour};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suggestion, not a problem.
    Info,
    /// Works, but the tour would be better with a fix.
    Warning,
    /// The tour is broken or incomplete.
    Error,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Project,
    Tour,
    Scene,
    Hotspot,
    Route,
}

/// One validation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Stable identifier, e.g. `scene-scene-001-no-image`.
    pub id: String,
    pub severity: Severity,
    pub category: Category,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotspot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
}

impl Finding {
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            category,
            title: title.into(),
            description: description.into(),
            scene_id: None,
            hotspot_id: None,
            route_id: None,
        }
    }

    pub fn error(
        id: impl Into<String>,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(id, Severity::Error, category, title, description)
    }

    pub fn warning(
        id: impl Into<String>,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(id, Severity::Warning, category, title, description)
    }

    pub fn info(
        id: impl Into<String>,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(id, Severity::Info, category, title, description)
    }

    pub fn in_scene(mut self, scene_id: impl Into<String>) -> Self {
        self.scene_id = Some(scene_id.into());
        self
    }

    pub fn for_hotspot(mut self, hotspot_id: impl Into<String>) -> Self {
        self.hotspot_id = Some(hotspot_id.into());
        self
    }

    pub fn for_route(mut self, route_id: impl Into<String>) -> Self {
        self.route_id = Some(route_id.into());
        self
    }
}

/// All findings from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn infos(&self) -> usize {
        self.count(Severity::Info)
    }

    pub fn has_errors(&self) -> bool {
        self.errors() > 0
    }

    /// A tour with no errors and no warnings is ready to publish.
    pub fn is_clean(&self) -> bool {
        self.errors() == 0 && self.warnings() == 0
    }

    /// Findings of one severity, in the order they were found.
    pub fn filtered(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn find(&self, id: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.id == id)
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn is_blank_opt(text: Option<&str>) -> bool {
    text.is_none_or(is_blank)
}

/// Validate a project together with the tour being edited.
pub fn validate(project: &Project, tour: &Tour) -> ValidationReport {
    let mut report = ValidationReport::new();
    validate_project(project, &mut report);
    validate_tour(tour, &mut report);
    log::debug!(
        "Validated '{}': {} errors, {} warnings, {} infos",
        project.name,
        report.errors(),
        report.warnings(),
        report.infos()
    );
    report
}

/// Validate every tour in a project.
pub fn validate_all(project: &Project) -> ValidationReport {
    let mut report = ValidationReport::new();
    validate_project(project, &mut report);
    for tour in &project.tours {
        validate_tour(tour, &mut report);
    }
    report
}

pub fn validate_project(project: &Project, report: &mut ValidationReport) {
    if is_blank(&project.name) {
        report.push(Finding::error(
            "project-no-name",
            Category::Project,
            "Project has no name",
            "Give the project a descriptive name",
        ));
    }
    if is_blank(&project.location) {
        report.push(Finding::warning(
            "project-no-location",
            Category::Project,
            "Project has no location",
            "A location makes the project easier to identify",
        ));
    }
    if is_blank(&project.description) {
        report.push(Finding::info(
            "project-no-description",
            Category::Project,
            "Project has no description",
            "A description explains what the project covers",
        ));
    }
    if project.difficulty.is_single_grade() {
        report.push(Finding::info(
            "project-single-difficulty",
            Category::Project,
            "Single difficulty",
            "The project spans one grade; widen the range if routes vary",
        ));
    }
}

/// Structure, per-scene and navigation checks. A tour without scenes stops
/// after the first finding.
pub fn validate_tour(tour: &Tour, report: &mut ValidationReport) {
    if tour.scenes.is_empty() {
        report.push(Finding::error(
            "tour-no-scenes",
            Category::Tour,
            "Tour has no scenes",
            "A tour needs at least one scene",
        ));
        return;
    }
    if tour.scenes.len() == 1 {
        report.push(Finding::warning(
            "tour-single-scene",
            Category::Tour,
            "Tour has a single scene",
            "Several scenes make for a better walkthrough",
        ));
    }
    if is_blank(&tour.description) {
        report.push(Finding::info(
            "tour-no-description",
            Category::Tour,
            "Tour has no description",
            "A description tells visitors what the tour is about",
        ));
    }

    let scene_ids: HashSet<&str> = tour.scenes.iter().map(|s| s.id.as_str()).collect();
    for scene in &tour.scenes {
        validate_scene(scene, &scene_ids, report);
    }
    validate_navigation(tour, report);
}

fn validate_scene(scene: &Scene, scene_ids: &HashSet<&str>, report: &mut ValidationReport) {
    let name = &scene.name;
    if is_blank(&scene.panorama_url) {
        report.push(
            Finding::error(
                format!("scene-{}-no-image", scene.id),
                Category::Scene,
                format!("Scene \"{name}\" has no image"),
                "The scene needs a panorama to be viewed",
            )
            .in_scene(&scene.id),
        );
    }
    if scene.hotspots.is_empty() {
        report.push(
            Finding::warning(
                format!("scene-{}-no-hotspots", scene.id),
                Category::Scene,
                format!("Scene \"{name}\" has no hotspots"),
                "Hotspots make the scene interactive",
            )
            .in_scene(&scene.id),
        );
    }
    if scene.routes.is_empty() {
        report.push(
            Finding::info(
                format!("scene-{}-no-routes", scene.id),
                Category::Scene,
                format!("Scene \"{name}\" has no routes"),
                "Consider drawing the climbs visible in this scene",
            )
            .in_scene(&scene.id),
        );
    }

    for hotspot in &scene.hotspots {
        if is_blank(&hotspot.title) {
            report.push(
                Finding::warning(
                    format!("hotspot-{}-no-title", hotspot.id),
                    Category::Hotspot,
                    "Hotspot has no title",
                    format!("A hotspot in scene \"{name}\" has no title"),
                )
                .in_scene(&scene.id)
                .for_hotspot(&hotspot.id),
            );
        }
        if hotspot.kind == HotspotKind::Navigation {
            if let Some(target) = &hotspot.target {
                if !scene_ids.contains(target.as_str()) {
                    report.push(
                        Finding::error(
                            format!("hotspot-{}-invalid-target", hotspot.id),
                            Category::Hotspot,
                            "Hotspot target missing",
                            format!(
                                "Hotspot \"{}\" points to scene '{}' which does not exist",
                                hotspot.title, target
                            ),
                        )
                        .in_scene(&scene.id)
                        .for_hotspot(&hotspot.id),
                    );
                }
            }
        }
        if hotspot.kind == HotspotKind::Info && is_blank_opt(hotspot.content.as_deref()) {
            report.push(
                Finding::warning(
                    format!("hotspot-{}-no-content", hotspot.id),
                    Category::Hotspot,
                    "Hotspot has no content",
                    format!("Info hotspot \"{}\" has no content", hotspot.title),
                )
                .in_scene(&scene.id)
                .for_hotspot(&hotspot.id),
            );
        }
    }

    for route in &scene.routes {
        let label = if is_blank(&route.name) {
            "Unnamed"
        } else {
            route.name.as_str()
        };
        if is_blank(&route.name) {
            report.push(
                Finding::warning(
                    format!("route-{}-no-name", route.id),
                    Category::Route,
                    "Route has no name",
                    format!("A route in scene \"{name}\" has no name"),
                )
                .in_scene(&scene.id)
                .for_route(&route.id),
            );
        }
        if is_blank(&route.difficulty) {
            report.push(
                Finding::error(
                    format!("route-{}-no-difficulty", route.id),
                    Category::Route,
                    "Route has no grade",
                    format!("Route \"{label}\" has no difficulty grade"),
                )
                .in_scene(&scene.id)
                .for_route(&route.id),
            );
        }
        if !is_valid_hex_color(&route.color) {
            report.push(
                Finding::warning(
                    format!("route-{}-invalid-color", route.id),
                    Category::Route,
                    "Route color unreadable",
                    format!("Route \"{label}\" has color '{}', expected #RRGGBB", route.color),
                )
                .in_scene(&scene.id)
                .for_route(&route.id),
            );
        }
        // One point is a point marker.
        if route.points.is_empty() {
            report.push(
                Finding::error(
                    format!("route-{}-insufficient-points", route.id),
                    Category::Route,
                    "Route is empty",
                    format!("Route \"{label}\" has no points"),
                )
                .in_scene(&scene.id)
                .for_route(&route.id),
            );
        }
    }
}

fn validate_navigation(tour: &Tour, report: &mut ValidationReport) {
    let mut outgoing: HashMap<&str, HashSet<&str>> = HashMap::new();
    for scene in &tour.scenes {
        let targets = scene
            .hotspots
            .iter()
            .filter(|h| h.kind == HotspotKind::Navigation)
            .filter_map(|h| h.target.as_deref())
            .collect();
        outgoing.insert(scene.id.as_str(), targets);
    }
    let incoming: HashSet<&str> = outgoing.values().flatten().copied().collect();

    let last = tour.scenes.len() - 1;
    for (index, scene) in tour.scenes.iter().enumerate() {
        if index > 0 && !incoming.contains(scene.id.as_str()) {
            report.push(
                Finding::warning(
                    format!("scene-{}-isolated", scene.id),
                    Category::Scene,
                    format!("Scene \"{}\" is isolated", scene.name),
                    "No navigation hotspot leads to this scene",
                )
                .in_scene(&scene.id),
            );
        }
        let exits = outgoing.get(scene.id.as_str()).map_or(0, HashSet::len);
        if exits == 0 && index < last {
            report.push(
                Finding::info(
                    format!("scene-{}-no-exit", scene.id),
                    Category::Scene,
                    format!("Scene \"{}\" has no exits", scene.name),
                    "No navigation hotspot leads out of this scene",
                )
                .in_scene(&scene.id),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DifficultyRange, Hotspot, Position2D, Position3D, ProjectDraft, Route, RouteType,
    };
    use crate::store::ProjectStore;

    fn project() -> Project {
        let mut store = ProjectStore::new();
        let mut draft = ProjectDraft::new("Crag");
        draft.location = "Valley".to_string();
        draft.description = "Boulders".to_string();
        draft.difficulty = DifficultyRange::new("V0", "V5");
        store.create_project(draft).clone()
    }

    fn route(id: &str, points: usize) -> Route {
        Route {
            id: id.to_string(),
            name: format!("Route {id}"),
            difficulty: "V3".to_string(),
            color: "#FF6B6B".to_string(),
            stroke_width: 3,
            points: (0..points)
                .map(|i| Position2D::new(10.0 * i as f64, 10.0))
                .collect(),
            route_type: RouteType::Boulder,
            description: None,
        }
    }

    fn linked_tour() -> Tour {
        let origin = Position3D::new(1.0, 0.0, 0.0);
        Tour::new("t", "Tour")
            .with_scene(
                Scene::new("a", "A")
                    .with_panorama("a.jpg")
                    .with_route(route("r1", 2))
                    .with_hotspot(
                        Hotspot::new("h1", HotspotKind::Navigation, origin).with_target("b"),
                    ),
            )
            .with_scene(
                Scene::new("b", "B")
                    .with_panorama("b.jpg")
                    .with_route(route("r2", 3))
                    .with_hotspot(
                        Hotspot::new("h2", HotspotKind::Navigation, origin).with_target("a"),
                    ),
            )
    }

    #[test]
    fn test_linked_tour_is_clean() {
        let mut tour = linked_tour();
        tour.description = "Two scenes".to_string();
        let report = validate(&project(), &tour);
        assert!(report.is_clean(), "{:?}", report.findings);
        assert_eq!(report.infos(), 0);
    }

    #[test]
    fn test_empty_tour_stops_early() {
        let report = validate(&project(), &Tour::new("t", "Empty"));
        assert_eq!(report.errors(), 1);
        assert!(report.find("tour-no-scenes").is_some());
        assert!(report.find("tour-no-description").is_none());
    }

    #[test]
    fn test_project_rules() {
        let mut store = ProjectStore::new();
        let mut draft = ProjectDraft::new("  ");
        draft.difficulty = DifficultyRange::new("V4", "V4");
        let project = store.create_project(draft).clone();
        let mut report = ValidationReport::new();
        validate_project(&project, &mut report);
        assert_eq!(report.find("project-no-name").map(|f| f.severity), Some(Severity::Error));
        assert_eq!(report.find("project-no-location").map(|f| f.severity), Some(Severity::Warning));
        assert_eq!(report.find("project-no-description").map(|f| f.severity), Some(Severity::Info));
        assert!(report.find("project-single-difficulty").is_some());
    }

    #[test]
    fn test_point_marker_is_accepted() {
        let mut tour = linked_tour();
        tour.scenes[0].routes.push(route("marker", 1));
        tour.scenes[0].routes.push(route("empty", 0));
        let report = validate(&project(), &tour);
        assert!(report.find("route-marker-insufficient-points").is_none());
        assert!(report.find("route-marker-invalid-color").is_none());
        let empty = report.find("route-empty-insufficient-points").expect("empty route");
        assert_eq!(empty.severity, Severity::Error);
        assert_eq!(empty.route_id.as_deref(), Some("empty"));
        assert_eq!(empty.scene_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_unreadable_color_warns() {
        let mut tour = linked_tour();
        tour.scenes[0].routes[0].color = "red".to_string();
        let report = validate(&project(), &tour);
        let finding = report.find("route-r1-invalid-color").expect("color finding");
        assert_eq!(finding.severity, Severity::Warning);
    }

    #[test]
    fn test_dangling_target_and_missing_content() {
        let mut tour = linked_tour();
        let origin = Position3D::new(0.0, 1.0, 0.0);
        tour.scenes[1].hotspots.push(
            Hotspot::new("h3", HotspotKind::Navigation, origin).with_target("gone"),
        );
        tour.scenes[1].hotspots.push(Hotspot::new("h4", HotspotKind::Info, origin));
        let report = validate(&project(), &tour);
        let dangling = report.find("hotspot-h3-invalid-target").expect("dangling");
        assert_eq!(dangling.hotspot_id.as_deref(), Some("h3"));
        assert_eq!(dangling.severity, Severity::Error);
        assert!(report.find("hotspot-h4-no-content").is_some());
    }

    #[test]
    fn test_navigation_graph() {
        let mut tour = linked_tour();
        tour.scenes[1].hotspots.clear();
        tour.scenes.push(Scene::new("c", "C").with_panorama("c.jpg"));
        let report = validate(&project(), &tour);
        // c is never linked to; b has no way out but is not last.
        assert!(report.find("scene-c-isolated").is_some());
        assert!(report.find("scene-b-no-exit").is_some());
        assert!(report.find("scene-c-no-exit").is_none());
        assert!(report.find("scene-a-isolated").is_none());
    }

    #[test]
    fn test_single_scene_warns() {
        let tour = Tour::new("t", "One").with_scene(Scene::new("a", "A"));
        let report = validate(&project(), &tour);
        assert!(report.find("tour-single-scene").is_some());
        assert!(report.find("scene-a-no-image").is_some());
        assert!(report.find("scene-a-no-exit").is_none());
        assert_eq!(report.filtered(Severity::Error).count(), report.errors());
    }
}
