//! Per-scene undo/redo for route edits.
//!
//! Every change the editor makes to a scene's route list is recorded as a
//! [`RouteCommand`] carrying enough state to replay it in either direction
//! against the [`TourStore`]. Each scene has its own bounded stack, so undo
//! after navigating never reaches into another scene.

use std::collections::{HashMap, VecDeque};

use crate::constants::DEFAULT_HISTORY_DEPTH;
use crate::model::Route;
use crate::store::TourStore;

// ============================================================================
// Commands
// ============================================================================

/// A reversible change to one scene's route list.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteCommand {
    /// A route was appended
    AddRoute { route: Route },
    /// A route was removed from `index`
    RemoveRoute { index: usize, route: Route },
    /// A route's fields or points changed
    ModifyRoute { before: Route, after: Route },
    /// Every route was removed
    ClearRoutes { routes: Vec<Route> },
}

impl RouteCommand {
    pub fn description(&self) -> String {
        match self {
            RouteCommand::AddRoute { route } => format!("Add '{}'", route.name),
            RouteCommand::RemoveRoute { route, .. } => format!("Delete '{}'", route.name),
            RouteCommand::ModifyRoute { after, .. } => format!("Edit '{}'", after.name),
            RouteCommand::ClearRoutes { routes } => format!("Clear {} routes", routes.len()),
        }
    }

    fn revert(&self, store: &mut TourStore, scene_id: &str) {
        match self {
            RouteCommand::AddRoute { route } => {
                store.remove_route(scene_id, &route.id);
            }
            RouteCommand::RemoveRoute { index, route } => {
                store.insert_route(scene_id, *index, route.clone());
            }
            RouteCommand::ModifyRoute { before, .. } => {
                store.replace_route(scene_id, before.clone());
            }
            RouteCommand::ClearRoutes { routes } => {
                store.set_routes(scene_id, routes.clone());
            }
        }
    }

    fn reapply(&self, store: &mut TourStore, scene_id: &str) {
        match self {
            RouteCommand::AddRoute { route } => {
                store.push_route(scene_id, route.clone());
            }
            RouteCommand::RemoveRoute { route, .. } => {
                store.remove_route(scene_id, &route.id);
            }
            RouteCommand::ModifyRoute { after, .. } => {
                store.replace_route(scene_id, after.clone());
            }
            RouteCommand::ClearRoutes { .. } => {
                store.set_routes(scene_id, Vec::new());
            }
        }
    }
}

// ============================================================================
// Undo Stack
// ============================================================================

/// Bounded undo/redo stacks for one scene.
///
/// The undo side is a ring: once `max_depth` entries are held, recording a
/// new command drops the oldest.
#[derive(Debug, Clone)]
pub struct UndoStack {
    undo: VecDeque<RouteCommand>,
    redo: Vec<RouteCommand>,
    max_depth: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::with_depth(DEFAULT_HISTORY_DEPTH)
    }
}

impl UndoStack {
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record a command. Clears the redo side.
    pub fn push(&mut self, command: RouteCommand) {
        log::debug!("📝 History: recorded '{}'", command.description());
        if self.undo.len() == self.max_depth {
            self.undo.pop_front();
        }
        self.undo.push_back(command);
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    fn pop_undo(&mut self) -> Option<RouteCommand> {
        let command = self.undo.pop_back()?;
        self.redo.push(command.clone());
        Some(command)
    }

    fn pop_redo(&mut self) -> Option<RouteCommand> {
        let command = self.redo.pop()?;
        self.undo.push_back(command.clone());
        Some(command)
    }

    pub fn undo_description(&self) -> Option<String> {
        self.undo.back().map(RouteCommand::description)
    }

    pub fn redo_description(&self) -> Option<String> {
        self.redo.last().map(RouteCommand::description)
    }
}

// ============================================================================
// Scene History
// ============================================================================

/// One [`UndoStack`] per scene id, created on first use.
#[derive(Debug, Clone)]
pub struct SceneHistory {
    stacks: HashMap<String, UndoStack>,
    max_depth: usize,
}

impl Default for SceneHistory {
    fn default() -> Self {
        Self::with_depth(DEFAULT_HISTORY_DEPTH)
    }
}

impl SceneHistory {
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            stacks: HashMap::new(),
            max_depth,
        }
    }

    pub fn record(&mut self, scene_id: &str, command: RouteCommand) {
        let depth = self.max_depth;
        self.stacks
            .entry(scene_id.to_string())
            .or_insert_with(|| UndoStack::with_depth(depth))
            .push(command);
    }

    pub fn stack(&self, scene_id: &str) -> Option<&UndoStack> {
        self.stacks.get(scene_id)
    }

    pub fn can_undo(&self, scene_id: &str) -> bool {
        self.stack(scene_id).is_some_and(UndoStack::can_undo)
    }

    pub fn can_redo(&self, scene_id: &str) -> bool {
        self.stack(scene_id).is_some_and(UndoStack::can_redo)
    }

    /// Revert the scene's latest command. Returns false when there is none.
    pub fn undo(&mut self, store: &mut TourStore, scene_id: &str) -> bool {
        let Some(command) = self.stacks.get_mut(scene_id).and_then(UndoStack::pop_undo) else {
            return false;
        };
        log::debug!("⏪ Undo: '{}'", command.description());
        command.revert(store, scene_id);
        true
    }

    /// Re-apply the scene's most recently undone command.
    pub fn redo(&mut self, store: &mut TourStore, scene_id: &str) -> bool {
        let Some(command) = self.stacks.get_mut(scene_id).and_then(UndoStack::pop_redo) else {
            return false;
        };
        log::debug!("⏩ Redo: '{}'", command.description());
        command.reapply(store, scene_id);
        true
    }

    /// Drop a scene's history, e.g. after the scene was removed.
    pub fn forget_scene(&mut self, scene_id: &str) {
        self.stacks.remove(scene_id);
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
        log::debug!("🗑️ History cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Position2D, RouteType, Scene, Tour};

    fn route(id: &str) -> Route {
        Route {
            id: id.to_string(),
            name: id.to_string(),
            difficulty: "V2".to_string(),
            color: "#FF6B6B".to_string(),
            stroke_width: 3,
            points: vec![Position2D::new(1.0, 1.0), Position2D::new(2.0, 2.0)],
            route_type: RouteType::Boulder,
            description: None,
        }
    }

    fn store() -> TourStore {
        TourStore::with_tour(
            Tour::new("t", "T")
                .with_scene(Scene::new("a", "A"))
                .with_scene(Scene::new("b", "B")),
        )
    }

    fn route_ids(store: &TourStore, scene: &str) -> Vec<String> {
        store
            .scene(scene)
            .map(|s| s.routes.iter().map(|r| r.id.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_undo_redo_add() {
        let mut store = store();
        let mut history = SceneHistory::default();
        store.push_route("a", route("r1"));
        history.record("a", RouteCommand::AddRoute { route: route("r1") });

        assert!(history.undo(&mut store, "a"));
        assert!(route_ids(&store, "a").is_empty());
        assert!(history.redo(&mut store, "a"));
        assert_eq!(route_ids(&store, "a"), vec!["r1"]);
    }

    #[test]
    fn test_undo_remove_restores_position() {
        let mut store = store();
        let mut history = SceneHistory::default();
        for id in ["r1", "r2", "r3"] {
            store.push_route("a", route(id));
        }
        let (index, removed) = store.remove_route("a", "r2").expect("removed");
        history.record("a", RouteCommand::RemoveRoute { index, route: removed });

        history.undo(&mut store, "a");
        assert_eq!(route_ids(&store, "a"), vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn test_histories_are_per_scene() {
        let mut store = store();
        let mut history = SceneHistory::default();
        store.push_route("a", route("r1"));
        history.record("a", RouteCommand::AddRoute { route: route("r1") });

        assert!(!history.can_undo("b"));
        assert!(!history.undo(&mut store, "b"));
        assert_eq!(route_ids(&store, "a"), vec!["r1"]);
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut stack = UndoStack::default();
        stack.push(RouteCommand::AddRoute { route: route("r1") });
        stack.pop_undo();
        assert!(stack.can_redo());
        stack.push(RouteCommand::AddRoute { route: route("r2") });
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut stack = UndoStack::with_depth(3);
        for i in 0..5 {
            stack.push(RouteCommand::AddRoute {
                route: route(&format!("r{i}")),
            });
        }
        assert_eq!(stack.undo_len(), 3);
        assert_eq!(stack.undo_description().as_deref(), Some("Add 'r4'"));
    }

    #[test]
    fn test_clear_routes_round_trip() {
        let mut store = store();
        let mut history = SceneHistory::default();
        store.push_route("a", route("r1"));
        store.push_route("a", route("r2"));
        let routes = store.scene("a").map(|s| s.routes.clone()).unwrap_or_default();
        store.set_routes("a", Vec::new());
        history.record("a", RouteCommand::ClearRoutes { routes });

        history.undo(&mut store, "a");
        assert_eq!(route_ids(&store, "a").len(), 2);
        history.redo(&mut store, "a");
        assert!(route_ids(&store, "a").is_empty());
    }
}
