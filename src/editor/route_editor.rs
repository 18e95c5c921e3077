//! The route editor state machine.
//!
//! Tracks the active tool, the in-progress point buffer, the selection and
//! layer visibility. Drawing moves through `Idle -> Drawing -> Idle`; the
//! selection is orthogonal to it. Every transition is total: calls that do
//! not apply in the current state are ignored rather than reported.
//!
//! The editor never caches scene data. Operations that read or write routes
//! take the [`TourStore`] and first check which scene is current, so a scene
//! switch through any path discards the previous scene's drawing.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::DEFAULT_HISTORY_DEPTH;
use crate::model::{IdGenerator, Position2D, Route, RoutePatch};
use crate::store::TourStore;

use super::history::{RouteCommand, SceneHistory};
use super::layers::LayerVisibility;
use super::style::{StrokeStyle, clamp_width};
use super::tools::{DrawTool, EditTool};

/// Offset applied to duplicated routes so the copy is visible.
const DUPLICATE_OFFSET: f64 = 5.0;
/// Duplicated points are kept at or below this coordinate.
const DUPLICATE_MAX_COORD: f64 = 95.0;

/// Drawing lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawState {
    #[default]
    Idle,
    Drawing,
}

/// Read-only view of the editor for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub draw_tool: Option<DrawTool>,
    pub edit_tool: Option<EditTool>,
    pub drawing_mode: bool,
    pub is_drawing: bool,
    pub buffer: Vec<Position2D>,
    pub selected_route_id: Option<String>,
    pub selected_point: Option<usize>,
    pub layers: BTreeMap<String, bool>,
    pub style: StrokeStyle,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// A move-tool drag in progress.
#[derive(Debug, Clone)]
struct RouteDrag {
    origin: Route,
    start: Position2D,
    moved: bool,
}

#[derive(Debug)]
pub struct RouteEditor {
    draw_tool: Option<DrawTool>,
    edit_tool: Option<EditTool>,
    drawing_mode: bool,
    state: DrawState,
    buffer: Vec<Position2D>,
    selected_route: Option<String>,
    selected_point: Option<usize>,
    layers: LayerVisibility,
    style: StrokeStyle,
    history: SceneHistory,
    ids: IdGenerator,
    observed_scene: Option<String>,
    drag: Option<RouteDrag>,
}

impl Default for RouteEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteEditor {
    pub fn new() -> Self {
        Self {
            draw_tool: None,
            edit_tool: None,
            drawing_mode: false,
            state: DrawState::Idle,
            buffer: Vec::new(),
            selected_route: None,
            selected_point: None,
            layers: LayerVisibility::new(),
            style: StrokeStyle::default(),
            history: SceneHistory::with_depth(DEFAULT_HISTORY_DEPTH),
            ids: IdGenerator::new(),
            observed_scene: None,
            drag: None,
        }
    }

    /// Create an editor already watching the store's current scene.
    pub fn for_store(store: &TourStore) -> Self {
        let mut editor = Self::new();
        editor.observe_scene(store.current_scene_id());
        editor
    }

    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = SceneHistory::with_depth(depth);
        self
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_layers(mut self, layers: LayerVisibility) -> Self {
        self.layers = layers;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn draw_tool(&self) -> Option<DrawTool> {
        self.draw_tool
    }

    pub fn edit_tool(&self) -> Option<EditTool> {
        self.edit_tool
    }

    pub fn drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == DrawState::Drawing
    }

    pub fn buffer(&self) -> &[Position2D] {
        &self.buffer
    }

    pub fn selected_route_id(&self) -> Option<&str> {
        self.selected_route.as_deref()
    }

    pub fn selected_point(&self) -> Option<usize> {
        self.selected_point
    }

    pub fn layers(&self) -> &LayerVisibility {
        &self.layers
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn history(&self) -> &SceneHistory {
        &self.history
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        let scene = self.observed_scene.as_deref().unwrap_or_default();
        EditorSnapshot {
            draw_tool: self.draw_tool,
            edit_tool: self.edit_tool,
            drawing_mode: self.drawing_mode,
            is_drawing: self.is_drawing(),
            buffer: self.buffer.clone(),
            selected_route_id: self.selected_route.clone(),
            selected_point: self.selected_point,
            layers: self.layers.entries().clone(),
            style: self.style.clone(),
            can_undo: self.history.can_undo(scene),
            can_redo: self.history.can_redo(scene),
        }
    }

    // ========================================================================
    // Scene tracking
    // ========================================================================

    /// Record which scene is current.
    ///
    /// A change of scene cancels any drawing, ends any drag and clears the
    /// selection. The first observation adopts the scene as-is.
    pub fn observe_scene(&mut self, scene_id: Option<&str>) {
        if self.observed_scene.as_deref() == scene_id {
            return;
        }
        if self.observed_scene.is_some() {
            log::debug!(
                "Scene switch {:?} -> {:?}: resetting editor state",
                self.observed_scene,
                scene_id
            );
            self.cancel();
            self.drag = None;
            self.clear_selection();
        }
        self.observed_scene = scene_id.map(str::to_string);
    }

    /// Observe the store's current scene and return its id.
    fn sync(&mut self, store: &TourStore) -> Option<String> {
        self.observe_scene(store.current_scene_id());
        self.observed_scene.clone()
    }

    // ========================================================================
    // Tools
    // ========================================================================

    /// Activate a draw tool and enter drawing mode. Any drawing in progress
    /// is discarded, including when the same tool is selected again.
    pub fn select_draw_tool(&mut self, tool: DrawTool) {
        self.cancel();
        self.drag = None;
        self.clear_selection();
        self.draw_tool = Some(tool);
        self.edit_tool = None;
        self.drawing_mode = true;
        log::debug!("Draw tool: {}", tool.name());
    }

    /// Activate an edit tool. Any drawing in progress is discarded.
    pub fn select_edit_tool(&mut self, tool: EditTool) {
        self.cancel();
        self.drag = None;
        self.draw_tool = None;
        self.edit_tool = Some(tool);
        self.drawing_mode = true;
        log::debug!("Edit tool: {}", tool.name());
    }

    /// Deactivate both tool groups.
    pub fn clear_tools(&mut self) {
        self.cancel();
        self.drag = None;
        self.draw_tool = None;
        self.edit_tool = None;
    }

    /// Turn drawing on (line tool) or off (no tool).
    pub fn set_drawing_mode(&mut self, enabled: bool) {
        if enabled {
            self.select_draw_tool(DrawTool::Line);
        } else {
            self.clear_tools();
        }
        self.drawing_mode = enabled;
        log::debug!("Drawing mode: {}", enabled);
    }

    pub fn toggle_drawing_mode(&mut self) {
        self.set_drawing_mode(!self.drawing_mode);
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Enter `Drawing` with an empty buffer. Needs an active draw tool and
    /// no drawing in progress.
    pub fn begin_drawing(&mut self) -> bool {
        if self.draw_tool.is_none() || self.is_drawing() {
            return false;
        }
        self.state = DrawState::Drawing;
        self.buffer.clear();
        log::debug!("Drawing started");
        true
    }

    /// Append a normalized point to the buffer. Ignored unless drawing.
    pub fn add_point(&mut self, point: Position2D) {
        if !self.is_drawing() {
            return;
        }
        self.buffer.push(point);
        log::trace!("Buffered point ({:.2}, {:.2})", point.x, point.y);
    }

    /// Store the buffer as a new route in the current scene.
    ///
    /// Line and arrow tools need at least two points; with fewer the call is
    /// ignored and drawing continues. Returns the new route's id.
    pub fn commit(&mut self, store: &mut TourStore) -> Option<String> {
        let scene_id = self.sync(store)?;
        if !self.is_drawing() {
            return None;
        }
        let tool = self.draw_tool?;
        let points = if tool.accumulates() {
            if self.buffer.len() < Route::MIN_LINE_POINTS {
                log::debug!("Commit ignored: {} point(s) buffered", self.buffer.len());
                return None;
            }
            self.buffer.clone()
        } else {
            vec![*self.buffer.first()?]
        };

        let ordinal = store.scene(&scene_id)?.routes.len() + 1;
        let route = self.new_route(tool, points, ordinal);
        let route_id = route.id.clone();
        if !store.push_route(&scene_id, route.clone()) {
            return None;
        }
        log::debug!(
            "Committed {} '{}' with {} point(s) to {}",
            tool.name(),
            route.name,
            route.points.len(),
            scene_id
        );
        self.history.record(&scene_id, RouteCommand::AddRoute { route });
        self.state = DrawState::Idle;
        self.buffer.clear();
        Some(route_id)
    }

    fn new_route(&mut self, tool: DrawTool, points: Vec<Position2D>, ordinal: usize) -> Route {
        let name = match tool {
            DrawTool::Point => format!("Point {ordinal}"),
            DrawTool::Line | DrawTool::Arrow => format!("Route {ordinal}"),
        };
        Route {
            id: self.ids.next(tool.id_prefix()),
            name,
            difficulty: self.style.grade.clone(),
            color: self.style.color.clone(),
            stroke_width: self.style.width(),
            points,
            route_type: tool.route_type(),
            description: None,
        }
    }

    /// Point tool: begin, add and commit in one step.
    pub fn place_point(&mut self, store: &mut TourStore, point: Position2D) -> Option<String> {
        if self.draw_tool != Some(DrawTool::Point) {
            return None;
        }
        self.cancel();
        self.begin_drawing();
        self.add_point(point);
        let committed = self.commit(store);
        if committed.is_none() {
            self.cancel();
        }
        committed
    }

    /// Discard the buffer and return to `Idle`. Safe to call at any time.
    pub fn cancel(&mut self) -> bool {
        if !self.is_drawing() {
            return false;
        }
        log::debug!("Drawing cancelled ({} point(s) discarded)", self.buffer.len());
        self.state = DrawState::Idle;
        self.buffer.clear();
        true
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Set or clear the selected route. Resets the selected point.
    pub fn select_route(&mut self, route_id: Option<&str>) {
        self.selected_route = route_id.map(str::to_string);
        self.selected_point = None;
    }

    /// Select one point of the selected route. Ignored without a selection.
    pub fn select_point(&mut self, index: Option<usize>) {
        if self.selected_route.is_some() {
            self.selected_point = index;
        }
    }

    pub fn clear_selection(&mut self) {
        self.select_route(None);
    }

    /// Drop the selection if its route no longer exists in the current scene.
    fn prune_selection(&mut self, store: &TourStore) {
        let Some(id) = self.selected_route.as_deref() else {
            return;
        };
        match store.current_scene().and_then(|s| s.route(id)) {
            None => self.clear_selection(),
            Some(route) => {
                if self.selected_point.is_some_and(|i| i >= route.points.len()) {
                    self.selected_point = None;
                }
            }
        }
    }

    // ========================================================================
    // Layers and style
    // ========================================================================

    pub fn set_layer_visible(&mut self, grade: &str, visible: bool) {
        self.layers.set_visible(grade, visible);
    }

    pub fn toggle_layer_visible(&mut self, grade: &str) -> bool {
        self.layers.toggle(grade)
    }

    pub fn set_all_layers_visible(&mut self, visible: bool) {
        self.layers.set_all(visible);
    }

    pub fn is_layer_visible(&self, grade: &str) -> bool {
        self.layers.is_visible(grade)
    }

    pub fn set_stroke_color(&mut self, color: impl Into<String>) {
        self.style.color = color.into();
    }

    pub fn set_stroke_width(&mut self, width: u8) {
        self.style.set_width(width);
    }

    pub fn set_grade(&mut self, grade: impl Into<String>) {
        self.style.grade = grade.into();
    }

    // ========================================================================
    // Route edits
    // ========================================================================

    /// Apply a partial update to a route in the current scene.
    ///
    /// Rejected if the new points would leave the scene, empty the route,
    /// or shrink a line below two points.
    pub fn update_route(
        &mut self,
        store: &mut TourStore,
        route_id: &str,
        patch: RoutePatch,
    ) -> bool {
        let Some(scene_id) = self.sync(store) else {
            return false;
        };
        let Some(before) = store.scene(&scene_id).and_then(|s| s.route(route_id)).cloned() else {
            return false;
        };
        let mut after = before.clone();
        after.apply(patch);
        after.stroke_width = clamp_width(after.stroke_width);
        if !keeps_shape(&before, &after) {
            log::debug!(
                "Update of {} rejected: {} point(s) would remain",
                route_id,
                after.points.len()
            );
            return false;
        }
        self.replace_with_history(store, &scene_id, before, after)
    }

    /// Translate a route, keeping its points inside the scene.
    pub fn move_route(&mut self, store: &mut TourStore, route_id: &str, dx: f64, dy: f64) -> bool {
        let Some(scene_id) = self.sync(store) else {
            return false;
        };
        let Some(before) = store.scene(&scene_id).and_then(|s| s.route(route_id)).cloned() else {
            return false;
        };
        let after = before.translated(dx, dy);
        self.replace_with_history(store, &scene_id, before, after)
    }

    fn replace_with_history(
        &mut self,
        store: &mut TourStore,
        scene_id: &str,
        before: Route,
        after: Route,
    ) -> bool {
        if before == after || !store.replace_route(scene_id, after.clone()) {
            return false;
        }
        self.history
            .record(scene_id, RouteCommand::ModifyRoute { before, after });
        self.prune_selection(store);
        true
    }

    /// Copy a route next to the original and select the copy.
    pub fn duplicate_route(&mut self, store: &mut TourStore, route_id: &str) -> Option<String> {
        let scene_id = self.sync(store)?;
        let original = store.scene(&scene_id)?.route(route_id)?.clone();
        let prefix = if original.is_point_marker() { "point" } else { "route" };
        let copy = Route {
            id: self.ids.next(prefix),
            name: format!("{} (Copy)", original.name),
            points: original
                .points
                .iter()
                .map(|p| {
                    Position2D::new(
                        (p.x + DUPLICATE_OFFSET).min(DUPLICATE_MAX_COORD),
                        (p.y + DUPLICATE_OFFSET).min(DUPLICATE_MAX_COORD),
                    )
                })
                .collect(),
            ..original
        };
        let copy_id = copy.id.clone();
        if !store.push_route(&scene_id, copy.clone()) {
            return None;
        }
        self.history
            .record(&scene_id, RouteCommand::AddRoute { route: copy });
        self.select_route(Some(&copy_id));
        Some(copy_id)
    }

    pub fn delete_route(&mut self, store: &mut TourStore, route_id: &str) -> bool {
        let Some(scene_id) = self.sync(store) else {
            return false;
        };
        let Some((index, route)) = store.remove_route(&scene_id, route_id) else {
            return false;
        };
        log::debug!("Deleted route '{}' from {}", route.name, scene_id);
        self.history
            .record(&scene_id, RouteCommand::RemoveRoute { index, route });
        self.prune_selection(store);
        true
    }

    pub fn delete_selected(&mut self, store: &mut TourStore) -> bool {
        self.sync(store);
        match self.selected_route.clone() {
            Some(id) => self.delete_route(store, &id),
            None => false,
        }
    }

    /// Remove every route of the current scene as one undoable step.
    pub fn clear_routes(&mut self, store: &mut TourStore) -> bool {
        let Some(scene_id) = self.sync(store) else {
            return false;
        };
        let routes = match store.scene(&scene_id) {
            Some(scene) if !scene.routes.is_empty() => scene.routes.clone(),
            _ => return false,
        };
        store.set_routes(&scene_id, Vec::new());
        log::debug!("Cleared {} routes from {}", routes.len(), scene_id);
        self.history
            .record(&scene_id, RouteCommand::ClearRoutes { routes });
        self.clear_selection();
        true
    }

    // ========================================================================
    // Move-tool drags
    // ========================================================================

    /// Start dragging a route from a normalized position.
    pub fn begin_drag(&mut self, store: &TourStore, route_id: &str, start: Position2D) -> bool {
        self.observe_scene(store.current_scene_id());
        if self.edit_tool != Some(EditTool::Move) {
            return false;
        }
        let Some(origin) = store.current_scene().and_then(|s| s.route(route_id)).cloned() else {
            return false;
        };
        self.select_route(Some(route_id));
        self.drag = Some(RouteDrag {
            origin,
            start,
            moved: false,
        });
        true
    }

    /// Move the dragged route so it follows the pointer.
    pub fn drag_to(&mut self, store: &mut TourStore, at: Position2D) {
        let Some(scene_id) = self.sync(store) else {
            return;
        };
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let moved = drag.origin.translated(at.x - drag.start.x, at.y - drag.start.y);
        drag.moved = true;
        store.replace_route(&scene_id, moved);
    }

    /// Finish the drag, recording a single history entry for it.
    pub fn end_drag(&mut self, store: &mut TourStore) -> bool {
        let Some(scene_id) = self.sync(store) else {
            return false;
        };
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if !drag.moved {
            return false;
        }
        let Some(after) = store.scene(&scene_id).and_then(|s| s.route(&drag.origin.id)).cloned()
        else {
            return false;
        };
        if after == drag.origin {
            return false;
        }
        self.history.record(
            &scene_id,
            RouteCommand::ModifyRoute {
                before: drag.origin,
                after,
            },
        );
        true
    }

    // ========================================================================
    // History
    // ========================================================================

    pub fn can_undo(&self, store: &TourStore) -> bool {
        store
            .current_scene_id()
            .is_some_and(|id| self.history.can_undo(id))
    }

    pub fn can_redo(&self, store: &TourStore) -> bool {
        store
            .current_scene_id()
            .is_some_and(|id| self.history.can_redo(id))
    }

    /// Revert the current scene's latest route change.
    pub fn undo(&mut self, store: &mut TourStore) -> bool {
        let Some(scene_id) = self.sync(store) else {
            return false;
        };
        self.drag = None;
        let undone = self.history.undo(store, &scene_id);
        self.prune_selection(store);
        undone
    }

    pub fn redo(&mut self, store: &mut TourStore) -> bool {
        let Some(scene_id) = self.sync(store) else {
            return false;
        };
        self.drag = None;
        let redone = self.history.redo(store, &scene_id);
        self.prune_selection(store);
        redone
    }

    /// Forget history for a scene that no longer exists.
    pub fn forget_scene(&mut self, scene_id: &str) {
        self.history.forget_scene(scene_id);
    }

    /// Drop every scene's history along with any drawing, drag and
    /// selection. Used when a different tour is loaded, since scene ids
    /// may repeat between tours.
    pub fn reset_history(&mut self) {
        self.cancel();
        self.drag = None;
        self.clear_selection();
        self.history.clear();
    }
}

/// A stored route stays committable, in bounds, and a line stays a line.
fn keeps_shape(before: &Route, after: &Route) -> bool {
    let line_floor = if before.is_point_marker() {
        1
    } else {
        Route::MIN_LINE_POINTS
    };
    after.is_committable()
        && after.points.len() >= line_floor
        && after.points.iter().all(Position2D::is_in_bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Scene, Tour};

    fn store() -> TourStore {
        TourStore::with_tour(
            Tour::new("t", "T")
                .with_scene(Scene::new("scene-001", "Main"))
                .with_scene(Scene::new("scene-002", "Side")),
        )
    }

    fn routes(store: &TourStore) -> Vec<Route> {
        store.current_scene().map(|s| s.routes.clone()).unwrap_or_default()
    }

    fn draw_line(editor: &mut RouteEditor, store: &mut TourStore) -> Option<String> {
        editor.select_draw_tool(DrawTool::Line);
        editor.begin_drawing();
        editor.add_point(Position2D::new(10.0, 10.0));
        editor.add_point(Position2D::new(20.0, 30.0));
        editor.commit(store)
    }

    #[test]
    fn test_tool_exclusivity() {
        let mut editor = RouteEditor::new();
        editor.select_edit_tool(EditTool::Move);
        editor.select_draw_tool(DrawTool::Arrow);
        assert_eq!(editor.edit_tool(), None);
        assert_eq!(editor.draw_tool(), Some(DrawTool::Arrow));
        editor.select_edit_tool(EditTool::Select);
        assert_eq!(editor.draw_tool(), None);
    }

    #[test]
    fn test_begin_requires_draw_tool() {
        let mut editor = RouteEditor::new();
        assert!(!editor.begin_drawing());
        editor.add_point(Position2D::new(1.0, 1.0));
        assert!(editor.buffer().is_empty());
        assert_eq!(editor.state(), DrawState::Idle);
    }

    #[test]
    fn test_short_commit_is_ignored_and_keeps_drawing() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        editor.select_draw_tool(DrawTool::Line);
        editor.begin_drawing();
        assert_eq!(editor.commit(&mut store), None);
        editor.add_point(Position2D::new(5.0, 5.0));
        assert_eq!(editor.commit(&mut store), None);
        assert!(editor.is_drawing());
        assert!(routes(&store).is_empty());
    }

    #[test]
    fn test_commit_snapshots_buffer_and_style() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        editor.set_stroke_color("#00FF00");
        editor.set_stroke_width(6);
        let id = draw_line(&mut editor, &mut store).expect("committed");

        let stored = routes(&store);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].color, "#00FF00");
        assert_eq!(stored[0].stroke_width, 6);
        assert_eq!(stored[0].difficulty, "V3");
        assert_eq!(stored[0].name, "Route 1");
        assert_eq!(editor.state(), DrawState::Idle);
        assert!(editor.buffer().is_empty());
    }

    #[test]
    fn test_reselecting_tool_cancels() {
        let mut editor = RouteEditor::new();
        editor.select_draw_tool(DrawTool::Line);
        editor.begin_drawing();
        editor.add_point(Position2D::new(1.0, 1.0));
        editor.select_draw_tool(DrawTool::Line);
        assert!(!editor.is_drawing());
        assert!(editor.buffer().is_empty());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut editor = RouteEditor::new();
        let before = editor.snapshot();
        assert!(!editor.cancel());
        assert!(!editor.cancel());
        assert_eq!(editor.snapshot(), before);
    }

    #[test]
    fn test_point_tool_is_atomic() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        editor.select_draw_tool(DrawTool::Point);
        let id = editor
            .place_point(&mut store, Position2D::new(40.0, 60.0))
            .expect("placed");
        assert!(id.starts_with("point-"));
        assert_eq!(editor.state(), DrawState::Idle);
        let stored = routes(&store);
        assert_eq!(stored.len(), 1);
        assert!(stored[0].is_point_marker());
    }

    #[test]
    fn test_scene_switch_discards_drawing() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        editor.select_draw_tool(DrawTool::Line);
        editor.begin_drawing();
        editor.add_point(Position2D::new(1.0, 1.0));
        editor.add_point(Position2D::new(2.0, 2.0));
        store.navigate_next();
        assert_eq!(editor.commit(&mut store), None);
        assert!(!editor.is_drawing());
        assert!(store.scenes().iter().all(|s| s.routes.is_empty()));
    }

    #[test]
    fn test_drawing_mode_toggle() {
        let mut editor = RouteEditor::new();
        editor.set_drawing_mode(true);
        assert_eq!(editor.draw_tool(), Some(DrawTool::Line));
        editor.begin_drawing();
        editor.set_drawing_mode(false);
        assert!(!editor.is_drawing());
        assert_eq!((editor.draw_tool(), editor.edit_tool()), (None, None));
    }

    #[test]
    fn test_undo_redo_commit() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        draw_line(&mut editor, &mut store);
        assert!(editor.undo(&mut store));
        assert!(routes(&store).is_empty());
        assert!(editor.redo(&mut store));
        assert_eq!(routes(&store).len(), 1);
        assert!(!editor.redo(&mut store));
    }

    #[test]
    fn test_update_route_records_history() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        let id = draw_line(&mut editor, &mut store).expect("committed");
        let patch = RoutePatch {
            name: Some("La Marie Rose".to_string()),
            stroke_width: Some(40),
            ..Default::default()
        };
        assert!(editor.update_route(&mut store, &id, patch));
        assert_eq!(routes(&store)[0].name, "La Marie Rose");
        assert_eq!(routes(&store)[0].stroke_width, 8);

        editor.undo(&mut store);
        assert_eq!(routes(&store)[0].name, "Route 1");
        assert!(!editor.update_route(&mut store, "missing", RoutePatch::default()));
    }

    #[test]
    fn test_update_route_rejects_broken_shapes() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        let id = draw_line(&mut editor, &mut store).expect("committed");
        let original = routes(&store)[0].points.clone();

        let patches = [
            Vec::new(),
            vec![Position2D::new(50.0, 50.0)],
            vec![Position2D::new(10.0, 10.0), Position2D::new(120.0, 30.0)],
        ];
        for points in patches {
            let patch = RoutePatch {
                points: Some(points),
                ..Default::default()
            };
            assert!(!editor.update_route(&mut store, &id, patch));
            assert_eq!(routes(&store)[0].points, original);
        }

        // Only the commit is on the stack.
        assert!(editor.undo(&mut store));
        assert!(!editor.can_undo(&store));
    }

    #[test]
    fn test_update_point_marker_keeps_single_point() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        editor.select_draw_tool(DrawTool::Point);
        let id = editor
            .place_point(&mut store, Position2D::new(40.0, 60.0))
            .expect("placed");
        let patch = RoutePatch {
            points: Some(vec![Position2D::new(70.0, 20.0)]),
            ..Default::default()
        };
        assert!(editor.update_route(&mut store, &id, patch));
        assert_eq!(routes(&store)[0].points, vec![Position2D::new(70.0, 20.0)]);

        let emptied = RoutePatch {
            points: Some(Vec::new()),
            ..Default::default()
        };
        assert!(!editor.update_route(&mut store, &id, emptied));
        assert_eq!(routes(&store)[0].points.len(), 1);
    }

    #[test]
    fn test_reset_history_drops_every_scene() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        let id = draw_line(&mut editor, &mut store).expect("committed");
        editor.select_route(Some(&id));
        editor.reset_history();
        assert!(!editor.can_undo(&store));
        assert!(!editor.undo(&mut store));
        assert_eq!(editor.selected_route_id(), None);
        assert_eq!(routes(&store).len(), 1);
    }

    #[test]
    fn test_move_route_clamps() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        let id = draw_line(&mut editor, &mut store).expect("committed");
        assert!(editor.move_route(&mut store, &id, -50.0, 0.0));
        let points = &routes(&store)[0].points;
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[1].x, 0.0);
    }

    #[test]
    fn test_delete_selected_then_undo() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        let id = draw_line(&mut editor, &mut store).expect("committed");
        editor.select_edit_tool(EditTool::Select);
        editor.select_route(Some(&id));
        assert!(editor.delete_selected(&mut store));
        assert!(routes(&store).is_empty());
        assert_eq!(editor.selected_route_id(), None);
        editor.undo(&mut store);
        assert_eq!(routes(&store).len(), 1);
    }

    #[test]
    fn test_clear_routes_is_one_step() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        draw_line(&mut editor, &mut store);
        draw_line(&mut editor, &mut store);
        assert!(editor.clear_routes(&mut store));
        assert!(!editor.clear_routes(&mut store));
        editor.undo(&mut store);
        assert_eq!(routes(&store).len(), 2);
    }

    #[test]
    fn test_duplicate_offsets_and_selects() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        let id = draw_line(&mut editor, &mut store).expect("committed");
        let copy = editor.duplicate_route(&mut store, &id).expect("duplicated");
        let stored = routes(&store);
        assert_eq!(stored[1].name, "Route 1 (Copy)");
        assert_eq!(stored[1].points[0], Position2D::new(15.0, 15.0));
        assert_eq!(editor.selected_route_id(), Some(copy.as_str()));
    }

    #[test]
    fn test_drag_records_single_entry() {
        let mut store = store();
        let mut editor = RouteEditor::for_store(&store);
        let id = draw_line(&mut editor, &mut store).expect("committed");
        editor.select_edit_tool(EditTool::Move);
        assert!(editor.begin_drag(&store, &id, Position2D::new(10.0, 10.0)));
        editor.drag_to(&mut store, Position2D::new(12.0, 10.0));
        editor.drag_to(&mut store, Position2D::new(15.0, 12.0));
        assert!(editor.end_drag(&mut store));
        assert_eq!(routes(&store)[0].points[0], Position2D::new(15.0, 12.0));

        assert!(editor.undo(&mut store));
        assert_eq!(routes(&store)[0].points[0], Position2D::new(10.0, 10.0));
        // Only the commit is left.
        assert!(editor.undo(&mut store));
        assert!(!editor.undo(&mut store));
    }

    #[test]
    fn test_select_point_requires_route() {
        let mut editor = RouteEditor::new();
        editor.select_point(Some(1));
        assert_eq!(editor.selected_point(), None);
        editor.select_route(Some("r"));
        editor.select_point(Some(1));
        assert_eq!(editor.selected_point(), Some(1));
        editor.select_route(Some("other"));
        assert_eq!(editor.selected_point(), None);
    }
}
