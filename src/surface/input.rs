//! Pointer input for the drawing surface.

use std::cell::Cell;
use std::rc::Rc;

use crate::constants::HIT_TOLERANCE;
use crate::editor::{DrawTool, EditTool, RouteEditor};
use crate::model::Position2D;
use crate::store::{ListenerId, TourStore};

use super::coords::SurfaceSize;
use super::hit_test::hit_test;
use super::render::{DrawCommand, RenderOptions, render_frame};

/// A pointer event in surface pixels (relative to the surface's top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Click { x: f64, y: f64 },
    DoubleClick { x: f64, y: f64 },
    /// Button pressed, starts a potential drag
    Press { x: f64, y: f64 },
    /// Pointer moved with the button held
    Drag { x: f64, y: f64 },
    Release { x: f64, y: f64 },
}

impl PointerEvent {
    pub fn position(&self) -> (f64, f64) {
        match *self {
            PointerEvent::Click { x, y }
            | PointerEvent::DoubleClick { x, y }
            | PointerEvent::Press { x, y }
            | PointerEvent::Drag { x, y }
            | PointerEvent::Release { x, y } => (x, y),
        }
    }
}

/// Translates pointer input into editor operations and renders frames.
#[derive(Debug)]
pub struct DrawingSurface {
    size: SurfaceSize,
    options: RenderOptions,
    hit_tolerance: f64,
    needs_redraw: Rc<Cell<bool>>,
    listener: Option<ListenerId>,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(SurfaceSize::default())
    }
}

impl DrawingSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            options: RenderOptions::default(),
            hit_tolerance: HIT_TOLERANCE,
            needs_redraw: Rc::new(Cell::new(true)),
            listener: None,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_hit_tolerance(mut self, tolerance: f64) -> Self {
        self.hit_tolerance = tolerance;
        self
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Update the rendered size. Stored points are untouched.
    pub fn resize(&mut self, size: SurfaceSize) {
        if size != self.size {
            log::debug!("Surface resized to {}x{}", size.width, size.height);
            self.size = size;
            self.needs_redraw.set(true);
        }
    }

    /// Subscribe to store changes so edits from other panels trigger a redraw.
    pub fn attach(&mut self, store: &mut TourStore) {
        self.detach(store);
        let flag = Rc::clone(&self.needs_redraw);
        self.listener = Some(store.subscribe(move |_| flag.set(true)));
    }

    pub fn detach(&mut self, store: &mut TourStore) {
        if let Some(id) = self.listener.take() {
            store.unsubscribe(id);
        }
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw.get()
    }

    pub fn request_redraw(&self) {
        self.needs_redraw.set(true);
    }

    /// Render the current scene and clear the redraw flag.
    pub fn render(&self, editor: &RouteEditor, store: &TourStore) -> Vec<DrawCommand> {
        self.needs_redraw.set(false);
        render_frame(store.current_scene(), editor, self.size, &self.options)
    }

    /// Apply one pointer event. Returns true if it changed anything.
    ///
    /// Ignored entirely while drawing mode is off.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        editor: &mut RouteEditor,
        store: &mut TourStore,
    ) -> bool {
        editor.observe_scene(store.current_scene_id());
        if !editor.drawing_mode() {
            return false;
        }
        let (x, y) = event.position();
        // Pointers captured past the surface edge still land on it.
        let at = self.size.to_normalized(x, y).clamped();

        let handled = match event {
            PointerEvent::Click { .. } => self.click(at, editor, store),
            PointerEvent::DoubleClick { .. } => {
                editor.is_drawing()
                    && editor.buffer().len() >= 2
                    && editor.commit(store).is_some()
            }
            PointerEvent::Press { .. } => {
                editor.edit_tool() == Some(EditTool::Move)
                    && self
                        .hit(at, store)
                        .is_some_and(|(id, _)| editor.begin_drag(store, &id, at))
            }
            PointerEvent::Drag { .. } => {
                if editor.is_dragging() {
                    editor.drag_to(store, at);
                    true
                } else {
                    false
                }
            }
            PointerEvent::Release { .. } => {
                let was_dragging = editor.is_dragging();
                editor.end_drag(store);
                was_dragging
            }
        };
        if handled {
            self.needs_redraw.set(true);
        }
        handled
    }

    fn click(&self, at: Position2D, editor: &mut RouteEditor, store: &mut TourStore) -> bool {
        match (editor.draw_tool(), editor.edit_tool()) {
            (Some(DrawTool::Point), _) => editor.place_point(store, at).is_some(),
            (Some(DrawTool::Line | DrawTool::Arrow), _) => {
                if !editor.is_drawing() {
                    editor.begin_drawing();
                }
                editor.add_point(at);
                true
            }
            (None, Some(EditTool::Select | EditTool::Move)) => {
                let hit = self.hit(at, store);
                editor.select_route(hit.as_ref().map(|(id, _)| id.as_str()));
                editor.select_point(hit.map(|(_, index)| index));
                true
            }
            (None, Some(EditTool::Delete)) => match self.hit(at, store) {
                Some((id, _)) => editor.delete_route(store, &id),
                None => false,
            },
            (None, None) => false,
        }
    }

    fn hit(&self, at: Position2D, store: &TourStore) -> Option<(String, usize)> {
        let scene = store.current_scene()?;
        hit_test(&scene.routes, at, self.hit_tolerance).map(|h| (h.route_id, h.point_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Route, RouteType, Scene, Tour};

    fn store_with_point_route() -> TourStore {
        let route = Route {
            id: "r".to_string(),
            name: "r".to_string(),
            difficulty: "V3".to_string(),
            color: "#FF6B6B".to_string(),
            stroke_width: 3,
            points: vec![Position2D::new(50.0, 50.0), Position2D::new(80.0, 80.0)],
            route_type: RouteType::Boulder,
            description: None,
        };
        TourStore::with_tour(Tour::new("t", "T").with_scene(Scene::new("s", "S").with_route(route)))
    }

    #[test]
    fn test_inert_without_drawing_mode() {
        let mut store = store_with_point_route();
        let mut editor = RouteEditor::for_store(&store);
        let mut surface = DrawingSurface::new(SurfaceSize::new(100.0, 100.0));
        let handled = surface.handle_pointer(
            PointerEvent::Click { x: 50.0, y: 50.0 },
            &mut editor,
            &mut store,
        );
        assert!(!handled);
        assert!(!editor.is_drawing());
    }

    #[test]
    fn test_clicks_outside_surface_are_clamped() {
        let mut store = store_with_point_route();
        let mut editor = RouteEditor::for_store(&store);
        editor.select_draw_tool(DrawTool::Line);
        let mut surface = DrawingSurface::new(SurfaceSize::new(100.0, 100.0));

        surface.handle_pointer(PointerEvent::Click { x: 250.0, y: -10.0 }, &mut editor, &mut store);
        assert_eq!(editor.buffer(), &[Position2D::new(100.0, 0.0)]);
        assert!(editor.buffer().iter().all(Position2D::is_in_bounds));
    }

    #[test]
    fn test_select_click_hits_nearest_point() {
        let mut store = store_with_point_route();
        let mut editor = RouteEditor::for_store(&store);
        editor.select_edit_tool(EditTool::Select);
        let mut surface = DrawingSurface::new(SurfaceSize::new(100.0, 100.0));

        surface.handle_pointer(PointerEvent::Click { x: 82.0, y: 80.0 }, &mut editor, &mut store);
        assert_eq!(editor.selected_route_id(), Some("r"));
        assert_eq!(editor.selected_point(), Some(1));

        surface.handle_pointer(PointerEvent::Click { x: 10.0, y: 10.0 }, &mut editor, &mut store);
        assert_eq!(editor.selected_route_id(), None);
    }

    #[test]
    fn test_delete_tool_removes_hit_route() {
        let mut store = store_with_point_route();
        let mut editor = RouteEditor::for_store(&store);
        editor.select_edit_tool(EditTool::Delete);
        let mut surface = DrawingSurface::new(SurfaceSize::new(100.0, 100.0));
        assert!(surface.handle_pointer(
            PointerEvent::Click { x: 51.0, y: 50.0 },
            &mut editor,
            &mut store,
        ));
        assert!(store.current_scene().is_some_and(|s| s.routes.is_empty()));
    }

    #[test]
    fn test_move_tool_drag() {
        let mut store = store_with_point_route();
        let mut editor = RouteEditor::for_store(&store);
        editor.select_edit_tool(EditTool::Move);
        let mut surface = DrawingSurface::new(SurfaceSize::new(200.0, 200.0));

        surface.handle_pointer(PointerEvent::Press { x: 100.0, y: 100.0 }, &mut editor, &mut store);
        surface.handle_pointer(PointerEvent::Drag { x: 110.0, y: 100.0 }, &mut editor, &mut store);
        surface.handle_pointer(
            PointerEvent::Release { x: 110.0, y: 100.0 },
            &mut editor,
            &mut store,
        );

        let points = store.current_scene().map(|s| s.routes[0].points.clone()).unwrap_or_default();
        assert_eq!(points[0], Position2D::new(55.0, 50.0));
        assert_eq!(points[1], Position2D::new(85.0, 80.0));
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_store_changes_request_redraw() {
        let mut store = store_with_point_route();
        let editor = RouteEditor::for_store(&store);
        let mut surface = DrawingSurface::new(SurfaceSize::new(100.0, 100.0));
        surface.attach(&mut store);
        surface.render(&editor, &store);
        assert!(!surface.needs_redraw());

        store.set_routes("s", Vec::new());
        assert!(surface.needs_redraw());

        surface.render(&editor, &store);
        surface.detach(&mut store);
        store.set_routes("s", Vec::new());
        assert!(!surface.needs_redraw());
    }
}
