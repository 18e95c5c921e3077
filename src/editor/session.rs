//! Application state for one editing session.
//!
//! Owns the tour store, the route editor and the drawing surface, and routes
//! mode switches, navigation, keyboard shortcuts and hotspot placement
//! through them so every entry point observes the same scene-switch rules.

use crate::config::EditorConfig;
use crate::keybindings::{EditorAction, KeyBindings, KeyPress};
use crate::model::{Hotspot, HotspotKind, IdGenerator, Position3D, Scene, Tour};
use crate::store::TourStore;
use crate::surface::{DrawCommand, DrawingSurface, PointerEvent, SurfaceSize};

use super::route_editor::RouteEditor;
use super::tools::EditorMode;

/// Content given to freshly placed info hotspots.
const DEFAULT_INFO_CONTENT: &str = "Hotspot information";

#[derive(Debug)]
pub struct EditorSession {
    store: TourStore,
    editor: RouteEditor,
    surface: DrawingSurface,
    mode: EditorMode,
    placing_hotspot: Option<HotspotKind>,
    keybindings: KeyBindings,
    ids: IdGenerator,
}

impl EditorSession {
    pub fn new(tour: Tour) -> Self {
        Self::with_config(tour, &EditorConfig::default())
    }

    pub fn with_config(tour: Tour, config: &EditorConfig) -> Self {
        let prefs = &config.preferences;
        let mut store = TourStore::with_tour(tour);
        let editor = RouteEditor::for_store(&store)
            .with_history_depth(prefs.history_depth)
            .with_style(prefs.stroke_style());
        let mut surface = DrawingSurface::default()
            .with_options(prefs.render_options())
            .with_hit_tolerance(prefs.hit_tolerance);
        surface.attach(&mut store);
        Self {
            store,
            editor,
            surface,
            mode: EditorMode::default(),
            placing_hotspot: None,
            keybindings: config.keybindings.clone(),
            ids: IdGenerator::new(),
        }
    }

    pub fn store(&self) -> &TourStore {
        &self.store
    }

    pub fn editor(&self) -> &RouteEditor {
        &self.editor
    }

    /// Mutable access to editor and store together, for operations that
    /// take both.
    pub fn parts_mut(&mut self) -> (&mut RouteEditor, &mut TourStore) {
        (&mut self.editor, &mut self.store)
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    pub fn set_keybindings(&mut self, keybindings: KeyBindings) {
        self.keybindings = keybindings;
    }

    /// Replace the loaded tour. Drawing state and undo history from the old
    /// tour are dropped, since scene ids may repeat across tours.
    pub fn load_tour(&mut self, tour: Tour) {
        self.editor.reset_history();
        self.store.set_current_tour(tour);
        self.sync_scene();
    }

    pub fn add_scene(&mut self, scene: Scene) {
        self.store.add_scene(scene);
        self.sync_scene();
    }

    /// Remove a scene and forget its undo history, so a later scene with the
    /// same id starts clean.
    pub fn remove_scene(&mut self, scene_id: &str) -> Option<Scene> {
        let removed = self.store.remove_scene(scene_id)?;
        self.editor.forget_scene(scene_id);
        self.sync_scene();
        Some(removed)
    }

    fn sync_scene(&mut self) {
        self.editor.observe_scene(self.store.current_scene_id());
    }

    // ========================================================================
    // Mode
    // ========================================================================

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Switch between preview and edit. Any drawing is cancelled first;
    /// leaving edit mode also turns drawing mode off and stops placement.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.editor.cancel();
        if mode == self.mode {
            return;
        }
        if mode == EditorMode::Preview {
            self.editor.set_drawing_mode(false);
            self.placing_hotspot = None;
        }
        log::debug!("Mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.surface.request_redraw();
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn navigate_to_scene(&mut self, scene_id: &str) -> bool {
        let moved = self.store.navigate_to_scene(scene_id);
        self.sync_scene();
        moved
    }

    pub fn navigate_to_index(&mut self, index: usize) -> bool {
        let moved = self.store.navigate_to_index(index);
        self.sync_scene();
        moved
    }

    pub fn navigate_next(&mut self) -> bool {
        let moved = self.store.navigate_next();
        self.sync_scene();
        moved
    }

    pub fn navigate_prev(&mut self) -> bool {
        let moved = self.store.navigate_prev();
        self.sync_scene();
        moved
    }

    pub fn navigate_first(&mut self) -> bool {
        let moved = self.store.navigate_first();
        self.sync_scene();
        moved
    }

    pub fn navigate_last(&mut self) -> bool {
        let moved = self.store.navigate_last();
        self.sync_scene();
        moved
    }

    // ========================================================================
    // Hotspot placement
    // ========================================================================

    pub fn placing_hotspot(&self) -> Option<HotspotKind> {
        self.placing_hotspot
    }

    /// Arm hotspot placement. Only available in edit mode.
    pub fn start_placing_hotspot(&mut self, kind: HotspotKind) -> bool {
        if self.mode != EditorMode::Edit {
            return false;
        }
        self.editor.cancel();
        self.placing_hotspot = Some(kind);
        true
    }

    pub fn cancel_placing_hotspot(&mut self) {
        self.placing_hotspot = None;
    }

    /// Drop the armed hotspot at a sphere direction and end placement.
    pub fn place_hotspot(&mut self, position: Position3D) -> Option<String> {
        let kind = self.placing_hotspot?;
        let scene_id = self.store.current_scene_id()?.to_string();
        let mut hotspot = Hotspot::new(self.ids.next("hotspot"), kind, position.normalized());
        if kind == HotspotKind::Info {
            hotspot.content = Some(DEFAULT_INFO_CONTENT.to_string());
        }
        let id = hotspot.id.clone();
        if !self.store.add_hotspot(&scene_id, hotspot) {
            return None;
        }
        log::debug!("Placed {} hotspot {} in {}", kind.name(), id, scene_id);
        self.placing_hotspot = None;
        Some(id)
    }

    // ========================================================================
    // Input
    // ========================================================================

    pub fn resize(&mut self, size: SurfaceSize) {
        self.surface.resize(size);
    }

    /// Forward a pointer event to the drawing surface. Inert in preview.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if self.mode != EditorMode::Edit {
            return false;
        }
        self.surface
            .handle_pointer(event, &mut self.editor, &mut self.store)
    }

    /// Resolve and apply a keyboard shortcut. Returns the action taken.
    pub fn handle_key(&mut self, press: KeyPress) -> Option<EditorAction> {
        let action =
            self.keybindings
                .action_for(press, self.mode, self.editor.drawing_mode())?;
        self.apply(action);
        Some(action)
    }

    pub fn apply(&mut self, action: EditorAction) {
        log::trace!("Action: {:?}", action);
        match action {
            EditorAction::ToggleMode => self.toggle_mode(),
            EditorAction::PrevScene => {
                self.navigate_prev();
            }
            EditorAction::NextScene => {
                self.navigate_next();
            }
            EditorAction::FirstScene => {
                self.navigate_first();
            }
            EditorAction::LastScene => {
                self.navigate_last();
            }
            EditorAction::GoToScene(index) => {
                self.navigate_to_index(index);
            }
            EditorAction::PlaceHotspot(kind) => {
                self.start_placing_hotspot(kind);
            }
            EditorAction::Cancel => {
                if self.editor.drawing_mode() {
                    self.editor.cancel();
                } else {
                    self.cancel_placing_hotspot();
                }
            }
            EditorAction::ToggleDrawingMode => self.editor.toggle_drawing_mode(),
            EditorAction::SelectDrawTool(tool) => self.editor.select_draw_tool(tool),
            EditorAction::Undo => {
                self.editor.undo(&mut self.store);
            }
            EditorAction::Redo => {
                self.editor.redo(&mut self.store);
            }
            EditorAction::ClearRoutes => {
                self.editor.clear_routes(&mut self.store);
            }
        }
        self.surface.request_redraw();
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn needs_redraw(&self) -> bool {
        self.surface.needs_redraw()
    }

    /// Render the current scene and clear the redraw flag.
    pub fn render(&self) -> Vec<DrawCommand> {
        self.surface.render(&self.editor, &self.store)
    }
}
