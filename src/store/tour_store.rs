//! The Tour/Scene store.
//!
//! Owns every persisted scene, hotspot and route of the active tour, plus the
//! current scene id. Mutations notify subscribed listeners synchronously,
//! after the change is applied, so a drawing surface can re-render without
//! depending on any UI framework's reactivity.

use std::fmt;

use crate::model::{Hotspot, HotspotPatch, Route, Scene, ScenePatch, Tour};

/// Something that changed in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourEvent {
    /// A whole tour was loaded, replacing all scenes.
    TourLoaded { tour_id: String },
    SceneAdded { scene_id: String },
    SceneRemoved { scene_id: String },
    /// Any field of a scene changed (routes, hotspots, metadata).
    SceneChanged { scene_id: String },
    /// The current scene changed.
    Navigated {
        from: Option<String>,
        to: Option<String>,
    },
}

/// Handle returned by [`TourStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&TourEvent)>;

/// Storage and mutation operations for the active tour.
#[derive(Default)]
pub struct TourStore {
    tour: Option<Tour>,
    scenes: Vec<Scene>,
    current_scene_id: Option<String>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl fmt::Debug for TourStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TourStore")
            .field("tour_id", &self.tour.as_ref().map(|t| &t.id))
            .field("scenes", &self.scenes.len())
            .field("current_scene_id", &self.current_scene_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TourStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a tour already loaded.
    pub fn with_tour(tour: Tour) -> Self {
        let mut store = Self::new();
        store.set_current_tour(tour);
        store
    }

    // ========================================================================
    // Notification
    // ========================================================================

    /// Register a listener called after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&TourEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: TourEvent) {
        log::trace!("Tour event: {:?}", event);
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    // ========================================================================
    // Tour
    // ========================================================================

    /// Load a tour. The first scene becomes current.
    pub fn set_current_tour(&mut self, tour: Tour) {
        let from = self.current_scene_id.take();
        self.scenes = tour.scenes.clone();
        self.current_scene_id = self.scenes.first().map(|s| s.id.clone());
        let tour_id = tour.id.clone();
        log::debug!("Loaded tour '{}' with {} scenes", tour_id, self.scenes.len());
        self.tour = Some(tour);
        self.emit(TourEvent::TourLoaded { tour_id });
        let to = self.current_scene_id.clone();
        if from != to {
            self.emit(TourEvent::Navigated { from, to });
        }
    }

    /// The loaded tour with its current scenes folded back in.
    pub fn tour_snapshot(&self) -> Option<Tour> {
        self.tour.as_ref().map(|t| Tour {
            scenes: self.scenes.clone(),
            ..t.clone()
        })
    }

    // ========================================================================
    // Scenes
    // ========================================================================

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    fn scene_mut(&mut self, id: &str) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.id == id)
    }

    pub fn current_scene_id(&self) -> Option<&str> {
        self.current_scene_id.as_deref()
    }

    /// The scene being edited, read fresh on every call.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.current_scene_id.as_deref().and_then(|id| self.scene(id))
    }

    pub fn current_index(&self) -> Option<usize> {
        let id = self.current_scene_id.as_deref()?;
        self.scenes.iter().position(|s| s.id == id)
    }

    pub fn add_scene(&mut self, scene: Scene) {
        let scene_id = scene.id.clone();
        self.scenes.push(scene);
        log::debug!("Added scene {}", scene_id);
        self.emit(TourEvent::SceneAdded { scene_id });
        if self.current_scene_id.is_none() {
            self.navigate_to_index(0);
        }
    }

    /// Remove a scene along with its hotspots and routes.
    ///
    /// If it was current, the first remaining scene becomes current.
    pub fn remove_scene(&mut self, id: &str) -> Option<Scene> {
        let index = self.scenes.iter().position(|s| s.id == id)?;
        let removed = self.scenes.remove(index);
        log::debug!(
            "Removed scene {} ({} routes, {} hotspots)",
            id,
            removed.routes.len(),
            removed.hotspots.len()
        );
        self.emit(TourEvent::SceneRemoved {
            scene_id: id.to_string(),
        });
        if self.current_scene_id.as_deref() == Some(id) {
            let to = self.scenes.first().map(|s| s.id.clone());
            let from = std::mem::replace(&mut self.current_scene_id, to.clone());
            self.emit(TourEvent::Navigated { from, to });
        }
        Some(removed)
    }

    /// Merge a partial scene into the addressed scene. Last write wins.
    ///
    /// Unknown scene ids are ignored.
    pub fn update_scene(&mut self, scene_id: &str, patch: ScenePatch) -> bool {
        let Some(scene) = self.scene_mut(scene_id) else {
            log::debug!("update_scene: unknown scene {}", scene_id);
            return false;
        };
        scene.apply(patch);
        self.emit(TourEvent::SceneChanged {
            scene_id: scene_id.to_string(),
        });
        true
    }

    // ========================================================================
    // Routes
    // ========================================================================

    /// Append a route to a scene's list.
    pub fn push_route(&mut self, scene_id: &str, route: Route) -> bool {
        let Some(scene) = self.scene(scene_id) else {
            return false;
        };
        let mut routes = scene.routes.clone();
        routes.push(route);
        self.update_scene(scene_id, ScenePatch::routes(routes))
    }

    /// Insert a route at a position, clamped to the list length.
    pub fn insert_route(&mut self, scene_id: &str, index: usize, route: Route) -> bool {
        let Some(scene) = self.scene(scene_id) else {
            return false;
        };
        let mut routes = scene.routes.clone();
        routes.insert(index.min(routes.len()), route);
        self.update_scene(scene_id, ScenePatch::routes(routes))
    }

    /// Replace the route with the same id.
    pub fn replace_route(&mut self, scene_id: &str, route: Route) -> bool {
        let Some(scene) = self.scene(scene_id) else {
            return false;
        };
        let Some(index) = scene.route_index(&route.id) else {
            return false;
        };
        let mut routes = scene.routes.clone();
        routes[index] = route;
        self.update_scene(scene_id, ScenePatch::routes(routes))
    }

    /// Remove a route, returning it with its former index.
    pub fn remove_route(&mut self, scene_id: &str, route_id: &str) -> Option<(usize, Route)> {
        let scene = self.scene(scene_id)?;
        let index = scene.route_index(route_id)?;
        let mut routes = scene.routes.clone();
        let removed = routes.remove(index);
        self.update_scene(scene_id, ScenePatch::routes(routes));
        Some((index, removed))
    }

    pub fn set_routes(&mut self, scene_id: &str, routes: Vec<Route>) -> bool {
        self.update_scene(scene_id, ScenePatch::routes(routes))
    }

    // ========================================================================
    // Hotspots
    // ========================================================================

    pub fn add_hotspot(&mut self, scene_id: &str, hotspot: Hotspot) -> bool {
        let Some(scene) = self.scene(scene_id) else {
            return false;
        };
        let mut hotspots = scene.hotspots.clone();
        hotspots.push(hotspot);
        self.update_scene(scene_id, ScenePatch::hotspots(hotspots))
    }

    pub fn update_hotspot(
        &mut self,
        scene_id: &str,
        hotspot_id: &str,
        patch: HotspotPatch,
    ) -> bool {
        let Some(scene) = self.scene(scene_id) else {
            return false;
        };
        let mut hotspots = scene.hotspots.clone();
        let Some(hotspot) = hotspots.iter_mut().find(|h| h.id == hotspot_id) else {
            return false;
        };
        hotspot.apply(patch);
        self.update_scene(scene_id, ScenePatch::hotspots(hotspots))
    }

    pub fn remove_hotspot(&mut self, scene_id: &str, hotspot_id: &str) -> Option<Hotspot> {
        let scene = self.scene(scene_id)?;
        let index = scene.hotspots.iter().position(|h| h.id == hotspot_id)?;
        let mut hotspots = scene.hotspots.clone();
        let removed = hotspots.remove(index);
        self.update_scene(scene_id, ScenePatch::hotspots(hotspots));
        Some(removed)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Make a scene current. Unknown ids are ignored.
    pub fn navigate_to_scene(&mut self, scene_id: &str) -> bool {
        if self.scene(scene_id).is_none() {
            log::debug!("navigate_to_scene: unknown scene {}", scene_id);
            return false;
        }
        if self.current_scene_id.as_deref() == Some(scene_id) {
            return true;
        }
        let to = Some(scene_id.to_string());
        let from = std::mem::replace(&mut self.current_scene_id, to.clone());
        log::debug!("Navigated {:?} -> {}", from, scene_id);
        self.emit(TourEvent::Navigated { from, to });
        true
    }

    pub fn navigate_to_index(&mut self, index: usize) -> bool {
        match self.scenes.get(index).map(|s| s.id.clone()) {
            Some(id) => self.navigate_to_scene(&id),
            None => false,
        }
    }

    pub fn can_navigate_next(&self) -> bool {
        self.current_index()
            .is_some_and(|i| i + 1 < self.scenes.len())
    }

    pub fn can_navigate_prev(&self) -> bool {
        self.current_index().is_some_and(|i| i > 0)
    }

    pub fn navigate_next(&mut self) -> bool {
        match self.current_index() {
            Some(i) if i + 1 < self.scenes.len() => self.navigate_to_index(i + 1),
            _ => false,
        }
    }

    pub fn navigate_prev(&mut self) -> bool {
        match self.current_index() {
            Some(i) if i > 0 => self.navigate_to_index(i - 1),
            _ => false,
        }
    }

    pub fn navigate_first(&mut self) -> bool {
        self.navigate_to_index(0)
    }

    pub fn navigate_last(&mut self) -> bool {
        match self.scenes.len() {
            0 => false,
            n => self.navigate_to_index(n - 1),
        }
    }
}
