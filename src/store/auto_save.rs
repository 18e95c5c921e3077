//! Debounced auto-save for the project list.
//!
//! Edits mark the manager dirty; the host polls [`AutoSaveManager::should_save`]
//! from its frame or timer loop and calls [`AutoSaveManager::save`] when it
//! returns true.

use std::time::Duration;
use web_time::Instant;

use crate::error::StoreError;

use super::project_store::ProjectStore;
use super::storage::KeyValueStorage;
use super::tour_store::TourEvent;

/// Tracks unsaved changes and decides when to flush them.
///
/// A save waits for `debounce` of quiet after the last change, and never
/// runs more often than once per `min_interval`.
#[derive(Debug)]
pub struct AutoSaveManager {
    min_interval: Duration,
    debounce: Duration,
    last_save: Option<Instant>,
    last_change: Option<Instant>,
    enabled: bool,
    dirty: bool,
}

impl AutoSaveManager {
    pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(30);
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(2);

    pub fn new() -> Self {
        Self {
            min_interval: Self::DEFAULT_MIN_INTERVAL,
            debounce: Self::DEFAULT_DEBOUNCE,
            last_save: None,
            last_change: None,
            enabled: true,
            dirty: false,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    pub fn mark_dirty(&mut self) {
        self.mark_dirty_at(Instant::now());
    }

    fn mark_dirty_at(&mut self, now: Instant) {
        self.dirty = true;
        self.last_change = Some(now);
        log::trace!("Auto-save: dirty");
    }

    /// Feed a store event. Content changes mark dirty; navigation does not.
    pub fn observe(&mut self, event: &TourEvent) {
        match event {
            TourEvent::Navigated { .. } => {}
            TourEvent::TourLoaded { .. }
            | TourEvent::SceneAdded { .. }
            | TourEvent::SceneRemoved { .. }
            | TourEvent::SceneChanged { .. } => self.mark_dirty(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn should_save(&self) -> bool {
        self.should_save_at(Instant::now())
    }

    fn should_save_at(&self, now: Instant) -> bool {
        if !self.enabled || !self.dirty {
            return false;
        }
        let Some(last_change) = self.last_change else {
            return false;
        };
        if now.saturating_duration_since(last_change) < self.debounce {
            return false;
        }
        self.last_save
            .is_none_or(|saved| now.saturating_duration_since(saved) >= self.min_interval)
    }

    /// Write the projects to storage and record the outcome.
    ///
    /// On failure the manager stays dirty and retries after `min_interval`.
    pub fn save(
        &mut self,
        projects: &ProjectStore,
        storage: &mut dyn KeyValueStorage,
    ) -> Result<(), StoreError> {
        let now = Instant::now();
        self.last_save = Some(now);
        match projects.save(storage) {
            Ok(()) => {
                self.dirty = false;
                self.last_change = None;
                log::debug!("Auto-save: saved");
                Ok(())
            }
            Err(e) => {
                log::warn!("Auto-save failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        log::debug!("Auto-save: enabled = {}", enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn time_since_last_save(&self) -> Option<Duration> {
        self.last_save.map(|t| t.elapsed())
    }
}

impl Default for AutoSaveManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectDraft;
    use crate::store::MemoryStorage;

    #[test]
    fn test_clean_manager_never_saves() {
        let manager = AutoSaveManager::new();
        assert!(!manager.is_dirty());
        assert!(!manager.should_save());
    }

    #[test]
    fn test_debounce_then_save() {
        let mut manager = AutoSaveManager::new()
            .with_debounce(Duration::from_millis(500))
            .with_min_interval(Duration::ZERO);
        let t0 = Instant::now();
        manager.mark_dirty_at(t0);
        assert!(!manager.should_save_at(t0 + Duration::from_millis(100)));
        assert!(manager.should_save_at(t0 + Duration::from_millis(600)));
    }

    #[test]
    fn test_navigation_is_not_a_change() {
        let mut manager = AutoSaveManager::new();
        manager.observe(&TourEvent::Navigated {
            from: None,
            to: Some("scene-001".to_string()),
        });
        assert!(!manager.is_dirty());
        manager.observe(&TourEvent::SceneChanged {
            scene_id: "scene-001".to_string(),
        });
        assert!(manager.is_dirty());
    }

    #[test]
    fn test_disabled_never_saves() {
        let mut manager = AutoSaveManager::disabled().with_debounce(Duration::ZERO);
        manager.mark_dirty();
        assert!(!manager.should_save());
    }

    #[test]
    fn test_failed_save_stays_dirty() {
        let mut projects = ProjectStore::new();
        projects.create_project(ProjectDraft::default());
        let mut full = MemoryStorage::new().with_quota(4);
        let mut manager = AutoSaveManager::new();
        manager.mark_dirty();
        assert!(manager.save(&projects, &mut full).is_err());
        assert!(manager.is_dirty());

        let mut storage = MemoryStorage::new();
        manager.save(&projects, &mut storage).expect("save");
        assert!(!manager.is_dirty());
    }
}
