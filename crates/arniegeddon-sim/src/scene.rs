//! The live scene: tracking service plus the registry of anchors we created.
//!
//! All anchor creation and removal goes through here so the registry and
//! the tracking service never disagree.

use glam::Mat4;
use log::debug;

use arniegeddon_core::constants::TARGET_TTL_SECS;
use arniegeddon_core::enums::EntityKind;
use arniegeddon_core::error::GameError;
use arniegeddon_core::types::EntityHandle;

use crate::registry::EntityRegistry;
use crate::tracking::TrackingService;

pub struct Scene<T: TrackingService> {
    tracking: T,
    registry: EntityRegistry,
}

impl<T: TrackingService> Scene<T> {
    pub fn new(tracking: T) -> Self {
        Self {
            tracking,
            registry: EntityRegistry::new(),
        }
    }

    pub fn tracking(&self) -> &T {
        &self.tracking
    }

    pub fn tracking_mut(&mut self) -> &mut T {
        &mut self.tracking
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Current camera pose, or `TrackingUnavailable`.
    pub fn camera(&self) -> Result<Mat4, GameError> {
        self.tracking
            .current_camera_transform()
            .ok_or(GameError::TrackingUnavailable)
    }

    /// Register an anchor with the tracking service and record it.
    /// Targets and decoys get the standard time-to-live.
    pub fn spawn(&mut self, transform: Mat4, kind: EntityKind, now: f64) -> EntityHandle {
        let handle = self.tracking.add_entity(transform, kind);
        let ttl = kind.expires().then_some(TARGET_TTL_SECS);
        self.registry.register(handle, kind, now, ttl);
        debug!(
            "spawned {kind:?} {handle:?} at {:?}",
            transform.w_axis.truncate()
        );
        handle
    }

    /// Remove an anchor we created. Returns its kind, or `None` if it was
    /// already gone (expired, hit, or collected).
    pub fn remove(&mut self, handle: EntityHandle) -> Option<EntityKind> {
        let kind = self.registry.forget(handle)?;
        self.tracking.remove_entity(handle);
        Some(kind)
    }

    /// Remove every entity whose time-to-live has run out.
    pub fn expire(&mut self, now: f64) -> Vec<EntityHandle> {
        let expired = self.registry.take_expired(now);
        for &handle in &expired {
            self.tracking.remove_entity(handle);
        }
        expired
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.registry.count_kind(kind)
    }

    /// Remove every anchor we created.
    pub fn clear(&mut self) -> usize {
        let handles = self.registry.clear();
        for &handle in &handles {
            self.tracking.remove_entity(handle);
        }
        handles.len()
    }
}
