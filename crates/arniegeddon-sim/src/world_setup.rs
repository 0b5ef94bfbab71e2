//! Entity spawn factories.
//!
//! Each factory needs a current camera frame and fails with
//! `TrackingUnavailable` otherwise, leaving the scene untouched.

use arniegeddon_core::config::GameConfig;
use arniegeddon_core::enums::EntityKind;
use arniegeddon_core::error::GameError;
use arniegeddon_core::types::EntityHandle;

use crate::rng::SessionRng;
use crate::scene::Scene;
use crate::systems::placement;
use crate::systems::spawn_scheduler::draw_spawn_kind;
use crate::tracking::TrackingService;

/// Spawn an entity of `kind` at its configured camera-relative placement.
pub fn spawn_kind<T: TrackingService>(
    scene: &mut Scene<T>,
    config: &GameConfig,
    rng: &mut SessionRng,
    kind: EntityKind,
    now: f64,
) -> Result<EntityHandle, GameError> {
    let camera = scene.camera()?;
    let transform = placement::place(camera, kind, config, rng);
    Ok(scene.spawn(transform, kind, now))
}

/// Spawn a primary target, or a decoy one time in five.
pub fn spawn_target<T: TrackingService>(
    scene: &mut Scene<T>,
    config: &GameConfig,
    rng: &mut SessionRng,
    now: f64,
) -> Result<EntityHandle, GameError> {
    scene.camera()?;
    let kind = draw_spawn_kind(rng);
    spawn_kind(scene, config, rng, kind, now)
}

pub fn spawn_pickup<T: TrackingService>(
    scene: &mut Scene<T>,
    config: &GameConfig,
    rng: &mut SessionRng,
    now: f64,
) -> Result<EntityHandle, GameError> {
    spawn_kind(scene, config, rng, EntityKind::WeaponPickup, now)
}

/// Spawn a pickup unless one is already live. Returns the new pickup, if any.
pub fn ensure_pickup<T: TrackingService>(
    scene: &mut Scene<T>,
    config: &GameConfig,
    rng: &mut SessionRng,
    now: f64,
) -> Result<Option<EntityHandle>, GameError> {
    if scene.count_kind(EntityKind::WeaponPickup) > 0 {
        return Ok(None);
    }
    spawn_pickup(scene, config, rng, now).map(Some)
}

pub fn spawn_impact_marker<T: TrackingService>(
    scene: &mut Scene<T>,
    config: &GameConfig,
    rng: &mut SessionRng,
    now: f64,
) -> Result<EntityHandle, GameError> {
    spawn_kind(scene, config, rng, EntityKind::ImpactMarker, now)
}
