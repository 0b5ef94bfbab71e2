//! Hit resolution: what, if anything, lies under the reticle.

use glam::Vec2;

use arniegeddon_core::config::GameConfig;
use arniegeddon_core::enums::{DecoyFlavor, EntityKind, Sound};
use arniegeddon_core::types::EntityHandle;

use crate::registry::EntityRegistry;
use crate::tracking::TrackingService;

/// The first shootable entity among the nodes under `reticle`, in hit-test order.
///
/// Nodes the registry does not know about (or that are not targets or
/// decoys) are skipped.
pub fn resolve_target<T: TrackingService>(
    tracking: &T,
    registry: &EntityRegistry,
    reticle: Vec2,
) -> Option<(EntityHandle, EntityKind)> {
    tracking.hit_test(reticle).into_iter().find_map(|node| {
        let handle = tracking.handle_for_render_node(node)?;
        let kind = registry.kind_of(handle)?;
        kind.is_shootable().then_some((handle, kind))
    })
}

/// Reaction sound for the entity that was hit.
pub fn reaction_sound(kind: EntityKind, flavor: DecoyFlavor) -> Option<Sound> {
    match kind {
        EntityKind::PrimaryTarget => Some(Sound::Hit),
        EntityKind::DecoyTarget => Some(match flavor {
            DecoyFlavor::Bear => Sound::BearGrowl,
            DecoyFlavor::Civilian => Sound::CivilianScream,
        }),
        EntityKind::WeaponPickup | EntityKind::ImpactMarker => None,
    }
}

/// Sounds played together when the impact effects of a hit land.
pub fn impact_sounds(kind: EntityKind, config: &GameConfig) -> Vec<Sound> {
    let mut sounds = vec![Sound::Bang];
    if config.reaction_sounds {
        sounds.extend(reaction_sound(kind, config.decoy_flavor));
    }
    sounds
}
