//! Anchor placement: randomized camera-relative offsets per entity kind.
//!
//! Pure computation. The caller combines the offset with the current
//! camera transform before registering the anchor.

use glam::{Mat4, Vec2, Vec3};

use arniegeddon_core::config::GameConfig;
use arniegeddon_core::enums::EntityKind;
use arniegeddon_core::types::OffsetRanges;

use crate::rng::SessionRng;

/// Draw a uniform offset within `ranges`.
pub fn random_offset(rng: &mut SessionRng, ranges: &OffsetRanges) -> Vec3 {
    Vec3::new(rng.axis(ranges.x), rng.axis(ranges.y), rng.axis(ranges.z))
}

/// Offset that puts the impact marker under the reticle at a fixed depth.
pub fn impact_offset(reticle: Vec2, depth: f32) -> Vec3 {
    reticle.extend(depth)
}

/// Camera-relative offset for a new entity of `kind`.
pub fn offset_for(kind: EntityKind, config: &GameConfig, rng: &mut SessionRng) -> Vec3 {
    match kind {
        EntityKind::PrimaryTarget | EntityKind::DecoyTarget => {
            random_offset(rng, &config.target_offsets)
        }
        EntityKind::WeaponPickup => random_offset(rng, &config.pickup_offsets),
        EntityKind::ImpactMarker => impact_offset(config.reticle, config.impact_depth),
    }
}

/// World transform for an offset expressed in camera space.
pub fn world_transform(camera: Mat4, offset: Vec3) -> Mat4 {
    camera * Mat4::from_translation(offset)
}

/// Offset and world transform in one step.
pub fn place(
    camera: Mat4,
    kind: EntityKind,
    config: &GameConfig,
    rng: &mut SessionRng,
) -> Mat4 {
    world_transform(camera, offset_for(kind, config, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_target_offsets_respect_preset_ranges() {
        let mut rng = SessionRng::seeded(11);
        for config in [GameConfig::arniegeddon(), GameConfig::classic()] {
            for _ in 0..2_000 {
                let offset = offset_for(EntityKind::PrimaryTarget, &config, &mut rng);
                assert!(
                    config.target_offsets.contains(offset),
                    "{offset:?} outside {:?}",
                    config.target_offsets
                );
            }
        }
    }

    #[test]
    fn test_pickup_offsets_in_range() {
        let mut rng = SessionRng::seeded(12);
        let config = GameConfig::arniegeddon();
        for _ in 0..2_000 {
            let offset = offset_for(EntityKind::WeaponPickup, &config, &mut rng);
            assert!(config.pickup_offsets.contains(offset));
        }
    }

    #[test]
    fn test_impact_marker_sits_under_reticle() {
        let mut rng = SessionRng::seeded(13);
        let mut config = GameConfig::arniegeddon();
        config.reticle = Vec2::new(0.25, -0.1);
        let offset = offset_for(EntityKind::ImpactMarker, &config, &mut rng);
        assert_eq!(offset, Vec3::new(0.25, -0.1, -0.6));
    }

    #[test]
    fn test_world_transform_follows_camera() {
        let camera = Mat4::from_rotation_translation(
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let world = world_transform(camera, Vec3::new(0.0, 0.0, -1.0));
        let position = world.w_axis.truncate();
        // Camera turned 90 degrees left: "forward" (-Z) becomes -X.
        assert!((position - Vec3::new(0.0, 2.0, 3.0)).length() < 1e-5);
    }
}
