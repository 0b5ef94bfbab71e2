//! Weapon pickup proximity check.

use glam::Vec3;

use arniegeddon_core::constants::PICKUP_RADIUS;
use arniegeddon_core::enums::EntityKind;
use arniegeddon_core::types::{EntityHandle, LiveAnchor};

/// The first weapon pickup within `PICKUP_RADIUS` of the camera.
pub fn collected_pickup(anchors: &[LiveAnchor], camera_position: Vec3) -> Option<EntityHandle> {
    anchors
        .iter()
        .filter(|a| a.kind == EntityKind::WeaponPickup)
        .find(|a| a.position().distance(camera_position) < PICKUP_RADIUS)
        .map(|a| a.handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    fn anchor(id: u64, kind: EntityKind, position: Vec3) -> LiveAnchor {
        LiveAnchor {
            handle: EntityHandle(id),
            transform: Mat4::from_translation(position),
            kind,
        }
    }

    #[test]
    fn test_pickup_within_radius() {
        let anchors = vec![
            anchor(1, EntityKind::PrimaryTarget, Vec3::ZERO),
            anchor(2, EntityKind::WeaponPickup, Vec3::new(0.05, 0.0, 0.0)),
        ];
        assert_eq!(collected_pickup(&anchors, Vec3::ZERO), Some(EntityHandle(2)));
    }

    #[test]
    fn test_pickup_out_of_reach() {
        let anchors = vec![anchor(1, EntityKind::WeaponPickup, Vec3::new(0.0, 0.0, -0.2))];
        assert_eq!(collected_pickup(&anchors, Vec3::ZERO), None);
    }

    #[test]
    fn test_radius_is_exclusive() {
        let anchors = vec![anchor(1, EntityKind::WeaponPickup, Vec3::ZERO)];
        assert_eq!(
            collected_pickup(&anchors, Vec3::new(PICKUP_RADIUS, 0.0, 0.0)),
            None
        );
    }
}
