//! Boundary to the AR tracking and rendering platform.
//!
//! The platform owns anchors and their transforms. The engine talks to it
//! only through `TrackingService`, always from the control thread.

use glam::{Mat4, Vec2, Vec3};

use arniegeddon_core::enums::EntityKind;
use arniegeddon_core::types::{EntityHandle, LiveAnchor, RenderNode};

/// Operations the engine consumes from the tracking collaborator.
///
/// Implementations need not be thread-safe.
pub trait TrackingService {
    /// Current camera pose, or `None` before tracking has initialised.
    fn current_camera_transform(&self) -> Option<Mat4>;
    /// Current ambient light estimate in lumens.
    fn current_ambient_light_intensity(&self) -> Option<f32>;
    /// Register a new anchor at `transform`.
    fn add_entity(&mut self, transform: Mat4, kind: EntityKind) -> EntityHandle;
    /// Remove an anchor. Unknown handles are ignored.
    fn remove_entity(&mut self, handle: EntityHandle);
    fn entity_for_handle(&self, handle: EntityHandle) -> Option<RenderNode>;
    fn handle_for_render_node(&self, node: RenderNode) -> Option<EntityHandle>;
    /// Rendered nodes whose on-screen projection contains `screen_point`, topmost first.
    fn hit_test(&self, screen_point: Vec2) -> Vec<RenderNode>;
    fn all_live_anchors(&self) -> Vec<LiveAnchor>;
}

/// Default on-screen radius of a simulated node, in normalised screen units.
pub const SIMULATED_NODE_RADIUS: f32 = 0.1;

/// Headless tracking service.
///
/// Anchors are kept in insertion order. Nodes are projected with a unit
/// pinhole camera looking down -Z: a camera-space point `(x, y, z)` with
/// `z < 0` lands at screen `(x, y) / -z`.
#[derive(Debug, Clone)]
pub struct SimulatedTracking {
    camera: Option<Mat4>,
    ambient_light: Option<f32>,
    anchors: Vec<LiveAnchor>,
    next_handle: u64,
    node_radius: f32,
    removed: Vec<EntityHandle>,
}

impl Default for SimulatedTracking {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedTracking {
    /// A tracking session that has not produced a camera frame yet.
    pub fn new() -> Self {
        Self {
            camera: None,
            ambient_light: None,
            anchors: Vec::new(),
            next_handle: 1,
            node_radius: SIMULATED_NODE_RADIUS,
            removed: Vec::new(),
        }
    }

    /// A tracking session with the camera at the world origin.
    pub fn with_camera_at_origin() -> Self {
        let mut tracking = Self::new();
        tracking.set_camera(Some(Mat4::IDENTITY));
        tracking
    }

    pub fn set_camera(&mut self, camera: Option<Mat4>) {
        self.camera = camera;
    }

    /// Move the camera without rotating it.
    pub fn move_camera_to(&mut self, position: Vec3) {
        self.camera = Some(Mat4::from_translation(position));
    }

    pub fn set_ambient_light(&mut self, lumens: Option<f32>) {
        self.ambient_light = lumens;
    }

    pub fn set_node_radius(&mut self, radius: f32) {
        self.node_radius = radius;
    }

    pub fn anchors(&self) -> &[LiveAnchor] {
        &self.anchors
    }

    pub fn anchor(&self, handle: EntityHandle) -> Option<&LiveAnchor> {
        self.anchors.iter().find(|a| a.handle == handle)
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.anchor(handle).is_some()
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.anchors.iter().filter(|a| a.kind == kind).count()
    }

    /// Handles removed so far, in removal order.
    pub fn removed(&self) -> &[EntityHandle] {
        &self.removed
    }

    fn project(&self, camera: Mat4, anchor: &LiveAnchor) -> Option<(Vec2, f32)> {
        let local = camera.inverse().transform_point3(anchor.position());
        if local.z >= 0.0 {
            return None;
        }
        let depth = -local.z;
        Some((Vec2::new(local.x, local.y) / depth, depth))
    }
}

impl TrackingService for SimulatedTracking {
    fn current_camera_transform(&self) -> Option<Mat4> {
        self.camera
    }

    fn current_ambient_light_intensity(&self) -> Option<f32> {
        self.camera.and(self.ambient_light)
    }

    fn add_entity(&mut self, transform: Mat4, kind: EntityKind) -> EntityHandle {
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        self.anchors.push(LiveAnchor {
            handle,
            transform,
            kind,
        });
        handle
    }

    fn remove_entity(&mut self, handle: EntityHandle) {
        let before = self.anchors.len();
        self.anchors.retain(|a| a.handle != handle);
        if self.anchors.len() != before {
            self.removed.push(handle);
        }
    }

    fn entity_for_handle(&self, handle: EntityHandle) -> Option<RenderNode> {
        self.contains(handle).then_some(RenderNode(handle.0))
    }

    fn handle_for_render_node(&self, node: RenderNode) -> Option<EntityHandle> {
        let handle = EntityHandle(node.0);
        self.contains(handle).then_some(handle)
    }

    fn hit_test(&self, screen_point: Vec2) -> Vec<RenderNode> {
        let Some(camera) = self.camera else {
            return Vec::new();
        };
        let mut hits: Vec<(f32, RenderNode)> = self
            .anchors
            .iter()
            .filter_map(|anchor| {
                let (screen, depth) = self.project(camera, anchor)?;
                (screen.distance(screen_point) <= self.node_radius)
                    .then_some((depth, RenderNode(anchor.handle.0)))
            })
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter().map(|(_, node)| node).collect()
    }

    fn all_live_anchors(&self) -> Vec<LiveAnchor> {
        self.anchors.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_radius_widens_hit_area() {
        let mut tracking = SimulatedTracking::with_camera_at_origin();
        let node = tracking.add_entity(
            Mat4::from_translation(Vec3::new(0.3, 0.0, -1.0)),
            EntityKind::PrimaryTarget,
        );
        assert!(tracking.hit_test(Vec2::ZERO).is_empty());

        tracking.set_node_radius(0.5);
        assert_eq!(tracking.hit_test(Vec2::ZERO), vec![RenderNode(node.0)]);
    }

    #[test]
    fn test_hit_test_orders_nearest_first() {
        let mut tracking = SimulatedTracking::with_camera_at_origin();
        let far = tracking.add_entity(
            Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)),
            EntityKind::PrimaryTarget,
        );
        let near = tracking.add_entity(
            Mat4::from_translation(Vec3::new(0.0, 0.0, -1.0)),
            EntityKind::DecoyTarget,
        );
        let nodes = tracking.hit_test(Vec2::ZERO);
        assert_eq!(
            nodes,
            vec![RenderNode(near.0), RenderNode(far.0)],
            "nearest node should be first"
        );
    }

    #[test]
    fn test_hit_test_ignores_nodes_behind_camera_and_off_reticle() {
        let mut tracking = SimulatedTracking::with_camera_at_origin();
        tracking.add_entity(
            Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)),
            EntityKind::PrimaryTarget,
        );
        tracking.add_entity(
            Mat4::from_translation(Vec3::new(1.0, 0.0, -1.0)),
            EntityKind::PrimaryTarget,
        );
        assert!(tracking.hit_test(Vec2::ZERO).is_empty());
    }

    #[test]
    fn test_node_mapping_tracks_removal() {
        let mut tracking = SimulatedTracking::with_camera_at_origin();
        let handle = tracking.add_entity(Mat4::IDENTITY, EntityKind::WeaponPickup);
        let node = tracking.entity_for_handle(handle).unwrap();
        assert_eq!(tracking.handle_for_render_node(node), Some(handle));

        tracking.remove_entity(handle);
        assert_eq!(tracking.entity_for_handle(handle), None);
        assert_eq!(tracking.handle_for_render_node(node), None);
        assert_eq!(tracking.removed(), &[handle]);

        // Removing twice is a no-op.
        tracking.remove_entity(handle);
        assert_eq!(tracking.removed().len(), 1);
    }

    #[test]
    fn test_no_light_estimate_without_camera() {
        let mut tracking = SimulatedTracking::new();
        tracking.set_ambient_light(Some(400.0));
        assert_eq!(tracking.current_ambient_light_intensity(), None);
        tracking.move_camera_to(Vec3::ZERO);
        assert_eq!(tracking.current_ambient_light_intensity(), Some(400.0));
    }
}
