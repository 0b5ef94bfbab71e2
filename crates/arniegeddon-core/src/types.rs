//! Fundamental handle, geometric, and timing types.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;

/// Opaque handle for an anchor registered with the tracking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub u64);

/// Opaque handle for the rendered node that presents an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderNode(pub u64);

/// An anchor as reported by the tracking service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveAnchor {
    pub handle: EntityHandle,
    pub transform: Mat4,
    pub kind: EntityKind,
}

impl LiveAnchor {
    /// World-space position of the anchor.
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }
}

/// Sampling range for one axis. Samples fall within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Camera-relative spawn offset ranges for each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetRanges {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl OffsetRanges {
    pub fn contains(&self, offset: Vec3) -> bool {
        self.x.contains(offset.x) && self.y.contains(offset.y) && self.z.contains(offset.z)
    }
}

/// Game clock tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current frame number (increments by 1 each frame).
    pub tick: u64,
    /// Elapsed session time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per frame at the fixed frame rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one frame.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
