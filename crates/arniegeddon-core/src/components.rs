//! Components for the entity registry.
//!
//! The tracking service owns the transforms; the registry only keeps what
//! the game needs to reason about an anchor. Components are plain data.

use serde::{Deserialize, Serialize};

use crate::types::EntityHandle;

/// Links a registry entry to the tracking service's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor(pub EntityHandle);

/// Session time at which the entity was registered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnedAt(pub f64);

/// Session time at which the entity is removed if nothing else removed it first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expiry {
    pub deadline_secs: f64,
}
