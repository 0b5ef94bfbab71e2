//! Player commands sent from the presentation layer to the engine.
//!
//! Commands are queued and processed at the next frame boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Touch anywhere on screen. Advances the tutorial, unpauses, or fires.
    Tap,
    /// Equip the special sight until the next shot.
    ArmSpecialSight,
    /// Dismiss the scene: cancel pending work and release every anchor.
    Teardown,
}
