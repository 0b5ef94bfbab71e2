//! Game state snapshot: the complete visible state sent to the presentation layer each frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, UiEvent};
use crate::types::{EntityHandle, SimTime};

/// Complete game state published after each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: i64,
    pub level: u32,
    pub ammo: u8,
    pub paused: bool,
    pub tutorial: TutorialState,
    /// -1 when no tutorial card is showing, else the 1-based card number.
    pub tutorial_step: i32,
    pub special_sight: bool,
    /// Sprite darkening factor derived from ambient light (0 = neutral).
    pub light_blend: Option<f32>,
    /// `"LVL: {level} SCORE: {score}"`.
    pub score_text: String,
    pub entities: Vec<EntityView>,
    pub audio_events: Vec<AudioEvent>,
    pub ui_events: Vec<UiEvent>,
}

/// A live anchored entity as seen by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub handle: EntityHandle,
    pub kind: EntityKind,
    /// World-space position, when the tracking service still knows the anchor.
    pub position: Option<Vec3>,
    /// Seconds until automatic removal, for kinds that expire.
    pub expires_in_secs: Option<f64>,
}

/// Format the score line shown in the HUD.
pub fn score_text(level: u32, score: i64) -> String {
    format!("LVL: {level} SCORE: {score}")
}
