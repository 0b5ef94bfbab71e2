//! Events emitted by the engine for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Request to play a sound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioEvent {
    pub sound: Sound,
}

impl AudioEvent {
    pub fn play(sound: Sound) -> Self {
        Self { sound }
    }
}

/// Presentation requests for the on-screen overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiEvent {
    /// Show a message for the given duration.
    ShowMessage { text: String, duration_secs: f64 },
    /// Clear the current message.
    ClearMessage,
    /// Show or hide the level-up banner.
    LevelUpBanner { visible: bool },
    /// Show onboarding card `step`, or remove the card when `None`.
    TutorialCard { step: Option<u8> },
    /// Number of rounds the ammo indicator should show.
    AmmoIndicator { rounds: u8 },
    /// Swap the reticle texture for the special sight or back.
    Sight { special: bool },
    /// Score line text changed.
    ScoreText { text: String },
}
