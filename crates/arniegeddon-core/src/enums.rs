//! Enumeration types used throughout the game.

use serde::{Deserialize, Serialize};

/// What a world-anchored entity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Scores when hit.
    PrimaryTarget,
    /// Penalises the score when hit (bear or civilian, depending on configuration).
    DecoyTarget,
    /// Refills the magazine when the camera walks up to it.
    WeaponPickup,
    /// Short-lived marker shown where a shot landed.
    ImpactMarker,
}

impl EntityKind {
    /// Whether a shot can resolve to this kind.
    pub fn is_shootable(self) -> bool {
        matches!(self, EntityKind::PrimaryTarget | EntityKind::DecoyTarget)
    }

    /// Whether this kind is removed automatically after the target TTL.
    pub fn expires(self) -> bool {
        matches!(self, EntityKind::PrimaryTarget | EntityKind::DecoyTarget)
    }
}

/// Flavour of the decoy entity. Only affects presentation and sounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecoyFlavor {
    #[default]
    Bear,
    Civilian,
}

/// How the level-up pause ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelUpResume {
    /// Spawning resumes as soon as the celebration is shown.
    #[default]
    AfterCelebration,
    /// The game stays paused until the player taps.
    OnTap,
}

/// Onboarding progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TutorialState {
    /// Tutorial not started (world not set up yet, or disabled).
    #[default]
    Inactive,
    /// Showing onboarding card `n` (1-based).
    Step(u8),
    /// All cards dismissed.
    Done,
}

impl TutorialState {
    /// Integer form used by the presentation layer: -1 when no card is showing.
    pub fn step_index(self) -> i32 {
        match self {
            TutorialState::Step(n) => i32::from(n),
            TutorialState::Inactive | TutorialState::Done => -1,
        }
    }

    /// Whether the tutorial currently intercepts input.
    pub fn is_active(self) -> bool {
        matches!(self, TutorialState::Step(_))
    }
}

/// Top-level game phase, derived from the engine state each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first camera frame to set up the world.
    #[default]
    AwaitingTracking,
    Tutorial,
    Paused,
    Running,
    /// Controller torn down; no further commands are processed.
    TornDown,
}

/// Sound effects the presentation layer knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    /// Gunshot, played on every shot that has ammo behind it.
    Bang,
    /// Primary target hit.
    Hit,
    /// Bear decoy hit.
    BearGrowl,
    /// Civilian decoy hit.
    CivilianScream,
    /// Trigger pulled on an empty magazine.
    GunClick,
    /// Level-up celebration.
    Win,
}
