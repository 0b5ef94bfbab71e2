//! Session configuration and the two shipped presets.
//!
//! Both presets drive the same engine; they differ only in tunables.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{DecoyFlavor, LevelUpResume};
use crate::types::{AxisRange, OffsetRanges};

/// How the spawn timer picks its next interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum SpawnCadence {
    /// Self-rescheduling one-shot timer whose interval shrinks with level.
    LevelScaled,
    /// Repeating timer with a constant interval.
    Fixed { interval_secs: f64 },
}

/// Configuration for starting a new game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// RNG seed. `None` derives one from the wall clock at session start.
    #[serde(default)]
    pub seed: Option<u64>,
    pub cadence: SpawnCadence,
    /// Camera-relative offsets for targets and decoys.
    pub target_offsets: OffsetRanges,
    /// Camera-relative offsets for weapon pickups.
    pub pickup_offsets: OffsetRanges,
    /// Camera-space depth of the impact marker.
    pub impact_depth: f32,
    /// Screen position of the reticle.
    pub reticle: Vec2,
    pub decoy_flavor: DecoyFlavor,
    /// Number of onboarding cards. 0 disables the tutorial.
    pub tutorial_steps: u8,
    /// Play a kind-specific reaction sound on hits.
    pub reaction_sounds: bool,
    pub level_up_resume: LevelUpResume,
}

impl GameConfig {
    /// The tutorial-led configuration with level-scaled difficulty.
    pub fn arniegeddon() -> Self {
        Self {
            seed: None,
            cadence: SpawnCadence::LevelScaled,
            target_offsets: OffsetRanges {
                x: AxisRange::new(-1.0, 1.0),
                y: AxisRange::new(-1.0, -0.5),
                z: AxisRange::new(-10.0, -0.2),
            },
            pickup_offsets: default_pickup_offsets(),
            impact_depth: IMPACT_DEPTH,
            reticle: Vec2::ZERO,
            decoy_flavor: DecoyFlavor::Bear,
            tutorial_steps: TUTORIAL_STEPS,
            reaction_sounds: true,
            level_up_resume: LevelUpResume::AfterCelebration,
        }
    }

    /// The simpler configuration: no tutorial, constant repeating spawn timer.
    pub fn classic() -> Self {
        Self {
            seed: None,
            cadence: SpawnCadence::Fixed {
                interval_secs: FIXED_SPAWN_INTERVAL_SECS,
            },
            target_offsets: OffsetRanges {
                x: AxisRange::new(-1.0, 1.0),
                y: AxisRange::new(-1.0, 1.0),
                z: AxisRange::new(-3.0, -0.2),
            },
            pickup_offsets: default_pickup_offsets(),
            impact_depth: IMPACT_DEPTH,
            reticle: Vec2::ZERO,
            decoy_flavor: DecoyFlavor::Civilian,
            tutorial_steps: 0,
            reaction_sounds: false,
            level_up_resume: LevelUpResume::AfterCelebration,
        }
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::arniegeddon()
    }
}

fn default_pickup_offsets() -> OffsetRanges {
    OffsetRanges {
        x: AxisRange::new(-1.0, 1.0),
        y: AxisRange::new(-1.0, 1.0),
        z: AxisRange::new(-3.0, -0.2),
    }
}
