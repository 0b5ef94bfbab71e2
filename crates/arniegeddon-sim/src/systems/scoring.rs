//! Score and level bookkeeping.
//!
//! Level-up fires on an exact score match, not a threshold: two quick +100
//! hits that skip past the trigger value never level up.

use arniegeddon_core::constants::*;
use arniegeddon_core::enums::EntityKind;

/// Score change for hitting `kind`, if it scores at all.
pub fn score_delta(kind: EntityKind) -> Option<i64> {
    match kind {
        EntityKind::PrimaryTarget => Some(PRIMARY_TARGET_SCORE),
        EntityKind::DecoyTarget => Some(-DECOY_PENALTY),
        EntityKind::WeaponPickup | EntityKind::ImpactMarker => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub delta: i64,
    pub leveled_up: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    score: i64,
    level: u32,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self { score: 0, level: 1 }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Apply the delta for `kind` and level up if the exact trigger is met.
    /// Score may go negative.
    pub fn apply_hit(&mut self, kind: EntityKind) -> HitOutcome {
        let delta = score_delta(kind).unwrap_or(0);
        self.score += delta;
        let leveled_up = self.level == LEVEL_UP_FROM_LEVEL && self.score == LEVEL_UP_SCORE;
        if leveled_up {
            self.level_up();
        }
        HitOutcome { delta, leveled_up }
    }

    /// Increment the level. A new level always starts from zero.
    fn level_up(&mut self) {
        self.level += 1;
        self.score = 0;
    }
}
