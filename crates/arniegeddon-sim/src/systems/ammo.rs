//! Ammo store: a bounded magazine gating every shot.

use arniegeddon_core::constants::AMMO_CAPACITY;
use arniegeddon_core::error::GameError;

/// Rounds remaining, always within `0..=AMMO_CAPACITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmmoStore {
    rounds: u8,
}

impl Default for AmmoStore {
    fn default() -> Self {
        Self::full()
    }
}

impl AmmoStore {
    pub fn full() -> Self {
        Self {
            rounds: AMMO_CAPACITY,
        }
    }

    pub fn rounds(&self) -> u8 {
        self.rounds
    }

    pub fn is_empty(&self) -> bool {
        self.rounds == 0
    }

    /// Spend one round. Fails without changing state when empty.
    pub fn fire(&mut self) -> Result<u8, GameError> {
        if self.rounds == 0 {
            return Err(GameError::OutOfAmmo);
        }
        self.rounds -= 1;
        Ok(self.rounds)
    }

    /// Reload to capacity.
    pub fn refill(&mut self) -> u8 {
        self.rounds = AMMO_CAPACITY;
        self.rounds
    }
}
