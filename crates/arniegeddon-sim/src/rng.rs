//! Session random number generator.
//!
//! Seeded once per session. A config seed gives reproducible sessions;
//! otherwise the seed comes from the wall clock so sessions differ.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use arniegeddon_core::types::AxisRange;

pub struct SessionRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SessionRng {
    /// Deterministic generator for the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generator seeded from the current time.
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::seeded(seed)
    }

    /// Use the configured seed when present, the clock otherwise.
    pub fn for_session(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_clock(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform sample in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        self.unit() * (max - min) + min
    }

    /// Uniform sample along one placement axis.
    pub fn axis(&mut self, axis: AxisRange) -> f32 {
        self.range(f64::from(axis.min), f64::from(axis.max)) as f32
    }

    /// True with probability `1 / n`.
    pub fn one_in(&mut self, n: u32) -> bool {
        self.rng.gen_range(0..n.max(1)) == 0
    }
}
