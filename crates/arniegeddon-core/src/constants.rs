//! Gameplay constants and tuning parameters.

/// Frame update rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per frame.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Entity lifecycle ---

/// Seconds a spawned target or decoy stays anchored before it is removed.
pub const TARGET_TTL_SECS: f64 = 3.0;

/// One in this many spawns is a decoy instead of a primary target.
pub const DECOY_ODDS: u32 = 5;

// --- Ammo ---

/// Rounds held by a full magazine.
pub const AMMO_CAPACITY: u8 = 6;

/// Camera-to-pickup distance (world units) below which a weapon is collected.
pub const PICKUP_RADIUS: f32 = 0.1;

// --- Scoring ---

/// Score awarded for hitting a primary target.
pub const PRIMARY_TARGET_SCORE: i64 = 100;

/// Score deducted for hitting a decoy.
pub const DECOY_PENALTY: i64 = 200;

/// Level at which the one-off level-up check is armed.
pub const LEVEL_UP_FROM_LEVEL: u32 = 1;

/// Exact score that triggers the level-up transition.
pub const LEVEL_UP_SCORE: i64 = 100;

// --- Spawn cadence ---

/// Level 1 spawn interval bounds (seconds).
pub const LEVEL_1_INTERVAL: (f64, f64) = (1.0, 3.0);

/// Level 2 spawn interval bounds (seconds).
pub const LEVEL_2_INTERVAL: (f64, f64) = (0.5, 2.0);

/// Spawn interval bounds for level 3 and beyond (seconds).
pub const LEVEL_3_PLUS_INTERVAL: (f64, f64) = (0.0, 1.0);

/// Repeating interval used by the fixed-cadence configuration (seconds).
pub const FIXED_SPAWN_INTERVAL_SECS: f64 = 3.0;

// --- Hit sequence ---

/// Delay between the shot and the impact effects (seconds).
pub const HIT_EFFECT_DELAY_SECS: f64 = 0.3;

/// Delay between the impact effects and removal of the hit entity (seconds).
pub const HIT_REMOVAL_DELAY_SECS: f64 = 0.2;

/// Camera-space depth at which the impact marker is placed.
pub const IMPACT_DEPTH: f32 = -0.6;

// --- Presentation ---

/// Delay before the level-up celebration is shown (seconds).
pub const LEVEL_UP_DELAY_SECS: f64 = 0.5;

/// How long an on-screen message stays visible (seconds).
pub const MESSAGE_DURATION_SECS: f64 = 1.2;

/// How long the level-up banner stays up when play resumes on its own (seconds).
pub const LEVEL_UP_BANNER_SECS: f64 = 1.2;

/// Number of onboarding cards in the tutorial.
pub const TUTORIAL_STEPS: u8 = 5;

/// Ambient light intensity (lumens) treated as neutral lighting.
pub const NEUTRAL_LIGHT_INTENSITY: f32 = 1000.0;

/// Message shown when the player fires with an empty magazine.
pub const OUT_OF_AMMO_MESSAGE: &str = "Out of ammo! Pick up a weapon!";
