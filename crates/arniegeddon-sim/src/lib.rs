//! Game engine for ARniegeddon.
//!
//! Owns the entity registry, the session RNG, and the task queue, runs the
//! frame systems at a fixed rate, and produces `GameStateSnapshot`s for the
//! presentation layer. AR tracking is reached only through `TrackingService`.

pub mod engine;
pub mod registry;
pub mod rng;
pub mod scene;
pub mod systems;
pub mod tasks;
pub mod tracking;
pub mod world_setup;

pub use arniegeddon_core as core;
pub use engine::GameEngine;
pub use tracking::{SimulatedTracking, TrackingService};
