//! Game systems.
//!
//! Systems are plain functions or small state machines. The engine owns
//! their state and calls them in a fixed order each frame or when a task
//! fires.

pub mod ammo;
pub mod cleanup;
pub mod hit_resolver;
pub mod lighting;
pub mod pickup;
pub mod placement;
pub mod scoring;
pub mod snapshot;
pub mod spawn_scheduler;
pub mod tutorial;
