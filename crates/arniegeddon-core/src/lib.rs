//! Core types and definitions for ARniegeddon.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity kinds, components, commands, events, state snapshots,
//! configuration presets, and constants. It has no dependency on the
//! AR tracking platform or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
