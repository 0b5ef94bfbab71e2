//! State shared between the session handle and the game loop thread.

use std::sync::{Arc, Mutex};

use arniegeddon_core::commands::PlayerCommand;
use arniegeddon_core::state::GameStateSnapshot;

/// Commands sent from the session to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the game engine.
    PlayerCommand(PlayerCommand),
    /// Tear the session down and stop the game loop thread.
    Shutdown,
}

/// Latest snapshot, written by the game loop after each tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}
