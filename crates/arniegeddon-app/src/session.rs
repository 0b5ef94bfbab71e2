//! Session handle: the outer surface the presentation layer talks to.
//!
//! Starts the game loop thread, forwards player commands to it, and serves
//! the latest snapshot for polling, either as a value or as JSON.

use std::sync::mpsc;
use std::thread::JoinHandle;

use log::info;
use thiserror::Error;

use arniegeddon_core::commands::PlayerCommand;
use arniegeddon_core::config::GameConfig;
use arniegeddon_core::state::GameStateSnapshot;
use arniegeddon_sim::TrackingService;

use crate::game_loop;
use crate::state::{shared_snapshot, GameLoopCommand, SharedSnapshot};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session already running")]
    AlreadyRunning,
    #[error("session not started")]
    NotStarted,
    #[error("game loop has stopped")]
    Disconnected,
    #[error("snapshot lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One play session running on its own game loop thread.
pub struct GameSession {
    command_tx: Option<mpsc::Sender<GameLoopCommand>>,
    handle: Option<JoinHandle<()>>,
    latest_snapshot: SharedSnapshot,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            command_tx: None,
            handle: None,
            latest_snapshot: shared_snapshot(),
        }
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx.is_some()
    }

    /// Start the game loop. The tracking service is built on the loop thread.
    pub fn start<T, F>(&mut self, config: GameConfig, make_tracking: F) -> Result<(), SessionError>
    where
        T: TrackingService + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        self.start_with_listener(config, make_tracking, None)
    }

    /// Start the game loop and forward every snapshot to `listener`.
    pub fn start_with_listener<T, F>(
        &mut self,
        config: GameConfig,
        make_tracking: F,
        listener: Option<mpsc::Sender<GameStateSnapshot>>,
    ) -> Result<(), SessionError>
    where
        T: TrackingService + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        if self.is_running() {
            return Err(SessionError::AlreadyRunning);
        }

        let (cmd_tx, handle) = game_loop::spawn_game_loop(
            config,
            make_tracking,
            self.latest_snapshot.clone(),
            listener,
        )?;
        self.command_tx = Some(cmd_tx);
        self.handle = Some(handle);
        info!("session started");
        Ok(())
    }

    /// Send a player command to the engine.
    pub fn send(&self, command: PlayerCommand) -> Result<(), SessionError> {
        let tx = self.command_tx.as_ref().ok_or(SessionError::NotStarted)?;
        tx.send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| SessionError::Disconnected)
    }

    /// The most recent snapshot, if the loop has ticked at least once.
    pub fn latest(&self) -> Result<Option<GameStateSnapshot>, SessionError> {
        let lock = self
            .latest_snapshot
            .lock()
            .map_err(|_| SessionError::Poisoned)?;
        Ok(lock.clone())
    }

    /// The most recent snapshot encoded as JSON.
    pub fn latest_json(&self) -> Result<Option<String>, SessionError> {
        match self.latest()? {
            Some(snapshot) => Ok(Some(serde_json::to_string(&snapshot)?)),
            None => Ok(None),
        }
    }

    /// Tear the session down and wait for the game loop thread to exit.
    pub fn shutdown(&mut self) -> Result<(), SessionError> {
        let tx = self.command_tx.take().ok_or(SessionError::NotStarted)?;
        // The loop also exits on disconnect, so a failed send is fine.
        let _ = tx.send(GameLoopCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| SessionError::Disconnected)?;
        }
        info!("session stopped");
        Ok(())
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        if self.is_running() {
            let _ = self.shutdown();
        }
    }
}
