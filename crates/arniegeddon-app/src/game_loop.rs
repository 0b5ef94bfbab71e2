//! Game loop thread: runs the game engine at `TICK_RATE` and publishes snapshots.
//!
//! The engine and its tracking service are created inside the thread, so the
//! tracking service itself never has to cross threads; only its constructor
//! does. Commands arrive via `mpsc` channel. Snapshots are stored in shared
//! state for polling and optionally forwarded to a listener channel.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};

use arniegeddon_core::config::GameConfig;
use arniegeddon_core::constants::TICK_RATE;
use arniegeddon_core::state::GameStateSnapshot;
use arniegeddon_sim::{GameEngine, TrackingService};

use crate::state::{GameLoopCommand, SharedSnapshot};

/// Duration of one frame.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle. The loop exits on
/// `Shutdown` or when every sender has been dropped.
pub fn spawn_game_loop<T, F>(
    config: GameConfig,
    make_tracking: F,
    latest_snapshot: SharedSnapshot,
    snapshot_tx: Option<mpsc::Sender<GameStateSnapshot>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)>
where
    T: TrackingService + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("arniegeddon-game-loop".into())
        .spawn(move || {
            let engine = GameEngine::new(config, make_tracking());
            run_game_loop(engine, cmd_rx, &latest_snapshot, snapshot_tx);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop<T: TrackingService>(
    mut engine: GameEngine<T>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
    mut snapshot_tx: Option<mpsc::Sender<GameStateSnapshot>>,
) {
    info!("game loop started at {TICK_RATE} Hz");
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    shut_down(&mut engine, latest_snapshot);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame
        let snapshot = engine.tick();

        // 3. Forward to the listener, dropping it once it hangs up
        if let Some(tx) = &snapshot_tx {
            if tx.send(snapshot.clone()).is_err() {
                debug!("snapshot listener disconnected");
                snapshot_tx = None;
            }
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next frame
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

fn shut_down<T: TrackingService>(engine: &mut GameEngine<T>, latest_snapshot: &SharedSnapshot) {
    engine.teardown();
    let snapshot = engine.tick();
    if let Ok(mut lock) = latest_snapshot.lock() {
        *lock = Some(snapshot);
    }
    info!("game loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::shared_snapshot;
    use arniegeddon_core::commands::PlayerCommand;
    use arniegeddon_core::enums::GamePhase;
    use arniegeddon_sim::SimulatedTracking;

    fn config() -> GameConfig {
        GameConfig::arniegeddon().with_seed(7)
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Tap))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::ArmSpecialSight))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::Tap)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::ArmSpecialSight)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_populated_snapshot_serializes() {
        let mut engine = GameEngine::new(config(), SimulatedTracking::with_camera_at_origin());
        engine.tick();
        engine.queue_commands(std::iter::repeat(PlayerCommand::Tap).take(5));

        // Run long enough to populate targets
        for _ in 0..300 {
            engine.tick();
        }

        let snapshot = engine.tick();
        assert!(!snapshot.entities.is_empty());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"entities\":[{"));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.667ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_loop_publishes_snapshots_and_shuts_down() {
        let latest = shared_snapshot();
        let (snap_tx, snap_rx) = mpsc::channel();
        let (cmd_tx, handle) = spawn_game_loop(
            config(),
            SimulatedTracking::with_camera_at_origin,
            latest.clone(),
            Some(snap_tx),
        )
        .unwrap();

        let first = snap_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first.phase, GamePhase::Tutorial);

        cmd_tx
            .send(GameLoopCommand::PlayerCommand(PlayerCommand::Tap))
            .unwrap();
        let advanced = snap_rx
            .iter()
            .take(120)
            .any(|s| s.tutorial_step == 2);
        assert!(advanced, "tap should reach the engine");

        cmd_tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let last = latest.lock().unwrap().clone().unwrap();
        assert_eq!(last.phase, GamePhase::TornDown);
        assert!(last.entities.is_empty());
    }

    #[test]
    fn test_loop_exits_when_sender_dropped() {
        let latest = shared_snapshot();
        let (cmd_tx, handle) =
            spawn_game_loop(config(), SimulatedTracking::new, latest.clone(), None).unwrap();
        std::thread::sleep(TICK_DURATION * 3);
        drop(cmd_tx);
        handle.join().unwrap();

        let last = latest.lock().unwrap().clone().unwrap();
        assert_eq!(last.phase, GamePhase::TornDown);
    }
}
