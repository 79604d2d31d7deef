//! Game loop thread: runs the scene engine once per frame and publishes
//! snapshots.
//!
//! The engine is moved into the thread. Commands arrive over `mpsc`;
//! each frame advances the engine by the measured wall-clock delta, so
//! the redirect timer follows real time even when frames run long.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{error, info};

use launchpad_core::constants::TICK_RATE;
use launchpad_core::state::SceneSnapshot;
use launchpad_sim::SceneEngine;

use crate::navigator::Navigator;
use crate::state::GameLoopCommand;

/// Nominal duration of one frame.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Called with every snapshot the loop produces.
pub type SnapshotEmitter = Box<dyn FnMut(&SceneSnapshot) + Send>;

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    engine: SceneEngine,
    latest_snapshot: Arc<Mutex<Option<SceneSnapshot>>>,
    navigator: Box<dyn Navigator>,
    emitter: SnapshotEmitter,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("launchpad-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot, navigator, emitter);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SceneEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SceneSnapshot>>,
    mut navigator: Box<dyn Navigator>,
    mut emitter: SnapshotEmitter,
) {
    let mut last_frame = Instant::now();
    let mut next_tick_time = last_frame;

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            info!("Game loop stopping");
            return;
        }

        // 2. Advance by the real frame delta
        let now = Instant::now();
        let frame = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        let snapshot = engine.advance(frame);

        // 3. Hand the committed redirect to the navigator
        if let Some(intent) = &snapshot.navigation {
            if let Err(e) = navigator.navigate(intent) {
                error!("Navigation to {} failed: {e}", intent.url);
            }
        }

        // 4. Publish
        emitter(&snapshot);
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next frame
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset rather than spiral
            next_tick_time = now;
        }
    }
}

/// Queue every pending command. Returns false once the loop should stop.
fn drain_commands(engine: &mut SceneEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::commands::PlayerCommand;
    use launchpad_core::enums::InteractionPhase;
    use launchpad_sim::SimConfig;

    use crate::navigator::RecordingNavigator;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::PointerDown {
            x: 640.0,
            y: 360.0,
        }))
        .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::DismissMenu))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::PointerDown { .. })
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::DismissMenu)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_drain_stops_on_shutdown_and_disconnect() {
        let mut engine = SceneEngine::new(SimConfig::default()).unwrap();
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Reset))
            .unwrap();
        assert!(drain_commands(&mut engine, &rx));

        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&mut engine, &rx));

        drop(tx);
        assert!(!drain_commands(&mut engine, &rx));
    }

    #[test]
    fn test_loop_publishes_snapshots_and_stops() {
        let engine = SceneEngine::new(SimConfig::default()).unwrap();
        let latest = Arc::new(Mutex::new(None));
        let (emit_tx, emit_rx) = mpsc::channel::<InteractionPhase>();
        let emitter: SnapshotEmitter = Box::new(move |snap| {
            let _ = emit_tx.send(snap.phase);
        });

        let (tx, handle) = spawn_game_loop(
            engine,
            latest.clone(),
            Box::new(RecordingNavigator::new()),
            emitter,
        )
        .unwrap();

        let first = emit_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first, InteractionPhase::Idle);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
        assert!(latest.lock().unwrap().is_some());
    }

    #[test]
    fn test_frame_duration_matches_reference_tick() {
        let secs = TICK_DURATION.as_secs_f64();
        assert!((secs - launchpad_core::constants::DT).abs() < 1e-9);
    }
}
