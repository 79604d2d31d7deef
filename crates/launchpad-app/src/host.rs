//! Host command handlers.
//!
//! The host front end (stdin reader in the binary, or an embedding
//! application) calls these to start the scene, forward commands and
//! read back state. They bridge to the game loop thread via channels.

use log::info;
use serde::Serialize;
use thiserror::Error;

use launchpad_core::commands::PlayerCommand;
use launchpad_core::enums::InteractionPhase;
use launchpad_core::error::ConfigError;
use launchpad_core::events::AudioEvent;
use launchpad_core::state::SceneSnapshot;
use launchpad_sim::{SceneEngine, SimConfig};

use crate::game_loop::{self, SnapshotEmitter};
use crate::navigator::Navigator;
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("scene already running")]
    AlreadyRunning,
    #[error("scene not started")]
    NotStarted,
    #[error("game loop has stopped")]
    LoopStopped,
    #[error("host state lock poisoned")]
    Poisoned,
    #[error("invalid scene configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("host I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Line-oriented events the host writes for its embedding page.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent<'a> {
    Phase { tick: u64, phase: InteractionPhase },
    Audio { cue: &'a AudioEvent },
    Menu { body_id: &'a str },
    Navigate { url: &'a str, body_id: &'a str },
}

/// Build the engine and spawn the game loop if not already running.
pub fn start_scene(
    state: &AppState,
    config: SimConfig,
    navigator: Box<dyn Navigator>,
    emitter: SnapshotEmitter,
) -> Result<(), HostError> {
    let mut running = state.running.lock().map_err(|_| HostError::Poisoned)?;
    if *running {
        return Err(HostError::AlreadyRunning);
    }

    let engine = SceneEngine::new(config)?;
    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(engine, state.latest_snapshot.clone(), navigator, emitter)?;

    *state.command_tx.lock().map_err(|_| HostError::Poisoned)? = Some(cmd_tx);
    *state.loop_thread.lock().map_err(|_| HostError::Poisoned)? = Some(handle);
    *running = true;
    info!("Scene started");
    Ok(())
}

/// Forward a command to the engine.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), HostError> {
    let tx_lock = state.command_tx.lock().map_err(|_| HostError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| HostError::LoopStopped),
        None => Err(HostError::NotStarted),
    }
}

/// Latest snapshot, if the loop has produced one.
pub fn get_snapshot(state: &AppState) -> Result<Option<SceneSnapshot>, HostError> {
    let lock = state.latest_snapshot.lock().map_err(|_| HostError::Poisoned)?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for it to exit.
pub fn shutdown(state: &AppState) -> Result<(), HostError> {
    let mut running = state.running.lock().map_err(|_| HostError::Poisoned)?;
    if let Some(tx) = state.command_tx.lock().map_err(|_| HostError::Poisoned)?.take() {
        // A disconnected channel means the loop is already gone.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    let handle = state.loop_thread.lock().map_err(|_| HostError::Poisoned)?.take();
    if let Some(handle) = handle {
        handle.join().map_err(|_| HostError::LoopStopped)?;
    }
    *running = false;
    Ok(())
}

/// Host events worth reporting for one snapshot, given the phase of the
/// previous one. Navigation is left to the [`Navigator`].
pub fn events_for<'a>(
    snapshot: &'a SceneSnapshot,
    previous: Option<InteractionPhase>,
) -> Vec<HostEvent<'a>> {
    let mut events = Vec::new();
    if previous != Some(snapshot.phase) {
        events.push(HostEvent::Phase {
            tick: snapshot.time.tick,
            phase: snapshot.phase,
        });
        if let Some(body_id) = &snapshot.menu_body {
            events.push(HostEvent::Menu { body_id });
        }
    }
    events.extend(snapshot.audio_events.iter().map(|cue| HostEvent::Audio { cue }));
    events
}
