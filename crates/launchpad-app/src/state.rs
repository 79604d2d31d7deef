//! Host state shared between the command front end and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use launchpad_core::commands::PlayerCommand;
use launchpad_core::state::SceneSnapshot;

/// Commands sent from the host front end to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A command to forward to the scene engine.
    PlayerCommand(PlayerCommand),
    /// Stop the game loop thread.
    Shutdown,
}

/// Shared host state.
///
/// The sender is wrapped in a `Mutex` so the state is `Sync`; the latest
/// snapshot is shared with the game loop thread, which overwrites it
/// every tick.
pub struct AppState {
    /// `None` until the scene is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<SceneSnapshot>>>,
    pub loop_thread: Mutex<Option<JoinHandle<()>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_thread: Mutex::new(None),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(state.loop_thread.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
    }
}
