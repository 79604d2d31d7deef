use std::io::BufRead;

use log::{error, info, warn};
use serde::Serialize;

use launchpad_app::config;
use launchpad_app::host::{self, HostError};
use launchpad_app::navigator::StdoutNavigator;
use launchpad_app::state::AppState;
use launchpad_core::commands::PlayerCommand;
use launchpad_core::enums::InteractionPhase;
use launchpad_core::state::SceneSnapshot;
use launchpad_sim::SimConfig;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

/// Reads one JSON command per line from stdin until EOF or `quit`.
/// `snapshot` prints the latest full snapshot.
fn run() -> Result<(), HostError> {
    let path = config::scene_path(
        std::env::args().nth(1),
        std::env::var(config::SCENE_ENV_VAR).ok(),
    );
    let scene = config::load_or_default(path.as_deref());
    let seed = config::parse_seed(std::env::var(config::SEED_ENV_VAR).ok())
        .unwrap_or(SimConfig::default().seed);

    let state = AppState::new();
    let mut previous: Option<InteractionPhase> = None;
    let emitter = Box::new(move |snapshot: &SceneSnapshot| {
        for event in host::events_for(snapshot, previous) {
            print_line(&event);
        }
        previous = Some(snapshot.phase);
    });
    host::start_scene(&state, SimConfig { seed, scene }, Box::new(StdoutNavigator), emitter)?;

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" => break,
            "snapshot" => {
                if let Some(snapshot) = host::get_snapshot(&state)? {
                    print_line(&snapshot);
                }
            }
            json => match serde_json::from_str::<PlayerCommand>(json) {
                Ok(command) => host::send_command(&state, command)?,
                Err(e) => warn!("Ignoring malformed command {json:?}: {e}"),
            },
        }
    }

    info!("Input closed, shutting down");
    host::shutdown(&state)
}

fn print_line<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(e) => error!("Failed to encode output: {e}"),
    }
}
