//! Scene configuration loading for the host.
//!
//! The scene table comes from the file named on the command line or in
//! `LAUNCHPAD_SCENE`. A missing or invalid file is not fatal: the host
//! logs a warning and runs the built-in scene.

use std::path::{Path, PathBuf};

use log::{info, warn};

use launchpad_core::config::SceneConfig;

/// Environment variable naming the scene file.
pub const SCENE_ENV_VAR: &str = "LAUNCHPAD_SCENE";

/// Environment variable overriding the RNG seed.
pub const SEED_ENV_VAR: &str = "LAUNCHPAD_SEED";

/// Scene file to load: the first CLI argument wins over the environment.
pub fn scene_path(cli_arg: Option<String>, env_value: Option<String>) -> Option<PathBuf> {
    cli_arg
        .or(env_value)
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Load the scene at `path`, or the built-in scene if there is none or it
/// cannot be used.
pub fn load_or_default(path: Option<&Path>) -> SceneConfig {
    let Some(path) = path else {
        info!("No scene file given; using built-in scene");
        return SceneConfig::default();
    };
    match SceneConfig::load(path) {
        Ok(scene) => {
            info!("Loaded {} bodies from {}", scene.bodies.len(), path.display());
            scene
        }
        Err(e) => {
            warn!("Cannot use scene file {}: {e}; using built-in scene", path.display());
            SceneConfig::default()
        }
    }
}

/// Parse a seed override, ignoring anything that is not a `u64`.
pub fn parse_seed(value: Option<String>) -> Option<u64> {
    let value = value?;
    match value.trim().parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            warn!("Ignoring invalid seed '{value}'");
            None
        }
    }
}
