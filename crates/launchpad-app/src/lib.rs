//! Launchpad host.
//!
//! Runs the scene engine on a game loop thread, forwards host commands
//! to it and hands the committed redirect to a [`navigator::Navigator`].

pub mod config;
pub mod game_loop;
pub mod host;
pub mod navigator;
pub mod state;

pub use launchpad_core as core;
