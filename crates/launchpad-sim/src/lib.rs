//! Interaction engine for the launchpad scene.
//!
//! Owns the hecs world of clickable bodies, resolves pointer input,
//! flies the rocket, shatters the target and commits the redirect.
//! Runs one tick per host frame and produces `SceneSnapshot`s.

pub mod destination;
pub mod engine;
pub mod fragments;
pub mod guidance;
pub mod registry;
pub mod resolver;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use launchpad_core as core;
pub use engine::{SceneEngine, SimConfig};
