//! Core types and definitions for the launchpad scene.
//!
//! This crate defines the vocabulary shared across all other crates:
//! body configuration, commands, state snapshots, events, errors and
//! constants. It has no dependency on any runtime or rendering framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
