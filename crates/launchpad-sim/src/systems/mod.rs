//! Systems that operate on the scene world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for
//! read-only work). Interaction state lives in the engine.

pub mod lighting;
pub mod spin;
pub mod snapshot;
