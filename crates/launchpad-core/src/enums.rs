//! Enumeration types used throughout the scene.

use serde::{Deserialize, Serialize};

/// Interaction phase (top-level state of the scene).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionPhase {
    /// Accepting pointer input.
    #[default]
    Idle,
    /// Informational overlay for a menu body is open.
    MenuOpen,
    /// Projectile in flight toward the hit body.
    Launching,
    /// Target destroyed, debris flying, redirect timer armed.
    Exploding,
    /// Destination committed and handed to the host.
    Redirecting,
}

/// How a body reacts to being clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// Opens an overlay, never launches.
    Menu,
    /// Launches and redirects to a fixed URL.
    Direct,
    /// Launches and redirects by click latitude.
    Region,
}

/// Latitude band of a region body hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionBand {
    North,
    Equator,
    South,
}
