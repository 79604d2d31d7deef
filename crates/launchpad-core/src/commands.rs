//! Commands sent from the host page to the scene.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::{Camera, Viewport};

/// All possible host/user actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Pointer input ---
    /// Pointer pressed at client coordinates.
    PointerDown { x: f64, y: f64 },
    /// Close the informational overlay opened by a menu body.
    DismissMenu,

    // --- Render collaborator state ---
    /// Canvas moved or resized.
    Resize { viewport: Viewport },
    /// Camera moved (orbit controls live in the host).
    SetCamera { camera: Camera },

    // --- Side channel ---
    /// Replace the status line (metrics poll / notify feedback).
    /// Never affects the interaction.
    SetStatusText { text: String },

    // --- Lifecycle ---
    /// Abandon the current interaction and return to idle.
    Reset,
}
