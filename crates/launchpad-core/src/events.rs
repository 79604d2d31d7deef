//! Events emitted by the scene for audio and navigation.

use serde::{Deserialize, Serialize};

/// Audio cues for the host sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Rocket left the launch point.
    Launch { body_id: String },
    /// Rocket reached its target.
    Explosion { body_id: String },
}

/// Terminal redirect handed to the host's navigation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub url: String,
    /// Body whose destination rule produced `url`.
    pub body_id: String,
}
