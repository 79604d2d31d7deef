//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Scene logic lives in the sim crate, not here.

use serde::{Deserialize, Serialize};

use crate::config::DestinationRule;

/// Identity and routing of a clickable body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyInfo {
    pub id: String,
    /// Effective bounding radius (never zero).
    pub radius: f64,
    pub rule: DestinationRule,
}

/// Whether the renderer draws the entity and the resolver may hit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub visible: bool,
}

/// Constant rotation about the local Y axis while visible (rad/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    pub rate: f64,
}
