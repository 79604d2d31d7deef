//! Scene snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, NavigationIntent};
use crate::types::{Position, Rotation, SimTime, Velocity};

/// Complete scene state broadcast to the host after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub time: SimTime,
    pub phase: InteractionPhase,
    pub bodies: Vec<BodyView>,
    pub projectile: Option<ProjectileView>,
    pub fragments: FragmentPoolView,
    /// Body whose overlay is open (MenuOpen only).
    pub menu_body: Option<String>,
    /// Key light intensity.
    pub light_intensity: f64,
    pub status_text: String,
    pub audio_events: Vec<AudioEvent>,
    /// Present on exactly the tick the redirect is committed.
    pub navigation: Option<NavigationIntent>,
}

/// A clickable body as the renderer should draw it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyView {
    pub id: String,
    pub kind: BodyKind,
    pub position: Position,
    pub rotation: Rotation,
    pub radius: f64,
    pub visible: bool,
}

/// The rocket in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub velocity: Velocity,
    /// Unit vector the rocket should look along.
    pub forward: Velocity,
}

/// Debris instances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FragmentPoolView {
    /// Whether the instanced debris mesh is drawn at all.
    pub visible: bool,
    pub fragments: Vec<FragmentView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FragmentView {
    pub position: Position,
    pub rotation: Rotation,
    pub active: bool,
}
