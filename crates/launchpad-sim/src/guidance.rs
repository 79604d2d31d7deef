//! Projectile guidance: a proportional homing law with a speed clamp.
//!
//! Each reference tick the projectile gains a fixed fraction of the unit
//! line-of-sight vector, its velocity is clamped, and it integrates one
//! velocity step. Variable frame times scale the gain and displacement by
//! `dt / DT`, so velocity is always expressed per reference tick.

use glam::DVec3;

use launchpad_core::constants::*;
use launchpad_core::types::{Position, Velocity};

/// Emitted once, on the tick the projectile reaches its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactEvent {
    pub point: Position,
}

/// The rocket.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Position,
    /// Units per reference tick.
    pub velocity: Velocity,
    /// Copy of the target position at launch time.
    pub target: Position,
    /// Impact fires once the range drops below this.
    pub impact_distance: f64,
    pub active: bool,
    pub ticks_in_flight: u32,
}

impl Projectile {
    /// Create a projectile at `from` heading straight at `to` with the
    /// fixed launch speed.
    pub fn launch(from: Position, to: Position, impact_distance: f64) -> Self {
        let heading = (to.as_dvec3() - from.as_dvec3()).normalize_or_zero();
        Self {
            position: from,
            velocity: (heading * LAUNCH_SPEED).into(),
            target: to,
            impact_distance,
            active: true,
            ticks_in_flight: 0,
        }
    }

    /// Advance by `dt` seconds. Returns the impact on the tick it happens;
    /// an inactive projectile does nothing.
    pub fn step(&mut self, dt: f64) -> Option<ImpactEvent> {
        if !self.active {
            return None;
        }

        let scale = dt / DT;
        let velocity = steer(&self.position, &self.velocity, &self.target, scale);
        self.velocity = velocity;
        self.position = (self.position.as_dvec3() + velocity.as_dvec3() * scale).into();
        self.ticks_in_flight += 1;

        if self.position.range_to(&self.target) < self.impact_distance {
            self.active = false;
            return Some(ImpactEvent { point: self.target });
        }
        None
    }

    /// Unit vector the rocket looks along. Falls back to the line of sight
    /// while the velocity is zero.
    pub fn forward(&self) -> Velocity {
        let heading = self.velocity.as_dvec3().normalize_or_zero();
        if heading != DVec3::ZERO {
            return heading.into();
        }
        (self.target.as_dvec3() - self.position.as_dvec3())
            .normalize_or_zero()
            .into()
    }

    pub fn range_to_target(&self) -> f64 {
        self.position.range_to(&self.target)
    }
}

/// Homing correction: add `STEERING_GAIN * scale` along the line of sight,
/// then clamp the speed to `MAX_PROJECTILE_SPEED`.
pub fn steer(position: &Position, velocity: &Velocity, target: &Position, scale: f64) -> Velocity {
    let los = (target.as_dvec3() - position.as_dvec3()).normalize_or_zero();
    let corrected = velocity.as_dvec3() + los * STEERING_GAIN * scale;
    corrected.clamp_length_max(MAX_PROJECTILE_SPEED).into()
}
