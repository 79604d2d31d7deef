//! Fundamental geometric and simulation types.

use glam::{DMat4, DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// 3D position in scene space (scene units, right-handed, +Y up).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in scene units per reference tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Euler rotation in radians, applied in X, Y, Z order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking.
///
/// `elapsed_secs` follows the clamped simulation step, `wall_clock_ms`
/// follows the unclamped host frame time. Timers run on the latter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
    /// Elapsed host wall-clock time in milliseconds.
    pub wall_clock_ms: f64,
}

/// Canvas rectangle in client pixels, as reported by the host page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Perspective camera pose. Placement is owned by the host (orbit
/// controls); the scene only reads it for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: Position,
    pub target: Position,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    pub near: f64,
    pub far: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.as_dvec3().distance(other.as_dvec3())
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Speed magnitude (units per reference tick).
    pub fn speed(&self) -> f64 {
        self.as_dvec3().length()
    }

    /// Unit heading, or zero when at rest.
    pub fn direction(&self) -> Velocity {
        self.as_dvec3().normalize_or_zero().into()
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Velocity {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Rotation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_quat(&self) -> DQuat {
        DQuat::from_euler(EulerRot::XYZ, self.x, self.y, self.z)
    }
}

impl SimTime {
    /// Seconds per tick at the reference tick rate.
    pub fn dt(&self) -> f64 {
        DT
    }

    /// Advance by one tick of `sim_dt` simulated seconds and
    /// `wall_secs` seconds of host time.
    pub fn advance(&mut self, sim_dt: f64, wall_secs: f64) {
        self.tick += 1;
        self.elapsed_secs += sim_dt;
        self.wall_clock_ms += wall_secs * 1000.0;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn aspect(&self) -> f64 {
        self.width / self.height.max(1.0)
    }

    /// Convert client coordinates to normalized device coordinates
    /// (x right, y up, both in [-1, 1] inside the canvas).
    /// Returns `None` for a degenerate (zero-sized) canvas.
    pub fn to_ndc(&self, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let x = (client_x - self.left) / self.width * 2.0 - 1.0;
        let y = -((client_y - self.top) / self.height) * 2.0 + 1.0;
        Some((x, y))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Position::new(CAMERA_EYE[0], CAMERA_EYE[1], CAMERA_EYE[2]),
            target: Position::default(),
            fov_y_degrees: CAMERA_FOV_Y_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye.as_dvec3(), self.target.as_dvec3(), DVec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f64) -> DMat4 {
        DMat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }

    /// Combined view-projection matrix for the given aspect ratio.
    pub fn view_projection(&self, aspect: f64) -> DMat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}
