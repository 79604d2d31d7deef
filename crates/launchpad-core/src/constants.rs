//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per reference tick. Guidance gains are tuned against this.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest simulation step taken for a single host frame (seconds).
pub const MAX_FRAME_DT: f64 = 0.033;

// --- Projectile guidance ---

/// Fixed off-screen launch point (lower left of the default view).
pub const LAUNCH_ORIGIN: [f64; 3] = [-18.0, -10.0, 0.0];

/// Initial speed along the launch line (units per reference tick).
pub const LAUNCH_SPEED: f64 = 0.28;

/// Velocity added toward the target each reference tick.
pub const STEERING_GAIN: f64 = 0.02;

/// Velocity magnitude clamp (units per reference tick).
pub const MAX_PROJECTILE_SPEED: f64 = 0.9;

/// Impact fires this far outside the target's bounding radius, so the
/// hit reads as touching the surface rather than the center.
pub const IMPACT_MARGIN: f64 = 0.2;

// --- Bodies ---

/// Radius used when a body has a missing or non-positive radius.
pub const DEFAULT_BODY_RADIUS: f64 = 4.0;

/// Idle spin of visible bodies about their local Y axis (rad/s).
pub const BODY_SPIN_RATE: f64 = 0.4;

/// Default latitude split for region bodies (degrees).
pub const REGION_THRESHOLD_DEGREES: f64 = 35.0;

// --- Fragmentation ---

/// Size of the pre-allocated debris pool.
pub const FRAGMENT_COUNT: usize = 400;

/// Initial distance of a fragment from the impact point.
pub const FRAGMENT_OFFSET_MIN: f64 = 0.5;
pub const FRAGMENT_OFFSET_MAX: f64 = 1.1;

/// Initial outward speed of a fragment.
pub const FRAGMENT_SPEED_MIN: f64 = 0.25;
pub const FRAGMENT_SPEED_MAX: f64 = 0.85;

/// Downward acceleration applied to fragment velocity (per second).
pub const FRAGMENT_GRAVITY: f64 = -0.12;

/// Multiplicative velocity damping per tick.
pub const FRAGMENT_DAMPING: f64 = 0.995;

/// Visual speed-up applied when integrating fragment positions.
pub const FRAGMENT_TIME_SCALE: f64 = 12.0;

/// Per-fragment spin rate ranges (rad/s).
pub const FRAGMENT_SPIN_X_MIN: f64 = 0.5;
pub const FRAGMENT_SPIN_X_MAX: f64 = 1.5;
pub const FRAGMENT_SPIN_Y_MIN: f64 = 0.2;
pub const FRAGMENT_SPIN_Y_MAX: f64 = 1.0;

// --- Redirect ---

/// Cinematic pause between impact and navigation (wall-clock ms).
pub const REDIRECT_DELAY_MS: u64 = 1800;

// --- Lighting ---

/// Key light intensity outside of an explosion.
pub const LIGHT_BASE_INTENSITY: f64 = 1.1;

/// Key light during an explosion: base + sin(min(t, 1) * PI) * amplitude.
pub const LIGHT_BOOST_BASE: f64 = 1.2;
pub const LIGHT_BOOST_AMPLITUDE: f64 = 0.6;

// --- Camera / viewport defaults ---

pub const CAMERA_EYE: [f64; 3] = [0.0, 12.0, 28.0];
pub const CAMERA_FOV_Y_DEGREES: f64 = 60.0;
pub const CAMERA_NEAR: f64 = 0.1;
pub const CAMERA_FAR: f64 = 2000.0;

pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 720.0;
