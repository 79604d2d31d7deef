//! Key light intensity, boosted while an explosion is playing.

use launchpad_core::constants::*;

/// Light intensity `since_explosion` seconds after the last impact, or the
/// resting intensity when no explosion is playing.
pub fn light_intensity(since_explosion: Option<f64>) -> f64 {
    match since_explosion {
        Some(t) => {
            let t = t.clamp(0.0, 1.0);
            LIGHT_BOOST_BASE + (t * std::f64::consts::PI).sin() * LIGHT_BOOST_AMPLITUDE
        }
        None => LIGHT_BASE_INTENSITY,
    }
}
