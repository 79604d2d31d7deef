//! Idle spin: visible bodies turn about their local Y axis every tick.

use hecs::World;

use launchpad_core::components::{Spin, Visibility};
use launchpad_core::types::Rotation;

/// Advance the rotation of every visible spinning entity by `dt` seconds.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (rotation, spin, visibility)) in
        world.query_mut::<(&mut Rotation, &Spin, &Visibility)>()
    {
        if !visibility.visible {
            continue;
        }
        rotation.y = (rotation.y + spin.rate * dt).rem_euclid(std::f64::consts::TAU);
    }
}
