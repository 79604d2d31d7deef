//! Entity spawn factories for setting up the scene world.

use hecs::World;
use log::warn;

use launchpad_core::components::{BodyInfo, Spin, Visibility};
use launchpad_core::config::{BodyConfig, SceneConfig};
use launchpad_core::constants::BODY_SPIN_RATE;
use launchpad_core::types::Rotation;

use crate::registry::BodyRegistry;

/// Spawn every configured body and index them in table order.
pub fn setup_scene(world: &mut World, scene: &SceneConfig) -> BodyRegistry {
    let mut registry = BodyRegistry::default();
    for config in &scene.bodies {
        let entity = spawn_body(world, config);
        registry.insert(config.id.clone(), entity);
    }
    registry
}

/// Spawn a single body: visible, unrotated, idly spinning.
pub fn spawn_body(world: &mut World, config: &BodyConfig) -> hecs::Entity {
    if config.uses_fallback_radius() {
        warn!(
            "Body '{}' has radius {:?}; using {} instead",
            config.id,
            config.radius,
            config.effective_radius()
        );
    }

    world.spawn((
        BodyInfo {
            id: config.id.clone(),
            radius: config.effective_radius(),
            rule: config.rule.clone(),
        },
        config.position,
        Rotation::default(),
        Visibility { visible: true },
        Spin {
            rate: BODY_SPIN_RATE,
        },
    ))
}
