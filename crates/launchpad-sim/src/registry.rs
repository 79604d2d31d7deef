//! Body registry: ordered lookup of the scene's clickable bodies.
//!
//! The body data itself lives in the hecs world; the registry only keeps
//! the table order and the id -> entity index. Lookups return owned
//! [`Body`] copies so callers never hold a world borrow.

use hecs::{Entity, World};

use launchpad_core::components::{BodyInfo, Visibility};
use launchpad_core::config::DestinationRule;
use launchpad_core::enums::BodyKind;
use launchpad_core::error::RegistryError;
use launchpad_core::types::{Position, Rotation};

/// Point-in-time view of one body.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub entity: Entity,
    pub id: String,
    pub radius: f64,
    pub position: Position,
    pub rotation: Rotation,
    pub visible: bool,
    pub rule: DestinationRule,
}

impl Body {
    pub fn kind(&self) -> BodyKind {
        self.rule.kind()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    entries: Vec<(String, Entity)>,
}

impl BodyRegistry {
    pub(crate) fn insert(&mut self, id: String, entity: Entity) {
        self.entries.push((id, entity));
    }

    /// All bodies in table order.
    pub fn list(&self, world: &World) -> Vec<Body> {
        self.entries
            .iter()
            .filter_map(|(_, entity)| read_body(world, *entity))
            .collect()
    }

    pub fn find(&self, world: &World, id: &str) -> Result<Body, RegistryError> {
        self.entity(id)
            .and_then(|entity| read_body(world, entity))
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn entity(&self, id: &str) -> Option<Entity> {
        self.entries
            .iter()
            .find(|(body_id, _)| body_id == id)
            .map(|(_, entity)| *entity)
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entries.iter().map(|(_, entity)| *entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn read_body(world: &World, entity: Entity) -> Option<Body> {
    let info = world.get::<&BodyInfo>(entity).ok()?;
    let position = *world.get::<&Position>(entity).ok()?;
    let rotation = *world.get::<&Rotation>(entity).ok()?;
    let visible = world.get::<&Visibility>(entity).ok()?.visible;
    Some(Body {
        entity,
        id: info.id.clone(),
        radius: info.radius,
        position,
        rotation,
        visible,
        rule: info.rule.clone(),
    })
}
