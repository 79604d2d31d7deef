//! Snapshot system: reads the world and interaction state into a
//! [`SceneSnapshot`]. Read-only.

use hecs::World;

use launchpad_core::enums::InteractionPhase;
use launchpad_core::events::{AudioEvent, NavigationIntent};
use launchpad_core::state::*;
use launchpad_core::types::SimTime;

use crate::fragments::FragmentPool;
use crate::guidance::Projectile;
use crate::registry::BodyRegistry;

/// Engine-owned state that goes into a snapshot alongside the world.
pub struct FrameState<'a> {
    pub time: SimTime,
    pub phase: InteractionPhase,
    pub projectile: Option<&'a Projectile>,
    pub fragments: &'a FragmentPool,
    pub menu_body: Option<&'a str>,
    pub light_intensity: f64,
    pub status_text: &'a str,
}

pub fn build_snapshot(
    world: &World,
    registry: &BodyRegistry,
    frame: FrameState<'_>,
    audio_events: Vec<AudioEvent>,
    navigation: Option<NavigationIntent>,
) -> SceneSnapshot {
    SceneSnapshot {
        time: frame.time,
        phase: frame.phase,
        bodies: build_bodies(world, registry),
        projectile: frame.projectile.filter(|p| p.active).map(build_projectile),
        fragments: build_fragments(frame.fragments),
        menu_body: frame.menu_body.map(str::to_owned),
        light_intensity: frame.light_intensity,
        status_text: frame.status_text.to_owned(),
        audio_events,
        navigation,
    }
}

fn build_bodies(world: &World, registry: &BodyRegistry) -> Vec<BodyView> {
    registry
        .list(world)
        .into_iter()
        .map(|body| BodyView {
            kind: body.kind(),
            id: body.id,
            position: body.position,
            rotation: body.rotation,
            radius: body.radius,
            visible: body.visible,
        })
        .collect()
}

fn build_projectile(projectile: &Projectile) -> ProjectileView {
    ProjectileView {
        position: projectile.position,
        velocity: projectile.velocity,
        forward: projectile.forward(),
    }
}

/// Instance transforms are only emitted while the debris mesh is drawn.
fn build_fragments(pool: &FragmentPool) -> FragmentPoolView {
    if !pool.is_visible() {
        return FragmentPoolView::default();
    }
    FragmentPoolView {
        visible: true,
        fragments: pool
            .iter()
            .map(|f| FragmentView {
                position: f.position(),
                rotation: f.rotation(),
                active: f.active,
            })
            .collect(),
    }
}
