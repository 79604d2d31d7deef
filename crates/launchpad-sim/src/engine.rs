//! Scene engine: the interaction state machine.
//!
//! `SceneEngine` owns the hecs world of bodies plus every piece of
//! interaction state (phase, projectile, fragment pool, pending hit,
//! redirect timer). Host commands are queued and applied at the next tick
//! boundary; each tick runs the systems and returns a `SceneSnapshot`.
//! Completely headless, so every run with the same seed and inputs is
//! reproducible.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use launchpad_core::commands::PlayerCommand;
use launchpad_core::components::Visibility;
use launchpad_core::config::{DestinationRule, SceneConfig};
use launchpad_core::constants::*;
use launchpad_core::enums::{BodyKind, InteractionPhase};
use launchpad_core::error::ConfigError;
use launchpad_core::events::{AudioEvent, NavigationIntent};
use launchpad_core::state::SceneSnapshot;
use launchpad_core::types::{Camera, Position, SimTime, Viewport};

use crate::destination::resolve_destination;
use crate::fragments::FragmentPool;
use crate::guidance::{ImpactEvent, Projectile};
use crate::registry::BodyRegistry;
use crate::resolver::{self, Hit};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::systems;
use crate::systems::snapshot::FrameState;
use crate::world_setup;

/// Configuration for starting a new scene.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same debris.
    pub seed: u64,
    pub scene: SceneConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            scene: SceneConfig::default(),
        }
    }
}

/// Everything captured at click time that the redirect decision needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingHit {
    pub interaction_id: u64,
    pub entity: Entity,
    pub body_id: String,
    pub kind: BodyKind,
    pub radius: f64,
    pub rule: DestinationRule,
    /// Hit point in the body's local frame (region bodies only).
    pub local_point: Option<Position>,
    pub world_point: Position,
}

/// Tasks the engine schedules on the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    Redirect,
}

/// The scene engine. Owns the ECS world and all interaction state.
pub struct SceneEngine {
    world: World,
    registry: BodyRegistry,
    time: SimTime,
    phase: InteractionPhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    audio_events: Vec<AudioEvent>,

    camera: Camera,
    viewport: Viewport,

    projectile: Option<Projectile>,
    fragments: FragmentPool,
    pending_hit: Option<PendingHit>,
    menu_body: Option<String>,

    scheduler: Scheduler<TimerTask>,
    redirect_timer: Option<TaskHandle>,
    redirect_delay_ms: u64,
    interaction_id: u64,
    explosion_started_secs: Option<f64>,
    navigation: Option<NavigationIntent>,
    committed_url: Option<String>,

    status_text: String,
}

impl SceneEngine {
    /// Validate the scene table and build the world.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.scene.validate()?;

        let mut world = World::new();
        let registry = world_setup::setup_scene(&mut world, &config.scene);
        info!(
            "Scene ready: {} bodies, seed {}",
            registry.len(),
            config.seed
        );

        Ok(Self {
            world,
            registry,
            time: SimTime::default(),
            phase: InteractionPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            audio_events: Vec::new(),
            camera: Camera::default(),
            viewport: Viewport::default(),
            projectile: None,
            fragments: FragmentPool::default(),
            pending_hit: None,
            menu_body: None,
            scheduler: Scheduler::new(),
            redirect_timer: None,
            redirect_delay_ms: config.scene.redirect_delay_ms,
            interaction_id: 0,
            explosion_started_secs: None,
            navigation: None,
            committed_url: None,
            status_text: String::new(),
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one reference tick.
    pub fn tick(&mut self) -> SceneSnapshot {
        self.step(DT, DT)
    }

    /// Advance by one host frame of `frame_secs` wall-clock seconds.
    ///
    /// The simulation step is clamped to `MAX_FRAME_DT`; the redirect
    /// timer runs on the unclamped frame time.
    pub fn advance(&mut self, frame_secs: f64) -> SceneSnapshot {
        let frame_secs = if frame_secs.is_finite() {
            frame_secs.max(0.0)
        } else {
            0.0
        };
        self.step(frame_secs.min(MAX_FRAME_DT), frame_secs)
    }

    fn step(&mut self, dt: f64, wall_secs: f64) -> SceneSnapshot {
        self.process_commands();
        self.time.advance(dt, wall_secs);
        self.run_systems(dt);

        let audio_events = std::mem::take(&mut self.audio_events);
        let navigation = self.navigation.take();
        let light = systems::lighting::light_intensity(self.time_since_explosion());
        systems::snapshot::build_snapshot(
            &self.world,
            &self.registry,
            FrameState {
                time: self.time,
                phase: self.phase,
                projectile: self.projectile.as_ref(),
                fragments: &self.fragments,
                menu_body: self.menu_body.as_deref(),
                light_intensity: light,
                status_text: &self.status_text,
            },
            audio_events,
            navigation,
        )
    }

    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        self.projectile.as_ref()
    }

    pub fn fragments(&self) -> &FragmentPool {
        &self.fragments
    }

    pub fn pending_hit(&self) -> Option<&PendingHit> {
        self.pending_hit.as_ref()
    }

    /// URL the current interaction committed to, once redirecting.
    pub fn committed_url(&self) -> Option<&str> {
        self.committed_url.as_deref()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub(crate) fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::PointerDown { x, y } => self.handle_pointer(x, y),
            PlayerCommand::DismissMenu => {
                if self.phase == InteractionPhase::MenuOpen {
                    debug!("Menu for {:?} dismissed", self.menu_body);
                    self.menu_body = None;
                    self.phase = InteractionPhase::Idle;
                }
            }
            PlayerCommand::Resize { viewport } => {
                self.viewport = viewport;
            }
            PlayerCommand::SetCamera { camera } => {
                self.camera = camera;
            }
            PlayerCommand::SetStatusText { text } => {
                debug!("Status text: {text}");
                self.status_text = text;
            }
            PlayerCommand::Reset => self.reset_interaction(),
        }
    }

    fn handle_pointer(&mut self, x: f64, y: f64) {
        if self.phase != InteractionPhase::Idle {
            debug!("Pointer at ({x}, {y}) ignored during {:?}", self.phase);
            return;
        }

        let Some(hit) = resolver::resolve(
            x,
            y,
            &self.camera,
            &self.viewport,
            &self.world,
            &self.registry,
        ) else {
            debug!("Pointer at ({x}, {y}) hit nothing");
            return;
        };

        match hit.kind {
            BodyKind::Menu => {
                info!("Opening menu for '{}'", hit.body_id);
                self.menu_body = Some(hit.body_id);
                self.phase = InteractionPhase::MenuOpen;
            }
            BodyKind::Direct | BodyKind::Region => self.launch_at(hit),
        }
    }

    fn launch_at(&mut self, hit: Hit) {
        let Ok(body) = self.registry.find(&self.world, &hit.body_id) else {
            debug!("Hit body '{}' is no longer registered", hit.body_id);
            return;
        };

        self.interaction_id += 1;
        let origin = Position::new(LAUNCH_ORIGIN[0], LAUNCH_ORIGIN[1], LAUNCH_ORIGIN[2]);
        self.projectile = Some(Projectile::launch(
            origin,
            body.position,
            body.radius + IMPACT_MARGIN,
        ));
        info!(
            "Launch #{} at '{}' ({:?})",
            self.interaction_id, body.id, hit.kind
        );
        self.audio_events.push(AudioEvent::Launch {
            body_id: body.id.clone(),
        });
        self.pending_hit = Some(PendingHit {
            interaction_id: self.interaction_id,
            entity: hit.entity,
            body_id: body.id,
            kind: hit.kind,
            radius: body.radius,
            rule: body.rule,
            local_point: hit.local_point,
            world_point: hit.world_point,
        });
        self.phase = InteractionPhase::Launching;
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Idle spin
        systems::spin::run(&mut self.world, dt);

        // 2. Guidance
        if self.phase == InteractionPhase::Launching {
            let impact = self.projectile.as_mut().and_then(|p| p.step(dt));
            if let Some(impact) = impact {
                self.on_impact(impact);
            }
        }

        // 3. Debris
        if self.fragments.is_visible() {
            self.fragments.step(dt);
        }

        // 4. Timers
        for (interaction, task) in self.scheduler.poll(self.time.wall_clock_ms) {
            match task {
                TimerTask::Redirect => self.on_redirect_due(interaction),
            }
        }
    }

    fn on_impact(&mut self, impact: ImpactEvent) {
        let Some(hit) = self.pending_hit.as_ref() else {
            return;
        };
        let entity = hit.entity;
        let body_id = hit.body_id.clone();

        if let Ok(mut visibility) = self.world.get::<&mut Visibility>(entity) {
            visibility.visible = false;
        }
        self.fragments.trigger(impact.point, &mut self.rng);
        self.audio_events.push(AudioEvent::Explosion {
            body_id: body_id.clone(),
        });
        self.explosion_started_secs = Some(self.time.elapsed_secs);
        self.projectile = None;

        let handle = self.scheduler.schedule(
            self.time.wall_clock_ms,
            self.redirect_delay_ms,
            self.interaction_id,
            TimerTask::Redirect,
        );
        self.redirect_timer = Some(handle);
        self.phase = InteractionPhase::Exploding;
        info!(
            "Impact on '{}' at tick {}; redirect in {} ms",
            body_id, self.time.tick, self.redirect_delay_ms
        );
    }

    fn on_redirect_due(&mut self, interaction: u64) {
        self.redirect_timer = None;
        if interaction != self.interaction_id || self.phase != InteractionPhase::Exploding {
            debug!("Stale redirect for interaction #{interaction} dropped");
            return;
        }
        let Some(hit) = self.pending_hit.as_ref() else {
            return;
        };
        let Some(url) = resolve_destination(&hit.rule, hit.radius, hit.local_point.as_ref())
        else {
            return;
        };

        info!("Redirecting to {url} (body '{}')", hit.body_id);
        self.navigation = Some(NavigationIntent {
            url: url.clone(),
            body_id: hit.body_id.clone(),
        });
        self.committed_url = Some(url);
        self.phase = InteractionPhase::Redirecting;
    }

    fn time_since_explosion(&self) -> Option<f64> {
        if !self.fragments.is_visible() {
            return None;
        }
        self.explosion_started_secs
            .map(|start| self.time.elapsed_secs - start)
    }

    fn reset_interaction(&mut self) {
        if let Some(handle) = self.redirect_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.scheduler.cancel_interaction(self.interaction_id);
        self.interaction_id += 1;

        self.projectile = None;
        self.pending_hit = None;
        self.menu_body = None;
        self.navigation = None;
        self.committed_url = None;
        self.explosion_started_secs = None;
        self.fragments.hide();

        for entity in self.registry.entities() {
            if let Ok(mut visibility) = self.world.get::<&mut Visibility>(entity) {
                visibility.visible = true;
            }
        }

        info!("Interaction reset from {:?}", self.phase);
        self.phase = InteractionPhase::Idle;
    }
}
