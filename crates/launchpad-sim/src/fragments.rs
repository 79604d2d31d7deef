//! Fragmentation engine: a fixed pool of debris instances.
//!
//! The pool is allocated once. Every [`FragmentPool::trigger`] rewrites
//! all slots from fresh samples; [`FragmentPool::step`] integrates each
//! slot on its own.

use glam::DVec3;
use rand::Rng;

use launchpad_core::constants::*;
use launchpad_core::types::{Position, Rotation};

/// One debris instance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fragment {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Euler angles (radians).
    pub rotation: DVec3,
    /// Angular rate per axis (rad/s).
    pub spin: DVec3,
    pub active: bool,
}

impl Fragment {
    pub fn position(&self) -> Position {
        self.position.into()
    }

    pub fn rotation(&self) -> Rotation {
        Rotation::new(self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

#[derive(Debug, Clone)]
pub struct FragmentPool {
    fragments: Vec<Fragment>,
    visible: bool,
}

impl Default for FragmentPool {
    fn default() -> Self {
        Self::new(FRAGMENT_COUNT)
    }
}

impl FragmentPool {
    pub fn new(count: usize) -> Self {
        Self {
            fragments: vec![Fragment::default(); count],
            visible: false,
        }
    }

    /// Scatter every slot radially around `center` and show the pool.
    pub fn trigger<R: Rng>(&mut self, center: Position, rng: &mut R) {
        let center = center.as_dvec3();
        for fragment in &mut self.fragments {
            let direction = random_unit_vector(rng);
            let offset = rng.gen_range(FRAGMENT_OFFSET_MIN..FRAGMENT_OFFSET_MAX);
            let speed = rng.gen_range(FRAGMENT_SPEED_MIN..FRAGMENT_SPEED_MAX);
            let rotation = DVec3::new(
                rng.gen_range(0.0..std::f64::consts::PI),
                rng.gen_range(0.0..std::f64::consts::PI),
                rng.gen_range(0.0..std::f64::consts::PI),
            );
            let spin = DVec3::new(
                rng.gen_range(FRAGMENT_SPIN_X_MIN..FRAGMENT_SPIN_X_MAX),
                rng.gen_range(FRAGMENT_SPIN_Y_MIN..FRAGMENT_SPIN_Y_MAX),
                0.0,
            );

            *fragment = Fragment {
                position: center + direction * offset,
                velocity: direction * speed,
                rotation,
                spin,
                active: true,
            };
        }
        self.visible = true;
    }

    /// Integrate every active fragment by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        for fragment in self.fragments.iter_mut().filter(|f| f.active) {
            let mut velocity = fragment.velocity;
            velocity.y += FRAGMENT_GRAVITY * dt;
            velocity *= FRAGMENT_DAMPING;

            fragment.position += velocity * dt * FRAGMENT_TIME_SCALE;
            fragment.rotation += fragment.spin * dt;
            fragment.velocity = velocity;
        }
    }

    /// Hide the instanced mesh. Slot state is kept until the next trigger.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.fragments.iter().filter(|f| f.active).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }
}

/// Uniform direction on the unit sphere by cube rejection.
fn random_unit_vector<R: Rng>(rng: &mut R) -> DVec3 {
    loop {
        let candidate = DVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let length_sq = candidate.length_squared();
        if length_sq > 1e-12 && length_sq <= 1.0 {
            return candidate / length_sq.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_pool_is_hidden_and_inactive() {
        let pool = FragmentPool::default();
        assert_eq!(pool.len(), FRAGMENT_COUNT);
        assert_eq!(pool.active_count(), 0);
        assert!(!pool.is_visible());
    }

    #[test]
    fn test_trigger_places_fragments_in_shell() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut pool = FragmentPool::new(200);
        let center = Position::new(3.0, -2.0, 1.0);
        pool.trigger(center, &mut rng);

        assert!(pool.is_visible());
        assert_eq!(pool.active_count(), 200);
        for f in pool.iter() {
            let offset = f.position.distance(center.as_dvec3());
            assert!(
                (FRAGMENT_OFFSET_MIN - 1e-9..FRAGMENT_OFFSET_MAX + 1e-9).contains(&offset),
                "offset {offset} out of range"
            );
            let speed = f.velocity.length();
            assert!((FRAGMENT_SPEED_MIN - 1e-9..FRAGMENT_SPEED_MAX + 1e-9).contains(&speed));
            // Velocity points away from the impact point.
            assert!(f.velocity.dot(f.position - center.as_dvec3()) > 0.0);
        }
    }

    #[test]
    fn test_back_to_back_trigger_resets_every_slot() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut pool = FragmentPool::new(64);
        pool.trigger(Position::default(), &mut rng);
        for _ in 0..30 {
            pool.step(DT);
        }
        let stale: Vec<Fragment> = pool.iter().copied().collect();

        let center = Position::new(50.0, 0.0, 0.0);
        pool.trigger(center, &mut rng);

        assert_eq!(pool.len(), 64);
        assert_eq!(pool.active_count(), 64);
        for (fresh, old) in pool.iter().zip(&stale) {
            assert!(fresh.position.distance(center.as_dvec3()) <= FRAGMENT_OFFSET_MAX + 1e-9);
            assert!(fresh.velocity.length() >= FRAGMENT_SPEED_MIN - 1e-9);
            assert_ne!(fresh.velocity, old.velocity);
        }
    }

    #[test]
    fn test_step_applies_gravity_damping_and_time_scale() {
        let mut pool = FragmentPool::new(1);
        pool.fragments[0] = Fragment {
            position: DVec3::ZERO,
            velocity: DVec3::new(1.0, 0.0, 0.0),
            rotation: DVec3::ZERO,
            spin: DVec3::new(1.0, 0.5, 0.0),
            active: true,
        };
        let dt = 0.02;
        pool.step(dt);

        let f = pool.fragments[0];
        let vy = FRAGMENT_GRAVITY * dt * FRAGMENT_DAMPING;
        assert!((f.velocity.x - FRAGMENT_DAMPING).abs() < 1e-12);
        assert!((f.velocity.y - vy).abs() < 1e-12);
        assert!((f.position.x - FRAGMENT_DAMPING * dt * FRAGMENT_TIME_SCALE).abs() < 1e-12);
        assert!((f.rotation.x - dt).abs() < 1e-12);
        assert!((f.rotation.y - 0.5 * dt).abs() < 1e-12);
    }

    #[test]
    fn test_inactive_fragments_do_not_move() {
        let mut pool = FragmentPool::new(4);
        pool.step(DT);
        assert!(pool.iter().all(|f| *f == Fragment::default()));
    }

    #[test]
    fn test_hide_keeps_slots() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut pool = FragmentPool::new(8);
        pool.trigger(Position::default(), &mut rng);
        pool.hide();
        assert!(!pool.is_visible());
        assert_eq!(pool.len(), 8);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn sampled_directions_are_unit(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..32 {
                let d = random_unit_vector(&mut rng);
                prop_assert!((d.length() - 1.0).abs() < 1e-9);
            }
        }

        #[test]
        fn repeated_triggers_keep_pool_size(seed in any::<u64>(), triggers in 1usize..5) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut pool = FragmentPool::new(32);
            for _ in 0..triggers {
                pool.trigger(Position::default(), &mut rng);
                pool.step(DT);
            }
            prop_assert_eq!(pool.len(), 32);
            prop_assert_eq!(pool.active_count(), 32);
        }
    }
}
