//! Single shooting star: a dormant/active streak that respawns forever.

use glam::{Vec3, vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use starscroll_graph::{
    BasicMaterial, Geometry, GraphError, Material, Node, NodeId, SceneGraph,
};
use tracing::{debug, trace};

use crate::span::Span;

/// Where a dormant streak waits, far above any camera frustum.
pub const PARKED_POSITION: Vec3 = Vec3::new(0.0, 100.0, 0.0);

/// Timing and spawn ranges for a shooting star.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStarConfig {
    /// Delay before the first streak.
    pub initial_delay: Span,
    /// Delay between a streak ending and the next one.
    pub respawn_delay: Span,
    pub lifetime: Span,
    pub spawn_x: Span,
    pub spawn_y: Span,
    pub spawn_z: Span,
    pub velocity_x: Span,
    pub velocity_y: Span,
    pub velocity_z: Span,
    /// Radius of the streak sphere.
    pub radius: f32,
}

impl Default for ShootingStarConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl ShootingStarConfig {
    /// Frequent streaks entering from the upper right.
    pub fn standard() -> Self {
        Self {
            initial_delay: Span::new(3.0, 8.0),
            respawn_delay: Span::new(6.0, 16.0),
            lifetime: Span::new(0.6, 1.0),
            spawn_x: Span::new(-6.0, 14.0),
            spawn_y: Span::new(5.0, 13.0),
            spawn_z: Span::new(-30.0, -10.0),
            velocity_x: Span::new(-14.0, -8.0),
            velocity_y: Span::new(-10.0, -6.0),
            velocity_z: Span::new(0.0, 2.0),
            radius: 0.08,
        }
    }

    /// Rarer, shorter, slightly smaller streaks spread across the frame.
    pub fn sparse() -> Self {
        Self {
            initial_delay: Span::new(2.0, 8.0),
            respawn_delay: Span::new(6.0, 18.0),
            lifetime: Span::new(0.5, 0.9),
            spawn_x: Span::new(-12.5, 12.5),
            spawn_y: Span::new(6.0, 14.0),
            spawn_z: Span::new(-28.0, -8.0),
            velocity_x: Span::new(-12.0, -7.0),
            velocity_y: Span::new(-9.0, -5.0),
            velocity_z: Span::new(0.0, 2.0),
            radius: 0.07,
        }
    }
}

/// Streak lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreakState {
    /// Waiting for `timer` seconds before the next spawn.
    Dormant { timer: f32 },
    /// Moving with `velocity` for `life` more seconds.
    Active { life: f32, velocity: Vec3 },
}

/// Shooting star simulation, independent of any scene graph.
#[derive(Debug, Clone)]
pub struct ShootingStar {
    config: ShootingStarConfig,
    rng: ChaCha8Rng,
    state: StreakState,
    position: Vec3,
    spawn_count: u64,
}

impl ShootingStar {
    /// Start dormant with a random initial delay.
    pub fn new(config: ShootingStarConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let timer = config.initial_delay.sample(&mut rng);
        Self {
            config,
            rng,
            state: StreakState::Dormant { timer },
            position: PARKED_POSITION,
            spawn_count: 0,
        }
    }

    /// Start dormant with an explicit countdown.
    pub fn with_timer(config: ShootingStarConfig, seed: u64, timer: f32) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: StreakState::Dormant { timer },
            position: PARKED_POSITION,
            spawn_count: 0,
        }
    }

    pub fn state(&self) -> StreakState {
        self.state
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, StreakState::Active { .. })
    }

    /// Number of streaks spawned so far.
    pub fn spawn_count(&self) -> u64 {
        self.spawn_count
    }

    /// Opacity in `[0, 1]`: fades over the last half second of life, 0 while dormant.
    pub fn opacity(&self) -> f32 {
        match self.state {
            StreakState::Active { life, .. } => (life * 2.0).clamp(0.0, 1.0),
            StreakState::Dormant { .. } => 0.0,
        }
    }

    /// Advance by `dt` seconds. A streak spawned this tick also moves this tick.
    pub fn update(&mut self, dt: f32) {
        if let StreakState::Dormant { timer } = self.state {
            let timer = timer - dt;
            if timer > 0.0 {
                self.state = StreakState::Dormant { timer };
                return;
            }
            self.spawn();
        }

        if let StreakState::Active { life, velocity } = self.state {
            self.position += velocity * dt;
            let life = life - dt;
            if life <= 0.0 {
                let timer = self.config.respawn_delay.sample(&mut self.rng);
                self.state = StreakState::Dormant { timer };
                self.position = PARKED_POSITION;
                trace!("Shooting star parked, next in {timer:.2}s");
            } else {
                self.state = StreakState::Active { life, velocity };
            }
        }
    }

    fn spawn(&mut self) {
        let config = &self.config;
        let rng = &mut self.rng;
        self.position = vec3(
            config.spawn_x.sample(rng),
            config.spawn_y.sample(rng),
            config.spawn_z.sample(rng),
        );
        let velocity = vec3(
            config.velocity_x.sample(rng),
            config.velocity_y.sample(rng),
            config.velocity_z.sample(rng),
        );
        let life = config.lifetime.sample(rng);
        self.state = StreakState::Active { life, velocity };
        self.spawn_count += 1;
        trace!("Shooting star spawned at {:?} for {life:.2}s", self.position);
    }
}

/// A shooting star mounted as a small transparent sphere.
#[derive(Debug)]
pub struct ShootingStarNode {
    star: ShootingStar,
    node: NodeId,
}

impl ShootingStarNode {
    pub fn mount(
        graph: &mut SceneGraph,
        parent: NodeId,
        star: ShootingStar,
    ) -> Result<Self, GraphError> {
        let material = Material::Basic(BasicMaterial {
            depth_write: true,
            ..BasicMaterial::translucent(Vec3::ONE, 0.0)
        });
        let node = graph.add_child(
            parent,
            Node::mesh("shooting-star", Geometry::sphere(star.config.radius, 8, 8), material)
                .with_position(star.position()),
        )?;
        debug!("Mounted shooting star");
        Ok(Self { star, node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn star(&self) -> &ShootingStar {
        &self.star
    }

    /// Step the simulation and mirror it into the node. The simulation keeps
    /// running even when the node is gone.
    pub fn update(&mut self, graph: &mut SceneGraph, dt: f32) {
        self.star.update(dt);
        let Some(node) = graph.get_mut(self.node) else {
            trace!("Shooting star node missing, skipping write");
            return;
        };
        node.transform.position = self.star.position();
        if let Some(Material::Basic(material)) = node.material_mut() {
            material.opacity = self.star.opacity();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_zero_timer_activates_on_first_update() {
        let mut star = ShootingStar::with_timer(ShootingStarConfig::standard(), 1, 0.0);
        assert!(!star.is_active());
        star.update(DT);
        assert!(star.is_active());
        assert_eq!(star.spawn_count(), 1);

        star.update(DT);
        assert_eq!(star.spawn_count(), 1, "no second spawn while active");
    }

    #[test]
    fn test_dormant_counts_down() {
        let mut star = ShootingStar::with_timer(ShootingStarConfig::standard(), 1, 1.0);
        star.update(0.25);
        assert_eq!(star.state(), StreakState::Dormant { timer: 0.75 });
        assert_eq!(star.position(), PARKED_POSITION);
        assert_eq!(star.opacity(), 0.0);
    }

    #[test]
    fn test_spawn_within_configured_ranges() {
        let config = ShootingStarConfig::standard();
        let mut star = ShootingStar::with_timer(config.clone(), 77, 0.0);
        // Zero dt spawns without moving.
        star.update(0.0);
        let p = star.position();
        assert!(config.spawn_x.contains(p.x) && config.spawn_y.contains(p.y) && config.spawn_z.contains(p.z));
        match star.state() {
            StreakState::Active { life, velocity } => {
                assert!(config.lifetime.contains(life));
                assert!(velocity.x < 0.0 && velocity.y < 0.0, "streaks fall down and sideways");
            }
            other => panic!("expected active, got {other:?}"),
        }
    }

    #[test]
    fn test_active_duration_within_lifetime_range() {
        for config in [ShootingStarConfig::standard(), ShootingStarConfig::sparse()] {
            let mut star = ShootingStar::with_timer(config.clone(), 5, 0.0);
            let mut durations = Vec::new();
            let mut active_frames = 0u32;
            for _ in 0..(60 * 600) {
                star.update(DT);
                if star.is_active() {
                    active_frames += 1;
                } else if active_frames > 0 {
                    durations.push(active_frames as f32 * DT);
                    active_frames = 0;
                }
            }
            assert!(durations.len() >= 20, "only {} streaks in 10 minutes", durations.len());
            for d in durations {
                assert!(
                    d >= config.lifetime.min - DT - 1e-3 && d <= config.lifetime.max + 1e-3,
                    "active for {d}s, lifetime range {:?}",
                    config.lifetime
                );
            }
        }
    }

    #[test]
    fn test_expiry_parks_and_rearms() {
        let mut star = ShootingStar::with_timer(ShootingStarConfig::standard(), 3, 0.0);
        star.update(DT);
        // Longer than any lifetime in one step.
        star.update(2.0);
        assert_eq!(star.position(), PARKED_POSITION);
        match star.state() {
            StreakState::Dormant { timer } => {
                assert!(ShootingStarConfig::standard().respawn_delay.contains(timer));
            }
            other => panic!("expected dormant, got {other:?}"),
        }
        assert_eq!(star.opacity(), 0.0);
    }

    #[test]
    fn test_opacity_clamped() {
        let mut star = ShootingStar::with_timer(ShootingStarConfig::standard(), 9, 0.0);
        star.update(0.0);
        // Lifetime starts at >= 0.6, so life * 2 > 1 before clamping.
        assert_eq!(star.opacity(), 1.0);
    }

    #[test]
    fn test_node_mirrors_simulation() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let star = ShootingStar::with_timer(ShootingStarConfig::sparse(), 11, 0.0);
        let mut mounted = ShootingStarNode::mount(&mut graph, root, star).unwrap();
        mounted.update(&mut graph, DT);

        let node = graph.get(mounted.node()).unwrap();
        assert_eq!(node.transform.position, mounted.star().position());
        assert_ne!(node.transform.position, PARKED_POSITION);

        graph.remove(mounted.node()).unwrap();
        mounted.update(&mut graph, DT);
        assert_eq!(mounted.star().spawn_count(), 1);
    }
}
