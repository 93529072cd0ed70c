//! Spherical-shell starfield that turns with scroll progress.
//!
//! Positions are generated once at mount and never change. Each frame the whole
//! field is rotated by `progress * (spin_x, spin_y)`, so scrolling back
//! reverses the motion exactly.

use std::f32::consts::TAU;
use std::sync::Arc;

use glam::{Vec3, vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starscroll_graph::{GraphError, Node, NodeId, PointsMaterial, SceneGraph};
use starscroll_scroll::ProgressCell;
use tracing::{debug, trace};

/// Shape and look of a starfield.
#[derive(Debug, Clone, PartialEq)]
pub struct StarfieldConfig {
    pub count: u32,
    /// Distance from the centre to the inside of the shell.
    pub inner_radius: f32,
    /// Radial thickness of the shell.
    pub shell_depth: f32,
    /// X rotation in radians at progress 1.
    pub spin_x: f32,
    /// Y rotation in radians at progress 1.
    pub spin_y: f32,
    pub point_size: f32,
    pub opacity: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 250,
            inner_radius: 40.0,
            shell_depth: 150.0,
            spin_x: 0.1,
            spin_y: 0.2,
            point_size: 0.3,
            opacity: 0.5,
        }
    }
}

impl StarfieldConfig {
    pub fn outer_radius(&self) -> f32 {
        self.inner_radius + self.shell_depth
    }

    /// Whole-field Euler rotation for a progress value.
    pub fn rotation_at(&self, progress: f32) -> Vec3 {
        vec3(progress * self.spin_x, progress * self.spin_y, 0.0)
    }
}

/// Generates a deterministic star shell from a seed.
pub struct StarfieldGenerator {
    seed: u64,
    config: StarfieldConfig,
}

impl StarfieldGenerator {
    pub fn new(seed: u64, config: StarfieldConfig) -> Self {
        Self { seed, config }
    }

    /// Generate star positions. Deterministic for a given seed.
    ///
    /// Directions are uniform on the sphere (`acos(2u - 1)` polar angle, polar
    /// axis +Z); the radius is uniform across the shell depth.
    pub fn generate(&self) -> Vec<Vec3> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        (0..self.config.count)
            .map(|_| {
                let radius = self.config.inner_radius + rng.random::<f32>() * self.config.shell_depth;
                let theta = rng.random::<f32>() * TAU;
                let phi = (2.0 * rng.random::<f32>() - 1.0).acos();
                vec3(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                )
            })
            .collect()
    }
}

/// A starfield mounted in a scene graph.
#[derive(Debug)]
pub struct Starfield {
    config: StarfieldConfig,
    progress: ProgressCell,
    node: NodeId,
}

impl Starfield {
    /// Generate the field and add it as a points node under `parent`.
    pub fn mount(
        graph: &mut SceneGraph,
        parent: NodeId,
        config: StarfieldConfig,
        seed: u64,
        progress: ProgressCell,
    ) -> Result<Self, GraphError> {
        let positions: Arc<[Vec3]> = StarfieldGenerator::new(seed, config.clone()).generate().into();
        let material = PointsMaterial {
            size: config.point_size,
            color: Vec3::ONE,
            opacity: config.opacity,
            transparent: true,
            size_attenuation: true,
        };
        let node = graph.add_child(
            parent,
            Node::points("starfield", positions, material)
                .with_rotation(config.rotation_at(progress.get())),
        )?;
        debug!("Mounted starfield with {} stars (seed {seed})", config.count);
        Ok(Self {
            config,
            progress,
            node,
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    /// Apply the progress-driven rotation. Skips the tick if the node is gone.
    pub fn update(&self, graph: &mut SceneGraph) {
        let Some(node) = graph.get_mut(self.node) else {
            trace!("Starfield node missing, skipping update");
            return;
        };
        node.transform.rotation = self.config.rotation_at(self.progress.get());
    }
}
