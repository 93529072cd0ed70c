//! Exponential damping toward scroll-driven targets.
//!
//! Every frame the live value moves a fraction `min(1, k * dt)` of the way to
//! its target. With a fixed target this converges geometrically; a long frame
//! (`k * dt >= 1`) snaps straight to the target instead of overshooting.

use glam::Vec3;
use starscroll_graph::Transform;

use crate::config::MotionConfig;

/// Fraction of the remaining distance covered this frame.
pub fn damping_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * damping_factor(rate, dt)
}

pub fn damp_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current.lerp(target, damping_factor(rate, dt))
}

/// Live transform of a planet group easing toward its progress target.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetMotion {
    config: MotionConfig,
    position: Vec3,
    rotation: Vec3,
    scale: f32,
}

impl PlanetMotion {
    /// Start at the progress-0 transform.
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            position: config.start_position,
            rotation: config.start_rotation,
            scale: 1.0,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Ease toward the target for `progress`.
    pub fn update(&mut self, progress: f32, dt: f32) {
        let target = self.config.target(progress);
        let k = self.config.damping;
        self.position = damp_vec3(self.position, target.position, k, dt);
        self.rotation = damp_vec3(self.rotation, target.rotation, k, dt);
        self.scale = damp(self.scale, target.scale.x, k, dt);
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scale: Vec3::splat(self.scale),
        }
    }

    /// Largest component distance from the target for `progress`.
    pub fn distance_to_target(&self, progress: f32) -> f32 {
        let target = self.config.target(progress);
        (self.position - target.position)
            .abs()
            .max_element()
            .max((self.rotation - target.rotation).abs().max_element())
            .max((self.scale - target.scale.x).abs())
    }
}
