//! Scroll camera rig.
//!
//! The camera starts at its base position and, every frame, moves a damped
//! step toward `base + drift * progress`. It never rotates; every scene looks
//! down -Z at the origin.

use glam::Vec3;
use starscroll_graph::Camera;
use starscroll_planet::damp_vec3;
use starscroll_scroll::ProgressCell;

/// Damping rate shared by every scroll camera.
pub const CAMERA_DAMPING: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRigConfig {
    pub base: Vec3,
    /// Offset added at progress 1.
    pub drift: Vec3,
    pub fov_y_degrees: f32,
    pub damping: f32,
}

impl CameraRigConfig {
    /// 45 degree camera with the standard damping.
    pub fn new(base: Vec3, drift: Vec3) -> Self {
        Self {
            base,
            drift,
            fov_y_degrees: 45.0,
            damping: CAMERA_DAMPING,
        }
    }

    pub fn target(&self, progress: f32) -> Vec3 {
        self.base + self.drift * progress
    }
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraRigConfig,
    camera: Camera,
    progress: ProgressCell,
}

impl CameraRig {
    pub fn new(config: CameraRigConfig, progress: ProgressCell) -> Self {
        Self {
            camera: Camera::perspective(config.fov_y_degrees, config.base),
            config,
            progress,
        }
    }

    pub fn config(&self) -> &CameraRigConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        self.camera.set_aspect_ratio(width, height);
    }

    pub fn update(&mut self, dt: f32) {
        let target = self.config.target(self.progress.get());
        self.camera.position = damp_vec3(self.camera.position, target, self.config.damping, dt);
    }
}
