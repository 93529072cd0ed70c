//! Flat planetary ring and its CPU reference shading.

use std::f32::consts::PI;

use glam::{Vec2, Vec3, Vec4, vec3};

use crate::surface::{mix, smoothstep};

/// Annulus geometry and radial color bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingConfig {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub segments: u32,
    /// Rotation about X that lays the ring near the planet's equator.
    pub tilt: f32,
    pub inner_color: Vec3,
    pub outer_color: Vec3,
    /// Frequency of the fine radial banding.
    pub band_freq: f32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            inner_radius: 2.4,
            outer_radius: 4.2,
            segments: 64,
            tilt: PI / 2.2,
            inner_color: vec3(0.85, 0.75, 0.45),
            outer_color: vec3(0.55, 0.42, 0.25),
            band_freq: 120.0,
        }
    }
}

/// Shade one ring fragment, returning premultiplication-free RGBA.
///
/// `uv` is the ring's planar UV where the outer edge lies at distance 0.5
/// from `(0.5, 0.5)`. Alpha falls off smoothly at both edges and is modulated
/// by fine radial bands.
pub fn shade_ring(config: &RingConfig, uv: Vec2) -> Vec4 {
    let r = (uv - Vec2::splat(0.5)).length() * 2.0;
    let mut alpha = smoothstep(0.55, 0.65, r) * smoothstep(1.0, 0.92, r);
    let col = mix(
        config.inner_color,
        config.outer_color,
        ((r - 0.6) * 2.5).clamp(0.0, 1.0),
    );
    let bands = (r * config.band_freq).sin() * 0.5 + 0.5;
    alpha *= 0.3 + bands * 0.35;
    col.extend(alpha * 0.5)
}
