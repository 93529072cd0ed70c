//! Radial glow quads behind and beneath the avatar.

use std::sync::{Arc, OnceLock};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use starscroll_graph::ShaderMaterial;

const GLOW_WGSL: &str = include_str!("glow.wgsl");

/// Matches `GlowUniforms` in `glow.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GlowUniform {
    pub color: [f32; 3],
    pub intensity: f32,
}

static_assertions::assert_eq_size!(GlowUniform, [u8; 16]);

pub fn glow_shader_source() -> Arc<str> {
    static SOURCE: OnceLock<Arc<str>> = OnceLock::new();
    SOURCE.get_or_init(|| GLOW_WGSL.into()).clone()
}

/// Alpha at a uv coordinate, mirroring the fragment shader.
pub fn glow_alpha(uv: glam::Vec2, intensity: f32) -> f32 {
    let d = (uv - glam::Vec2::splat(0.5)).length() * 2.0;
    // smoothstep(1, 0, d) == 1 - smoothstep(0, 1, d)
    let t = d.clamp(0.0, 1.0);
    (1.0 - t * t * (3.0 - 2.0 * t)) * intensity
}

/// Transparent, depth-write-free glow material.
pub fn glow_material(label: &'static str, color: Vec3, intensity: f32) -> ShaderMaterial {
    let mut material = ShaderMaterial::new(label, glow_shader_source());
    material.transparent = true;
    material.depth_write = false;
    material.write_uniforms(&GlowUniform {
        color: color.to_array(),
        intensity,
    });
    material
}
