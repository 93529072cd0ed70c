//! CPU reference for the banded planet fragment shader.
//!
//! Mirrors `planet.wgsl` term by term so colors can be checked without a GPU,
//! and so thumbnails or fallbacks can be baked on the CPU.

use glam::{Vec2, Vec3, vec3};
use starscroll_noise::simplex3;

use crate::config::{StormParams, SurfaceParams};

/// Shader time is slowed by this factor before driving noise.
pub const TIME_SCALE: f32 = 0.06;

/// Hermite smoothstep. Reversed edges (`edge0 > edge1`) give a falling ramp.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Band value in `[0, 1]` at `uv`, including the noise wobble.
pub fn band(params: &SurfaceParams, uv: Vec2, time: f32) -> f32 {
    let t = time * TIME_SCALE;
    let lat = uv.y;
    let base = (lat * params.band_freq).sin() * 0.5 + 0.5;
    let distort = simplex3(vec3(uv.x * 6.0 + t * 0.3, lat * 12.0, t * 0.1)) * params.noise_scale;
    (base + distort).clamp(0.0, 1.0)
}

/// Shade one fragment.
///
/// `facing` is `max(dot(view_dir, normal), 0)`: 1 at the centre of the disc,
/// 0 at the limb.
pub fn shade(params: &SurfaceParams, uv: Vec2, facing: f32, time: f32) -> Vec3 {
    let [light, mid, _, dark, accent] = params.palette;
    let t = time * TIME_SCALE;
    let lat = uv.y;

    let band = band(params, uv, time);
    let mut col = mix(dark, light, band);
    col = mix(col, mid, smoothstep(0.3, 0.7, band));

    let swirl = &params.swirl;
    let swirl_noise = simplex3(vec3(
        uv.x * swirl.frequency.x + t * swirl.speed.x,
        lat * swirl.frequency.y,
        t * swirl.speed.y,
    ));
    col = mix(col, accent, smoothstep(0.2, 0.6, swirl_noise) * swirl.weight);

    if let Some(storm) = &params.storm {
        col = mix(col, storm.color, storm_intensity(storm, uv) * storm.weight);
    }

    let facing = facing.clamp(0.0, 1.0);
    col * (params.limb_base + (1.0 - params.limb_base) * facing)
}

/// Gaussian storm falloff at `uv`, 1 at the centre.
pub fn storm_intensity(storm: &StormParams, uv: Vec2) -> f32 {
    let d = (uv - storm.center) * storm.stretch;
    (-(d.x * d.x + d.y * d.y) * storm.sharpness).exp()
}
