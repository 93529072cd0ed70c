//! Planet configuration records.

use glam::{Vec2, Vec3, vec2, vec3};
use starscroll_graph::{Transform, hex_rgb};

use crate::ring::RingConfig;

/// Domain-warp and accent swirl sampled from a second noise lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwirlParams {
    /// Noise frequency along longitude (`uv.x`) and latitude.
    pub frequency: Vec2,
    /// Time scroll along longitude and along the noise's third axis.
    pub speed: Vec2,
    /// Maximum blend toward the swirl color.
    pub weight: f32,
}

/// A Gaussian oval storm painted over the bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormParams {
    /// Storm centre in UV space.
    pub center: Vec2,
    /// UV-to-falloff stretch; the larger axis makes the oval narrower there.
    pub stretch: Vec2,
    /// Exponential falloff sharpness.
    pub sharpness: f32,
    pub color: Vec3,
    /// Blend weight at the storm centre.
    pub weight: f32,
}

/// Parameters of the banded gas-giant shader.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceParams {
    /// `[light band, mid band, deep tone, dark band, swirl]`.
    pub palette: [Vec3; 5],
    /// Latitude band frequency.
    pub band_freq: f32,
    /// Amplitude of the noise that wobbles band edges.
    pub noise_scale: f32,
    pub swirl: SwirlParams,
    /// Brightness at the limb; the centre of the disc is always 1.
    pub limb_base: f32,
    pub storm: Option<StormParams>,
}

impl SurfaceParams {
    /// Bands with the standard swirl and limb darkening used by the presets.
    pub fn banded(palette: [Vec3; 5], band_freq: f32, noise_scale: f32) -> Self {
        Self {
            palette,
            band_freq,
            noise_scale,
            swirl: SwirlParams {
                frequency: vec2(8.0, 15.0),
                speed: vec2(0.4, 0.12),
                weight: 0.25,
            },
            limb_base: 0.7,
            storm: None,
        }
    }
}

/// A lit, texture-mapped surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TexturedSurface {
    pub texture_url: String,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Procedural(SurfaceParams),
    Textured(TexturedSurface),
}

/// Scroll-driven motion of a planet group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    pub start_position: Vec3,
    /// Offset added at progress 1.
    pub position_drift: Vec3,
    pub start_rotation: Vec3,
    /// Rotation added at progress 1.
    pub rotation_drift: Vec3,
    /// Fraction of the size lost at progress 1.
    pub shrink: f32,
    /// Exponential approach rate `k` in `min(1, k * dt)`.
    pub damping: f32,
    /// Spin of the body about its Y axis in radians per second.
    pub spin_rate: f32,
}

impl MotionConfig {
    /// Target transform for a progress value in `[0, 1]`.
    pub fn target(&self, progress: f32) -> Transform {
        Transform {
            position: self.start_position + self.position_drift * progress,
            rotation: self.start_rotation + self.rotation_drift * progress,
            scale: Vec3::splat(1.0 - self.shrink * progress),
        }
    }
}

/// Everything needed to build and animate one planet scene.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetConfig {
    pub name: &'static str,
    pub radius: f32,
    /// Width and height segments of the sphere.
    pub segments: u32,
    pub surface: Surface,
    pub motion: MotionConfig,
    pub ring: Option<RingConfig>,
    /// Stars in the scene's background shell.
    pub star_count: u32,
    /// Key light color.
    pub light_color: Vec3,
    /// Back and side rim light color.
    pub rim_color: Vec3,
    /// Camera offset added at progress 1.
    pub camera_drift: Vec3,
}

impl PlanetConfig {
    pub fn has_ring(&self) -> bool {
        self.ring.is_some()
    }

    /// Procedural Jupiter with a great red spot.
    pub fn jupiter() -> Self {
        let mut surface = SurfaceParams::banded(
            [
                vec3(0.85, 0.78, 0.62),
                vec3(0.72, 0.58, 0.38),
                vec3(0.50, 0.32, 0.18),
                vec3(0.30, 0.18, 0.10),
                vec3(0.65, 0.35, 0.15),
            ],
            28.0,
            0.08,
        );
        surface.swirl = SwirlParams {
            frequency: vec2(10.0, 20.0),
            speed: vec2(0.5, 0.15),
            weight: 0.35,
        };
        surface.limb_base = 0.5;
        surface.storm = Some(StormParams {
            center: vec2(0.65, 0.38),
            stretch: vec2(2.5, 5.0),
            sharpness: 8.0,
            color: vec3(0.72, 0.25, 0.10),
            weight: 0.7,
        });

        Self {
            name: "jupiter",
            radius: 2.0,
            segments: 48,
            surface: Surface::Procedural(surface),
            motion: MotionConfig {
                start_position: vec3(-1.5, 0.0, 0.0),
                position_drift: vec3(-2.5, 1.8, -2.5),
                start_rotation: vec3(0.15, 0.0, 0.05),
                rotation_drift: vec3(-0.6, -1.2, 0.3),
                shrink: 0.3,
                damping: 3.5,
                spin_rate: 0.04,
            },
            ring: None,
            star_count: 500,
            light_color: hex_rgb(0xffe8cc),
            rim_color: hex_rgb(0xaa8855),
            camera_drift: vec3(-1.2, 0.5, 2.5),
        }
    }

    /// Texture-mapped Earth for the landing section.
    pub fn earth() -> Self {
        Self {
            name: "earth",
            radius: 2.5,
            segments: 48,
            surface: Surface::Textured(TexturedSurface {
                texture_url: "/textures/earth.jpg".to_string(),
                roughness: 0.9,
                metalness: 0.05,
                emissive: Vec3::ZERO,
                emissive_intensity: 0.0,
            }),
            motion: MotionConfig {
                start_position: Vec3::ZERO,
                position_drift: vec3(-3.5, 1.2, -2.0),
                start_rotation: vec3(0.15, 0.0, 0.1),
                rotation_drift: vec3(0.6, 1.2, -0.3),
                shrink: 0.25,
                damping: 3.0,
                spin_rate: 0.08,
            },
            ring: None,
            star_count: 800,
            light_color: hex_rgb(0xfff5e6),
            rim_color: hex_rgb(0x6699ff),
            camera_drift: vec3(1.0, 0.8, 3.0),
        }
    }

    /// Texture-mapped Mars with a faint ember glow, spinning backwards.
    pub fn mars() -> Self {
        Self {
            name: "mars",
            radius: 2.0,
            segments: 64,
            surface: Surface::Textured(TexturedSurface {
                texture_url: "/textures/mars.jpg".to_string(),
                roughness: 0.65,
                metalness: 0.05,
                emissive: hex_rgb(0x331108),
                emissive_intensity: 0.4,
            }),
            motion: MotionConfig {
                start_position: vec3(-2.5, 0.0, 0.0),
                position_drift: vec3(-2.0, 2.0, -3.0),
                start_rotation: vec3(-0.1, 0.0, -0.15),
                rotation_drift: vec3(0.8, 1.5, -0.4),
                shrink: 0.35,
                damping: 3.5,
                spin_rate: -0.06,
            },
            ring: None,
            star_count: 600,
            light_color: hex_rgb(0xffeedd),
            rim_color: hex_rgb(0x8866cc),
            camera_drift: vec3(1.5, 0.6, 3.0),
        }
    }
}
