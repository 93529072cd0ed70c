//! Procedural planets driven by scroll progress.
//!
//! A planet is described by an immutable [`PlanetConfig`] (from one of the
//! named [`PlanetPreset`]s or a dedicated constructor). [`PlanetRenderer`]
//! mounts it into a scene graph and, every frame, spins the body, advances the
//! shader clock and eases the planet's transform toward the target for the
//! current progress. [`surface`] and [`ring`] hold CPU reference versions of
//! the WGSL fragment shaders.

pub mod config;
pub mod motion;
pub mod preset;
pub mod renderer;
pub mod ring;
pub mod shader;
pub mod surface;
pub mod uniform;

pub use config::{
    MotionConfig, PlanetConfig, StormParams, Surface, SurfaceParams, SwirlParams, TexturedSurface,
};
pub use motion::{PlanetMotion, damp, damp_vec3, damping_factor};
pub use preset::{PlanetPreset, PresetError};
pub use renderer::PlanetRenderer;
pub use ring::RingConfig;
pub use shader::{planet_shader_source, ring_shader_source};
pub use uniform::PlanetUniform;
