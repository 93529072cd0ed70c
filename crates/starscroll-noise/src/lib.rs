//! Deterministic 3D simplex gradient noise.
//!
//! One algorithm, two targets: [`simplex3`] evaluates on the CPU and
//! [`NOISE_WGSL`] carries the same formulation for shaders. Procedural shader
//! sources are assembled with [`compose_shader`] so every program shares the
//! single noise definition.

mod simplex;
mod wgsl;

pub use simplex::simplex3;
pub use wgsl::{NOISE_WGSL, compose_shader};
