//! WGSL sources for planet surfaces and rings.

use std::sync::{Arc, OnceLock};

use starscroll_noise::compose_shader;

const PLANET_WGSL: &str = include_str!("planet.wgsl");
const RING_WGSL: &str = include_str!("ring.wgsl");

/// Planet surface program with the noise kernel prepended. Built once.
pub fn planet_shader_source() -> Arc<str> {
    static SOURCE: OnceLock<Arc<str>> = OnceLock::new();
    SOURCE
        .get_or_init(|| compose_shader(PLANET_WGSL).into())
        .clone()
}

/// Ring program. It samples no noise, so it ships as-is.
pub fn ring_shader_source() -> Arc<str> {
    static SOURCE: OnceLock<Arc<str>> = OnceLock::new();
    SOURCE.get_or_init(|| RING_WGSL.into()).clone()
}
