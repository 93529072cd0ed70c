//! WGSL source for the noise kernel.

/// WGSL definition of `snoise(vec3<f32>) -> f32`.
pub const NOISE_WGSL: &str = include_str!("noise.wgsl");

/// Prepend the noise kernel to a shader body.
///
/// The body may call `snoise` but must not define it.
pub fn compose_shader(body: &str) -> String {
    let mut source = String::with_capacity(NOISE_WGSL.len() + body.len() + 1);
    source.push_str(NOISE_WGSL);
    source.push('\n');
    source.push_str(body);
    source
}
