//! GPU uniform block for the planet shader.

use bytemuck::{Pod, Zeroable};

use crate::config::SurfaceParams;

/// Planet shader uniforms, 160 bytes, WGSL uniform-layout compatible.
///
/// Matches `PlanetUniforms` in `planet.wgsl`. Palette entries are padded to
/// `vec4`; the storm weight travels in `storm_color.w` and is 0 when the
/// surface has no storm.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PlanetUniform {
    pub palette: [[f32; 4]; 5],
    pub time: f32,
    pub band_freq: f32,
    pub noise_scale: f32,
    pub swirl_weight: f32,
    pub swirl_freq: [f32; 2],
    pub swirl_speed: [f32; 2],
    pub storm_center: [f32; 2],
    pub storm_stretch: [f32; 2],
    pub storm_color: [f32; 4],
    pub limb_base: f32,
    pub storm_sharpness: f32,
    pub _pad: [f32; 2],
}

static_assertions::assert_eq_size!(PlanetUniform, [u8; 160]);

impl PlanetUniform {
    pub fn new(params: &SurfaceParams, time: f32) -> Self {
        let mut uniform = Self {
            palette: params.palette.map(|c| c.extend(0.0).to_array()),
            time,
            band_freq: params.band_freq,
            noise_scale: params.noise_scale,
            swirl_weight: params.swirl.weight,
            swirl_freq: params.swirl.frequency.to_array(),
            swirl_speed: params.swirl.speed.to_array(),
            limb_base: params.limb_base,
            ..Self::zeroed()
        };
        if let Some(storm) = &params.storm {
            uniform.storm_center = storm.center.to_array();
            uniform.storm_stretch = storm.stretch.to_array();
            uniform.storm_color = storm.color.extend(storm.weight).to_array();
            uniform.storm_sharpness = storm.sharpness;
        }
        uniform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlanetConfig, Surface};
    use crate::preset::PlanetPreset;

    fn surface(config: PlanetConfig) -> SurfaceParams {
        match config.surface {
            Surface::Procedural(params) => params,
            Surface::Textured(_) => unreachable!(),
        }
    }

    #[test]
    fn test_uniform_fields() {
        let params = surface(PlanetPreset::Saturn.config());
        let uniform = PlanetUniform::new(&params, 12.5);
        assert_eq!(uniform.time, 12.5);
        assert_eq!(uniform.band_freq, 24.0);
        assert_eq!(uniform.palette[0], [0.85, 0.75, 0.45, 0.0]);
        assert_eq!(uniform.storm_color[3], 0.0, "no storm means zero weight");
        assert_eq!(uniform.limb_base, 0.7);
    }

    #[test]
    fn test_storm_packed() {
        let uniform = PlanetUniform::new(&surface(PlanetConfig::jupiter()), 0.0);
        assert_eq!(uniform.storm_center, [0.65, 0.38]);
        assert_eq!(uniform.storm_stretch, [2.5, 5.0]);
        assert_eq!(uniform.storm_color, [0.72, 0.25, 0.10, 0.7]);
        assert_eq!(uniform.storm_sharpness, 8.0);
        assert_eq!(uniform.swirl_freq, [10.0, 20.0]);
    }

    #[test]
    fn test_byte_layout_offsets() {
        let uniform = PlanetUniform::new(&surface(PlanetConfig::jupiter()), 3.0);
        let bytes = bytemuck::bytes_of(&uniform);
        assert_eq!(bytes.len(), 160);
        // `time` sits right after the five vec4 palette entries.
        let time = f32::from_le_bytes(bytes[80..84].try_into().unwrap());
        assert_eq!(time, 3.0);
        // `limb_base` starts the last 16-byte row.
        let limb = f32::from_le_bytes(bytes[144..148].try_into().unwrap());
        assert_eq!(limb, 0.5);
    }
}
