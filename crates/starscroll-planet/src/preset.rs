//! Named planet presets.
//!
//! The preset key is the only stringly-typed input in the scene layer. It is
//! parsed once with [`FromStr`]; an unknown key is an error, never a silent
//! fallback to another planet.

use std::fmt;
use std::str::FromStr;

use glam::{Vec3, vec3};
use starscroll_graph::hex_rgb;

use crate::config::{MotionConfig, PlanetConfig, Surface, SurfaceParams};
use crate::ring::RingConfig;

/// Errors from resolving a preset key.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PresetError {
    #[error("unknown planet preset {key:?} (expected one of: saturn, neptune, venus, purple, violet, mercury)")]
    Unknown { key: String },
}

/// The banded planets available to generic section scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetPreset {
    Saturn,
    Neptune,
    Venus,
    Purple,
    Violet,
    Mercury,
}

impl PlanetPreset {
    pub const ALL: [PlanetPreset; 6] = [
        PlanetPreset::Saturn,
        PlanetPreset::Neptune,
        PlanetPreset::Venus,
        PlanetPreset::Purple,
        PlanetPreset::Violet,
        PlanetPreset::Mercury,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PlanetPreset::Saturn => "saturn",
            PlanetPreset::Neptune => "neptune",
            PlanetPreset::Venus => "venus",
            PlanetPreset::Purple => "purple",
            PlanetPreset::Violet => "violet",
            PlanetPreset::Mercury => "mercury",
        }
    }

    /// Build the full configuration for this preset.
    pub fn config(self) -> PlanetConfig {
        let row = self.row();
        PlanetConfig {
            name: self.key(),
            radius: 2.0,
            segments: 32,
            surface: Surface::Procedural(SurfaceParams::banded(
                row.palette,
                row.band_freq,
                row.noise_scale,
            )),
            motion: MotionConfig {
                start_position: row.start_position,
                position_drift: row.position_drift,
                start_rotation: row.start_rotation,
                rotation_drift: row.rotation_drift,
                shrink: 0.3,
                damping: 3.5,
                spin_rate: 0.04,
            },
            ring: row.ring.then(RingConfig::default),
            star_count: row.star_count,
            light_color: hex_rgb(row.light),
            rim_color: hex_rgb(row.rim),
            camera_drift: row.camera_drift,
        }
    }

    fn row(self) -> PresetRow {
        match self {
            PlanetPreset::Saturn => PresetRow {
                palette: [
                    vec3(0.85, 0.75, 0.45),
                    vec3(0.72, 0.58, 0.28),
                    vec3(0.50, 0.38, 0.15),
                    vec3(0.30, 0.20, 0.06),
                    vec3(0.80, 0.65, 0.25),
                ],
                band_freq: 24.0,
                noise_scale: 0.05,
                ring: true,
                star_count: 250,
                start_position: vec3(1.5, 0.3, 0.0),
                position_drift: vec3(1.5, 1.0, -2.0),
                start_rotation: vec3(0.4, 0.0, -0.15),
                rotation_drift: vec3(-0.3, -0.8, 0.2),
                light: 0xffe8aa,
                rim: 0xaa8844,
                camera_drift: vec3(-1.0, 0.3, 2.0),
            },
            PlanetPreset::Neptune => PresetRow {
                palette: [
                    vec3(0.12, 0.28, 0.60),
                    vec3(0.22, 0.42, 0.75),
                    vec3(0.08, 0.15, 0.38),
                    vec3(0.30, 0.55, 0.85),
                    vec3(0.15, 0.35, 0.55),
                ],
                band_freq: 14.0,
                noise_scale: 0.12,
                ring: false,
                star_count: 250,
                start_position: vec3(2.0, 0.5, 0.0),
                position_drift: vec3(1.5, -1.0, -2.0),
                start_rotation: vec3(0.1, 0.0, 0.05),
                rotation_drift: vec3(-0.3, -0.6, 0.15),
                light: 0xaaccff,
                rim: 0x4466aa,
                camera_drift: vec3(-0.8, 0.4, 2.5),
            },
            PlanetPreset::Venus => PresetRow {
                palette: [
                    vec3(0.88, 0.80, 0.58),
                    vec3(0.75, 0.65, 0.42),
                    vec3(0.60, 0.50, 0.32),
                    vec3(0.92, 0.85, 0.65),
                    vec3(0.72, 0.62, 0.40),
                ],
                band_freq: 10.0,
                noise_scale: 0.18,
                ring: false,
                star_count: 200,
                start_position: vec3(-1.5, 0.0, 0.0),
                position_drift: vec3(-1.5, 1.0, -2.0),
                start_rotation: vec3(-0.1, 0.0, 0.1),
                rotation_drift: vec3(0.3, 0.8, -0.2),
                light: 0xfff0cc,
                rim: 0x998855,
                camera_drift: vec3(1.0, 0.3, 2.0),
            },
            PlanetPreset::Purple => PresetRow {
                palette: [
                    vec3(0.48, 0.32, 0.68),
                    vec3(0.58, 0.42, 0.78),
                    vec3(0.28, 0.14, 0.48),
                    vec3(0.68, 0.52, 0.88),
                    vec3(0.38, 0.22, 0.58),
                ],
                band_freq: 18.0,
                noise_scale: 0.10,
                ring: false,
                star_count: 200,
                start_position: vec3(2.0, 0.0, 0.0),
                position_drift: vec3(1.5, -0.5, -1.5),
                start_rotation: vec3(0.15, 0.0, -0.1),
                rotation_drift: vec3(-0.4, -1.0, 0.25),
                light: 0xccaaff,
                rim: 0x7744bb,
                camera_drift: vec3(-1.2, 0.5, 2.5),
            },
            PlanetPreset::Violet => PresetRow {
                palette: [
                    vec3(0.55, 0.30, 0.72),
                    vec3(0.65, 0.40, 0.85),
                    vec3(0.35, 0.18, 0.55),
                    vec3(0.75, 0.55, 0.95),
                    vec3(0.45, 0.25, 0.65),
                ],
                band_freq: 12.0,
                noise_scale: 0.14,
                ring: false,
                star_count: 300,
                start_position: vec3(0.0, 0.3, 0.0),
                position_drift: vec3(0.0, -0.4, -1.0),
                start_rotation: vec3(0.1, 0.0, 0.05),
                rotation_drift: vec3(-0.15, -0.4, 0.1),
                light: 0xd4aaff,
                rim: 0x9955dd,
                camera_drift: vec3(0.0, 0.2, 1.5),
            },
            PlanetPreset::Mercury => PresetRow {
                palette: [
                    vec3(0.52, 0.48, 0.46),
                    vec3(0.40, 0.36, 0.34),
                    vec3(0.28, 0.25, 0.24),
                    vec3(0.62, 0.58, 0.55),
                    vec3(0.35, 0.32, 0.30),
                ],
                band_freq: 6.0,
                noise_scale: 0.30,
                ring: false,
                star_count: 300,
                start_position: vec3(0.0, 0.3, 0.0),
                position_drift: vec3(0.0, -0.4, -1.0),
                start_rotation: vec3(0.15, 0.0, 0.05),
                rotation_drift: vec3(-0.15, -0.4, 0.1),
                light: 0xe8e0d8,
                rim: 0x887870,
                camera_drift: vec3(0.0, 0.2, 1.5),
            },
        }
    }
}

/// Raw per-preset values.
struct PresetRow {
    palette: [Vec3; 5],
    band_freq: f32,
    noise_scale: f32,
    ring: bool,
    star_count: u32,
    start_position: Vec3,
    position_drift: Vec3,
    start_rotation: Vec3,
    rotation_drift: Vec3,
    light: u32,
    rim: u32,
    camera_drift: Vec3,
}

impl FromStr for PlanetPreset {
    type Err = PresetError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        PlanetPreset::ALL
            .into_iter()
            .find(|preset| preset.key() == key)
            .ok_or_else(|| PresetError::Unknown {
                key: key.to_string(),
            })
    }
}

impl fmt::Display for PlanetPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
