//! Scene lights.
//!
//! Directional and point lights take their position from the owning node's
//! transform; ambient light has none.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Uniform fill from every direction.
    Ambient,
    /// Parallel rays shining from the node position toward the origin.
    Directional,
    /// Omnidirectional light. A `distance` of 0 means unbounded range.
    Point { distance: f32, decay: f32 },
}

/// Light source attached to a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    /// Linear RGB color.
    pub color: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn ambient(color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity,
        }
    }

    pub fn directional(color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            color,
            intensity,
        }
    }

    /// Unbounded point light with physically based (inverse-square) decay.
    pub fn point(color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Point {
                distance: 0.0,
                decay: 2.0,
            },
            color,
            intensity,
        }
    }

    /// Radiant contribution before attenuation.
    pub fn radiance(&self) -> Vec3 {
        self.color * self.intensity
    }
}
