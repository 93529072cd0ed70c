//! Surface materials.

use std::sync::Arc;

use bytemuck::Pod;
use glam::Vec3;

/// Reference to a texture resolved and loaded by the rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRef {
    pub url: String,
    pub color_space: ColorSpace,
    pub anisotropy: u8,
}

impl TextureRef {
    /// An sRGB color map with 8x anisotropic filtering.
    pub fn color_map(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            color_space: ColorSpace::Srgb,
            anisotropy: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
    Linear,
}

/// Physically based surface lit by the scene's lights.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub color: Vec3,
    pub map: Option<TextureRef>,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    /// Extra specular coat layer (0 disables).
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub double_sided: bool,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            map: None,
            roughness: 1.0,
            metalness: 0.0,
            emissive: Vec3::ZERO,
            emissive_intensity: 1.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            double_sided: false,
        }
    }
}

/// Unlit flat color.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicMaterial {
    pub color: Vec3,
    pub opacity: f32,
    pub transparent: bool,
    pub double_sided: bool,
    pub depth_write: bool,
}

impl BasicMaterial {
    pub fn opaque(color: Vec3) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
            double_sided: false,
            depth_write: true,
        }
    }

    /// Alpha-blended color that does not occlude what is drawn after it.
    pub fn translucent(color: Vec3, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            transparent: true,
            double_sided: false,
            depth_write: false,
        }
    }
}

/// Custom WGSL program with a packed uniform block.
///
/// `uniforms` holds the exact bytes of the program's uniform struct; renderers
/// rewrite them every frame with [`write_uniforms`](Self::write_uniforms).
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderMaterial {
    pub label: &'static str,
    pub source: Arc<str>,
    pub uniforms: Vec<u8>,
    pub transparent: bool,
    pub double_sided: bool,
    pub depth_write: bool,
}

impl ShaderMaterial {
    /// Opaque, single-sided program with depth writes and an empty uniform block.
    pub fn new(label: &'static str, source: impl Into<Arc<str>>) -> Self {
        Self {
            label,
            source: source.into(),
            uniforms: Vec::new(),
            transparent: false,
            double_sided: false,
            depth_write: true,
        }
    }

    /// Replace the uniform bytes with `value`.
    pub fn write_uniforms<T: Pod>(&mut self, value: &T) {
        self.uniforms.clear();
        self.uniforms.extend_from_slice(bytemuck::bytes_of(value));
    }

    /// Read the uniform block back as `T`, if the sizes match.
    pub fn read_uniforms<T: Pod>(&self) -> Option<T> {
        bytemuck::try_pod_read_unaligned(&self.uniforms).ok()
    }
}

/// Material for a mesh node.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Standard(StandardMaterial),
    Basic(BasicMaterial),
    Shader(ShaderMaterial),
}

/// Material for a point cloud node.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    pub size: f32,
    pub color: Vec3,
    pub opacity: f32,
    pub transparent: bool,
    /// Shrink points with distance from the camera.
    pub size_attenuation: bool,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            size: 1.0,
            color: Vec3::ONE,
            opacity: 1.0,
            transparent: false,
            size_attenuation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytemuck::Zeroable;

    #[repr(C)]
    #[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, Zeroable)]
    struct Block {
        time: f32,
        scale: f32,
    }

    #[test]
    fn test_uniform_write_replaces_bytes() {
        let mut material = ShaderMaterial::new("test", "fn main() {}");
        material.write_uniforms(&Block { time: 1.0, scale: 2.0 });
        material.write_uniforms(&Block { time: 3.0, scale: 4.0 });
        assert_eq!(material.uniforms.len(), 8);
        assert_eq!(
            material.read_uniforms::<Block>(),
            Some(Block { time: 3.0, scale: 4.0 })
        );
        assert_eq!(material.read_uniforms::<[f32; 3]>(), None, "size mismatch");
    }
}
