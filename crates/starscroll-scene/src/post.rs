//! Post-processing descriptors.
//!
//! The rasterizer owns the effect passes; scenes only say which ones they want.

/// Bloom on bright fragments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bloom {
    pub intensity: f32,
    /// Luminance above which fragments start to bloom.
    pub luminance_threshold: f32,
    pub luminance_smoothing: f32,
    /// Blur through the mip chain instead of a fixed kernel.
    pub mipmap_blur: bool,
}

/// Darkened frame edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vignette {
    pub offset: f32,
    pub darkness: f32,
}

/// Effect chain applied after the scene is drawn, in field order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PostProcessing {
    pub bloom: Option<Bloom>,
    pub vignette: Option<Vignette>,
}

impl PostProcessing {
    pub fn is_empty(&self) -> bool {
        self.bloom.is_none() && self.vignette.is_none()
    }
}
