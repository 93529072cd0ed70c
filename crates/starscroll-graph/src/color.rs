//! Color helpers.

use glam::Vec3;

/// Convert a `0xRRGGBB` literal to an RGB vector in `[0, 1]`.
pub fn hex_rgb(rgb: u32) -> Vec3 {
    Vec3::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    )
}
