//! Stylized head mesh sculpted from a unit sphere.

use glam::Vec3;
use starscroll_graph::MeshData;

const SEGMENTS: u32 = 64;

/// Move one unit-sphere vertex onto the head surface.
///
/// Rules apply in order and each sees the result of the previous one:
/// vertical stretch, chin taper, cheek bulge, flat back, brow ridge, jaw.
pub fn sculpt_vertex(p: Vec3) -> Vec3 {
    let Vec3 { mut x, mut y, mut z } = p;

    y *= 1.1;

    if y < -0.25 {
        let f = ((-y - 0.25) / 0.85).min(1.0);
        x *= 1.0 - f * 0.32;
        z *= 1.0 - f * 0.1;
    }

    if y > -0.15 && y < 0.2 {
        let f = 1.0 - (y - 0.02).abs() / 0.17;
        x *= 1.0 + f.max(0.0) * 0.04;
    }

    if z < -0.4 {
        z *= 0.91;
    }

    if y > 0.18 && y < 0.38 && z > 0.5 {
        z += 0.04 * (1.0 - (y - 0.28).abs() / 0.1).max(0.0);
    }

    if y < -0.4 && y > -0.7 && x.abs() > 0.3 {
        x *= 1.0 + 0.02 * (1.0 - (y + 0.55).abs() / 0.15).max(0.0);
    }

    Vec3::new(x, y, z)
}

/// Build the sculpted head with smooth normals.
pub fn head_mesh() -> MeshData {
    let mut mesh = MeshData::uv_sphere(1.0, SEGMENTS, SEGMENTS);
    for position in &mut mesh.positions {
        *position = sculpt_vertex(*position);
    }
    mesh.recompute_normals();
    mesh
}
