//! Geometry descriptors and CPU-side mesh data.
//!
//! Most geometry is described parametrically and tessellated by the
//! rasterizer. Meshes that need vertex edits before upload (the avatar head)
//! are built here as [`MeshData`] and passed through [`Geometry::Custom`].

use std::f32::consts::{PI, TAU};
use std::sync::Arc;

use glam::{Vec2, Vec3};

/// Parametric or explicit geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// UV sphere. Polar angle runs from `theta_start` (0 at +Y) over
    /// `theta_length`; a partial range yields a cap or a band.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        theta_start: f32,
        theta_length: f32,
    },
    /// Flat disc in the XY plane.
    Circle { radius: f32, segments: u32 },
    /// Flat annulus in the XY plane.
    Ring {
        inner_radius: f32,
        outer_radius: f32,
        segments: u32,
    },
    /// Flat rectangle in the XY plane.
    Plane { width: f32, height: f32 },
    /// Axis-aligned box centred on the origin.
    Cuboid { size: Vec3 },
    /// Open-ended or capped cylinder along Y.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    /// Pre-built vertex data.
    Custom(Arc<MeshData>),
}

impl Geometry {
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
            theta_start: 0.0,
            theta_length: PI,
        }
    }

    /// Polar slice of a sphere starting at the +Y pole.
    pub fn sphere_cap(radius: f32, width_segments: u32, height_segments: u32, theta_length: f32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
            theta_start: 0.0,
            theta_length,
        }
    }

    /// Polar band of a sphere between `theta_start` and `theta_start + theta_length`.
    pub fn sphere_band(
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        theta_start: f32,
        theta_length: f32,
    ) -> Self {
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
            theta_start,
            theta_length,
        }
    }

    pub fn circle(radius: f32, segments: u32) -> Self {
        Geometry::Circle { radius, segments }
    }

    pub fn unit_cube() -> Self {
        Geometry::Cuboid { size: Vec3::ONE }
    }
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Tessellate a UV sphere centred on the origin.
    ///
    /// Vertices form a `(width + 1) x (height + 1)` grid running from the +Y
    /// pole (`uv.y = 1`) to the -Y pole (`uv.y = 0`); the seam column is
    /// duplicated so `u` runs the full `[0, 1]`.
    pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width = width_segments.max(3);
        let height = height_segments.max(2);
        let row = width + 1;

        let mut mesh = MeshData {
            positions: Vec::with_capacity((row * (height + 1)) as usize),
            normals: Vec::with_capacity((row * (height + 1)) as usize),
            uvs: Vec::with_capacity((row * (height + 1)) as usize),
            indices: Vec::with_capacity((width * height * 6) as usize),
        };

        for iy in 0..=height {
            let v = iy as f32 / height as f32;
            let theta = v * PI;
            for ix in 0..=width {
                let u = ix as f32 / width as f32;
                let phi = u * TAU;
                let position = Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                mesh.positions.push(position);
                mesh.normals.push(position.normalize_or_zero());
                mesh.uvs.push(Vec2::new(u, 1.0 - v));
            }
        }

        for iy in 0..height {
            for ix in 0..width {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                // Skip the degenerate triangle of each pole quad.
                if iy != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height - 1 {
                    mesh.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Recompute smooth vertex normals from triangle geometry.
    ///
    /// Face normals are accumulated unnormalized, which weights them by area.
    /// Vertices touching only degenerate triangles fall back to their radial
    /// direction.
    pub fn recompute_normals(&mut self) {
        self.normals.clear();
        self.normals.resize(self.positions.len(), Vec3::ZERO);

        for triangle in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
            let v0 = self.positions[i0];
            let face_normal = (self.positions[i1] - v0).cross(self.positions[i2] - v0);
            if face_normal.length_squared() <= 1e-12 {
                continue;
            }
            self.normals[i0] += face_normal;
            self.normals[i1] += face_normal;
            self.normals[i2] += face_normal;
        }

        for (normal, position) in self.normals.iter_mut().zip(&self.positions) {
            *normal = normal
                .try_normalize()
                .unwrap_or_else(|| position.normalize_or_zero());
        }
    }
}
