//! Retained scene graph consumed by an external rasterizer.
//!
//! Nodes live in a generational arena owned by [`SceneGraph`]. Parents own
//! their children: removing a node removes its subtree, and ids of removed
//! nodes resolve to `None` afterwards, so per-frame updates can guard and skip
//! instead of panicking.

pub mod camera;
pub mod color;
pub mod graph;
pub mod light;
pub mod material;
pub mod mesh;
pub mod transform;

pub use camera::{Camera, CameraUniform, Projection};
pub use color::hex_rgb;
pub use graph::{GraphError, Node, NodeId, NodeKind, SceneGraph};
pub use light::{Light, LightKind};
pub use material::{
    BasicMaterial, ColorSpace, Material, PointsMaterial, ShaderMaterial, StandardMaterial,
    TextureRef,
};
pub use mesh::{Geometry, MeshData};
pub use transform::Transform;
