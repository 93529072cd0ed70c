//! The stylized avatar portrait.
//!
//! Unlike the planet scenes the avatar ignores scroll. It follows the pointer:
//! the head turns slightly, the irises track it, and the whole bust floats and
//! blinks on its own clock.

pub mod glow;
pub mod head;
pub mod rig;

use std::cell::Cell;
use std::f32::consts::PI;
use std::rc::Rc;
use std::sync::Arc;

use glam::{Vec2, Vec3, vec3};
use starscroll_graph::{
    BasicMaterial, Camera, Geometry, GraphError, Material, Node, NodeId, SceneGraph,
    StandardMaterial, hex_rgb,
};
use starscroll_scroll::{ListenerId, ViewportEvents};
use tracing::{debug, trace};

use crate::composer::BACKGROUND;
use crate::error::SceneError;
use crate::lights::{LightRig, avatar_lights};
use crate::post::{Bloom, PostProcessing, Vignette};
use crate::section::SectionScene;

pub use rig::{AvatarMotion, AvatarPose, Blink, ease_factor};

const SKIN: u32 = 0xe0d5cf;
const SKIN_SHADOW: u32 = 0xc9b8b0;
const HAIR: u32 = 0x111115;
const LIP: u32 = 0xc9a09a;
const LIP_LINE: u32 = 0x7a5555;
const IRIS: u32 = 0x3d2a50;
const IRIS_RING: u32 = 0x2a1a3a;
const BROW: u32 = 0x151518;
const NOSTRIL: u32 = 0xb09a92;

const EYE_R: f32 = 0.19;
const IRIS_R: f32 = 0.10;
const PUPIL_R: f32 = 0.05;
const LEFT_EYE: Vec3 = Vec3::new(-0.34, 0.08, 0.76);
const RIGHT_EYE: Vec3 = Vec3::new(0.34, 0.08, 0.76);

const GLOW_COLOR: u32 = 0x8040cc;
const GLOW_INTENSITY: f32 = 0.28;
const SHADOW_INTENSITY: f32 = 0.3;

pub const POST_PROCESSING: PostProcessing = PostProcessing {
    bloom: Some(Bloom {
        intensity: 0.35,
        luminance_threshold: 0.55,
        luminance_smoothing: 0.9,
        mipmap_blur: true,
    }),
    vignette: Some(Vignette {
        offset: 0.3,
        darkness: 0.7,
    }),
};

fn skin() -> StandardMaterial {
    StandardMaterial {
        color: hex_rgb(SKIN),
        roughness: 0.82,
        metalness: 0.0,
        clearcoat: 0.04,
        clearcoat_roughness: 0.95,
        ..StandardMaterial::default()
    }
}

fn hair() -> Material {
    Material::Standard(StandardMaterial {
        color: hex_rgb(HAIR),
        roughness: 0.35,
        metalness: 0.08,
        ..StandardMaterial::default()
    })
}

fn matte(color: u32, roughness: f32) -> Material {
    Material::Standard(StandardMaterial {
        color: hex_rgb(color),
        roughness,
        ..StandardMaterial::default()
    })
}

/// Ellipsoid built from a scaled sphere.
struct Blob {
    name: &'static str,
    position: Vec3,
    scale: Vec3,
    segments: u32,
}

const fn blob(name: &'static str, position: Vec3, scale: Vec3, segments: u32) -> Blob {
    Blob {
        name,
        position,
        scale,
        segments,
    }
}

const HAIR_BLOBS: [Blob; 7] = [
    blob("hair-fringe-right", Vec3::new(0.15, 0.76, 0.32), Vec3::new(0.7, 0.22, 0.38), 24),
    blob("hair-fringe-left", Vec3::new(-0.2, 0.72, 0.28), Vec3::new(0.55, 0.18, 0.32), 24),
    blob("hair-side-left", Vec3::new(-0.75, 0.25, -0.1), Vec3::new(0.45, 0.6, 0.88), 24),
    blob("hair-side-right", Vec3::new(0.75, 0.25, -0.1), Vec3::new(0.45, 0.6, 0.88), 24),
    blob("hair-back", Vec3::new(0.0, 0.2, -0.7), Vec3::new(0.92, 0.7, 0.5), 24),
    blob("hair-top-back", Vec3::new(0.0, 0.52, -0.38), Vec3::new(1.0, 0.38, 0.65), 24),
    blob("hair-peak", Vec3::new(0.0, 0.85, 0.05), Vec3::new(0.6, 0.18, 0.5), 24),
];

const TORSO_BLOBS: [Blob; 4] = [
    blob("collarbone", Vec3::new(0.0, -1.08, 0.08), Vec3::new(0.6, 0.12, 0.42), 16),
    blob("shoulder-left", Vec3::new(-1.2, -1.35, -0.1), Vec3::new(0.55, 0.45, 0.5), 16),
    blob("shoulder-right", Vec3::new(1.2, -1.35, -0.1), Vec3::new(0.55, 0.45, 0.5), 16),
    blob("chest", Vec3::new(0.0, -1.5, 0.05), Vec3::new(1.2, 0.5, 0.6), 24),
];

fn add_blobs(
    graph: &mut SceneGraph,
    parent: NodeId,
    blobs: &[Blob],
    material: &Material,
) -> Result<(), GraphError> {
    for b in blobs {
        graph.add_child(
            parent,
            Node::mesh(b.name, Geometry::sphere(1.0, b.segments, b.segments), material.clone())
                .with_position(b.position)
                .with_scale(b.scale),
        )?;
    }
    Ok(())
}

/// Nodes the animation writes every frame.
#[derive(Debug, Clone, Copy)]
struct Eye {
    iris: NodeId,
    lid: NodeId,
}

fn mount_eye(
    graph: &mut SceneGraph,
    head: NodeId,
    side: &str,
    position: Vec3,
) -> Result<Eye, GraphError> {
    let eye = graph.add_child(head, Node::group(format!("eye-{side}")).with_position(position))?;

    graph.add_child(
        eye,
        Node::mesh(
            format!("eyeball-{side}"),
            Geometry::sphere(EYE_R, 32, 32),
            Material::Standard(StandardMaterial {
                color: hex_rgb(0xf5f2ee),
                roughness: 0.08,
                clearcoat: 1.0,
                clearcoat_roughness: 0.1,
                ..StandardMaterial::default()
            }),
        ),
    )?;

    // Iris, ring and pupil turn together around the eyeball centre.
    let iris = graph.add_child(eye, Node::group(format!("iris-pivot-{side}")))?;
    graph.add_child(
        iris,
        Node::mesh(format!("iris-{side}"), Geometry::circle(IRIS_R, 32), matte(IRIS, 0.3))
            .with_position(vec3(0.0, 0.0, EYE_R * 0.96)),
    )?;
    graph.add_child(
        iris,
        Node::mesh(
            format!("iris-ring-{side}"),
            Geometry::Ring {
                inner_radius: IRIS_R * 0.8,
                outer_radius: IRIS_R,
                segments: 32,
            },
            matte(IRIS_RING, 0.35),
        )
        .with_position(vec3(0.0, 0.0, EYE_R * 0.963)),
    )?;
    graph.add_child(
        iris,
        Node::mesh(
            format!("pupil-{side}"),
            Geometry::circle(PUPIL_R, 32),
            Material::Basic(BasicMaterial::opaque(hex_rgb(0x050505))),
        )
        .with_position(vec3(0.0, 0.0, EYE_R * 0.97)),
    )?;

    for (name, position, radius, segments, opacity) in [
        ("highlight", vec3(0.04, 0.045, EYE_R + 0.006), 0.025, 16, 0.9),
        ("highlight-soft", vec3(-0.025, -0.02, EYE_R + 0.005), 0.012, 12, 0.35),
    ] {
        graph.add_child(
            eye,
            Node::mesh(
                format!("{name}-{side}"),
                Geometry::circle(radius, segments),
                Material::Basic(BasicMaterial::translucent(Vec3::ONE, opacity)),
            )
            .with_position(position),
        )?;
    }

    let lid = graph.add_child(
        eye,
        Node::group(format!("lid-pivot-{side}")).with_position(vec3(0.0, rig::LID_REST_Y, 0.0)),
    )?;
    graph.add_child(
        lid,
        Node::mesh(
            format!("lid-{side}"),
            Geometry::sphere_cap(EYE_R * 1.18, 32, 14, PI * 0.48),
            Material::Standard(StandardMaterial {
                double_sided: true,
                ..skin()
            }),
        )
        .with_rotation(vec3(PI, 0.0, 0.0)),
    )?;

    graph.add_child(
        eye,
        Node::mesh(
            format!("lower-lid-{side}"),
            Geometry::sphere_band(EYE_R * 1.08, 24, 6, PI * 0.55, PI * 0.22),
            Material::Standard(StandardMaterial {
                double_sided: true,
                ..skin()
            }),
        )
        .with_position(vec3(0.0, -0.1, 0.035))
        .with_scale(vec3(1.08, 0.4, 1.0)),
    )?;

    graph.add_child(
        eye,
        Node::mesh(
            format!("socket-{side}"),
            Geometry::Ring {
                inner_radius: EYE_R * 0.98,
                outer_radius: EYE_R * 1.2,
                segments: 32,
            },
            Material::Basic(BasicMaterial {
                double_sided: true,
                ..BasicMaterial::translucent(hex_rgb(SKIN_SHADOW), 0.4)
            }),
        )
        .with_position(vec3(0.0, 0.0, -0.01))
        .with_scale(vec3(1.12, 1.15, 1.0)),
    )?;

    Ok(Eye { iris, lid })
}

fn mount_face(graph: &mut SceneGraph, head: NodeId) -> Result<(), GraphError> {
    let skin_material = Material::Standard(skin());
    let brow = matte(BROW, 0.5);

    for (side, x, tilt) in [("left", -0.34, -0.08), ("right", 0.34, 0.08)] {
        let position = vec3(x, 0.30, 0.78);
        graph.add_child(
            head,
            Node::mesh(format!("brow-{side}"), Geometry::unit_cube(), brow.clone())
                .with_position(position)
                .with_scale(vec3(0.20, 0.045, 0.05))
                .with_rotation(vec3(0.0, 0.0, tilt)),
        )?;
        graph.add_child(
            head,
            Node::mesh(format!("brow-round-{side}"), Geometry::sphere(1.0, 12, 8), brow.clone())
                .with_position(position)
                .with_scale(vec3(0.21, 0.048, 0.04))
                .with_rotation(vec3(0.0, 0.0, tilt)),
        )?;
    }

    graph.add_child(
        head,
        Node::mesh(
            "nose-tip",
            Geometry::sphere(1.0, 16, 16),
            Material::Standard(StandardMaterial {
                roughness: 0.72,
                ..skin()
            }),
        )
        .with_position(vec3(0.0, -0.1, 0.94))
        .with_scale(vec3(0.12, 0.13, 0.11)),
    )?;
    graph.add_child(
        head,
        Node::mesh("nose-bridge", Geometry::sphere(1.0, 12, 12), skin_material.clone())
            .with_position(vec3(0.0, 0.04, 0.91))
            .with_scale(vec3(0.055, 0.2, 0.065)),
    )?;
    for (side, x) in [("left", -0.045), ("right", 0.045)] {
        graph.add_child(
            head,
            Node::mesh(format!("nostril-{side}"), Geometry::sphere(1.0, 8, 8), matte(NOSTRIL, 0.8))
                .with_position(vec3(x, -0.17, 0.91))
                .with_scale(vec3(0.04, 0.028, 0.035)),
        )?;
    }

    graph.add_child(
        head,
        Node::mesh("lip-upper", Geometry::sphere(1.0, 16, 12), matte(LIP, 0.55))
            .with_position(vec3(0.0, -0.32, 0.87))
            .with_scale(vec3(0.17, 0.032, 0.065))
            .with_rotation(vec3(0.08, 0.0, 0.0)),
    )?;
    graph.add_child(
        head,
        Node::mesh("lip-lower", Geometry::sphere(1.0, 16, 12), matte(LIP, 0.5))
            .with_position(vec3(0.0, -0.37, 0.86))
            .with_scale(vec3(0.14, 0.032, 0.065))
            .with_rotation(vec3(-0.04, 0.0, 0.0)),
    )?;
    graph.add_child(
        head,
        Node::mesh(
            "lip-seam",
            Geometry::sphere(1.0, 12, 4),
            Material::Basic(BasicMaterial::opaque(hex_rgb(LIP_LINE))),
        )
        .with_position(vec3(0.0, -0.345, 0.88))
        .with_scale(vec3(0.15, 0.004, 0.025)),
    )?;

    for (side, x, yaw) in [("left", -1.0, -0.35), ("right", 1.0, 0.35)] {
        let ear = graph.add_child(
            head,
            Node::group(format!("ear-{side}"))
                .with_position(vec3(x, 0.0, -0.05))
                .with_rotation(vec3(0.0, yaw, 0.0)),
        )?;
        graph.add_child(
            ear,
            Node::mesh(format!("ear-outer-{side}"), Geometry::sphere(1.0, 14, 14), skin_material.clone())
                .with_scale(vec3(0.12, 0.22, 0.11)),
        )?;
        // The inner bowl sits toward the head.
        graph.add_child(
            ear,
            Node::mesh(
                format!("ear-inner-{side}"),
                Geometry::sphere(1.0, 10, 10),
                matte(SKIN_SHADOW, 0.85),
            )
            .with_position(vec3(-x * 0.04, 0.0, 0.03))
            .with_scale(vec3(0.06, 0.14, 0.06)),
        )?;
    }
    Ok(())
}

/// Handles to the nodes posed every frame.
#[derive(Debug, Clone, Copy)]
struct AvatarNodes {
    group: NodeId,
    head: NodeId,
    eyes: [Eye; 2],
}

fn mount_avatar(graph: &mut SceneGraph, parent: NodeId) -> Result<AvatarNodes, GraphError> {
    let group = graph.add_child(
        parent,
        Node::group("avatar").with_position(vec3(0.0, rig::BASE_HEIGHT, 0.0)),
    )?;
    let head = graph.add_child(group, Node::group("head"))?;

    graph.add_child(
        head,
        Node::mesh(
            "head-mesh",
            Geometry::Custom(Arc::new(head::head_mesh())),
            Material::Standard(skin()),
        ),
    )?;

    graph.add_child(
        head,
        Node::mesh("hair-cap", Geometry::sphere_cap(1.0, 32, 32, PI * 0.58), hair())
            .with_position(vec3(0.0, 0.62, -0.08))
            .with_scale(vec3(1.08, 0.45, 1.05)),
    )?;
    add_blobs(graph, head, &HAIR_BLOBS, &hair())?;

    let eyes = [
        mount_eye(graph, head, "left", LEFT_EYE)?,
        mount_eye(graph, head, "right", RIGHT_EYE)?,
    ];
    mount_face(graph, head)?;

    let skin_material = Material::Standard(skin());
    graph.add_child(
        group,
        Node::mesh(
            "neck",
            Geometry::Cylinder {
                radius_top: 0.28,
                radius_bottom: 0.34,
                height: 0.5,
                radial_segments: 32,
            },
            skin_material.clone(),
        )
        .with_position(vec3(0.0, -0.88, -0.05)),
    )?;
    graph.add_child(
        group,
        Node::mesh("shoulders", Geometry::sphere_cap(1.0, 32, 32, PI * 0.55), skin_material.clone())
            .with_position(vec3(0.0, -1.4, -0.1))
            .with_scale(vec3(1.8, 0.6, 0.8)),
    )?;
    add_blobs(graph, group, &TORSO_BLOBS, &skin_material)?;

    Ok(AvatarNodes { group, head, eyes })
}

fn mount_backdrop(graph: &mut SceneGraph, parent: NodeId) -> Result<(), GraphError> {
    graph.add_child(
        parent,
        Node::mesh(
            "glow",
            Geometry::Plane {
                width: 10.0,
                height: 10.0,
            },
            Material::Shader(glow::glow_material(
                "avatar-glow",
                hex_rgb(GLOW_COLOR),
                GLOW_INTENSITY,
            )),
        )
        .with_position(vec3(0.0, -0.2, -2.5)),
    )?;
    graph.add_child(
        parent,
        Node::mesh(
            "shadow",
            Geometry::Plane {
                width: 4.0,
                height: 4.0,
            },
            Material::Shader(glow::glow_material("avatar-shadow", Vec3::ZERO, SHADOW_INTENSITY)),
        )
        .with_position(vec3(0.0, -2.5, 0.5))
        .with_rotation(vec3(-PI / 2.0, 0.0, 0.0)),
    )?;
    Ok(())
}

/// Mounted avatar portrait.
#[derive(Debug)]
pub struct AvatarScene {
    graph: SceneGraph,
    camera: Camera,
    lights: LightRig,
    pointer: Rc<Cell<Vec2>>,
    listener: ListenerId,
    motion: AvatarMotion,
    nodes: AvatarNodes,
}

impl AvatarScene {
    /// Build the portrait and start listening for pointer moves.
    pub fn mount(events: &mut ViewportEvents, seed: u64) -> Result<Self, SceneError> {
        let mut graph = SceneGraph::new();
        let root = graph.root();

        // Lights ignore progress; the cell only satisfies the rig.
        let lights = LightRig::mount(&mut graph, root, &avatar_lights(), Default::default())?;
        let nodes = mount_avatar(&mut graph, root)?;
        mount_backdrop(&mut graph, root)?;

        let mut camera = Camera::perspective(30.0, vec3(0.0, 0.15, 3.8));
        let viewport = events.viewport();
        camera.set_aspect_ratio(viewport.width, viewport.height);

        let pointer = Rc::new(Cell::new(Vec2::ZERO));
        let sink = Rc::clone(&pointer);
        let listener = events.add_pointer_listener(move |event, viewport| {
            sink.set(event.normalized(viewport));
        });

        debug!("Mounted avatar ({} nodes)", graph.len());
        Ok(Self {
            graph,
            camera,
            lights,
            pointer,
            listener,
            motion: AvatarMotion::new(seed),
            nodes,
        })
    }

    /// Last pointer position in `[-1, 1]`, +Y up.
    pub fn pointer(&self) -> Vec2 {
        self.pointer.get()
    }

    pub fn motion(&self) -> &AvatarMotion {
        &self.motion
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    fn apply(&mut self, pose: &AvatarPose) {
        let graph = &mut self.graph;
        if let Some(group) = graph.get_mut(self.nodes.group) {
            group.transform.position = pose.group_position;
            group.transform.rotation = pose.group_rotation;
        } else {
            trace!("Avatar group missing, skipping pose");
            return;
        }
        if let Some(head) = graph.get_mut(self.nodes.head) {
            head.transform.rotation = pose.head_rotation;
        }
        for eye in &self.nodes.eyes {
            if let Some(iris) = graph.get_mut(eye.iris) {
                iris.transform.rotation = pose.eye_rotation;
            }
            if let Some(lid) = graph.get_mut(eye.lid) {
                lid.transform.position.y = pose.lid_y;
            }
        }
    }
}

impl SectionScene for AvatarScene {
    fn name(&self) -> &str {
        "avatar"
    }

    fn update(&mut self, dt: f32) {
        let pose = self.motion.update(self.pointer.get(), dt);
        self.apply(&pose);
    }

    fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn background(&self) -> Vec3 {
        hex_rgb(BACKGROUND)
    }

    fn post_processing(&self) -> Option<PostProcessing> {
        Some(POST_PROCESSING)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_aspect_ratio(width, height);
    }

    fn unmount(self: Box<Self>, events: &mut ViewportEvents) {
        events.remove_listener(self.listener);
        debug!("Unmounted avatar");
    }
}
