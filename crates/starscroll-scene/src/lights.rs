//! Light rigs: one ambient, one directional and a few point lights per scene.
//!
//! A rig is described by a list of [`LightSpec`]s and mounted as light nodes.
//! Lights with a [`DynamicIntensity`] ease their intensity toward a
//! progress-driven target every frame; the rest never change after mount.

use glam::{Vec3, vec3};
use starscroll_graph::{GraphError, Light, Node, NodeId, SceneGraph, hex_rgb};
use starscroll_planet::damp;
use starscroll_scroll::ProgressCell;
use tracing::{debug, trace};

/// Intensity target `base + per_progress * progress`, approached at `rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicIntensity {
    pub base: f32,
    pub per_progress: f32,
    pub rate: f32,
}

impl DynamicIntensity {
    pub fn target(&self, progress: f32) -> f32 {
        self.base + self.per_progress * progress
    }
}

/// One light of a rig.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSpec {
    pub name: &'static str,
    pub light: Light,
    /// Ignored for ambient lights.
    pub position: Vec3,
    pub dynamic: Option<DynamicIntensity>,
}

impl LightSpec {
    pub fn ambient(name: &'static str, color: u32, intensity: f32) -> Self {
        Self {
            name,
            light: Light::ambient(hex_rgb(color), intensity),
            position: Vec3::ZERO,
            dynamic: None,
        }
    }

    pub fn directional(name: &'static str, color: u32, intensity: f32, position: Vec3) -> Self {
        Self::directional_rgb(name, hex_rgb(color), intensity, position)
    }

    pub fn directional_rgb(name: &'static str, color: Vec3, intensity: f32, position: Vec3) -> Self {
        Self {
            name,
            light: Light::directional(color, intensity),
            position,
            dynamic: None,
        }
    }

    pub fn point(name: &'static str, color: u32, intensity: f32, position: Vec3) -> Self {
        Self::point_rgb(name, hex_rgb(color), intensity, position)
    }

    pub fn point_rgb(name: &'static str, color: Vec3, intensity: f32, position: Vec3) -> Self {
        Self {
            name,
            light: Light::point(color, intensity),
            position,
            dynamic: None,
        }
    }

    /// Drive the intensity from scroll progress. The mounted intensity is the
    /// starting value.
    pub fn with_dynamic(mut self, dynamic: DynamicIntensity) -> Self {
        self.dynamic = Some(dynamic);
        self
    }
}

/// Lights for the generic preset scenes: key and fill in the preset's light
/// color, two rims in its rim color.
pub fn generic_lights(light_color: Vec3, rim_color: Vec3) -> Vec<LightSpec> {
    vec![
        LightSpec::ambient("ambient", 0x2a2030, 0.45),
        LightSpec::directional_rgb("key", light_color, 2.2, vec3(-2.0, 2.0, 6.0)),
        LightSpec::point_rgb("fill", light_color, 1.4, vec3(-4.0, 1.0, 4.0)),
        LightSpec::point_rgb("rim", rim_color, 1.2, vec3(-3.0, 1.0, -4.0)),
        LightSpec::point_rgb("rim-2", rim_color, 0.8, vec3(2.0, 2.0, -3.0)),
    ]
}

/// Dim cool rig with a strong blue back light for the landing Earth.
pub fn hero_lights() -> Vec<LightSpec> {
    vec![
        LightSpec::ambient("ambient", 0x1a1025, 0.15),
        LightSpec::directional("key", 0xfff5e6, 1.5, vec3(5.0, 3.0, 5.0)),
        LightSpec::point("fill", 0x99aadd, 0.3, vec3(-4.0, 1.0, 3.0)),
        LightSpec::point("rim", 0x6699ff, 2.5, vec3(3.0, 1.0, -4.0)),
        LightSpec::point("rim-2", 0x88aaff, 1.5, vec3(-2.0, 2.0, -3.0)),
    ]
}

/// Warm rig whose purple rims brighten as the about section scrolls through.
pub fn about_lights() -> Vec<LightSpec> {
    vec![
        LightSpec::ambient("ambient", 0x3d2020, 0.5),
        LightSpec::directional("key", 0xffeedd, 2.5, vec3(-2.0, 2.0, 6.0)),
        LightSpec::point("fill", 0xff9966, 1.5, vec3(-4.0, 1.0, 4.0)),
        LightSpec::point("rim", 0x8866cc, 2.0, vec3(-3.0, 1.0, -4.0)).with_dynamic(
            DynamicIntensity {
                base: 2.0,
                per_progress: 3.0,
                rate: 3.0,
            },
        ),
        LightSpec::point("rim-2", 0x9977bb, 1.2, vec3(2.0, 2.0, -3.0)).with_dynamic(
            DynamicIntensity {
                base: 1.2,
                per_progress: 2.0,
                rate: 3.0,
            },
        ),
    ]
}

/// Amber rig for Jupiter.
pub fn what_i_do_lights() -> Vec<LightSpec> {
    vec![
        LightSpec::ambient("ambient", 0x1a1520, 0.12),
        LightSpec::directional("key", 0xffe8cc, 1.4, vec3(4.0, 3.0, 5.0)),
        LightSpec::point("fill", 0x99aacc, 0.3, vec3(-4.0, 0.0, 3.0)),
        LightSpec::point("rim", 0xaa8855, 1.8, vec3(3.0, 1.0, -4.0)),
        LightSpec::point("rim-2", 0x887755, 1.0, vec3(-2.0, 2.0, -3.0)),
    ]
}

/// Portrait rig for the avatar: warm key, purple rims from behind.
pub fn avatar_lights() -> Vec<LightSpec> {
    vec![
        LightSpec::ambient("ambient", 0x1a1025, 0.15),
        LightSpec::directional("key", 0xfff5e6, 2.0, vec3(3.0, 2.5, 4.0)),
        LightSpec::point("fill", 0x99aadd, 0.4, vec3(-3.0, 0.5, 3.0)),
        LightSpec::point("rim", 0xdd88ff, 5.0, vec3(2.5, 1.0, -2.5)),
        LightSpec::point("rim-2", 0xc2a4ff, 3.5, vec3(-2.0, 1.5, -2.0)),
        LightSpec::point("top-rim", 0xbb77ff, 2.0, vec3(0.0, 3.0, -1.0)),
        LightSpec::point("bottom-fill", 0xaa7766, 0.15, vec3(0.0, -3.0, 2.0)),
    ]
}

/// Mounted light nodes plus the progress they react to.
#[derive(Debug)]
pub struct LightRig {
    nodes: Vec<NodeId>,
    dynamic: Vec<(NodeId, DynamicIntensity)>,
    progress: ProgressCell,
}

impl LightRig {
    pub fn mount(
        graph: &mut SceneGraph,
        parent: NodeId,
        specs: &[LightSpec],
        progress: ProgressCell,
    ) -> Result<Self, GraphError> {
        let mut nodes = Vec::with_capacity(specs.len());
        let mut dynamic = Vec::new();
        for spec in specs {
            let id = graph.add_child(
                parent,
                Node::light(spec.name, spec.light).with_position(spec.position),
            )?;
            nodes.push(id);
            if let Some(d) = spec.dynamic {
                dynamic.push((id, d));
            }
        }
        debug!("Mounted light rig ({} lights, {} dynamic)", nodes.len(), dynamic.len());
        Ok(Self {
            nodes,
            dynamic,
            progress,
        })
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Ease dynamic intensities toward their targets. Each light is guarded on
    /// its own; a missing node only skips that light.
    pub fn update(&self, graph: &mut SceneGraph, dt: f32) {
        let progress = self.progress.get();
        for (id, dynamic) in &self.dynamic {
            let Some(light) = graph.get_mut(*id).and_then(|node| node.light_mut()) else {
                trace!("Light {:?} missing, skipping update", id);
                continue;
            };
            light.intensity = damp(light.intensity, dynamic.target(progress), dynamic.rate, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starscroll_graph::LightKind;

    const DT: f32 = 1.0 / 60.0;

    fn intensity(graph: &SceneGraph, id: NodeId) -> f32 {
        match &graph.get(id).unwrap().kind {
            starscroll_graph::NodeKind::Light(light) => light.intensity,
            other => panic!("expected a light node, got {other:?}"),
        }
    }

    #[test]
    fn test_rig_shapes() {
        for rig in [hero_lights(), about_lights(), what_i_do_lights()] {
            assert_eq!(rig.len(), 5);
            assert_eq!(rig[0].light.kind, LightKind::Ambient);
            assert_eq!(rig[1].light.kind, LightKind::Directional);
            assert!(rig[2..].iter().all(|l| matches!(l.light.kind, LightKind::Point { .. })));
        }
        assert_eq!(avatar_lights().len(), 7);
    }

    #[test]
    fn test_generic_lights_use_preset_colors() {
        let light = vec3(1.0, 0.5, 0.0);
        let rim = vec3(0.0, 0.5, 1.0);
        let rig = generic_lights(light, rim);
        assert_eq!(rig[1].light.color, light);
        assert_eq!(rig[2].light.color, light);
        assert_eq!(rig[3].light.color, rim);
        assert_eq!(rig[4].light.color, rim);
    }

    #[test]
    fn test_static_lights_do_not_change() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let progress = ProgressCell::new();
        let rig = LightRig::mount(&mut graph, root, &hero_lights(), progress.clone()).unwrap();
        progress.set(1.0);
        for _ in 0..120 {
            rig.update(&mut graph, DT);
        }
        assert_eq!(intensity(&graph, rig.nodes()[3]), 2.5);
    }

    #[test]
    fn test_dynamic_rims_follow_progress() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let progress = ProgressCell::new();
        let rig = LightRig::mount(&mut graph, root, &about_lights(), progress.clone()).unwrap();

        progress.set(1.0);
        for _ in 0..300 {
            rig.update(&mut graph, DT);
        }
        let rim = intensity(&graph, rig.nodes()[3]);
        let rim2 = intensity(&graph, rig.nodes()[4]);
        assert!((rim - 5.0).abs() < 1e-3, "rim settled at {rim}");
        assert!((rim2 - 3.2).abs() < 1e-3, "rim-2 settled at {rim2}");
    }

    #[test]
    fn test_missing_light_is_skipped() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let progress = ProgressCell::new();
        let rig = LightRig::mount(&mut graph, root, &about_lights(), progress.clone()).unwrap();
        graph.remove(rig.nodes()[3]).unwrap();

        progress.set(1.0);
        rig.update(&mut graph, DT);
        assert!(intensity(&graph, rig.nodes()[4]) > 1.2);
    }
}
