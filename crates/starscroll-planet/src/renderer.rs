//! Mounts a planet into a scene graph and animates it every frame.

use starscroll_graph::{
    Geometry, GraphError, Material, Node, NodeId, SceneGraph, ShaderMaterial, StandardMaterial,
    TextureRef,
};
use starscroll_scroll::ProgressCell;
use tracing::{debug, trace};

use crate::config::{PlanetConfig, Surface};
use crate::motion::PlanetMotion;
use crate::shader::{planet_shader_source, ring_shader_source};
use crate::uniform::PlanetUniform;

/// A live planet: a group node carrying the scroll-driven transform, a sphere
/// that spins inside it, and an optional ring.
#[derive(Debug)]
pub struct PlanetRenderer {
    config: PlanetConfig,
    progress: ProgressCell,
    motion: PlanetMotion,
    elapsed: f32,
    group: NodeId,
    body: NodeId,
    ring: Option<NodeId>,
}

impl PlanetRenderer {
    /// Build the planet's nodes under `parent`, starting at the progress-0
    /// transform.
    pub fn mount(
        graph: &mut SceneGraph,
        parent: NodeId,
        config: PlanetConfig,
        progress: ProgressCell,
    ) -> Result<Self, GraphError> {
        let motion = PlanetMotion::new(config.motion);
        let mut group_node = Node::group(config.name);
        group_node.transform = motion.transform();
        let group = graph.add_child(parent, group_node)?;

        let body = graph.add_child(
            group,
            Node::mesh(
                format!("{}-body", config.name),
                Geometry::sphere(config.radius, config.segments, config.segments),
                surface_material(&config.surface),
            ),
        )?;

        let ring = match &config.ring {
            Some(ring) => {
                let mut material = ShaderMaterial::new("planet-ring", ring_shader_source());
                material.transparent = true;
                material.double_sided = true;
                material.depth_write = false;
                let node = Node::mesh(
                    format!("{}-ring", config.name),
                    Geometry::Ring {
                        inner_radius: ring.inner_radius,
                        outer_radius: ring.outer_radius,
                        segments: ring.segments,
                    },
                    Material::Shader(material),
                )
                .with_rotation(glam::vec3(ring.tilt, 0.0, 0.0));
                Some(graph.add_child(group, node)?)
            }
            None => None,
        };

        debug!(
            "Mounted planet {} (ring: {}, radius {})",
            config.name,
            ring.is_some(),
            config.radius
        );

        Ok(Self {
            config,
            progress,
            motion,
            elapsed: 0.0,
            group,
            body,
            ring,
        })
    }

    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn ring(&self) -> Option<NodeId> {
        self.ring
    }

    pub fn motion(&self) -> &PlanetMotion {
        &self.motion
    }

    /// Seconds of shader time accumulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance one frame. Skips the whole tick if either node is missing.
    pub fn update(&mut self, graph: &mut SceneGraph, dt: f32) {
        if !graph.contains(self.group) || !graph.contains(self.body) {
            trace!("Planet {} nodes missing, skipping update", self.config.name);
            return;
        }

        self.elapsed += dt;
        self.motion.update(self.progress.get(), dt);

        if let Some(body) = graph.get_mut(self.body) {
            body.transform.rotation.y += dt * self.config.motion.spin_rate;
            if let (Surface::Procedural(params), Some(Material::Shader(material))) =
                (&self.config.surface, body.material_mut())
            {
                material.write_uniforms(&PlanetUniform::new(params, self.elapsed));
            }
        }

        if let Some(group) = graph.get_mut(self.group) {
            group.transform = self.motion.transform();
        }
    }

    /// Remove every node this planet added.
    pub fn unmount(self, graph: &mut SceneGraph) -> Result<(), GraphError> {
        graph.remove(self.group)?;
        debug!("Unmounted planet {}", self.config.name);
        Ok(())
    }
}

fn surface_material(surface: &Surface) -> Material {
    match surface {
        Surface::Procedural(params) => {
            let mut material = ShaderMaterial::new("planet-surface", planet_shader_source());
            material.write_uniforms(&PlanetUniform::new(params, 0.0));
            Material::Shader(material)
        }
        Surface::Textured(textured) => Material::Standard(StandardMaterial {
            map: Some(TextureRef::color_map(textured.texture_url.clone())),
            roughness: textured.roughness,
            metalness: textured.metalness,
            emissive: textured.emissive,
            emissive_intensity: textured.emissive_intensity,
            ..StandardMaterial::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::PlanetPreset;
    use glam::vec3;

    const DT: f32 = 1.0 / 60.0;

    fn mount(config: PlanetConfig) -> (SceneGraph, PlanetRenderer, ProgressCell) {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let progress = ProgressCell::new();
        let planet = PlanetRenderer::mount(&mut graph, root, config, progress.clone()).unwrap();
        (graph, planet, progress)
    }

    #[test]
    fn test_mount_builds_nodes() {
        let (graph, saturn, _) = mount(PlanetPreset::Saturn.config());
        assert!(saturn.ring().is_some());
        assert_eq!(graph.len(), 4, "root, group, body, ring");
        let group = graph.get(saturn.group()).unwrap();
        assert_eq!(group.transform.position, vec3(1.5, 0.3, 0.0));

        let (graph, venus, _) = mount(PlanetPreset::Venus.config());
        assert!(venus.ring().is_none());
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_update_writes_clock_and_spin() {
        let (mut graph, mut planet, _) = mount(PlanetPreset::Neptune.config());
        for _ in 0..60 {
            planet.update(&mut graph, DT);
        }
        let body = graph.get_mut(planet.body()).unwrap();
        assert!((body.transform.rotation.y - 0.04).abs() < 1e-4);
        let Some(Material::Shader(material)) = body.material_mut() else {
            panic!("procedural planets use a shader material");
        };
        let uniform: PlanetUniform = material.read_uniforms().unwrap();
        assert!((uniform.time - 1.0).abs() < 1e-4, "time {}", uniform.time);
    }

    #[test]
    fn test_group_eases_toward_progress_target() {
        let (mut graph, mut planet, progress) = mount(PlanetConfig::jupiter());
        progress.set(0.5);
        for _ in 0..300 {
            planet.update(&mut graph, DT);
        }
        let t = graph.get(planet.group()).unwrap().transform;
        assert!(t.position.abs_diff_eq(vec3(-2.75, 0.9, -1.25), 1e-4), "{:?}", t.position);
        assert!(t.rotation.abs_diff_eq(vec3(-0.15, -0.6, 0.2), 1e-4), "{:?}", t.rotation);
        assert!((t.scale.x - 0.85).abs() < 1e-4);
    }

    #[test]
    fn test_mars_spins_backwards_with_texture() {
        let (mut graph, mut mars, _) = mount(PlanetConfig::mars());
        mars.update(&mut graph, 0.5);
        let body = graph.get_mut(mars.body()).unwrap();
        assert!(body.transform.rotation.y < 0.0);
        match body.material_mut() {
            Some(Material::Standard(material)) => {
                assert_eq!(material.map.as_ref().unwrap().url, "/textures/mars.jpg");
                assert_eq!(material.emissive_intensity, 0.4);
            }
            other => panic!("unexpected material {other:?}"),
        }
    }

    #[test]
    fn test_missing_body_skips_tick() {
        let (mut graph, mut planet, progress) = mount(PlanetPreset::Violet.config());
        graph.remove(planet.body()).unwrap();
        progress.set(1.0);
        planet.update(&mut graph, DT);
        assert_eq!(planet.elapsed(), 0.0);
        let group = graph.get(planet.group()).unwrap();
        assert_eq!(group.transform.position, vec3(0.0, 0.3, 0.0), "group untouched");
    }

    #[test]
    fn test_unmount_removes_subtree() {
        let (mut graph, saturn, _) = mount(PlanetPreset::Saturn.config());
        saturn.unmount(&mut graph).unwrap();
        assert_eq!(graph.len(), 1);
    }
}
