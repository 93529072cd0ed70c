//! Scroll-driven planet scenes.
//!
//! A [`SceneSpec`] declares everything a section scene contains. Mounting it
//! as a [`PlanetScene`] builds a private scene graph, creates (or adopts) the
//! scene's [`ProgressCell`], hands that cell to every child, and attaches one
//! scroll tracker. [`PlanetScene::unmount`] detaches the tracker again.

use std::rc::Rc;

use glam::{Vec3, vec3};
use starscroll_graph::{Camera, SceneGraph, hex_rgb};
use starscroll_particles::{ShootingStar, ShootingStarConfig, ShootingStarNode, Starfield, StarfieldConfig};
use starscroll_planet::{PlanetConfig, PlanetPreset, PlanetRenderer};
use starscroll_scroll::{
    ProgressCell, ProgressSource, ScrollSubscription, ScrollTracker, SectionElement, ViewportEvents,
};
use tracing::{debug, info};

use crate::camera_rig::{CameraRig, CameraRigConfig};
use crate::error::SceneError;
use crate::lights::{LightRig, LightSpec, about_lights, generic_lights, hero_lights, what_i_do_lights};
use crate::section::SectionScene;

/// Page background shared by every scene.
pub const BACKGROUND: u32 = 0x0b080c;

/// Base camera position of the section scenes.
pub const SECTION_CAMERA_BASE: Vec3 = Vec3::new(0.0, 0.0, 5.5);

/// How a scene measures its scroll progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// The section's extent crossing the viewport.
    Section,
    /// Page scroll over the first viewport height.
    Page,
}

/// Declarative description of a planet scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpec {
    pub name: &'static str,
    pub background: Vec3,
    pub progress_mode: ProgressMode,
    pub camera: CameraRigConfig,
    pub lights: Vec<LightSpec>,
    pub starfield: StarfieldConfig,
    pub shooting_star: Option<ShootingStarConfig>,
    pub planets: Vec<PlanetConfig>,
}

impl SceneSpec {
    /// Landing scene: textured Earth driven by page scroll.
    pub fn hero() -> Self {
        let planet = PlanetConfig::earth();
        Self {
            name: "hero",
            background: hex_rgb(BACKGROUND),
            progress_mode: ProgressMode::Page,
            camera: CameraRigConfig::new(vec3(0.0, 0.0, 6.5), planet.camera_drift),
            lights: hero_lights(),
            starfield: StarfieldConfig {
                count: planet.star_count,
                inner_radius: 50.0,
                spin_x: 0.15,
                spin_y: 0.3,
                point_size: 0.4,
                opacity: 0.7,
                ..StarfieldConfig::default()
            },
            shooting_star: None,
            planets: vec![planet],
        }
    }

    /// About section: Mars with scroll-brightened rim lights.
    pub fn about() -> Self {
        let planet = PlanetConfig::mars();
        Self {
            name: "about",
            background: hex_rgb(BACKGROUND),
            progress_mode: ProgressMode::Section,
            camera: CameraRigConfig::new(SECTION_CAMERA_BASE, planet.camera_drift),
            lights: about_lights(),
            starfield: StarfieldConfig {
                count: planet.star_count,
                spin_x: 0.12,
                spin_y: 0.25,
                point_size: 0.35,
                opacity: 0.65,
                ..StarfieldConfig::default()
            },
            shooting_star: Some(ShootingStarConfig::standard()),
            planets: vec![planet],
        }
    }

    /// What-I-do section: procedural Jupiter.
    pub fn what_i_do() -> Self {
        let planet = PlanetConfig::jupiter();
        Self {
            name: "what-i-do",
            background: hex_rgb(BACKGROUND),
            progress_mode: ProgressMode::Section,
            camera: CameraRigConfig::new(SECTION_CAMERA_BASE, planet.camera_drift),
            lights: what_i_do_lights(),
            starfield: StarfieldConfig {
                count: planet.star_count,
                opacity: 0.6,
                ..StarfieldConfig::default()
            },
            shooting_star: Some(ShootingStarConfig::sparse()),
            planets: vec![planet],
        }
    }

    /// Section scene around one of the banded presets.
    pub fn generic(preset: PlanetPreset) -> Self {
        let planet = preset.config();
        Self {
            name: preset.key(),
            background: hex_rgb(BACKGROUND),
            progress_mode: ProgressMode::Section,
            camera: CameraRigConfig::new(SECTION_CAMERA_BASE, planet.camera_drift),
            lights: generic_lights(planet.light_color, planet.rim_color),
            starfield: StarfieldConfig {
                count: planet.star_count,
                ..StarfieldConfig::default()
            },
            shooting_star: None,
            planets: vec![planet],
        }
    }

    /// Resolve a preset key. Unknown keys are an error, never a fallback.
    pub fn from_preset_key(key: &str) -> Result<Self, SceneError> {
        Ok(Self::generic(key.parse()?))
    }

    /// Scale the star count, e.g. for small screens.
    pub fn with_star_density(mut self, density: f32) -> Self {
        let scaled = (self.starfield.count as f32 * density.max(0.0)).round();
        self.starfield.count = scaled as u32;
        self
    }

    pub fn without_shooting_star(mut self) -> Self {
        self.shooting_star = None;
        self
    }
}

/// A mounted planet scene.
#[derive(Debug)]
pub struct PlanetScene {
    name: &'static str,
    background: Vec3,
    graph: SceneGraph,
    progress: ProgressCell,
    subscription: ScrollSubscription,
    camera: CameraRig,
    lights: LightRig,
    starfield: Starfield,
    shooting_star: Option<ShootingStarNode>,
    planets: Vec<PlanetRenderer>,
}

impl PlanetScene {
    /// Mount with a fresh progress cell owned by this scene.
    pub fn mount(
        spec: SceneSpec,
        element: Option<Rc<dyn SectionElement>>,
        events: &mut ViewportEvents,
        seed: u64,
    ) -> Result<Self, SceneError> {
        Self::mount_with_progress(spec, element, events, seed, ProgressCell::new())
    }

    /// Mount writing into `progress`, so other scenes holding the same cell
    /// see this scene's scroll position.
    pub fn mount_with_progress(
        spec: SceneSpec,
        element: Option<Rc<dyn SectionElement>>,
        events: &mut ViewportEvents,
        seed: u64,
        progress: ProgressCell,
    ) -> Result<Self, SceneError> {
        let mut graph = SceneGraph::new();
        let root = graph.root();

        let lights = LightRig::mount(&mut graph, root, &spec.lights, progress.clone())?;
        let starfield = Starfield::mount(&mut graph, root, spec.starfield, seed, progress.clone())?;
        let shooting_star = match spec.shooting_star {
            Some(config) => {
                let star = ShootingStar::new(config, seed.wrapping_add(1));
                Some(ShootingStarNode::mount(&mut graph, root, star)?)
            }
            None => None,
        };
        let planets = spec
            .planets
            .into_iter()
            .map(|config| PlanetRenderer::mount(&mut graph, root, config, progress.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut camera = CameraRig::new(spec.camera, progress.clone());
        let viewport = events.viewport();
        camera.set_aspect_ratio(viewport.width, viewport.height);

        let source = match spec.progress_mode {
            ProgressMode::Page => ProgressSource::Page,
            ProgressMode::Section => ProgressSource::Section(element),
        };
        let subscription = ScrollTracker::new(source, progress.clone()).attach(events);

        info!(
            "Mounted scene {} ({} nodes, progress {:.3})",
            spec.name,
            graph.len(),
            progress.get()
        );

        Ok(Self {
            name: spec.name,
            background: spec.background,
            graph,
            progress,
            subscription,
            camera,
            lights,
            starfield,
            shooting_star,
            planets,
        })
    }

    pub fn progress(&self) -> &ProgressCell {
        &self.progress
    }

    pub fn planets(&self) -> &[PlanetRenderer] {
        &self.planets
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn shooting_star(&self) -> Option<&ShootingStarNode> {
        self.shooting_star.as_ref()
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn camera_rig(&self) -> &CameraRig {
        &self.camera
    }

    /// Mutable graph access for hosts that edit the scene directly.
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }
}

impl SectionScene for PlanetScene {
    fn name(&self) -> &str {
        self.name
    }

    fn update(&mut self, dt: f32) {
        self.camera.update(dt);
        self.lights.update(&mut self.graph, dt);
        self.starfield.update(&mut self.graph);
        if let Some(star) = &mut self.shooting_star {
            star.update(&mut self.graph, dt);
        }
        for planet in &mut self.planets {
            planet.update(&mut self.graph, dt);
        }
    }

    fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    fn camera(&self) -> &Camera {
        self.camera.camera()
    }

    fn background(&self) -> Vec3 {
        self.background
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_aspect_ratio(width, height);
    }

    fn unmount(self: Box<Self>, events: &mut ViewportEvents) {
        self.subscription.detach(events);
        debug!("Unmounted scene {}", self.name);
    }
}
