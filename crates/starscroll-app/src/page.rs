//! The portfolio page: seven stacked sections, four of which mount a scene.
//!
//! Section offsets are laid out once, in multiples of the viewport height the
//! page was opened with. Scenes load lazily: each slot stays pending for
//! `timeline.load_frames` polls before its module resolves.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use starscroll_config::{Config, SceneConfig};
use starscroll_scene::{
    PlanetScene, SceneError, SceneModule, SceneSlot, SceneSpec, SectionScene, SlotStatus,
    planet_module,
};
use starscroll_scroll::{PageSection, SectionElement, Viewport, ViewportEvents};
use tracing::{debug, info};

/// Narrowest viewport that shows the About planet.
pub const ABOUT_MIN_WIDTH: f32 = 1025.0;

/// Which scene a section mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Hero,
    About,
    WhatIDo,
    /// The preset named by `content.career_preset`.
    Career,
}

/// Static layout of one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionLayout {
    pub name: &'static str,
    /// Height in viewport heights.
    pub height: f32,
    pub scene: Option<SceneKind>,
}

const fn layout(name: &'static str, height: f32, scene: Option<SceneKind>) -> SectionLayout {
    SectionLayout {
        name,
        height,
        scene,
    }
}

/// Page sections from top to bottom.
pub const SECTIONS: [SectionLayout; 7] = [
    layout("landing", 1.0, Some(SceneKind::Hero)),
    layout("about", 1.2, Some(SceneKind::About)),
    layout("what-i-do", 1.5, Some(SceneKind::WhatIDo)),
    layout("career", 1.5, Some(SceneKind::Career)),
    layout("works", 2.0, None),
    layout("tech-stack", 1.0, None),
    layout("contact", 1.0, None),
];

/// Resolves to a module after being polled `remaining` more times.
struct LoadGate {
    remaining: u32,
    module: Option<SceneModule>,
}

impl Future for LoadGate {
    type Output = Result<SceneModule, SceneError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.remaining > 0 {
            self.remaining -= 1;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        Poll::Ready(
            self.module
                .take()
                .ok_or_else(|| SceneError::Load("module already taken".into())),
        )
    }
}

/// Apply the configured star density and shooting-star switch.
fn tune(spec: SceneSpec, scene: &SceneConfig) -> SceneSpec {
    let spec = spec.with_star_density(scene.star_density);
    if scene.shooting_stars {
        spec
    } else {
        spec.without_shooting_star()
    }
}

/// The career module resolves its preset key when it runs, so a bad key
/// fails scene construction and leaves only that slot empty.
fn career_module(
    key: String,
    element: Rc<dyn SectionElement>,
    scene: SceneConfig,
    seed: u64,
) -> SceneModule {
    Box::new(move |events| {
        let spec = tune(SceneSpec::from_preset_key(&key)?, &scene);
        let mounted = PlanetScene::mount(spec, Some(element), events, seed)?;
        Ok(Box::new(mounted) as Box<dyn SectionScene>)
    })
}

/// One laid-out section and its scene slot.
#[derive(Debug)]
pub struct Section {
    layout: SectionLayout,
    element: Rc<PageSection>,
    seed: u64,
    slot: Option<SceneSlot>,
}

impl Section {
    pub fn name(&self) -> &str {
        self.layout.name
    }

    pub fn element(&self) -> &PageSection {
        &self.element
    }

    /// `None` when the section has no scene slot at all.
    pub fn status(&self) -> Option<SlotStatus> {
        self.slot.as_ref().map(SceneSlot::status)
    }

    pub fn scene(&self) -> Option<&dyn SectionScene> {
        self.slot.as_ref().and_then(SceneSlot::scene)
    }
}

/// The page, its viewport event host and every section.
#[derive(Debug)]
pub struct Page {
    events: ViewportEvents,
    sections: Vec<Section>,
    scene: SceneConfig,
    career_preset: String,
    load_frames: u32,
}

impl Page {
    /// Lay out the sections and start loading their scenes.
    pub fn new(config: &Config) -> Self {
        let width = config.viewport.width as f32;
        let height = config.viewport.height as f32;

        let mut document_top = 0.0;
        let sections = SECTIONS
            .iter()
            .enumerate()
            .map(|(index, layout)| {
                let section_height = layout.height * height;
                let element = Rc::new(PageSection::new(layout.name, document_top, section_height));
                document_top += section_height;
                Section {
                    layout: *layout,
                    element,
                    // Shooting stars take the seed after their scene's.
                    seed: config.scene.seed.wrapping_add(index as u64 * 2),
                    slot: None,
                }
            })
            .collect();

        let mut page = Self {
            events: ViewportEvents::new(Viewport::new(width, height)),
            sections,
            scene: config.scene.clone(),
            career_preset: config.content.career_preset.clone(),
            load_frames: config.timeline.load_frames,
        };
        for index in 0..page.sections.len() {
            page.sections[index].slot = page.load_slot(index);
        }

        info!(
            "Page laid out: {} sections, {:.0}px tall, viewport {width}x{height}",
            page.sections.len(),
            page.document_height()
        );
        page
    }

    /// Start loading the scene for section `index`, if it should show one.
    fn load_slot(&self, index: usize) -> Option<SceneSlot> {
        let section = &self.sections[index];
        let kind = section.layout.scene?;
        let element: Rc<dyn SectionElement> = section.element.clone();

        let module = match kind {
            SceneKind::Hero => planet_module(tune(SceneSpec::hero(), &self.scene), Some(element), section.seed),
            SceneKind::About => {
                if self.events.viewport().width < ABOUT_MIN_WIDTH {
                    debug!("About planet hidden below {ABOUT_MIN_WIDTH}px");
                    return None;
                }
                planet_module(tune(SceneSpec::about(), &self.scene), Some(element), section.seed)
            }
            SceneKind::WhatIDo => {
                planet_module(tune(SceneSpec::what_i_do(), &self.scene), Some(element), section.seed)
            }
            SceneKind::Career => career_module(
                self.career_preset.clone(),
                element,
                self.scene.clone(),
                section.seed,
            ),
        };

        Some(SceneSlot::new(
            section.layout.name,
            LoadGate {
                remaining: self.load_frames,
                module: Some(module),
            },
        ))
    }

    pub fn viewport(&self) -> &Viewport {
        self.events.viewport()
    }

    pub fn events(&self) -> &ViewportEvents {
        &self.events
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name() == name)
    }

    /// Total height of every section.
    pub fn document_height(&self) -> f32 {
        self.sections
            .iter()
            .map(|section| section.element.height())
            .sum()
    }

    /// Largest scroll offset that keeps the viewport inside the document.
    pub fn max_scroll(&self) -> f32 {
        (self.document_height() - self.viewport().height).max(0.0)
    }

    /// The section under the middle of the viewport.
    pub fn focused_section(&self) -> Option<&Section> {
        let viewport = self.viewport();
        let probe = viewport.scroll_y + viewport.height / 2.0;
        self.sections.iter().find(|section| {
            let top = section.element.document_top();
            probe >= top && probe < top + section.element.height()
        })
    }

    pub fn scroll_to(&mut self, scroll_y: f32) {
        self.events.scroll_to(scroll_y);
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.events.pointer_move(client_x, client_y);
    }

    /// Resize the viewport, updating camera aspect ratios and showing or
    /// hiding the About planet as the width crosses [`ABOUT_MIN_WIDTH`].
    pub fn resize(&mut self, width: f32, height: f32) {
        self.events.resize(width, height);

        for index in 0..self.sections.len() {
            if self.sections[index].layout.scene == Some(SceneKind::About) {
                let wanted = width >= ABOUT_MIN_WIDTH;
                match (wanted, self.sections[index].slot.take()) {
                    (true, None) => self.sections[index].slot = self.load_slot(index),
                    (false, Some(slot)) => {
                        info!("Hiding About planet at width {width}");
                        slot.unmount(&mut self.events);
                    }
                    (_, slot) => self.sections[index].slot = slot,
                }
            }

            if let Some(scene) = self.sections[index]
                .slot
                .as_mut()
                .and_then(SceneSlot::scene_mut)
            {
                scene.resize(width, height);
            }
        }
    }

    /// Poll pending loads and advance every mounted scene by `dt`.
    pub fn update(&mut self, dt: f32) {
        for section in &mut self.sections {
            if let Some(slot) = section.slot.as_mut() {
                slot.update(&mut self.events, dt);
            }
        }
    }

    /// Unmount every scene and detach every listener.
    pub fn unmount(mut self) {
        for section in &mut self.sections {
            if let Some(slot) = section.slot.take() {
                slot.unmount(&mut self.events);
            }
            section.element.set_mounted(false);
        }
        debug!("Page unmounted, {:?}", self.events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn config() -> Config {
        let mut config = Config::default();
        config.timeline.load_frames = 2;
        config
    }

    fn mounted_count(page: &Page) -> usize {
        page.sections()
            .iter()
            .filter(|section| section.status() == Some(SlotStatus::Mounted))
            .count()
    }

    #[test]
    fn test_sections_are_stacked() {
        let page = Page::new(&config());
        let names: Vec<_> = page.sections().iter().map(Section::name).collect();
        assert_eq!(
            names,
            ["landing", "about", "what-i-do", "career", "works", "tech-stack", "contact"]
        );
        let about = page.section("about").unwrap().element();
        assert_eq!(about.document_top(), 900.0);
        assert!((about.height() - 1080.0).abs() < 1e-3);
        assert!((page.document_height() - 9.2 * 900.0).abs() < 1e-2);
        assert!((page.max_scroll() - 8.2 * 900.0).abs() < 1e-2);
    }

    #[test]
    fn test_scenes_mount_after_load_frames() {
        let mut page = Page::new(&config());
        page.update(DT);
        page.update(DT);
        assert_eq!(mounted_count(&page), 0);
        assert_eq!(page.section("landing").unwrap().status(), Some(SlotStatus::Pending));
        page.update(DT);
        assert_eq!(mounted_count(&page), 4);
        assert_eq!(page.section("works").unwrap().status(), None);
        assert_eq!(page.events().scroll_listener_count(), 4);
        assert_eq!(page.section("career").unwrap().scene().unwrap().name(), "saturn");
    }

    #[test]
    fn test_narrow_viewport_hides_about_planet() {
        let mut config = config();
        config.viewport.width = 800;
        let mut page = Page::new(&config);
        for _ in 0..3 {
            page.update(DT);
        }
        assert_eq!(page.section("about").unwrap().status(), None);
        assert_eq!(mounted_count(&page), 3);
    }

    #[test]
    fn test_resize_toggles_about_planet() {
        let mut page = Page::new(&config());
        for _ in 0..3 {
            page.update(DT);
        }
        assert_eq!(page.events().scroll_listener_count(), 4);

        page.resize(1024.0, 768.0);
        assert_eq!(page.section("about").unwrap().status(), None);
        assert_eq!(page.events().scroll_listener_count(), 3);

        page.resize(1280.0, 768.0);
        assert_eq!(page.section("about").unwrap().status(), Some(SlotStatus::Pending));
        for _ in 0..3 {
            page.update(DT);
        }
        assert_eq!(page.section("about").unwrap().status(), Some(SlotStatus::Mounted));
        assert_eq!(page.events().scroll_listener_count(), 4);
    }

    #[test]
    fn test_unknown_career_preset_leaves_only_career_empty() {
        let mut config = config();
        config.content.career_preset = "saturnV2".to_string();
        let mut page = Page::new(&config);
        for _ in 0..3 {
            page.update(DT);
        }
        assert_eq!(page.section("career").unwrap().status(), Some(SlotStatus::Empty));
        assert_eq!(mounted_count(&page), 3);
    }

    #[test]
    fn test_scroll_reaches_mounted_scenes() {
        let mut page = Page::new(&config());
        for _ in 0..3 {
            page.update(DT);
        }
        page.scroll_to(900.0);
        page.update(DT);
        assert_eq!(page.focused_section().unwrap().name(), "about");
        // One viewport height scrolled puts the hero at full progress, so its
        // camera starts drifting back.
        let landing = page.section("landing").unwrap().scene().unwrap();
        assert_eq!(landing.name(), "hero");
        let z = landing.camera().position.z;
        assert!(z > 6.5, "hero camera z {z}");
    }

    #[test]
    fn test_config_tunes_scenes() {
        let mut config = config();
        config.timeline.load_frames = 0;
        config.scene.shooting_stars = false;
        config.scene.star_density = 0.5;
        let mut page = Page::new(&config);
        page.update(DT);
        assert_eq!(mounted_count(&page), 4);
        let mut dense = Config::default();
        dense.timeline.load_frames = 0;
        let mut reference = Page::new(&dense);
        reference.update(DT);
        let nodes = |page: &Page, name: &str| page.section(name).unwrap().scene().unwrap().graph().len();
        // The sparse page drops the shooting star node; star counts live in
        // one points node either way.
        assert_eq!(nodes(&page, "about") + 1, nodes(&reference, "about"));
    }

    #[test]
    fn test_unmount_detaches_everything() {
        let mut page = Page::new(&config());
        for _ in 0..3 {
            page.update(DT);
        }
        let landing = Rc::clone(&page.sections[0].element);
        page.unmount();
        assert!(landing.bounding_rect(&Viewport::new(1440.0, 900.0)).is_none());
    }
}
