//! Lazily loaded scenes.
//!
//! A section does not build its scene up front. It holds a [`SceneSlot`]
//! around a future that resolves to a [`SceneModule`], a constructor for the
//! scene. The slot is polled once per frame; while the future is pending the
//! section shows its placeholder. Once it resolves the module is run and the
//! scene mounted. A failed load or construction leaves the slot empty and is
//! logged; it never affects other sections.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use starscroll_scroll::{SectionElement, ViewportEvents};
use tracing::{debug, info, warn};

use crate::avatar::AvatarScene;
use crate::composer::{PlanetScene, SceneSpec};
use crate::error::SceneError;
use crate::section::SectionScene;

/// Builds and mounts a scene once its code is available.
pub type SceneModule =
    Box<dyn FnOnce(&mut ViewportEvents) -> Result<Box<dyn SectionScene>, SceneError>>;

/// Pending load of a scene module.
pub type SceneFuture = Pin<Box<dyn Future<Output = Result<SceneModule, SceneError>>>>;

/// Module mounting a planet scene.
pub fn planet_module(
    spec: SceneSpec,
    element: Option<Rc<dyn SectionElement>>,
    seed: u64,
) -> SceneModule {
    Box::new(move |events| {
        let scene = PlanetScene::mount(spec, element, events, seed)?;
        Ok(Box::new(scene) as Box<dyn SectionScene>)
    })
}

/// Module mounting the avatar portrait.
pub fn avatar_module(seed: u64) -> SceneModule {
    Box::new(move |events| {
        let scene = AvatarScene::mount(events, seed)?;
        Ok(Box::new(scene) as Box<dyn SectionScene>)
    })
}

/// What a slot currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Still loading; the placeholder is visible.
    Pending,
    /// A scene is mounted.
    Mounted,
    /// Loading finished without a scene.
    Empty,
}

enum SlotState {
    Pending(SceneFuture),
    Ready(Option<Box<dyn SectionScene>>),
}

/// One section's lazily mounted scene.
pub struct SceneSlot {
    name: String,
    state: SlotState,
}

impl std::fmt::Debug for SceneSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneSlot")
            .field("name", &self.name)
            .field("status", &self.status())
            .finish()
    }
}

impl SceneSlot {
    pub fn new(
        name: impl Into<String>,
        future: impl Future<Output = Result<SceneModule, SceneError>> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            state: SlotState::Pending(Box::pin(future)),
        }
    }

    /// A slot whose module is already available. It still mounts on the first
    /// poll, like any other slot.
    pub fn ready(name: impl Into<String>, module: SceneModule) -> Self {
        Self::new(name, std::future::ready(Ok(module)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> SlotStatus {
        match &self.state {
            SlotState::Pending(_) => SlotStatus::Pending,
            SlotState::Ready(Some(_)) => SlotStatus::Mounted,
            SlotState::Ready(None) => SlotStatus::Empty,
        }
    }

    /// Poll a pending load once and mount the scene if it resolved.
    pub fn poll(&mut self, events: &mut ViewportEvents) -> SlotStatus {
        let SlotState::Pending(future) = &mut self.state else {
            return self.status();
        };
        let mut cx = Context::from_waker(Waker::noop());
        let Poll::Ready(loaded) = future.as_mut().poll(&mut cx) else {
            return SlotStatus::Pending;
        };

        let scene = match loaded.and_then(|module| module(events)) {
            Ok(scene) => {
                info!("Section {} mounted scene {}", self.name, scene.name());
                Some(scene)
            }
            Err(err) => {
                warn!("Section {} has no scene: {err}", self.name);
                None
            }
        };
        self.state = SlotState::Ready(scene);
        self.status()
    }

    pub fn scene(&self) -> Option<&dyn SectionScene> {
        match &self.state {
            SlotState::Ready(Some(scene)) => Some(scene.as_ref()),
            _ => None,
        }
    }

    pub fn scene_mut(&mut self) -> Option<&mut (dyn SectionScene + 'static)> {
        match &mut self.state {
            SlotState::Ready(Some(scene)) => Some(scene.as_mut()),
            _ => None,
        }
    }

    /// Poll, then advance the mounted scene by `dt`.
    pub fn update(&mut self, events: &mut ViewportEvents, dt: f32) {
        self.poll(events);
        if let Some(scene) = self.scene_mut() {
            scene.update(dt);
        }
    }

    /// Cancel a pending load or unmount the scene.
    pub fn unmount(self, events: &mut ViewportEvents) {
        match self.state {
            SlotState::Pending(_) => debug!("Section {} unmounted while loading", self.name),
            SlotState::Ready(Some(scene)) => scene.unmount(events),
            SlotState::Ready(None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starscroll_scroll::{PageSection, Viewport};

    const DT: f32 = 1.0 / 60.0;

    /// Resolves after being polled `remaining` more times.
    struct Delayed {
        remaining: u32,
        module: Option<Result<SceneModule, SceneError>>,
    }

    impl Future for Delayed {
        type Output = Result<SceneModule, SceneError>;

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
            if self.remaining > 0 {
                self.remaining -= 1;
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
            match self.module.take() {
                Some(module) => Poll::Ready(module),
                None => Poll::Ready(Err(SceneError::Load("polled after completion".into()))),
            }
        }
    }

    fn delayed(polls: u32, module: Result<SceneModule, SceneError>) -> Delayed {
        Delayed {
            remaining: polls,
            module: Some(module),
        }
    }

    fn events() -> ViewportEvents {
        ViewportEvents::new(Viewport::new(1440.0, 900.0))
    }

    #[test]
    fn test_pending_until_future_resolves() {
        let mut events = events();
        let mut slot = SceneSlot::new("hero", delayed(2, Ok(planet_module(SceneSpec::hero(), None, 1))));
        assert_eq!(slot.poll(&mut events), SlotStatus::Pending);
        assert_eq!(slot.poll(&mut events), SlotStatus::Pending);
        assert_eq!(events.scroll_listener_count(), 0);
        assert_eq!(slot.poll(&mut events), SlotStatus::Mounted);
        assert_eq!(slot.scene().map(|s| s.name()), Some("hero"));
        assert_eq!(events.scroll_listener_count(), 1);
    }

    #[test]
    fn test_failed_load_leaves_slot_empty() {
        let mut events = events();
        let mut slot = SceneSlot::new("works", delayed(0, Err(SceneError::Load("network".into()))));
        assert_eq!(slot.poll(&mut events), SlotStatus::Empty);
        assert!(slot.scene().is_none());
        // Updating an empty slot is a no-op.
        slot.update(&mut events, DT);
        assert_eq!(slot.status(), SlotStatus::Empty);
    }

    #[test]
    fn test_failed_construction_leaves_slot_empty() {
        let mut events = events();
        let module: SceneModule = Box::new(|_| Err(SceneSpec::from_preset_key("saturnV2").unwrap_err()));
        let mut slot = SceneSlot::ready("career", module);
        assert_eq!(slot.poll(&mut events), SlotStatus::Empty);
        assert_eq!(events.scroll_listener_count(), 0);
    }

    #[test]
    fn test_unmount_cancels_pending_load() {
        let mut events = events();
        let slot = SceneSlot::new("about", delayed(5, Ok(planet_module(SceneSpec::about(), None, 1))));
        slot.unmount(&mut events);
        assert_eq!(events.scroll_listener_count(), 0);
    }

    #[test]
    fn test_unmount_detaches_mounted_scene() {
        let mut events = events();
        let element: Rc<dyn SectionElement> = Rc::new(PageSection::new("about", 900.0, 1200.0));
        let mut slot = SceneSlot::ready("about", planet_module(SceneSpec::about(), Some(element), 4));
        slot.update(&mut events, DT);
        assert_eq!(slot.status(), SlotStatus::Mounted);
        assert_eq!(events.scroll_listener_count(), 1);
        slot.unmount(&mut events);
        assert_eq!(events.scroll_listener_count(), 0);
    }

    #[test]
    fn test_avatar_module_mounts() {
        let mut events = events();
        let mut slot = SceneSlot::ready("avatar", avatar_module(3));
        slot.update(&mut events, DT);
        let scene = slot.scene().unwrap();
        assert_eq!(scene.name(), "avatar");
        assert!(scene.post_processing().is_some());
        assert_eq!(events.pointer_listener_count(), 1);
    }

    #[test]
    fn test_factory_future_blocks_to_module() {
        let mut events = events();
        let module = pollster::block_on(delayed(3, Ok(planet_module(SceneSpec::what_i_do(), None, 2))))
            .unwrap();
        let scene = module(&mut events).unwrap();
        assert_eq!(scene.name(), "what-i-do");
        scene.unmount(&mut events);
        assert_eq!(events.scroll_listener_count(), 0);
    }
}
