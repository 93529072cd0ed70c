//! Section scenes for the scrolling page.
//!
//! Each section that shows 3D content owns one scene: a private
//! [`SceneGraph`](starscroll_graph::SceneGraph), a camera and the renderers
//! that animate it. Planet scenes ([`PlanetScene`]) are driven by scroll
//! progress, the avatar ([`AvatarScene`]) by the pointer. Scenes are mounted
//! lazily through [`SceneSlot`] and driven through the [`SectionScene`] trait.

pub mod avatar;
pub mod camera_rig;
pub mod composer;
pub mod error;
pub mod lights;
pub mod post;
pub mod section;
pub mod slot;

pub use avatar::AvatarScene;
pub use camera_rig::{CAMERA_DAMPING, CameraRig, CameraRigConfig};
pub use composer::{BACKGROUND, PlanetScene, ProgressMode, SceneSpec};
pub use error::SceneError;
pub use lights::{DynamicIntensity, LightRig, LightSpec};
pub use post::{Bloom, PostProcessing, Vignette};
pub use section::SectionScene;
pub use slot::{SceneFuture, SceneModule, SceneSlot, SlotStatus, avatar_module, planet_module};
