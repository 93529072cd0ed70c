//! The interface a page section uses to drive whatever scene it mounted.

use glam::Vec3;
use starscroll_graph::{Camera, SceneGraph};
use starscroll_scroll::ViewportEvents;

use crate::post::PostProcessing;

/// A mounted scene owned by one page section.
///
/// The frame driver calls [`update`](Self::update) once per tick and hands
/// [`graph`](Self::graph) and [`camera`](Self::camera) to the rasterizer.
pub trait SectionScene {
    fn name(&self) -> &str;

    /// Advance one frame by `dt` seconds.
    fn update(&mut self, dt: f32);

    fn graph(&self) -> &SceneGraph;

    fn camera(&self) -> &Camera;

    /// Clear color behind the scene.
    fn background(&self) -> Vec3;

    fn post_processing(&self) -> Option<PostProcessing> {
        None
    }

    /// Keep the camera's aspect ratio in step with the canvas.
    fn resize(&mut self, width: f32, height: f32);

    /// Remove every listener the scene registered and drop it.
    fn unmount(self: Box<Self>, events: &mut ViewportEvents);
}
