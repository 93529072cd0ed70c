//! Scroll progress tracking.
//!
//! A [`ScrollTracker`] turns a section's on-screen geometry into a normalized
//! progress in `[0, 1]` and writes it into a [`ProgressCell`] that renderers
//! read every frame. Events arrive through a [`ViewportEvents`] host that owns
//! the viewport state and the scroll and pointer listener registries.

mod events;
mod progress;
mod tracker;
mod viewport;

pub use events::{ListenerId, PointerEvent, ViewportEvents};
pub use progress::{ProgressCell, clamp_unit, page_progress, section_progress};
pub use tracker::{ProgressSource, ScrollSubscription, ScrollTracker};
pub use viewport::{PageSection, Rect, SectionElement, Viewport};
