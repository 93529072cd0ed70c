//! Section and page scroll trackers.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::events::{ListenerId, ViewportEvents};
use crate::progress::{ProgressCell, page_progress, section_progress};
use crate::viewport::{SectionElement, Viewport};

/// Where a tracker measures progress from.
#[derive(Clone)]
pub enum ProgressSource {
    /// Progress of a section's extent through the viewport. `None` when the
    /// consumer has no element reference yet.
    Section(Option<Rc<dyn SectionElement>>),
    /// Page scroll over the first viewport height (hero scene).
    Page,
}

impl std::fmt::Debug for ProgressSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressSource::Section(Some(_)) => f.write_str("Section(bound)"),
            ProgressSource::Section(None) => f.write_str("Section(unbound)"),
            ProgressSource::Page => f.write_str("Page"),
        }
    }
}

/// Writes scroll progress for one scene into its [`ProgressCell`].
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    source: ProgressSource,
    progress: ProgressCell,
}

impl ScrollTracker {
    pub fn new(source: ProgressSource, progress: ProgressCell) -> Self {
        Self { source, progress }
    }

    pub fn progress(&self) -> &ProgressCell {
        &self.progress
    }

    pub fn source(&self) -> &ProgressSource {
        &self.source
    }

    /// Recompute progress for the given viewport.
    ///
    /// Returns the stored progress, or `None` when the section reference is
    /// missing or unmounted, in which case the cell keeps its last value.
    pub fn handle_scroll(&self, viewport: &Viewport) -> Option<f32> {
        let progress = match &self.source {
            ProgressSource::Page => page_progress(viewport.scroll_y, viewport.height),
            ProgressSource::Section(element) => {
                let rect = element.as_ref()?.bounding_rect(viewport)?;
                section_progress(rect, viewport.height)
            }
        };
        self.progress.set(progress);
        trace!("progress={progress:.4} source={:?}", self.source);
        Some(progress)
    }

    /// Register a passive scroll listener and evaluate once immediately so the
    /// first frame never sees stale progress.
    pub fn attach(&self, events: &mut ViewportEvents) -> ScrollSubscription {
        let tracker = self.clone();
        let id = events.add_scroll_listener(move |viewport| {
            tracker.handle_scroll(viewport);
        });
        self.handle_scroll(events.viewport());
        debug!("Scroll tracker attached ({:?}) at progress {:.3}", self.source, self.progress.get());
        ScrollSubscription { id }
    }
}

/// Live registration of a tracker's scroll listener.
///
/// Dropping the subscription does not remove the listener; call
/// [`detach`](Self::detach) on teardown.
#[derive(Debug)]
#[must_use = "a subscription must be detached on unmount"]
pub struct ScrollSubscription {
    id: ListenerId,
}

impl ScrollSubscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener from the host.
    pub fn detach(self, events: &mut ViewportEvents) {
        events.remove_listener(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::PageSection;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn section(top: f32, height: f32) -> Rc<PageSection> {
        Rc::new(PageSection::new("test", top, height))
    }

    #[test]
    fn test_attach_evaluates_immediately() {
        let mut events = ViewportEvents::new(Viewport::new(1440.0, 1000.0));
        events.scroll_to(1000.0);
        let progress = ProgressCell::new();
        let tracker = ScrollTracker::new(
            ProgressSource::Section(Some(section(1100.0, 800.0))),
            progress.clone(),
        );

        let subscription = tracker.attach(&mut events);
        // rect top = 100, bottom = 900, 1 - 900 / 1800
        assert!((progress.get() - 0.5).abs() < 1e-6, "got {}", progress.get());
        assert_eq!(events.scroll_listener_count(), 1);

        subscription.detach(&mut events);
        assert_eq!(events.scroll_listener_count(), 0);
    }

    #[test]
    fn test_progress_follows_scroll_until_detached() {
        let mut events = ViewportEvents::new(Viewport::new(1440.0, 1000.0));
        let progress = ProgressCell::new();
        let tracker = ScrollTracker::new(
            ProgressSource::Section(Some(section(1000.0, 1000.0))),
            progress.clone(),
        );
        let subscription = tracker.attach(&mut events);
        assert_eq!(progress.get(), 0.0);

        events.scroll_to(2000.0);
        assert_eq!(progress.get(), 1.0);

        events.scroll_to(1000.0);
        assert!((progress.get() - 0.5).abs() < 1e-6);

        subscription.detach(&mut events);
        events.scroll_to(0.0);
        assert!((progress.get() - 0.5).abs() < 1e-6, "detached tracker must not write");
    }

    #[test]
    fn test_missing_reference_is_noop() {
        let mut events = ViewportEvents::new(Viewport::new(1440.0, 900.0));
        let progress = ProgressCell::new();
        progress.set(0.3);
        let tracker = ScrollTracker::new(ProgressSource::Section(None), progress.clone());
        let subscription = tracker.attach(&mut events);

        events.scroll_to(5000.0);
        assert_eq!(progress.get(), 0.3);
        assert_eq!(tracker.handle_scroll(events.viewport()), None);
        subscription.detach(&mut events);
    }

    #[test]
    fn test_unmounted_section_keeps_last_value() {
        let mut events = ViewportEvents::new(Viewport::new(1440.0, 1000.0));
        let element = section(500.0, 1000.0);
        let progress = ProgressCell::new();
        let tracker = ScrollTracker::new(ProgressSource::Section(Some(element.clone())), progress.clone());
        let _subscription = tracker.attach(&mut events);
        events.scroll_to(1000.0);
        let before = progress.get();

        element.set_mounted(false);
        events.scroll_to(3000.0);
        assert_eq!(progress.get(), before);
    }

    #[test]
    fn test_page_source() {
        let mut events = ViewportEvents::new(Viewport::new(1440.0, 900.0));
        let progress = ProgressCell::new();
        let _subscription = ScrollTracker::new(ProgressSource::Page, progress.clone()).attach(&mut events);

        events.scroll_to(300.0);
        assert!((progress.get() - 300.0 / 900.0).abs() < 1e-6);
        events.scroll_to(4000.0);
        assert_eq!(progress.get(), 1.0);
    }

    #[test]
    fn test_handler_idempotent_for_unchanged_geometry() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..500 {
            let mut viewport = Viewport::new(1280.0, 200.0 + rng.random::<f32>() * 1200.0);
            viewport.scroll_y = rng.random::<f32>() * 8000.0;
            let progress = ProgressCell::new();
            let tracker = ScrollTracker::new(
                ProgressSource::Section(Some(section(
                    rng.random::<f32>() * 8000.0,
                    rng.random::<f32>() * 2000.0,
                ))),
                progress.clone(),
            );
            let first = tracker.handle_scroll(&viewport).unwrap();
            let second = tracker.handle_scroll(&viewport).unwrap();
            assert_eq!(first.to_bits(), second.to_bits());
            assert_eq!(progress.get(), second);
        }
    }
}
