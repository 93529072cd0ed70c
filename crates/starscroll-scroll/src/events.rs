//! Viewport event host.
//!
//! [`ViewportEvents`] stands in for the browser window: it owns the current
//! [`Viewport`] and dispatches scroll and pointer-move events to registered
//! listeners. Listeners are passive; they observe events and never cancel
//! them.

use glam::Vec2;
use tracing::{debug, trace};

use crate::viewport::Viewport;

/// Handle returned when registering a listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A pointer-move event in client (viewport) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
}

impl PointerEvent {
    /// Map to `[-1, 1]` on both axes with +Y up.
    pub fn normalized(&self, viewport: &Viewport) -> Vec2 {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            self.client_x / viewport.width * 2.0 - 1.0,
            -(self.client_y / viewport.height * 2.0 - 1.0),
        )
    }
}

type ScrollListener = Box<dyn FnMut(&Viewport)>;
type PointerListener = Box<dyn FnMut(PointerEvent, &Viewport)>;

/// Owns viewport state and listener registries.
pub struct ViewportEvents {
    viewport: Viewport,
    scroll_listeners: Vec<(ListenerId, ScrollListener)>,
    pointer_listeners: Vec<(ListenerId, PointerListener)>,
    next_id: u64,
}

impl ViewportEvents {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll_listeners: Vec::new(),
            pointer_listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn allocate_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a scroll listener. It is not invoked until the next scroll.
    pub fn add_scroll_listener(&mut self, listener: impl FnMut(&Viewport) + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.scroll_listeners.push((id, Box::new(listener)));
        debug!("Added scroll listener {:?} ({} total)", id, self.scroll_listeners.len());
        id
    }

    /// Register a pointer-move listener.
    pub fn add_pointer_listener(
        &mut self,
        listener: impl FnMut(PointerEvent, &Viewport) + 'static,
    ) -> ListenerId {
        let id = self.allocate_id();
        self.pointer_listeners.push((id, Box::new(listener)));
        debug!("Added pointer listener {:?}", id);
        id
    }

    /// Remove a listener of either kind. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.scroll_listeners.len() + self.pointer_listeners.len();
        self.scroll_listeners.retain(|(listener_id, _)| *listener_id != id);
        self.pointer_listeners.retain(|(listener_id, _)| *listener_id != id);
        let removed = before != self.scroll_listeners.len() + self.pointer_listeners.len();
        if removed {
            debug!("Removed listener {:?}", id);
        }
        removed
    }

    pub fn scroll_listener_count(&self) -> usize {
        self.scroll_listeners.len()
    }

    pub fn pointer_listener_count(&self) -> usize {
        self.pointer_listeners.len()
    }

    /// Scroll to an absolute offset and notify scroll listeners.
    ///
    /// Negative offsets are kept as-is; overscroll bounce is the progress
    /// formulas' problem, not the host's.
    pub fn scroll_to(&mut self, scroll_y: f32) {
        self.viewport.scroll_y = scroll_y;
        trace!("scroll_y={scroll_y}");
        let viewport = self.viewport;
        for (_, listener) in &mut self.scroll_listeners {
            listener(&viewport);
        }
    }

    /// Scroll by a relative amount.
    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.viewport.scroll_y + delta);
    }

    /// Change the viewport size. Scroll listeners are not notified, matching
    /// browsers where a resize alone fires no scroll event.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
        debug!("Viewport resized to {width}x{height}");
    }

    /// Dispatch a pointer move to pointer listeners.
    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        let event = PointerEvent { client_x, client_y };
        let viewport = self.viewport;
        for (_, listener) in &mut self.pointer_listeners {
            listener(event, &viewport);
        }
    }
}

impl std::fmt::Debug for ViewportEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportEvents")
            .field("viewport", &self.viewport)
            .field("scroll_listeners", &self.scroll_listeners.len())
            .field("pointer_listeners", &self.pointer_listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_scroll_dispatch_and_removal() {
        let mut events = ViewportEvents::new(Viewport::new(1000.0, 800.0));
        let seen = Rc::new(Cell::new(0.0));
        let sink = seen.clone();
        let id = events.add_scroll_listener(move |vp| sink.set(vp.scroll_y));

        events.scroll_to(320.0);
        assert_eq!(seen.get(), 320.0);
        events.scroll_by(80.0);
        assert_eq!(seen.get(), 400.0);

        assert!(events.remove_listener(id));
        assert!(!events.remove_listener(id), "second removal is a no-op");
        events.scroll_to(10.0);
        assert_eq!(seen.get(), 400.0, "removed listener must not fire");
        assert_eq!(events.scroll_listener_count(), 0);
    }

    #[test]
    fn test_resize_does_not_fire_scroll() {
        let mut events = ViewportEvents::new(Viewport::new(1000.0, 800.0));
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        events.add_scroll_listener(move |_| counter.set(counter.get() + 1));
        events.resize(500.0, 500.0);
        assert_eq!(calls.get(), 0);
        assert_eq!(events.viewport().width, 500.0);
    }

    #[test]
    fn test_pointer_normalization() {
        let viewport = Viewport::new(1000.0, 500.0);
        let center = PointerEvent { client_x: 500.0, client_y: 250.0 }.normalized(&viewport);
        assert_eq!(center, Vec2::ZERO);

        let top_left = PointerEvent { client_x: 0.0, client_y: 0.0 }.normalized(&viewport);
        assert_eq!(top_left, Vec2::new(-1.0, 1.0), "screen top maps to +1");

        let degenerate = PointerEvent { client_x: 3.0, client_y: 3.0 }
            .normalized(&Viewport::new(0.0, 0.0));
        assert_eq!(degenerate, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_dispatch() {
        let mut events = ViewportEvents::new(Viewport::new(200.0, 200.0));
        let last = Rc::new(Cell::new(Vec2::ZERO));
        let sink = last.clone();
        events.add_pointer_listener(move |event, vp| sink.set(event.normalized(vp)));
        events.pointer_move(200.0, 200.0);
        assert_eq!(last.get(), Vec2::new(1.0, -1.0));
        assert_eq!(events.pointer_listener_count(), 1);
    }
}
