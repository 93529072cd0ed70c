//! Viewport state and section geometry.

use std::cell::Cell;

/// The scrolling viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Vertical scroll offset of the document.
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
        }
    }
}

/// A bounding rectangle measured relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub bottom: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_top_height(top: f32, height: f32) -> Self {
        Self {
            top,
            bottom: top + height,
            height,
        }
    }
}

/// Anything that can report its on-screen extent.
///
/// Only geometry is needed; the tracker never looks at content.
pub trait SectionElement {
    /// Bounding rectangle for the current viewport, or `None` when the element
    /// is not mounted.
    fn bounding_rect(&self, viewport: &Viewport) -> Option<Rect>;
}

/// A section laid out at a fixed document offset.
#[derive(Debug)]
pub struct PageSection {
    name: String,
    document_top: f32,
    height: f32,
    mounted: Cell<bool>,
}

impl PageSection {
    pub fn new(name: impl Into<String>, document_top: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            document_top,
            height,
            mounted: Cell::new(true),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offset of the section's top edge from the top of the document.
    pub fn document_top(&self) -> f32 {
        self.document_top
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_mounted(&self, mounted: bool) {
        self.mounted.set(mounted);
    }
}

impl SectionElement for PageSection {
    fn bounding_rect(&self, viewport: &Viewport) -> Option<Rect> {
        self.mounted.get().then(|| {
            Rect::from_top_height(self.document_top - viewport.scroll_y, self.height)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_tracks_scroll() {
        let section = PageSection::new("about", 900.0, 1200.0);
        let mut viewport = Viewport::new(1440.0, 900.0);

        let rect = section.bounding_rect(&viewport).unwrap();
        assert_eq!(rect.top, 900.0);
        assert_eq!(rect.bottom, 2100.0);

        viewport.scroll_y = 1000.0;
        let rect = section.bounding_rect(&viewport).unwrap();
        assert_eq!(rect.top, -100.0);
        assert_eq!(rect.height, 1200.0);
    }

    #[test]
    fn test_unmounted_section_has_no_rect() {
        let section = PageSection::new("career", 0.0, 500.0);
        section.set_mounted(false);
        assert!(section.bounding_rect(&Viewport::new(800.0, 600.0)).is_none());
    }
}
