//! Progress formulas and the shared progress cell.

use std::cell::Cell;
use std::rc::Rc;

use crate::viewport::Rect;

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Progress of a section through the viewport.
///
/// 0 while the section's bottom edge is at or below
/// `viewport_height + rect.height`, rising to 1 once the bottom edge reaches
/// the top of the viewport.
pub fn section_progress(rect: Rect, viewport_height: f32) -> f32 {
    clamp_unit(1.0 - rect.bottom / (viewport_height + rect.height))
}

/// Progress of the page scroll over the first viewport height.
pub fn page_progress(scroll_y: f32, viewport_height: f32) -> f32 {
    if viewport_height <= 0.0 {
        return if scroll_y > 0.0 { 1.0 } else { 0.0 };
    }
    clamp_unit(scroll_y / viewport_height)
}

/// Single-threaded shared progress scalar.
///
/// Written by one scroll handler, read by every renderer of the owning scene.
/// Values are always in `[0, 1]`; clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct ProgressCell(Rc<Cell<f32>>);

impl ProgressCell {
    /// Create a cell at progress 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current progress.
    pub fn get(&self) -> f32 {
        self.0.get()
    }

    /// Store a new progress, clamped to `[0, 1]`. NaN is ignored and the
    /// previous value kept.
    pub fn set(&self, value: f32) {
        if value.is_nan() {
            return;
        }
        self.0.set(value.clamp(0.0, 1.0));
    }

    /// Whether `other` shares storage with this cell.
    pub fn is_shared_with(&self, other: &ProgressCell) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_section_progress_bounds() {
        // Section 800px tall in a 1000px viewport.
        let below = Rect::from_top_height(1000.0, 800.0);
        assert_eq!(section_progress(below, 1000.0), 0.0);

        let gone = Rect::from_top_height(-800.0, 800.0);
        assert_eq!(section_progress(gone, 1000.0), 1.0);

        // Bottom edge at 900 of a 1800 denominator.
        let halfway = Rect::from_top_height(100.0, 800.0);
        assert!((section_progress(halfway, 1000.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_section_progress_always_in_unit_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..10_000 {
            let top = (rng.random::<f32>() * 2.0 - 1.0) * 20_000.0;
            let height = rng.random::<f32>() * 5000.0;
            let viewport_height = rng.random::<f32>() * 3000.0;
            let p = section_progress(Rect::from_top_height(top, height), viewport_height);
            assert!(
                (0.0..=1.0).contains(&p),
                "progress {p} out of range for top={top} height={height} vh={viewport_height}"
            );
        }
    }

    #[test]
    fn test_section_progress_degenerate_geometry() {
        // Zero-height section in a zero-height viewport divides by zero.
        let rect = Rect::from_top_height(0.0, 0.0);
        let p = section_progress(rect, 0.0);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_page_progress() {
        assert_eq!(page_progress(0.0, 900.0), 0.0);
        assert!((page_progress(450.0, 900.0) - 0.5).abs() < 1e-6);
        assert_eq!(page_progress(5000.0, 900.0), 1.0);
        assert_eq!(page_progress(-20.0, 900.0), 0.0, "overscroll bounce clamps");
        assert_eq!(page_progress(10.0, 0.0), 1.0);
    }

    #[test]
    fn test_cell_clamps_and_ignores_nan() {
        let cell = ProgressCell::new();
        cell.set(1.7);
        assert_eq!(cell.get(), 1.0);
        cell.set(-3.0);
        assert_eq!(cell.get(), 0.0);
        cell.set(0.4);
        cell.set(f32::NAN);
        assert_eq!(cell.get(), 0.4);
    }

    #[test]
    fn test_cell_clones_share_storage() {
        let a = ProgressCell::new();
        let b = a.clone();
        a.set(0.25);
        assert_eq!(b.get(), 0.25);
        assert!(a.is_shared_with(&b));
        assert!(!a.is_shared_with(&ProgressCell::new()));
    }
}
