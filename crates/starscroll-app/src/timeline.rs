//! Headless scroll timeline.
//!
//! Scrolls the page from top to bottom at a steady rate, keeps ticking while
//! damped motion settles, and logs what each mounted scene is doing.

use starscroll_config::Config;
use tracing::{debug, info};

use crate::frame::FrameDriver;
use crate::page::Page;

/// Summary of a finished timeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineReport {
    pub frames: u64,
    /// Simulated seconds.
    pub elapsed: f64,
    pub final_scroll: f32,
    /// Sections that had a scene mounted at the end.
    pub mounted: Vec<String>,
}

/// Run the whole timeline described by `config.timeline`.
pub fn run_timeline(config: &Config) -> TimelineReport {
    let timeline = &config.timeline;
    let frame_time = timeline.frame_time();
    let scroll_frames = u64::from(timeline.scroll_frames());
    let settle_frames = u64::from(timeline.settle_frames());

    let mut page = Page::new(config);
    let mut driver = FrameDriver::new();
    let max_scroll = page.max_scroll();
    info!(
        "Timeline: {scroll_frames} scroll frames + {settle_frames} settle frames at {} fps, \
         scrolling {max_scroll:.0}px",
        timeline.fps.max(1)
    );

    for frame in 0..scroll_frames + settle_frames {
        if frame < scroll_frames {
            let t = (frame + 1) as f32 / scroll_frames as f32;
            page.scroll_to(max_scroll * t);
        }
        let dt = driver.advance(frame_time);
        page.update(dt);

        if timeline.report_every > 0 && driver.frame_count() % u64::from(timeline.report_every) == 0 {
            report(&page, driver.elapsed());
        }
    }

    let result = TimelineReport {
        frames: driver.frame_count(),
        elapsed: driver.elapsed(),
        final_scroll: page.viewport().scroll_y,
        mounted: page
            .sections()
            .iter()
            .filter(|section| section.scene().is_some())
            .map(|section| section.name().to_string())
            .collect(),
    };
    page.unmount();
    result
}

fn report(page: &Page, elapsed: f64) {
    let focused = page.focused_section().map_or("-", |section| section.name());
    info!(
        "t={elapsed:.2}s scroll={:.0} focus={focused}",
        page.viewport().scroll_y
    );
    for section in page.sections() {
        let Some(scene) = section.scene() else {
            continue;
        };
        let camera = scene.camera().position;
        debug!(
            "  {} [{}] camera=({:.2}, {:.2}, {:.2}) nodes={}",
            section.name(),
            scene.name(),
            camera.x,
            camera.y,
            camera.z,
            scene.graph().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_config() -> Config {
        let mut config = Config::default();
        config.timeline.duration_seconds = 1.0;
        config.timeline.settle_seconds = 0.5;
        config.timeline.fps = 30;
        config.timeline.report_every = 10;
        config
    }

    #[test]
    fn test_timeline_scrolls_to_bottom() {
        let config = short_config();
        let report = run_timeline(&config);
        assert_eq!(report.frames, 45);
        assert!((report.elapsed - 1.5).abs() < 1e-4, "elapsed {}", report.elapsed);
        let expected = Page::new(&config).max_scroll();
        assert!((report.final_scroll - expected).abs() < 1e-2);
        assert_eq!(report.mounted, ["landing", "about", "what-i-do", "career"]);
    }

    #[test]
    fn test_zero_duration_only_settles() {
        let mut config = short_config();
        config.timeline.duration_seconds = 0.0;
        let report = run_timeline(&config);
        assert_eq!(report.frames, 15);
        assert_eq!(report.final_scroll, 0.0);
    }

    #[test]
    fn test_narrow_timeline_skips_about() {
        let mut config = short_config();
        config.viewport.width = 390;
        config.viewport.height = 844;
        let report = run_timeline(&config);
        assert_eq!(report.mounted, ["landing", "what-i-do", "career"]);
    }
}
