//! Variable-rate frame driver.
//!
//! Every scene animates with an explicit `dt`, so there is no fixed-step
//! accumulator: each tick yields the measured frame time, clamped so a stalled
//! tab does not fling damped values across the screen on its next frame.

use std::time::Instant;
use tracing::warn;

/// Longest frame time handed to scenes, in seconds.
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Measures frame times and counts frames.
#[derive(Debug)]
pub struct FrameDriver {
    previous_time: Instant,
    elapsed: f64,
    frame_count: u64,
}

impl FrameDriver {
    /// Creates a driver whose first tick measures from now.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Measure the wall-clock time since the previous tick and advance by it.
    pub fn tick(&mut self) -> f32 {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f32();
        self.previous_time = current_time;
        self.advance(frame_time)
    }

    /// Advance by an explicit frame time and return the `dt` to hand scenes.
    ///
    /// Negative or NaN times count as zero.
    pub fn advance(&mut self, frame_time: f32) -> f32 {
        let mut dt = if frame_time.is_nan() { 0.0 } else { frame_time.max(0.0) };
        if dt > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                dt * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            dt = MAX_FRAME_TIME;
        }

        self.elapsed += f64::from(dt);
        self.frame_count += 1;
        dt
    }

    /// Returns the total number of frames driven.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of every `dt` handed out, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}
