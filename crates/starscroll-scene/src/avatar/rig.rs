//! Pointer-driven avatar animation, independent of the scene graph.
//!
//! Easing constants are tuned as per-frame fractions at 60 Hz and converted
//! with [`ease_factor`], so the avatar moves at the same speed at any frame
//! rate.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use starscroll_particles::Span;

pub const HEAD_ROT_LIMIT: f32 = 0.08;
pub const HEAD_EASE: f32 = 0.03;
pub const EYE_ROT_LIMIT: f32 = 0.25;
pub const EYE_EASE: f32 = 0.06;
/// Vertical eye and head travel relative to horizontal.
const VERTICAL_SCALE: f32 = 0.7;
const HEAD_VERTICAL_SCALE: f32 = 0.6;
pub const FLOAT_SPEED: f32 = 0.8;
pub const FLOAT_AMP: f32 = 0.015;
pub const BASE_HEIGHT: f32 = -0.15;
pub const BLINK_SPEED: f32 = 8.0;
pub const LID_REST_Y: f32 = 0.10;
pub const LID_BLINK_TRAVEL: f32 = 0.16;
pub const BLINK_INTERVAL: Span = Span::new(3.0, 6.0);

/// Convert a per-frame easing fraction tuned at 60 Hz to the fraction for a
/// frame of `dt` seconds.
pub fn ease_factor(per_frame: f32, dt: f32) -> f32 {
    1.0 - (1.0 - per_frame).powf(dt.max(0.0) * 60.0)
}

/// Everything the scene needs to pose the avatar for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarPose {
    pub group_position: Vec3,
    pub group_rotation: Vec3,
    pub head_rotation: Vec3,
    /// Shared by both iris pivots.
    pub eye_rotation: Vec3,
    /// Height of both upper eyelids.
    pub lid_y: f32,
}

/// Blink timing: wait a random interval, then close and reopen the lids.
#[derive(Debug, Clone)]
pub struct Blink {
    rng: ChaCha8Rng,
    timer: f32,
    phase: Option<f32>,
}

impl Blink {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let timer = BLINK_INTERVAL.sample(&mut rng);
        Self {
            rng,
            timer,
            phase: None,
        }
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn is_blinking(&self) -> bool {
        self.phase.is_some()
    }

    /// Advance and return the eyelid height.
    pub fn update(&mut self, dt: f32) -> f32 {
        self.timer -= dt;
        if self.timer <= 0.0 && self.phase.is_none() {
            self.phase = Some(0.0);
        }
        let Some(phase) = self.phase.as_mut() else {
            return LID_REST_Y;
        };

        *phase += dt * BLINK_SPEED;
        if *phase >= 1.0 {
            self.phase = None;
            self.timer = BLINK_INTERVAL.sample(&mut self.rng);
            return LID_REST_Y;
        }
        let amount = (*phase * PI).sin();
        LID_REST_Y - amount * LID_BLINK_TRAVEL
    }
}

/// Eased head and eye state plus the blink cycle.
#[derive(Debug, Clone)]
pub struct AvatarMotion {
    head: Vec2,
    eyes: Vec2,
    elapsed: f32,
    blink: Blink,
}

impl AvatarMotion {
    pub fn new(seed: u64) -> Self {
        Self {
            head: Vec2::ZERO,
            eyes: Vec2::ZERO,
            elapsed: 0.0,
            blink: Blink::new(seed),
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn blink(&self) -> &Blink {
        &self.blink
    }

    /// Head rotation (x, y) before micro motion.
    pub fn head(&self) -> Vec2 {
        self.head
    }

    /// Eye rotation (x, y).
    pub fn eyes(&self) -> Vec2 {
        self.eyes
    }

    /// Step toward `pointer`, given in `[-1, 1]` with +Y up.
    pub fn update(&mut self, pointer: Vec2, dt: f32) -> AvatarPose {
        self.elapsed += dt;
        let t = self.elapsed;

        let head_target = Vec2::new(
            -pointer.y * HEAD_ROT_LIMIT * HEAD_VERTICAL_SCALE,
            pointer.x * HEAD_ROT_LIMIT,
        );
        self.head = self.head.lerp(head_target, ease_factor(HEAD_EASE, dt));

        let vertical_limit = EYE_ROT_LIMIT * VERTICAL_SCALE;
        let eye_target = Vec2::new(
            (-pointer.y * vertical_limit).clamp(-vertical_limit, vertical_limit),
            (pointer.x * EYE_ROT_LIMIT).clamp(-EYE_ROT_LIMIT, EYE_ROT_LIMIT),
        );
        self.eyes = self.eyes.lerp(eye_target, ease_factor(EYE_EASE, dt));

        let micro_x = (t * 0.7).sin() * 0.003 + (t * 1.3).sin() * 0.002;
        let micro_y = (t * 0.5).cos() * 0.002 + (t * 1.1).cos() * 0.001;

        AvatarPose {
            group_position: Vec3::new(0.0, BASE_HEIGHT + (t * FLOAT_SPEED).sin() * FLOAT_AMP, 0.0),
            group_rotation: Vec3::new(0.0, 0.0, (t * 0.4).sin() * 0.003),
            head_rotation: Vec3::new(
                self.head.x + micro_x,
                self.head.y + micro_y,
                (t * 0.3).sin() * 0.003,
            ),
            eye_rotation: Vec3::new(self.eyes.x, self.eyes.y, 0.0),
            lid_y: self.blink.update(dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_ease_factor_matches_per_frame_at_60hz() {
        assert!((ease_factor(0.03, DT) - 0.03).abs() < 1e-6);
        // Two half-length frames cover the same ground as one full frame.
        let half = ease_factor(0.03, DT / 2.0);
        assert!((1.0 - (1.0 - half) * (1.0 - half) - 0.03).abs() < 1e-6);
        assert_eq!(ease_factor(0.03, 0.0), 0.0);
    }

    #[test]
    fn test_head_and_eyes_settle_on_pointer() {
        let mut motion = AvatarMotion::new(1);
        for _ in 0..2000 {
            motion.update(Vec2::new(1.0, 1.0), DT);
        }
        let head = motion.head();
        assert!((head.y - 0.08).abs() < 1e-4, "head yaw {}", head.y);
        assert!((head.x + 0.048).abs() < 1e-4, "head pitch {}", head.x);
        let eyes = motion.eyes();
        assert!((eyes.y - 0.25).abs() < 1e-4);
        assert!((eyes.x + 0.175).abs() < 1e-4);
    }

    #[test]
    fn test_eye_target_is_clamped() {
        let mut motion = AvatarMotion::new(1);
        for _ in 0..2000 {
            motion.update(Vec2::new(-5.0, -5.0), DT);
        }
        assert!((motion.eyes().y + 0.25).abs() < 1e-4);
        assert!((motion.eyes().x - 0.175).abs() < 1e-4);
    }

    #[test]
    fn test_easing_is_frame_rate_independent() {
        let mut fast = AvatarMotion::new(1);
        let mut slow = AvatarMotion::new(1);
        for _ in 0..120 {
            fast.update(Vec2::X, 1.0 / 120.0);
        }
        for _ in 0..30 {
            slow.update(Vec2::X, 1.0 / 30.0);
        }
        assert!((fast.head().y - slow.head().y).abs() < 1e-4);
        assert!((fast.eyes().y - slow.eyes().y).abs() < 1e-4);
    }

    #[test]
    fn test_float_stays_near_base_height() {
        let mut motion = AvatarMotion::new(2);
        for _ in 0..600 {
            let pose = motion.update(Vec2::ZERO, DT);
            assert!((pose.group_position.y - BASE_HEIGHT).abs() <= FLOAT_AMP + 1e-6);
            assert!(pose.group_rotation.z.abs() <= 0.003);
        }
    }

    #[test]
    fn test_blink_cycle() {
        let mut blink = Blink::new(9);
        let first = blink.timer();
        assert!(BLINK_INTERVAL.contains(first), "first interval {first}");

        let mut frames = 0;
        let mut lowest = loop {
            let lid = blink.update(DT);
            frames += 1;
            if blink.is_blinking() {
                break lid;
            }
            assert_eq!(lid, LID_REST_Y);
            assert!(frames < 400, "blink never started");
        };
        let mut blink_frames = 1;
        while blink.is_blinking() {
            lowest = lowest.min(blink.update(DT));
            blink_frames += 1;
        }
        // 1 / BLINK_SPEED seconds, the first step already taken on start.
        assert!((7..=8).contains(&blink_frames), "blink took {blink_frames} frames");
        assert!(lowest < LID_REST_Y - LID_BLINK_TRAVEL * 0.9, "lid only reached {lowest}");
        assert!(BLINK_INTERVAL.contains(blink.timer()));
    }
}
