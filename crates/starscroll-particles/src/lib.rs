//! Decorative particle systems: a scroll-rotated starfield shell and a
//! single-object shooting star.
//!
//! Both are seeded with [`ChaCha8Rng`](rand_chacha::ChaCha8Rng) so a seed
//! reproduces the same sky.

pub mod shooting_star;
pub mod span;
pub mod starfield;

pub use shooting_star::{PARKED_POSITION, ShootingStar, ShootingStarConfig, StreakState, ShootingStarNode};
pub use span::Span;
pub use starfield::{Starfield, StarfieldConfig, StarfieldGenerator};
