//! The page host: a frame driver, the section layout that mounts each scene,
//! and a headless scroll timeline that exercises the whole page.

pub mod frame;
pub mod page;
pub mod timeline;

pub use frame::{FrameDriver, MAX_FRAME_TIME};
pub use page::{ABOUT_MIN_WIDTH, Page, SECTIONS, SceneKind, Section, SectionLayout};
pub use timeline::{TimelineReport, run_timeline};
