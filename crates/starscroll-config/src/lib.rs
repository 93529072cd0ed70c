//! Configuration for the starscroll scene layer.
//!
//! Settings persist to disk as RON, accept CLI overrides via clap, and support
//! hot-reload detection. Every section uses `#[serde(default)]` so older or
//! partial files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE, Config, ContentConfig, DebugConfig, SceneConfig, TimelineConfig, ViewportConfig,
    default_config_dir,
};
pub use error::ConfigError;
