//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulated browser viewport.
    pub viewport: ViewportConfig,
    /// Scene construction settings.
    pub scene: SceneConfig,
    /// Headless scroll timeline settings.
    pub timeline: TimelineConfig,
    /// Static page content that selects scenes.
    pub content: ContentConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Viewport width in CSS pixels.
    pub width: u32,
    /// Viewport height in CSS pixels.
    pub height: u32,
}

/// Scene construction configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Base seed for starfields and shooting stars. Each scene derives its own.
    pub seed: u64,
    /// Multiplier applied to every starfield's point count.
    pub star_density: f32,
    /// Spawn shooting stars in the scenes that have them.
    pub shooting_stars: bool,
}

/// Headless timeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimelineConfig {
    /// Seconds spent scrolling from the top of the page to the bottom.
    pub duration_seconds: f32,
    /// Simulated frames per second.
    pub fps: u32,
    /// Seconds to keep ticking after the last scroll so motion settles.
    pub settle_seconds: f32,
    /// Frames a lazy scene stays pending before its module resolves.
    pub load_frames: u32,
    /// Log a state report every N frames (0 disables periodic reports).
    pub report_every: u32,
}

/// Static content configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentConfig {
    /// Planet preset key shown behind the career section.
    pub career_preset: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1440,
            height: 900,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed_5ca1,
            star_density: 1.0,
            shooting_stars: true,
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 12.0,
            fps: 60,
            settle_seconds: 2.0,
            load_frames: 3,
            report_every: 60,
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            career_preset: "saturn".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Default per-user config directory, `<config_dir>/starscroll`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("starscroll"))
        .ok_or(ConfigError::NoConfigDir)
}

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

impl TimelineConfig {
    fn frames_for(&self, seconds: f32) -> u32 {
        (seconds.max(0.0) * self.fps.max(1) as f32).round() as u32
    }

    /// Frames spent scrolling. An fps of 0 is treated as 1.
    pub fn scroll_frames(&self) -> u32 {
        self.frames_for(self.duration_seconds)
    }

    /// Frames ticked after the last scroll.
    pub fn settle_frames(&self) -> u32 {
        self.frames_for(self.settle_seconds)
    }

    /// Seconds per simulated frame.
    pub fn frame_time(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

impl Config {
    /// Load `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Self::default();
            config.save(config_dir)?;
            log::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }

        let config = Self::read(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write `config.ron` into `config_dir`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .struct_names(false)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::create_dir_all(config_dir).map_err(write_err)?;
        std::fs::write(&path, text).map_err(write_err)
    }

    /// Re-read the file. `Ok(None)` means nothing changed.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = Self::read(&config_dir.join(CONFIG_FILE))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config changed on disk");
        Ok(Some(fresh))
    }
}
