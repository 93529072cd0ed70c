//! Command-line argument parsing for the headless timeline.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// starscroll command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "starscroll", about = "Scroll-driven planet scenes, simulated headless")]
pub struct CliArgs {
    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Base seed for particle fields.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seconds spent scrolling the page top to bottom.
    #[arg(long)]
    pub duration: Option<f32>,

    /// Simulated frames per second.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Planet preset for the career section (saturn, neptune, venus, purple, violet, mercury).
    #[arg(long)]
    pub preset: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.viewport.width = w;
        }
        if let Some(h) = args.height {
            self.viewport.height = h;
        }
        if let Some(seed) = args.seed {
            self.scene.seed = seed;
        }
        if let Some(duration) = args.duration {
            self.timeline.duration_seconds = duration;
        }
        if let Some(fps) = args.fps {
            self.timeline.fps = fps;
        }
        if let Some(ref preset) = args.preset {
            self.content.career_preset = preset.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(800),
            preset: Some("mercury".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.viewport.width, 800);
        assert_eq!(config.content.career_preset, "mercury");
        // Non-overridden fields retain defaults
        assert_eq!(config.viewport.height, 900);
        assert_eq!(config.timeline.fps, 60);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::try_parse_from(["starscroll", "--fps", "30", "--seed", "7"]).unwrap();
        assert_eq!(args.fps, Some(30));
        assert_eq!(args.seed, Some(7));
        assert!(args.preset.is_none());
    }
}
