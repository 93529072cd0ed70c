//! Headless entry point: load config, set up logging, run the scroll timeline.

use clap::Parser;
use starscroll_app::run_timeline;
use starscroll_config::{CliArgs, Config, ConfigError, default_config_dir};
use tracing::info;

fn run() -> Result<(), ConfigError> {
    let args = CliArgs::parse();
    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(&args);

    starscroll_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );
    info!("Config loaded from {}", config_dir.display());

    let report = run_timeline(&config);
    info!(
        "Timeline finished: {} frames, {:.2}s simulated, scroll {:.0}, scenes: {}",
        report.frames,
        report.elapsed,
        report.final_scroll,
        report.mounted.join(", ")
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("starscroll: {e}");
        std::process::exit(1);
    }
}
