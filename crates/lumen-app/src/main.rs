//! The binary entry point: resolve configuration for this host and print the
//! final settings tree as JSON.

use clap::Parser;
use lumen_app::bootstrap::bootstrap;
use lumen_config::{CliArgs, ConfigError, EnvDetector};
use tracing::{info, warn};

fn main() {
    let args = CliArgs::parse();

    if let Err(e) = run(&args) {
        eprintln!("lumen: {e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), ConfigError> {
    let boot = bootstrap(args, EnvDetector::default())?;

    lumen_log::init_logging(Some(&boot.store));

    // Resolution ran before the subscriber existed; report its outcome now.
    match &boot.config_file {
        Some(path) => info!("Loaded raw config from {}", path.display()),
        None => info!("No config file found; using built-in defaults"),
    }
    if boot.resolution.missed_overlay() {
        warn!(
            "No overlay for platform `{}`; available: {}",
            boot.resolution.platform,
            boot.resolution.overlays.join(", ")
        );
    }

    info!(
        platform = %boot.resolution.platform,
        overlay = boot.resolution.overlay_applied,
        "Configuration resolved"
    );
    info!(
        "Viewport: {}x{}",
        boot.store.get_u64("viewport.width").unwrap_or_default(),
        boot.store.get_u64("viewport.height").unwrap_or_default(),
    );

    let rendered =
        serde_json::to_string_pretty(boot.store.tree()).map_err(ConfigError::JsonError)?;
    println!("{rendered}");
    Ok(())
}
