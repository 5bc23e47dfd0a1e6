//! Structured logging for Lumen applications.
//!
//! Installs a `tracing` subscriber whose filter comes from `RUST_LOG`, or
//! else from the resolved configuration's `log.level`. When `log.file` names
//! a path, a JSON file layer is added next to the console output.

use std::path::Path;

use lumen_config::ConfigStore;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor `log.level` is set.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the global tracing subscriber.
///
/// Sets up:
/// - Console output with uptime timestamps, targets and levels
/// - Environment-based filtering (`RUST_LOG` wins over configuration)
/// - A JSON file layer when `log.file` is set and the file can be created
///
/// Call once, after the configuration has been resolved.
///
/// # Examples
///
/// ```no_run
/// use lumen_config::ConfigStore;
/// use lumen_log::init_logging;
///
/// let mut store = ConfigStore::new();
/// store.set("log.level", "debug").unwrap();
/// init_logging(Some(&store));
/// ```
pub fn init_logging(config: Option<&ConfigStore>) {
    let filter_str = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_path) = config.and_then(|c| c.get_str("log.file"))
        && let Some(log_file) = create_log_file(Path::new(log_path))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// The filter directive derived from configuration, ignoring `RUST_LOG`.
#[must_use]
pub fn filter_directive(config: Option<&ConfigStore>) -> String {
    config
        .and_then(|c| c.get_str("log.level"))
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

fn create_log_file(path: &Path) -> Option<std::fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).ok()?;
    }
    std::fs::File::create(path).ok()
}
