//! Application startup: raw config → resolved settings tree.

use std::path::PathBuf;

use lumen_config::{
    CliArgs, ConfigError, ConfigStore, Map, PlatformDetector, PlatformResolver, Resolution,
    Value, builtin_defaults, default_config_path, load_raw,
};

/// The resolved settings and how the platform was chosen.
#[derive(Debug)]
pub struct Bootstrap {
    pub store: ConfigStore,
    pub resolution: Resolution,
    /// The raw config file that was read, if any.
    pub config_file: Option<PathBuf>,
}

/// Which raw config file to read: `--config`, else the per-user
/// `config.json` if it exists.
#[must_use]
pub fn config_source(args: &CliArgs) -> Option<PathBuf> {
    args.config
        .clone()
        .or_else(|| default_config_path().filter(|path| path.exists()))
}

/// Build the settings tree for this run.
///
/// Layers, lowest first: built-in defaults, the raw config file, the overlay
/// for the target platform, then command-line overrides.
///
/// # Errors
///
/// Returns any [`ConfigError`] raised while loading or resolving.
pub fn bootstrap<D: PlatformDetector>(
    args: &CliArgs,
    detector: D,
) -> Result<Bootstrap, ConfigError> {
    let config_file = config_source(args);
    let mut input = match &config_file {
        Some(path) => load_raw(path)?,
        None => Value::Object(Map::new()),
    };
    args.apply_platform(&mut input)?;

    let mut store = ConfigStore::new();
    let resolution = PlatformResolver::new(detector)
        .with_defaults(builtin_defaults())
        .resolve(&mut store, input)?;
    store.process(args.overrides()?)?;

    Ok(Bootstrap {
        store,
        resolution,
        config_file,
    })
}
