//! Reading raw configuration objects from disk.
//!
//! A build step writes the application's `config.json`; hand-edited RON
//! files are accepted as well. Either way the result is a [`Value`] ready for
//! [`PlatformResolver::resolve`](crate::PlatformResolver::resolve).

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::value::Value;

const APP_NAME: &str = "lumen";
const CONFIG_FILE: &str = "config.json";

/// Load a raw configuration file, choosing the parser by extension.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedFormat`] for extensions other than
/// `json` and `ron`, [`ConfigError::ReadError`] if the file cannot be read,
/// and a parse error if its content is malformed.
pub fn load_raw(path: &Path) -> Result<Value, ConfigError> {
    let parse = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json,
        Some("ron") => parse_ron,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };
    let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
    let value = parse(&contents)?;
    log::info!("Loaded raw config from {}", path.display());
    Ok(value)
}

/// Parse a JSON document into a configuration value.
pub fn parse_json(contents: &str) -> Result<Value, ConfigError> {
    serde_json::from_str(contents).map_err(ConfigError::JsonError)
}

/// Parse a RON document into a configuration value.
pub fn parse_ron(contents: &str) -> Result<Value, ConfigError> {
    ron::from_str(contents).map_err(ConfigError::ParseError)
}

/// The per-user location of `config.json`, if the OS exposes a config
/// directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE))
}
