//! Command-line argument parsing for the host application.

use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;
use crate::path::DotPath;
use crate::resolver::PLATFORM_KEY;
use crate::value::{Map, Value};

/// Lumen command-line arguments.
///
/// `--platform` is folded into the raw input before resolution. `--set` and
/// `--log-level` are applied after resolution and override every layer.
#[derive(Parser, Debug, Default)]
#[command(name = "lumen", about = "Resolve layered application configuration")]
pub struct CliArgs {
    /// Raw configuration file (`.json` or `.ron`).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target platform, overriding the one named in the config file.
    #[arg(long)]
    pub platform: Option<String>,

    /// Override a setting, e.g. `--set viewport.width=1024`.
    #[arg(long = "set", value_name = "PATH=VALUE")]
    pub overrides: Vec<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Write `--platform` into the raw input as an explicit target.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] if `input` is not a mapping.
    pub fn apply_platform(&self, input: &mut Value) -> Result<(), ConfigError> {
        let Some(platform) = &self.platform else {
            return Ok(());
        };
        let map = input.as_object_mut().ok_or_else(|| {
            ConfigError::invalid_config("raw configuration must be a mapping")
        })?;
        map.insert(PLATFORM_KEY.to_owned(), Value::from(platform.as_str()));
        Ok(())
    }

    /// Collect `--set` and `--log-level` into a patch of dotted keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if an override lacks `=` or names
    /// a malformed path.
    pub fn overrides(&self) -> Result<Value, ConfigError> {
        let mut patch = Map::new();
        for raw in &self.overrides {
            let (path, value) = parse_override(raw)?;
            patch.insert(path, value);
        }
        if let Some(level) = &self.log_level {
            patch.insert("log.level".to_owned(), Value::from(level.as_str()));
        }
        Ok(Value::Object(patch))
    }
}

/// Split `PATH=VALUE`. The value is read as JSON when it parses, otherwise
/// kept as a plain string.
fn parse_override(raw: &str) -> Result<(String, Value), ConfigError> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| ConfigError::invalid_path(raw, "override must be PATH=VALUE"))?;
    let path = DotPath::parse(path.trim())?;
    let value = crate::loader::parse_json(value).unwrap_or_else(|_| Value::from(value));
    Ok((path.as_str().to_owned(), value))
}
