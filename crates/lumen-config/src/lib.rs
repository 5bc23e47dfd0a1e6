//! Hierarchical configuration for Lumen applications.
//!
//! Settings live in one [`ConfigStore`] tree addressed by dot-paths such as
//! `"viewport.width"`. At startup a [`PlatformResolver`] layers built-in
//! defaults, the base configuration and a platform-specific overlay into the
//! store; afterwards consumers only read from it.

mod cli;
mod defaults;
mod error;
mod loader;
mod path;
mod platform;
mod resolver;
mod store;
mod value;

pub use cli::CliArgs;
pub use defaults::{LOG_LEVEL, VIEWPORT_HEIGHT, VIEWPORT_WIDTH, builtin_defaults};
pub use error::ConfigError;
pub use loader::{default_config_path, load_raw, parse_json, parse_ron};
pub use path::{DotPath, SEPARATOR};
pub use platform::{
    DEVICE_PLATFORM_VAR, EnvDetector, FixedDetector, NoDetector, Platform, PlatformDetector,
};
pub use resolver::{PLATFORM_KEY, PLATFORMS_KEY, PlatformResolver, PlatformSource, Resolution};
pub use store::ConfigStore;
pub use value::{Map, Value};
