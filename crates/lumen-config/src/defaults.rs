//! Built-in settings applied beneath every configuration file.

use serde_json::json;

use crate::value::Value;

pub const VIEWPORT_WIDTH: i64 = 800;
pub const VIEWPORT_HEIGHT: i64 = 600;
pub const LOG_LEVEL: &str = "info";

/// The lowest configuration layer, keyed by dot-path.
#[must_use]
pub fn builtin_defaults() -> Value {
    json!({
        "viewport.width": VIEWPORT_WIDTH,
        "viewport.height": VIEWPORT_HEIGHT,
        "log.level": LOG_LEVEL,
    })
}
