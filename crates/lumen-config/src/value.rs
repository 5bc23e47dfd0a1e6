//! The configuration tree value type.
//!
//! The tree is a [`serde_json::Value`]: scalars, arrays and string-keyed
//! objects. Objects keep their keys in insertion order, so a patch is applied
//! in the order its author wrote it, whether it came from JSON or RON.

pub use serde_json::Value;

/// One mapping level of the configuration tree.
pub type Map = serde_json::Map<String, Value>;

/// Short name of the variant, used in error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Turn `value` into a mapping, discarding any non-mapping content, and
/// return it.
pub(crate) fn coerce_map(value: &mut Value) -> &mut Map {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with a mapping"),
    }
}
