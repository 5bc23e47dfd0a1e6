//! The configuration store: one settings tree with dot-path get/set/unset and
//! layered `process` merges.

use serde::de::DeserializeOwned;

use crate::error::ConfigError;
use crate::path::DotPath;
use crate::value::{Map, Value, coerce_map, kind};

/// Application settings tree.
///
/// Construct one at application entry and pass it by reference to every
/// consumer. Mutation needs `&mut`, so writes are confined to startup code
/// that owns the store; readers afterwards share `&ConfigStore`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    tree: Map,
}

impl ConfigStore {
    /// Create a store holding an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The whole tree.
    #[must_use]
    pub fn tree(&self) -> &Map {
        &self.tree
    }

    #[must_use]
    pub fn into_tree(self) -> Map {
        self.tree
    }

    /// Discard every setting.
    pub fn reset(&mut self) {
        self.tree.clear();
    }

    /// Look up the value at `path`.
    ///
    /// Returns `None` if any segment is missing, if a non-terminal segment
    /// lands on something other than a mapping, or if `path` is malformed.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let path = DotPath::parse(path).ok()?;
        let mut node = &self.tree;
        for segment in path.parents() {
            node = node.get(segment)?.as_object()?;
        }
        node.get(path.leaf())
    }

    /// Look up `path`, returning `fallback` when it is absent.
    #[must_use]
    pub fn get_or<'a>(&'a self, path: &str, fallback: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(fallback)
    }

    /// True if `path` resolves, including to an explicit null.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    #[must_use]
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    #[must_use]
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(Value::as_i64)
    }

    #[must_use]
    pub fn get_u64(&self, path: &str) -> Option<u64> {
        self.get(path).and_then(Value::as_u64)
    }

    #[must_use]
    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(Value::as_f64)
    }

    /// Convert the subtree at `path` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Deserialize`] if the subtree does not fit `T`.
    /// An absent path is `Ok(None)`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ConfigError> {
        let Some(value) = self.get(path) else {
            return Ok(None);
        };
        T::deserialize(value)
            .map(Some)
            .map_err(|source| ConfigError::Deserialize {
                path: path.to_owned(),
                source,
            })
    }

    /// Write `value` at `path`, creating intermediate mappings as needed.
    ///
    /// Whatever was at the terminal segment is replaced. An intermediate node
    /// that is not a mapping is replaced by an empty mapping first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if `path` is empty or malformed.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        let path = DotPath::parse(path)?;
        let mut node = &mut self.tree;
        for segment in path.parents() {
            let child = node
                .entry(segment)
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                log::debug!(
                    "Replacing {} at `{segment}` with a mapping to write `{}`",
                    kind(child),
                    path.as_str()
                );
            }
            node = coerce_map(child);
        }
        node.insert(path.leaf().to_owned(), value.into());
        Ok(())
    }

    /// Remove the key at `path` from its parent mapping and return what was
    /// there. Removing a missing path is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if `path` is empty or malformed.
    pub fn unset(&mut self, path: &str) -> Result<Option<Value>, ConfigError> {
        let path = DotPath::parse(path)?;
        let mut node = &mut self.tree;
        for segment in path.parents() {
            match node.get_mut(segment).and_then(Value::as_object_mut) {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(node.shift_remove(path.leaf()))
    }

    /// Merge a patch into the store by calling [`set`](Self::set) for each
    /// top-level key, in the order the keys appear in the patch.
    ///
    /// Dotted keys write a single nested path and leave siblings alone; plain
    /// keys replace the whole subtree under that key. All keys are validated
    /// before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] if `patch` is not a mapping and
    /// [`ConfigError::InvalidPath`] if any key is not a valid dot-path.
    pub fn process(&mut self, patch: Value) -> Result<(), ConfigError> {
        let patch = expect_mapping(patch, "patch")?;
        validate_keys(&patch)?;

        log::debug!("Processing {} config key(s)", patch.len());
        for (key, value) in patch {
            self.set(&key, value)?;
        }
        Ok(())
    }
}

/// Unwrap a mapping, or describe what `what` was instead.
pub(crate) fn expect_mapping(value: Value, what: &str) -> Result<Map, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::invalid_config(format!(
            "expected a mapping as {what}, found {}",
            kind(&other)
        ))),
    }
}

/// Check that every top-level key of a patch is a valid dot-path.
pub(crate) fn validate_keys(patch: &Map) -> Result<(), ConfigError> {
    for key in patch.keys() {
        DotPath::parse(key)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_then_get() {
        let mut store = ConfigStore::new();
        store.set("viewport.width", 800).unwrap();
        assert_eq!(store.get("viewport.width"), Some(&json!(800)));
        assert_eq!(store.get_u64("viewport.width"), Some(800));
    }

    #[test]
    fn test_get_missing_returns_fallback_and_leaves_tree() {
        let mut store = ConfigStore::new();
        store.set("a", 1).unwrap();
        let before = store.clone();

        let fallback = json!("fallback");
        assert_eq!(store.get_or("nope.deeper", &fallback), &fallback);
        assert_eq!(store.get("a.b"), None);
        assert_eq!(store, before);
    }

    #[test]
    fn test_get_malformed_path_is_absent() {
        let mut store = ConfigStore::new();
        store.set("a", 1).unwrap();
        assert_eq!(store.get(""), None);
        assert_eq!(store.get("a..b"), None);
    }

    #[test]
    fn test_set_creates_intermediates() {
        let mut store = ConfigStore::new();
        store.set("a.b.c", true).unwrap();
        assert!(store.get("a.b").is_some_and(Value::is_object));
        assert_eq!(store.get_bool("a.b.c"), Some(true));
    }

    #[test]
    fn test_set_replaces_subtree() {
        let mut store = ConfigStore::new();
        store.set("a.b", 1).unwrap();
        store.set("a", "flat").unwrap();
        assert_eq!(store.get_str("a"), Some("flat"));
        assert_eq!(store.get("a.b"), None);
    }

    #[test]
    fn test_set_through_scalar_replaces_it() {
        let mut store = ConfigStore::new();
        store.set("a", 1).unwrap();
        store.set("a.b", 2).unwrap();
        assert_eq!(store.get_i64("a.b"), Some(2));
    }

    #[test]
    fn test_set_invalid_path() {
        let mut store = ConfigStore::new();
        for raw in ["", "a.", "a..b"] {
            assert!(matches!(
                store.set(raw, 1),
                Err(ConfigError::InvalidPath { .. })
            ));
        }
        assert!(store.tree().is_empty());
    }

    #[test]
    fn test_unset_removes_key() {
        let mut store = ConfigStore::new();
        store.set("a.b", 1).unwrap();
        store.set("a.c", 2).unwrap();

        assert_eq!(store.unset("a.b").unwrap(), Some(json!(1)));

        let fallback = json!("gone");
        assert_eq!(store.get_or("a.b", &fallback), &fallback);
        assert!(!store.contains("a.b"));
        assert_eq!(store.get_i64("a.c"), Some(2));
    }

    #[test]
    fn test_unset_keeps_sibling_order() {
        let mut store = ConfigStore::new();
        store.process(json!({ "x": 1, "y": 2, "z": 3 })).unwrap();
        store.unset("x").unwrap();
        let keys: Vec<_> = store.tree().keys().cloned().collect();
        assert_eq!(keys, ["y", "z"]);
    }

    #[test]
    fn test_unset_distinguishes_null() {
        let mut store = ConfigStore::new();
        store.set("flag", Value::Null).unwrap();
        let fallback = json!(false);
        assert_eq!(store.get_or("flag", &fallback), &Value::Null);
        assert!(store.contains("flag"));

        store.unset("flag").unwrap();
        assert_eq!(store.get_or("flag", &fallback), &fallback);
    }

    #[test]
    fn test_unset_missing_is_noop() {
        let mut store = ConfigStore::new();
        store.set("a", 1).unwrap();
        assert_eq!(store.unset("a.b.c").unwrap(), None);
        assert_eq!(store.unset("zzz").unwrap(), None);
        assert_eq!(store.get_i64("a"), Some(1));
    }

    #[test]
    fn test_unset_invalid_path() {
        let mut store = ConfigStore::new();
        assert!(matches!(
            store.unset(""),
            Err(ConfigError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_process_preserves_siblings() {
        let mut store = ConfigStore::new();
        store.process(json!({ "a.b": 1 })).unwrap();
        store.process(json!({ "a.c": 2 })).unwrap();
        assert_eq!(store.get_i64("a.b"), Some(1));
        assert_eq!(store.get_i64("a.c"), Some(2));
    }

    #[test]
    fn test_process_last_write_wins() {
        let mut store = ConfigStore::new();
        store.process(json!({ "x": 1 })).unwrap();
        store.process(json!({ "x": 2 })).unwrap();
        assert_eq!(store.get_i64("x"), Some(2));
    }

    #[test]
    fn test_process_applies_keys_in_written_order() {
        let mut store = ConfigStore::new();
        store
            .process(crate::parse_json(r#"{"a.b": 1, "a": {"c": 2}}"#).unwrap())
            .unwrap();
        assert_eq!(store.get("a.b"), None);
        assert_eq!(store.get_i64("a.c"), Some(2));

        let mut store = ConfigStore::new();
        store
            .process(crate::parse_json(r#"{"a": {"c": 2}, "a.b": 1}"#).unwrap())
            .unwrap();
        assert_eq!(store.get_i64("a.b"), Some(1));
        assert_eq!(store.get_i64("a.c"), Some(2));
    }

    #[test]
    fn test_process_plain_key_replaces_subtree() {
        let mut store = ConfigStore::new();
        store
            .process(json!({ "viewport": { "width": 800, "height": 600 } }))
            .unwrap();
        store.process(json!({ "viewport": { "width": 400 } })).unwrap();
        assert_eq!(store.get_i64("viewport.width"), Some(400));
        assert_eq!(store.get("viewport.height"), None);
    }

    #[test]
    fn test_process_rejects_non_mapping() {
        let mut store = ConfigStore::new();
        for patch in [json!(1), Value::Null, json!([])] {
            assert!(matches!(
                store.process(patch),
                Err(ConfigError::InvalidConfig { .. })
            ));
        }
    }

    #[test]
    fn test_process_bad_key_writes_nothing() {
        let mut store = ConfigStore::new();
        let patch = json!({ "good": 1, "bad..key": 2 });
        assert!(matches!(
            store.process(patch),
            Err(ConfigError::InvalidPath { .. })
        ));
        assert!(store.tree().is_empty());
    }

    #[test]
    fn test_get_as_typed_subtree() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Viewport {
            width: u32,
            height: u32,
        }

        let mut store = ConfigStore::new();
        store.set("viewport.width", 800).unwrap();
        store.set("viewport.height", 600).unwrap();

        let viewport: Option<Viewport> = store.get_as("viewport").unwrap();
        assert_eq!(
            viewport,
            Some(Viewport {
                width: 800,
                height: 600
            })
        );
        assert_eq!(store.get_as::<Viewport>("missing").unwrap(), None);
        assert!(matches!(
            store.get_as::<u32>("viewport"),
            Err(ConfigError::Deserialize { .. })
        ));
    }

    #[test]
    fn test_reset_clears_tree() {
        let mut store = ConfigStore::new();
        store.set("a", 1).unwrap();
        store.reset();
        assert!(store.tree().is_empty());
    }
}
