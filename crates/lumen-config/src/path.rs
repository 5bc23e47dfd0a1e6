//! Dot-path addressing.

use crate::error::ConfigError;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// A validated dot-delimited address such as `"viewport.width"`.
///
/// Each segment names one mapping level. A path is valid when it is
/// non-empty and none of its segments are empty, so `"a..b"`, `".a"` and
/// `"a."` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotPath<'a> {
    raw: &'a str,
}

impl<'a> DotPath<'a> {
    /// Validate `raw` as a dot-path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] if `raw` is empty or has an empty
    /// segment.
    pub fn parse(raw: &'a str) -> Result<Self, ConfigError> {
        if raw.is_empty() {
            return Err(ConfigError::invalid_path(raw, "path is empty"));
        }
        if raw.split(SEPARATOR).any(str::is_empty) {
            return Err(ConfigError::invalid_path(
                raw,
                "path contains an empty segment",
            ));
        }
        Ok(Self { raw })
    }

    #[must_use]
    pub fn as_str(self) -> &'a str {
        self.raw
    }

    /// All segments, outermost first.
    pub fn segments(self) -> impl Iterator<Item = &'a str> + 'a {
        self.raw.split(SEPARATOR)
    }

    /// The intermediate segments leading to the leaf.
    pub fn parents(self) -> impl Iterator<Item = &'a str> + 'a {
        let parent = self.raw.rsplit_once(SEPARATOR).map_or("", |(parent, _)| parent);
        parent.split(SEPARATOR).filter(|segment| !segment.is_empty())
    }

    /// The terminal segment.
    #[must_use]
    pub fn leaf(self) -> &'a str {
        self.raw.rsplit_once(SEPARATOR).map_or(self.raw, |(_, leaf)| leaf)
    }

    /// Number of segments.
    #[must_use]
    pub fn depth(self) -> usize {
        self.segments().count()
    }
}
