//! Configuration error types.

use std::path::PathBuf;

/// Errors raised by the configuration store, the platform resolver and the
/// raw config loader.
///
/// A missing path is never an error: reads signal absence through `None` or a
/// caller-supplied fallback.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A write or delete was given an empty or malformed dot-path.
    #[error("invalid config path `{path}`: {reason}")]
    InvalidPath {
        /// The offending path as given by the caller.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A patch or resolver input did not have the required shape.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// Description of the shape mismatch.
        reason: String,
    },

    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to parse or render JSON content.
    #[error("failed to parse JSON config: {0}")]
    JsonError(#[source] serde_json::Error),

    /// The config file extension is neither `.json` nor `.ron`.
    #[error("unsupported config format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A subtree could not be converted into the requested type.
    #[error("config value at `{path}` has an unexpected shape: {source}")]
    Deserialize {
        /// Path of the subtree being converted.
        path: String,
        /// Underlying conversion error.
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid_path(path: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason,
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
