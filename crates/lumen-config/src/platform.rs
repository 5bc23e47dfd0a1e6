//! Platform identifiers and host platform detection.

use std::fmt;

/// Environment variable consulted by [`EnvDetector::default`].
pub const DEVICE_PLATFORM_VAR: &str = "LUMEN_DEVICE_PLATFORM";

/// Identifier selecting which platform overlay, if any, applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform(String);

impl Platform {
    /// Baseline target used when nothing more specific is known.
    pub const BROWSER: &'static str = "browser";

    /// Wrap an identifier as given.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier reported by a device descriptor, case-folded.
    #[must_use]
    pub fn from_device(id: &str) -> Self {
        Self(id.trim().to_lowercase())
    }

    #[must_use]
    pub fn browser() -> Self {
        Self::new(Self::BROWSER)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host capability that reports the platform the application runs on.
///
/// Consulted only when the raw configuration does not name a platform.
pub trait PlatformDetector {
    /// The host's platform identifier, in whatever case the host reports.
    fn current(&self) -> Option<String>;
}

impl<F> PlatformDetector for F
where
    F: Fn() -> Option<String>,
{
    fn current(&self) -> Option<String> {
        self()
    }
}

/// A detector for hosts without a device descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDetector;

impl PlatformDetector for NoDetector {
    fn current(&self) -> Option<String> {
        None
    }
}

/// A detector that always reports the same identifier.
#[derive(Debug, Clone, Default)]
pub struct FixedDetector(pub Option<String>);

impl FixedDetector {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Some(id.into()))
    }
}

impl PlatformDetector for FixedDetector {
    fn current(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Reads the device platform from an environment variable.
///
/// Unset or blank values report nothing.
#[derive(Debug, Clone)]
pub struct EnvDetector {
    var: String,
}

impl EnvDetector {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvDetector {
    fn default() -> Self {
        Self::new(DEVICE_PLATFORM_VAR)
    }
}

impl PlatformDetector for EnvDetector {
    fn current(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .filter(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_id_is_case_folded() {
        assert_eq!(Platform::from_device("Android").as_str(), "android");
        assert_eq!(Platform::from_device(" iOS ").as_str(), "ios");
    }

    #[test]
    fn test_explicit_id_is_verbatim() {
        assert_eq!(Platform::new("Steam").as_str(), "Steam");
    }

    #[test]
    fn test_closure_detector() {
        let detector = || Some("WinPhone".to_string());
        assert_eq!(detector.current().as_deref(), Some("WinPhone"));
    }

    #[test]
    fn test_fixed_and_no_detector() {
        assert_eq!(FixedDetector::new("ios").current().as_deref(), Some("ios"));
        assert_eq!(FixedDetector::default().current(), None);
        assert_eq!(NoDetector.current(), None);
    }

    #[test]
    fn test_env_detector_missing_var() {
        let detector = EnvDetector::new("LUMEN_TEST_PLATFORM_VAR_THAT_IS_NEVER_SET");
        assert_eq!(detector.current(), None);
    }
}
