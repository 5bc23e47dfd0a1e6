//! Startup resolution of the configuration tree: defaults, then the base
//! configuration, then the overlay for the target platform.

use crate::error::ConfigError;
use crate::platform::{Platform, PlatformDetector};
use crate::store::{ConfigStore, expect_mapping, validate_keys};
use crate::value::{Map, Value, kind};

/// Reserved input key holding per-platform overlays.
pub const PLATFORMS_KEY: &str = "platforms";
/// Reserved input key naming the target platform explicitly.
pub const PLATFORM_KEY: &str = "platform";

/// Where the resolved platform identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSource {
    /// The input's `platform` key.
    Explicit,
    /// The host's [`PlatformDetector`].
    Detected,
    /// Neither was available; [`Platform::BROWSER`] was used.
    Baseline,
}

/// Outcome of [`PlatformResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The target platform.
    pub platform: Platform,
    /// How the target was chosen.
    pub source: PlatformSource,
    /// Whether an overlay for the target existed and was applied.
    pub overlay_applied: bool,
    /// Identifiers of every overlay in the input, in input order.
    pub overlays: Vec<String>,
}

impl Resolution {
    /// True when the input carried overlays but none matched the target.
    #[must_use]
    pub fn missed_overlay(&self) -> bool {
        !self.overlay_applied && !self.overlays.is_empty()
    }
}

/// One-shot builder of the final settings tree from a raw input object.
///
/// Layers are applied in the order defaults < base < platform overlay, each
/// through [`ConfigStore::process`], so a later layer replaces a value at the
/// same path rather than combining with it.
#[derive(Debug)]
pub struct PlatformResolver<D> {
    defaults: Value,
    detector: D,
}

impl<D: PlatformDetector> PlatformResolver<D> {
    /// A resolver with no built-in defaults.
    pub fn new(detector: D) -> Self {
        Self {
            defaults: Value::Object(Map::new()),
            detector,
        }
    }

    /// Set the lowest layer applied before the base configuration.
    #[must_use]
    pub fn with_defaults(mut self, defaults: impl Into<Value>) -> Self {
        self.defaults = defaults.into();
        self
    }

    /// Populate `store` from `input`.
    ///
    /// The `platforms` key is stripped from `input` before the base is
    /// applied and never lands in the tree; `platform` stays in the tree.
    /// Missing overlays, or no overlay for the target, leave the base as is.
    /// Every layer is checked before the first one is written, so an error
    /// leaves `store` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfig`] if the defaults, `input`, its
    /// `platforms` value or the selected overlay is not a mapping, or if
    /// `platform` is not a string. Returns [`ConfigError::InvalidPath`] if any
    /// of those layers has a malformed key.
    pub fn resolve(self, store: &mut ConfigStore, input: Value) -> Result<Resolution, ConfigError> {
        let defaults = expect_mapping(self.defaults, "defaults")?;
        let mut input = expect_mapping(input, "raw configuration")?;

        let overlays = take_overlays(&mut input)?;
        let explicit = explicit_platform(&input)?;
        let (platform, source) = match explicit {
            Some(id) => (Platform::new(id), PlatformSource::Explicit),
            None => match self
                .detector
                .current()
                .filter(|id| !id.trim().is_empty())
            {
                Some(id) => (Platform::from_device(&id), PlatformSource::Detected),
                None => (Platform::browser(), PlatformSource::Baseline),
            },
        };

        let (overlay, overlay_ids) = match overlays {
            Some(mut overlays) => {
                let ids = overlays.keys().cloned().collect();
                let overlay = overlays
                    .shift_remove(platform.as_str())
                    .map(|overlay| {
                        expect_mapping(overlay, &format!("overlay for platform `{platform}`"))
                    })
                    .transpose()?;
                (overlay, ids)
            }
            None => (None, Vec::new()),
        };

        validate_keys(&defaults)?;
        validate_keys(&input)?;
        if let Some(overlay) = &overlay {
            validate_keys(overlay)?;
        }

        log::debug!("Applying config defaults");
        store.process(Value::Object(defaults))?;
        log::debug!("Applying base config");
        store.process(Value::Object(input))?;

        let overlay_applied = match overlay {
            Some(overlay) => {
                log::debug!("Applying overlay for platform `{platform}`");
                store.process(Value::Object(overlay))?;
                true
            }
            None => false,
        };

        let resolution = Resolution {
            platform,
            source,
            overlay_applied,
            overlays: overlay_ids,
        };
        if resolution.missed_overlay() {
            log::warn!(
                "No overlay for platform `{}`; available: {}",
                resolution.platform,
                resolution.overlays.join(", ")
            );
        }
        log::info!(
            "Resolved platform `{}` ({:?}), overlay applied: {}",
            resolution.platform,
            resolution.source,
            resolution.overlay_applied
        );
        Ok(resolution)
    }
}

fn take_overlays(input: &mut Map) -> Result<Option<Map>, ConfigError> {
    match input.shift_remove(PLATFORMS_KEY) {
        None => Ok(None),
        Some(Value::Object(overlays)) => Ok(Some(overlays)),
        Some(other) => Err(ConfigError::invalid_config(format!(
            "`{PLATFORMS_KEY}` must be a mapping, found {}",
            kind(&other)
        ))),
    }
}

fn explicit_platform(input: &Map) -> Result<Option<String>, ConfigError> {
    match input.get(PLATFORM_KEY) {
        None => Ok(None),
        Some(Value::String(id)) => Ok(Some(id.clone())),
        Some(other) => Err(ConfigError::invalid_config(format!(
            "`{PLATFORM_KEY}` must be a string, found {}",
            kind(other)
        ))),
    }
}
