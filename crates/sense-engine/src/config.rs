//! Engine configuration.

use sense_core::{SpatialError, SpatialResult};

/// Final intensity at or below which a stimulus is imperceptible.
pub const MIN_THRESHOLD: f32 = 0.1;

/// Default number of systems the registry accepts.
pub const MAX_SYSTEMS: usize = 10;

/// Result cache settings.
///
/// The cache is off by default.  While it is off, direct cache queries fail
/// with `NotImplemented` and the pipeline never consults it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct CacheConfig {
    pub enabled:   bool,
    /// Maximum number of cached results.  The oldest entry is evicted when a
    /// new result arrives at capacity.
    pub capacity:  usize,
    /// Entries older than this many ticks are stale.  Weather and the time
    /// of day drift between ticks, so keep this short.
    pub ttl_ticks: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: false, capacity: 256, ttl_ticks: 5 }
    }
}

/// Top-level engine configuration.
///
/// Typically built with `..Default::default()` or read from JSON by the
/// application crate (with the `serde` feature).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct EngineConfig {
    /// Master switch.  A disabled engine answers every propagation call with
    /// `Disabled`.
    pub enabled:       bool,

    /// Emit a `debug!` event for every pipeline stage.  Off in production.
    pub debug:         bool,

    /// Detection threshold; see [`MIN_THRESHOLD`].
    pub min_threshold: f32,

    /// Registry capacity.
    pub max_systems:   usize,

    pub cache:         CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled:       true,
            debug:         false,
            min_threshold: MIN_THRESHOLD,
            max_systems:   MAX_SYSTEMS,
            cache:         CacheConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> SpatialResult<()> {
        if !self.min_threshold.is_finite() || !(0.0..1.0).contains(&self.min_threshold) {
            return Err(SpatialError::invalid_param(format!(
                "min_threshold must be in [0, 1), got {}",
                self.min_threshold
            )));
        }
        if self.max_systems == 0 || self.max_systems > usize::from(u16::MAX) {
            return Err(SpatialError::invalid_param(format!(
                "max_systems must be in 1..={}, got {}",
                u16::MAX,
                self.max_systems
            )));
        }
        if self.cache.enabled && self.cache.capacity == 0 {
            return Err(SpatialError::invalid_param("cache capacity must be non-zero"));
        }
        Ok(())
    }
}
