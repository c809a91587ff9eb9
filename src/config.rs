//! Configuration for the in-memory store.
//!
//! The store has no capacity limit and no default TTL: every entry carries the
//! expiration its writer resolved. The only tunable is how expired entries are
//! reclaimed.

use std::time::Duration;

/// Configuration for creating a new [`MemoryCache`](crate::MemoryCache).
///
/// ```
/// use memory_cache_provider::CacheConfig;
/// use std::time::Duration;
///
/// let config = CacheConfig::new()
///     .cleanup_interval(Duration::from_secs(30))
///     .background_cleanup(true)
///     .build();
/// assert!(config.is_background_cleanup());
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Interval between background sweeps of expired entries.
    /// `None` disables the sweep (lazy expiration only).
    pub(crate) cleanup_interval: Option<Duration>,

    /// Whether to spawn the background sweep at all.
    pub(crate) background_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Some(Duration::from_secs(60)),
            background_cleanup: false,
        }
    }
}

impl CacheConfig {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interval for background cleanup of expired entries.
    ///
    /// `Duration::ZERO` disables the sweep.
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = if interval.is_zero() {
            None
        } else {
            Some(interval)
        };
        self
    }

    /// Enable or disable background cleanup.
    ///
    /// The sweep task needs a tokio runtime; when the cache is built outside
    /// one, entries are only removed on access.
    pub fn background_cleanup(mut self, enabled: bool) -> Self {
        self.background_cleanup = enabled;
        self
    }

    pub fn build(self) -> Self {
        self
    }

    pub fn get_cleanup_interval(&self) -> Option<Duration> {
        self.cleanup_interval
    }

    pub fn is_background_cleanup(&self) -> bool {
        self.background_cleanup
    }

    /// The sweep interval, if a sweep should run.
    pub(crate) fn sweep_interval(&self) -> Option<Duration> {
        if self.background_cleanup {
            self.cleanup_interval
        } else {
            None
        }
    }
}
