//! The in-memory store handed to a provider.
//!
//! [`MemoryCache`] is a cheap, cloneable handle around the internal storage.
//! It implements [`CacheStore`] so a
//! [`MemoryCacheProvider`](crate::MemoryCacheProvider) can write resolved
//! expirations into it.

use bytes::Bytes;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::CacheResult;
use crate::expiration::Expiration;
use crate::stats::StatsSnapshot;
use crate::storage::Db;
use crate::store::CacheStore;

/// A thread-safe, in-memory store with per-entry sliding or absolute expiry.
///
/// Clones point at the same data. Values default to [`Bytes`], but any
/// `Clone` type can be stored.
///
/// # Example
/// ```
/// use memory_cache_provider::{CacheConfig, Expiration, MemoryCache};
/// use std::time::Duration;
///
/// let cache: MemoryCache<String> = MemoryCache::new(CacheConfig::default());
///
/// cache.set("user:123", "Alice".to_string(), Expiration::NEVER).unwrap();
/// assert_eq!(cache.get("user:123").unwrap().as_deref(), Some("Alice"));
///
/// cache
///     .set("session:abc", "data".to_string(), Expiration::Sliding(Duration::from_secs(60)))
///     .unwrap();
/// assert!(cache.contains("session:abc").unwrap());
/// ```
#[derive(Debug)]
pub struct MemoryCache<V = Bytes> {
    db: Arc<Db<V>>,
}

impl<V> Clone for MemoryCache<V> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

impl<V> MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a store reading time from the system clock.
    ///
    /// If the configuration enables background cleanup and this is called
    /// inside a tokio runtime, a sweep task is spawned on that runtime.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a store reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let db = Arc::new(Db::new(config, clock));
        db.start_cleanup();
        Self { db }
    }

    /// The clock this store checks deadlines against.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(self.db.clock())
    }

    /// Get a live value. Reading a sliding entry restarts its countdown.
    pub fn get(&self, key: &str) -> CacheResult<Option<V>> {
        self.db.get(key)
    }

    /// Store `value` under `key`, replacing any existing entry.
    pub fn set(&self, key: &str, value: V, expiration: Expiration) -> CacheResult<()> {
        self.db.set(key, value, expiration)
    }

    /// Delete a key. Returns `true` if the key existed.
    pub fn remove(&self, key: &str) -> CacheResult<bool> {
        self.db.remove(key)
    }

    /// Check whether a live entry exists. Does not refresh sliding entries.
    pub fn contains(&self, key: &str) -> CacheResult<bool> {
        self.db.contains(key)
    }

    /// Number of stored entries.
    ///
    /// This may include expired entries that have not been reclaimed yet.
    pub fn len(&self) -> CacheResult<usize> {
        self.db.len()
    }

    pub fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.db.len()? == 0)
    }

    /// Keys in the order they were first written.
    pub fn keys(&self) -> CacheResult<Vec<String>> {
        self.db.keys()
    }

    pub fn clear(&self) -> CacheResult<()> {
        self.db.clear()
    }

    /// Remove expired entries now. Returns how many were removed.
    pub fn cleanup_expired(&self) -> CacheResult<usize> {
        self.db.cleanup_expired()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.db.stats().snapshot()
    }
}

impl<V> Default for MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl<V> CacheStore<V> for MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn try_get(&self, key: &str) -> CacheResult<Option<V>> {
        self.get(key)
    }

    fn set(&self, key: &str, value: V, expiration: Expiration) -> CacheResult<()> {
        MemoryCache::set(self, key, value, expiration)
    }
}
