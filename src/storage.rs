//! Internal storage implementation for the in-memory store.
//!
//! Entries live in an `IndexMap` behind a `RwLock`. Insertion order is kept
//! on removal (`shift_remove`) so `keys()` reports entries oldest-written first.

use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use std::time::Duration;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::CacheConfig;
use crate::entry::Entry;
use crate::error::{CacheResult, StoreError};
use crate::expiration::Expiration;
use crate::stats::CacheStats;

/// Thread-safe expiring map.
///
/// This is the internal implementation; users should use `MemoryCache` instead.
#[derive(Debug)]
pub struct Db<V> {
    entries: RwLock<IndexMap<String, Entry<V>>>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    stats: CacheStats,
}

impl<V: Clone> Db<V> {
    pub fn new(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
            config,
            clock,
            stats: CacheStats::new(),
        }
    }

    /// Get a live value, refreshing it if it slides.
    ///
    /// Absolute entries are served under the read lock. Sliding entries and
    /// expired entries need the write lock, and their state is checked again
    /// once it is held.
    pub fn get(&self, key: &str) -> CacheResult<Option<V>> {
        let now = self.clock.now();

        {
            let entries = self.read_lock()?;
            match entries.get(key) {
                None => {
                    self.stats.record_miss();
                    return Ok(None);
                }
                Some(entry) if !entry.is_sliding() && !entry.is_expired_at(now) => {
                    self.stats.record_hit();
                    return Ok(Some(entry.value().clone()));
                }
                Some(_) => {}
            }
        }

        let mut entries = self.write_lock()?;
        match entries.get_mut(key) {
            None => {
                self.stats.record_miss();
                return Ok(None);
            }
            Some(entry) if !entry.is_expired_at(now) => {
                entry.touch_at(now);
                self.stats.record_hit();
                return Ok(Some(entry.value().clone()));
            }
            Some(_) => {}
        }

        entries.shift_remove(key);
        self.stats.record_miss();
        self.stats.record_expirations(1);
        debug!(key, "dropped expired cache entry");
        Ok(None)
    }

    /// Insert or overwrite `key`.
    pub fn set(&self, key: &str, value: V, expiration: Expiration) -> CacheResult<()> {
        let entry = Entry::new(value, expiration, self.clock.now());

        let mut entries = self.write_lock()?;
        entries.insert(key.to_owned(), entry);
        self.stats.record_write();
        Ok(())
    }

    /// Remove `key`. Returns `true` if it was present (expired or not).
    pub fn remove(&self, key: &str) -> CacheResult<bool> {
        let mut entries = self.write_lock()?;
        Ok(entries.shift_remove(key).is_some())
    }

    /// Check for a live entry without refreshing it.
    pub fn contains(&self, key: &str) -> CacheResult<bool> {
        let now = self.clock.now();
        let entries = self.read_lock()?;
        Ok(entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now)))
    }

    /// Number of stored entries, including expired ones not yet reclaimed.
    pub fn len(&self) -> CacheResult<usize> {
        Ok(self.read_lock()?.len())
    }

    pub fn keys(&self) -> CacheResult<Vec<String>> {
        Ok(self.read_lock()?.keys().cloned().collect())
    }

    pub fn clear(&self) -> CacheResult<()> {
        self.write_lock()?.clear();
        Ok(())
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Remove every expired entry, returning how many were dropped.
    pub fn cleanup_expired(&self) -> CacheResult<usize> {
        let now = self.clock.now();
        let mut entries = self.write_lock()?;

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();

        if removed > 0 {
            self.stats.record_expirations(removed as u64);
            debug!(removed, "swept expired cache entries");
        }
        Ok(removed)
    }

    fn read_lock(&self) -> CacheResult<RwLockReadGuard<'_, IndexMap<String, Entry<V>>>> {
        self.entries
            .read()
            .map_err(|err| StoreError::LockPoisoned(err.to_string()).into())
    }

    fn write_lock(&self) -> CacheResult<RwLockWriteGuard<'_, IndexMap<String, Entry<V>>>> {
        self.entries
            .write()
            .map_err(|err| StoreError::LockPoisoned(err.to_string()).into())
    }
}

impl<V> Db<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Spawn the background sweep if the configuration asks for one.
    ///
    /// The task holds a weak reference and exits once the store is dropped.
    pub fn start_cleanup(self: &Arc<Self>) {
        let Some(every) = self.config.sweep_interval() else {
            return;
        };

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("background cleanup requested outside a tokio runtime; expired entries are reclaimed on access only");
                return;
            }
        };

        handle.spawn(sweep(Arc::downgrade(self), every));
    }
}

async fn sweep<V>(db: Weak<Db<V>>, every: Duration)
where
    V: Clone + Send + Sync + 'static,
{
    let mut ticker = tokio::time::interval(every);
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let Some(db) = db.upgrade() else {
            break;
        };
        if let Err(err) = db.cleanup_expired() {
            warn!(error = %err, "background cleanup failed");
        }
    }
}
