//! The contract a backing store must honour.

use std::sync::Arc;

use crate::error::CacheResult;
use crate::expiration::Expiration;

/// An expiring key-value store.
///
/// Implementations own all storage concerns: locking, atomicity of `set`,
/// refreshing sliding entries on read, and dropping expired entries.
/// `Expiration::Absolute(MAX_INSTANT)` must be treated as "never expire".
pub trait CacheStore<V>: Send + Sync {
    /// Look up a live entry. A missing or expired key is `Ok(None)`.
    fn try_get(&self, key: &str) -> CacheResult<Option<V>>;

    /// Insert or overwrite `key`.
    fn set(&self, key: &str, value: V, expiration: Expiration) -> CacheResult<()>;
}

impl<V, S> CacheStore<V> for Arc<S>
where
    S: CacheStore<V> + ?Sized,
{
    fn try_get(&self, key: &str) -> CacheResult<Option<V>> {
        (**self).try_get(key)
    }

    fn set(&self, key: &str, value: V, expiration: Expiration) -> CacheResult<()> {
        (**self).set(key, value, expiration)
    }
}
