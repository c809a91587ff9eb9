//! Cache provider interfaces and the in-memory adapter.
//!
//! A resilience policy talks to its cache only through
//! [`SyncCacheProvider`] and [`AsyncCacheProvider`]. [`MemoryCacheProvider`]
//! implements both on top of any [`CacheStore`], turning each [`Ttl`] into an
//! [`Expiration`] with [`resolve`].
//!
//! # Async contract
//!
//! The backing store lives in process, so there is nothing to wait on. The
//! async methods do their work during the call and return an already-completed
//! future. They never spawn a task or a thread.

use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::cache::MemoryCache;
use crate::clock::{Clock, SystemClock};
use crate::error::{CacheError, CacheResult};
use crate::expiration::{resolve, Expiration};
use crate::store::CacheStore;
use crate::ttl::Ttl;

/// Blocking access to a cache.
pub trait SyncCacheProvider<V> {
    /// Look up `key`. A miss is `Ok(None)`.
    fn get(&self, key: &str) -> CacheResult<Option<V>>;

    /// Store `value` under `key` for `ttl`, replacing any existing entry.
    fn put(&self, key: &str, value: V, ttl: Ttl) -> CacheResult<()>;
}

/// Future-returning access to a cache.
///
/// Implementations must fail with [`CacheError::Cancelled`] when
/// `cancellation` is already triggered at call time.
pub trait AsyncCacheProvider<V: Send> {
    fn get_async<'a>(
        &'a self,
        key: &'a str,
        cancellation: &'a CancellationToken,
    ) -> BoxFuture<'a, CacheResult<Option<V>>>;

    fn put_async<'a>(
        &'a self,
        key: &'a str,
        value: V,
        ttl: Ttl,
        cancellation: &'a CancellationToken,
    ) -> BoxFuture<'a, CacheResult<()>>;
}

/// Adapts an in-process [`CacheStore`] to the provider interfaces.
///
/// # Example
/// ```
/// use memory_cache_provider::{MemoryCache, MemoryCacheProvider, SyncCacheProvider, Ttl};
/// use std::time::Duration;
///
/// let store: MemoryCache<i32> = MemoryCache::default();
/// let provider = MemoryCacheProvider::new(store);
///
/// provider.put("k", 42, Ttl::new(Duration::from_secs(10))).unwrap();
/// assert_eq!(provider.get("k").unwrap(), Some(42));
/// assert_eq!(provider.get("other").unwrap(), None);
/// ```
pub struct MemoryCacheProvider<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S> MemoryCacheProvider<S> {
    /// Wrap `store`, reading time from the system clock.
    ///
    /// Absolute deadlines are computed on the provider's clock and checked on
    /// the store's, so a store running on another clock should go through
    /// [`ProviderBuilder::clock`] or `From<MemoryCache<V>>` instead.
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
        }
    }

    /// Start a [`ProviderBuilder`].
    pub fn builder() -> ProviderBuilder<S> {
        ProviderBuilder::default()
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The expiration a put of `ttl` would write right now.
    pub fn expiration_for(&self, ttl: &Ttl) -> Expiration {
        resolve(ttl, self.clock.now())
    }
}

/// Wraps a [`MemoryCache`], resolving TTLs on the store's own clock.
impl<V> From<MemoryCache<V>> for MemoryCacheProvider<MemoryCache<V>>
where
    V: Clone + Send + Sync + 'static,
{
    fn from(store: MemoryCache<V>) -> Self {
        let clock = store.clock();
        Self { store, clock }
    }
}

impl<S: fmt::Debug> fmt::Debug for MemoryCacheProvider<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCacheProvider")
            .field("store", &self.store)
            .field("clock", &self.clock)
            .finish()
    }
}

impl<V, S> SyncCacheProvider<V> for MemoryCacheProvider<S>
where
    S: CacheStore<V>,
{
    fn get(&self, key: &str) -> CacheResult<Option<V>> {
        self.store.try_get(key)
    }

    fn put(&self, key: &str, value: V, ttl: Ttl) -> CacheResult<()> {
        let expiration = self.expiration_for(&ttl);
        trace!(key, ?ttl, ?expiration, "writing cache entry");
        self.store.set(key, value, expiration)
    }
}

impl<V, S> AsyncCacheProvider<V> for MemoryCacheProvider<S>
where
    V: Send + 'static,
    S: CacheStore<V>,
{
    fn get_async<'a>(
        &'a self,
        key: &'a str,
        cancellation: &'a CancellationToken,
    ) -> BoxFuture<'a, CacheResult<Option<V>>> {
        let result = ensure_not_cancelled(key, cancellation)
            .and_then(|()| SyncCacheProvider::<V>::get(self, key));
        future::ready(result).boxed()
    }

    fn put_async<'a>(
        &'a self,
        key: &'a str,
        value: V,
        ttl: Ttl,
        cancellation: &'a CancellationToken,
    ) -> BoxFuture<'a, CacheResult<()>> {
        let result = ensure_not_cancelled(key, cancellation)
            .and_then(|()| SyncCacheProvider::<V>::put(self, key, value, ttl));
        future::ready(result).boxed()
    }
}

fn ensure_not_cancelled(key: &str, cancellation: &CancellationToken) -> CacheResult<()> {
    if cancellation.is_cancelled() {
        debug!(key, "cache call rejected: cancellation already requested");
        return Err(CacheError::Cancelled);
    }
    Ok(())
}

/// Builder for [`MemoryCacheProvider`].
///
/// `build` fails with [`CacheError::MissingDependency`] when no store was
/// supplied.
///
/// ```
/// use memory_cache_provider::{CacheError, MemoryCache, MemoryCacheProvider};
///
/// let missing = MemoryCacheProvider::<MemoryCache<u8>>::builder().build();
/// assert!(matches!(missing, Err(CacheError::MissingDependency("store"))));
///
/// let provider = MemoryCacheProvider::builder()
///     .store(MemoryCache::<u8>::default())
///     .build();
/// assert!(provider.is_ok());
/// ```
pub struct ProviderBuilder<S> {
    store: Option<S>,
    clock: Option<Arc<dyn Clock>>,
}

impl<S> Default for ProviderBuilder<S> {
    fn default() -> Self {
        Self {
            store: None,
            clock: None,
        }
    }
}

impl<S> ProviderBuilder<S> {
    /// The store to adapt. Required.
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    /// Clock used to resolve TTLs. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Finish, failing with [`CacheError::MissingDependency`] without a store.
    pub fn build(self) -> CacheResult<MemoryCacheProvider<S>> {
        let store = self.store.ok_or(CacheError::MissingDependency("store"))?;
        Ok(MemoryCacheProvider {
            store,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        })
    }
}
