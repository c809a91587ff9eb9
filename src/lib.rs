//! # Memory Cache Provider
//!
//! A cache provider for resilience policies, backed by an in-process store
//! with per-entry sliding or absolute expiration.
//!
//! ## Features
//!
//! - **TTL resolution**: [`Ttl`] intents are turned into store [`Expiration`]s,
//!   clamped so they never pass the clock's [`MAX_INSTANT`]
//! - **Sync and async providers**: [`SyncCacheProvider`] and
//!   [`AsyncCacheProvider`], with cancellation checked before any work
//! - **Pluggable store**: anything implementing [`CacheStore`]; [`MemoryCache`]
//!   is included
//! - **Testable time**: inject a [`ManualClock`] instead of sleeping
//!
//! ## Quick Start
//!
//! ```rust
//! use memory_cache_provider::{MemoryCache, MemoryCacheProvider, SyncCacheProvider, Ttl};
//! use std::time::Duration;
//!
//! let store: MemoryCache<String> = MemoryCache::default();
//! let provider = MemoryCacheProvider::new(store.clone());
//!
//! provider
//!     .put("user:123", "Alice".to_string(), Ttl::new(Duration::from_secs(300)))
//!     .unwrap();
//!
//! if let Some(value) = provider.get("user:123").unwrap() {
//!     println!("Found: {}", value);
//! }
//!
//! // Reads keep a sliding entry alive.
//! provider
//!     .put("session:abc", "data".to_string(), Ttl::sliding(Duration::from_secs(60)))
//!     .unwrap();
//!
//! println!("Hit rate: {:.1}%", store.stats().hit_rate);
//! ```
//!
//! ## Async
//!
//! ```rust
//! use memory_cache_provider::{AsyncCacheProvider, MemoryCache, MemoryCacheProvider, Ttl};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), memory_cache_provider::CacheError> {
//! let provider = MemoryCacheProvider::new(MemoryCache::<u64>::default());
//! let token = CancellationToken::new();
//!
//! provider.put_async("answer", 42, Ttl::unbounded(), &token).await?;
//! assert_eq!(provider.get_async("answer", &token).await?, Some(42));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod expiration;
pub mod provider;
pub mod stats;
pub mod store;
pub mod ttl;

pub use cache::MemoryCache;
pub use clock::{Clock, ManualClock, SystemClock, MAX_INSTANT};
pub use config::CacheConfig;
pub use error::{CacheError, CacheResult, StoreError};
pub use expiration::{resolve, Expiration};
pub use provider::{AsyncCacheProvider, MemoryCacheProvider, ProviderBuilder, SyncCacheProvider};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;
pub use ttl::{Lifetime, Ttl};

// Internal modules - not part of public API
pub(crate) mod entry;
pub(crate) mod storage;
