//! Integration tests for the cache provider.

use bytes::Bytes;
use memory_cache_provider::{
    AsyncCacheProvider, CacheConfig, CacheError, ManualClock, MemoryCache, MemoryCacheProvider,
    SyncCacheProvider, Ttl,
};
use std::fmt::Debug;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const OPERATION_KEY: &str = "SomeOperationKey";

fn provider<V>() -> MemoryCacheProvider<MemoryCache<V>>
where
    V: Clone + Send + Sync + 'static,
{
    MemoryCacheProvider::new(MemoryCache::default())
}

#[test]
fn test_round_trip_then_expiry_with_manual_clock() {
    let clock = ManualClock::default();
    let store = MemoryCache::<i32>::with_clock(CacheConfig::default(), Arc::new(clock.clone()));
    let provider = MemoryCacheProvider::builder()
        .store(store)
        .clock(Arc::new(clock.clone()))
        .build()
        .unwrap();

    provider.put("k", 42, Ttl::new(Duration::from_secs(10))).unwrap();
    assert_eq!(provider.get("k").unwrap(), Some(42));

    clock.advance(Duration::from_secs(11));
    assert_eq!(provider.get("k").unwrap(), None);
}

#[test]
fn test_nonsliding_ttl_expires_in_real_time() {
    let provider = provider::<String>();
    let shim = Duration::from_millis(100);

    provider.put("expiring", "value".to_string(), Ttl::new(shim)).unwrap();
    assert!(provider.get("expiring").unwrap().is_some());

    thread::sleep(shim * 2);
    assert!(provider.get("expiring").unwrap().is_none());
}

#[test]
fn test_minimal_ttl_expires() {
    let provider = provider::<String>();

    provider
        .put("anything", "value".to_string(), Ttl::new(Duration::from_millis(1)))
        .unwrap();
    provider
        .put("sliding", "value".to_string(), Ttl::sliding(Duration::from_millis(1)))
        .unwrap();

    thread::sleep(Duration::from_millis(10));
    assert!(provider.get("anything").unwrap().is_none());
    assert!(provider.get("sliding").unwrap().is_none());
}

#[test]
fn test_sliding_ttl_survives_repeated_access_in_real_time() {
    let provider = provider::<String>();
    let shim = Duration::from_millis(100);

    // Lives for 3x shim without access; read every shim for 8x shim.
    provider
        .put("sliding", "value".to_string(), Ttl::sliding(shim * 3))
        .unwrap();

    for i in 0..8 {
        assert_eq!(
            provider.get("sliding").unwrap().as_deref(),
            Some("value"),
            "at iteration {i}"
        );
        thread::sleep(shim);
    }
}

#[test]
fn test_max_value_ttls_round_trip() {
    let provider = provider::<String>();

    provider
        .put("absolute", "a".to_string(), Ttl::new(Duration::MAX))
        .unwrap();
    provider
        .put("sliding", "s".to_string(), Ttl::sliding(Duration::MAX))
        .unwrap();
    provider.put("unbounded", "u".to_string(), Ttl::unbounded()).unwrap();

    assert_eq!(provider.get("absolute").unwrap().as_deref(), Some("a"));
    assert_eq!(provider.get("sliding").unwrap().as_deref(), Some("s"));
    assert_eq!(provider.get("unbounded").unwrap().as_deref(), Some("u"));
}

#[test]
fn test_construction() {
    let missing = MemoryCacheProvider::<MemoryCache<String>>::builder().build();
    assert!(matches!(missing, Err(CacheError::MissingDependency(_))));

    let built = MemoryCacheProvider::builder()
        .store(MemoryCache::<String>::default())
        .build();
    assert!(built.is_ok());
}

fn assert_sync_round_trip<V>(value: V)
where
    V: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    let provider = provider::<V>();

    assert_eq!(provider.get(OPERATION_KEY).unwrap(), None);

    provider
        .put(OPERATION_KEY, value.clone(), Ttl::new(Duration::from_secs(3600)))
        .unwrap();
    assert_eq!(provider.get(OPERATION_KEY).unwrap(), Some(value));
}

async fn assert_async_round_trip<V>(value: V)
where
    V: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    let provider = provider::<V>();
    let token = CancellationToken::new();

    assert_eq!(provider.get_async(OPERATION_KEY, &token).await.unwrap(), None);

    provider
        .put_async(
            OPERATION_KEY,
            value.clone(),
            Ttl::new(Duration::from_secs(3600)),
            &token,
        )
        .await
        .unwrap();
    assert_eq!(
        provider.get_async(OPERATION_KEY, &token).await.unwrap(),
        Some(value)
    );
}

#[derive(Debug, Clone, PartialEq, Default)]
struct SampleClass {
    string_property: String,
    int_property: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SampleEnum {
    FirstValue,
    SecondValue,
}

#[test]
fn test_sync_round_trip_of_value_kinds() {
    assert_sync_round_trip(SampleClass::default());
    assert_sync_round_trip(SampleClass {
        string_property: "<html></html>".to_string(),
        int_property: 1,
    });
    assert_sync_round_trip::<Option<SampleClass>>(None);

    for s in ["some string", "", "null"] {
        assert_sync_round_trip(s.to_string());
    }
    assert_sync_round_trip::<Option<String>>(None);

    for n in [-1, 0, 1] {
        assert_sync_round_trip(n);
    }
    for e in [SampleEnum::FirstValue, SampleEnum::SecondValue] {
        assert_sync_round_trip(e);
    }
    for b in [true, false] {
        assert_sync_round_trip(b);
    }
    for b in [Some(true), Some(false), None] {
        assert_sync_round_trip(b);
    }
}

#[tokio::test]
async fn test_async_round_trip_of_value_kinds() {
    assert_async_round_trip(SampleClass {
        string_property: "<html></html>".to_string(),
        int_property: 1,
    })
    .await;
    assert_async_round_trip::<Option<SampleClass>>(None).await;
    assert_async_round_trip(String::new()).await;
    assert_async_round_trip(-1).await;
    assert_async_round_trip(SampleEnum::SecondValue).await;
    assert_async_round_trip(false).await;
    assert_async_round_trip::<Option<bool>>(None).await;
}

#[tokio::test]
async fn test_cancelled_calls_do_not_touch_store() {
    let store: MemoryCache<u32> = MemoryCache::default();
    let provider = MemoryCacheProvider::new(store.clone());
    let token = CancellationToken::new();
    token.cancel();

    let put = provider.put_async("k", 1, Ttl::unbounded(), &token).await;
    assert!(matches!(put, Err(CacheError::Cancelled)));
    let get = provider.get_async("k", &token).await;
    assert!(matches!(get, Err(CacheError::Cancelled)));

    assert!(store.is_empty().unwrap());
    let stats = store.stats();
    assert_eq!(stats.writes, 0);
    assert_eq!(stats.hits + stats.misses, 0);
}

#[test]
fn test_concurrent_providers_share_store() {
    let store: MemoryCache<String> = MemoryCache::default();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let provider = MemoryCacheProvider::new(store.clone());
            thread::spawn(move || {
                for i in 0..500 {
                    let key = format!("thread_{}_key_{}", t, i);
                    provider
                        .put(&key, format!("value_{}", i), Ttl::sliding(Duration::from_secs(60)))
                        .unwrap();
                    assert!(provider.get(&key).unwrap().is_some());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(store.len().unwrap(), 4000);
}

#[test]
fn test_binary_values() {
    let provider = MemoryCacheProvider::new(MemoryCache::<Bytes>::default());

    let binary_data: Vec<u8> = vec![0, 1, 2, 255, 254, 253];
    provider
        .put("binary", Bytes::from(binary_data.clone()), Ttl::unbounded())
        .unwrap();

    let retrieved = provider.get("binary").unwrap();
    assert_eq!(&retrieved.unwrap()[..], &binary_data[..]);
}
