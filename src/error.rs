//! Error types for the cache provider and its backing stores.
//!
//! A cache miss is never an error. The provider itself only raises
//! [`CacheError::MissingDependency`] and [`CacheError::Cancelled`]; everything
//! else originates in a store and is handed back to the caller as-is.

use thiserror::Error;

/// The main error type for provider and store operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A required collaborator was not supplied at construction.
    #[error("missing required dependency: {0}")]
    MissingDependency(&'static str),

    /// The caller's cancellation token was already triggered.
    #[error("operation cancelled")]
    Cancelled,

    /// A failure inside the backing store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures raised by a [`CacheStore`](crate::CacheStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A lock guarding the store's entries was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// An error from a third-party store (serialization, connection, ...).
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap an arbitrary store error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Backend(Box::new(err))
    }
}

/// A specialized Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let err = CacheError::MissingDependency("store");
        assert_eq!(err.to_string(), "missing required dependency: store");

        assert_eq!(CacheError::Cancelled.to_string(), "operation cancelled");

        let err: CacheError = StoreError::LockPoisoned("entries".to_string()).into();
        assert_eq!(err.to_string(), "lock poisoned: entries");
    }

    #[test]
    fn test_backend_error_is_transparent() {
        let io_err = io::Error::new(io::ErrorKind::InvalidData, "bad payload");
        let err: CacheError = StoreError::backend(io_err).into();

        // Display passes straight through to the store's error.
        assert_eq!(err.to_string(), "bad payload");
        assert!(matches!(err, CacheError::Store(StoreError::Backend(_))));
    }
}
