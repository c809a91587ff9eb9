//! Cache entry with its expiration and access metadata.

use chrono::{DateTime, Utc};

use crate::clock::MAX_INSTANT;
use crate::expiration::Expiration;

/// A single cache entry containing the value and metadata.
///
/// Sliding entries measure their lifetime from `last_accessed`; absolute
/// entries ignore it.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    pub(crate) value: V,
    pub(crate) expiration: Expiration,
    pub(crate) last_accessed: DateTime<Utc>,
}

impl<V> Entry<V> {
    /// Create an entry written at `now`.
    pub fn new(value: V, expiration: Expiration, now: DateTime<Utc>) -> Self {
        Self {
            value,
            expiration,
            last_accessed: now,
        }
    }

    /// An entry is expired once `now` reaches its deadline. A deadline at
    /// `MAX_INSTANT` is never reached.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let deadline = self.expiration.deadline(self.last_accessed);
        deadline < MAX_INSTANT && now >= deadline
    }

    /// Record a successful read, restarting a sliding countdown.
    pub fn touch_at(&mut self, now: DateTime<Utc>) {
        if now > self.last_accessed {
            self.last_accessed = now;
        }
    }

    pub fn is_sliding(&self) -> bool {
        self.expiration.is_sliding()
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}
