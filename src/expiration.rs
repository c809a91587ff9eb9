//! Resolving a [`Ttl`] into a concrete instruction for the store.
//!
//! The store's clock is bounded by [`MAX_INSTANT`], so every resolved span or
//! instant is clamped to the time remaining before that bound. Clamping with
//! `min(duration, MAX_INSTANT - now)` handles bounded and unbounded intents
//! with one rule and keeps `now + duration` from overflowing.

use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

use crate::clock::MAX_INSTANT;
use crate::ttl::{Lifetime, Ttl};

/// Expiration instruction handed to a [`CacheStore`](crate::CacheStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expiration {
    /// Expire this long after the most recent successful read (or the write).
    Sliding(Duration),
    /// Expire at this instant regardless of reads.
    /// `Absolute(MAX_INSTANT)` means the entry does not expire on time.
    Absolute(DateTime<Utc>),
}

impl Expiration {
    /// An absolute expiration that never fires.
    pub const NEVER: Expiration = Expiration::Absolute(MAX_INSTANT);

    pub fn is_sliding(&self) -> bool {
        matches!(self, Expiration::Sliding(_))
    }

    /// The instant after which an entry last touched at `last_accessed` is
    /// expired. Saturates at [`MAX_INSTANT`].
    pub fn deadline(&self, last_accessed: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Expiration::Absolute(at) => at,
            Expiration::Sliding(span) => add_clamped(last_accessed, span),
        }
    }
}

/// Resolve `ttl` against `now`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use memory_cache_provider::{resolve, Expiration, Ttl, MAX_INSTANT};
/// use std::time::Duration;
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
///
/// let sliding = resolve(&Ttl::sliding(Duration::from_secs(30)), now);
/// assert_eq!(sliding, Expiration::Sliding(Duration::from_secs(30)));
///
/// let forever = resolve(&Ttl::unbounded(), now);
/// assert_eq!(forever, Expiration::Absolute(MAX_INSTANT));
/// ```
pub fn resolve(ttl: &Ttl, now: DateTime<Utc>) -> Expiration {
    let remaining = remaining_until_max(now);

    match (ttl.lifetime(), ttl.is_sliding()) {
        (Lifetime::Finite(duration), true) => Expiration::Sliding(duration.min(remaining)),
        (Lifetime::Unbounded, true) => Expiration::Sliding(remaining),
        (Lifetime::Unbounded, false) => Expiration::Absolute(MAX_INSTANT),
        (Lifetime::Finite(duration), false) => {
            Expiration::Absolute(add_clamped(now, duration.min(remaining)))
        }
    }
}

/// `MAX_INSTANT - now`, or zero once `now` has reached the bound.
fn remaining_until_max(now: DateTime<Utc>) -> Duration {
    MAX_INSTANT
        .signed_duration_since(now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

fn add_clamped(at: DateTime<Utc>, span: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(span)
        .ok()
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(MAX_INSTANT)
}
