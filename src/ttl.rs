//! Time-to-live intents handed to a cache provider.

use std::time::Duration;

/// How long an entry should live.
///
/// `Unbounded` is its own variant rather than `Duration::MAX`, so it can never
/// leak into clock arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// A concrete, non-negative span.
    Finite(Duration),
    /// Never expire based on time.
    Unbounded,
}

/// A logical expiration intent: a lifetime plus whether reads extend it.
///
/// ```
/// use memory_cache_provider::Ttl;
/// use std::time::Duration;
///
/// let absolute = Ttl::new(Duration::from_secs(300));
/// assert!(!absolute.is_sliding());
///
/// let sliding = Ttl::sliding(Duration::from_secs(60));
/// assert!(sliding.is_sliding());
///
/// assert!(Ttl::unbounded().is_unbounded());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ttl {
    lifetime: Lifetime,
    sliding: bool,
}

impl Ttl {
    /// An absolute TTL: the entry expires `duration` after it is written.
    pub const fn new(duration: Duration) -> Self {
        Self {
            lifetime: Lifetime::Finite(duration),
            sliding: false,
        }
    }

    /// A sliding TTL: the countdown restarts on every successful read.
    pub const fn sliding(duration: Duration) -> Self {
        Self {
            lifetime: Lifetime::Finite(duration),
            sliding: true,
        }
    }

    /// An absolute TTL that never expires.
    pub const fn unbounded() -> Self {
        Self {
            lifetime: Lifetime::Unbounded,
            sliding: false,
        }
    }

    /// A sliding TTL with the longest span the clock can express.
    pub const fn unbounded_sliding() -> Self {
        Self {
            lifetime: Lifetime::Unbounded,
            sliding: true,
        }
    }

    /// Switch between sliding and absolute semantics.
    pub const fn with_sliding(mut self, sliding: bool) -> Self {
        self.sliding = sliding;
        self
    }

    /// The requested lifetime.
    pub const fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Whether reads restart the countdown.
    pub const fn is_sliding(&self) -> bool {
        self.sliding
    }

    /// Whether the lifetime is [`Lifetime::Unbounded`].
    pub const fn is_unbounded(&self) -> bool {
        matches!(self.lifetime, Lifetime::Unbounded)
    }
}

impl From<Duration> for Ttl {
    fn from(duration: Duration) -> Self {
        Ttl::new(duration)
    }
}
