use std::fmt;
use std::sync::atomic::Ordering;

use crate::types::{AtomicCount, Count};

/// A lock-free signed counter.
///
/// `AtomicCounter` is the leaf of the crate: a single [`Count`] that can be
/// adjusted and read from any number of threads without external locking.
/// It is used as the live period of a
/// [`WindowedRateCounter`](crate::WindowedRateCounter), but is also useful on
/// its own.
///
/// # Atomicity
///
/// Every `incr` is a single atomic fetch-add and every `value` a single atomic
/// load, so no reader ever observes a partially applied add. Both use
/// `Ordering::Relaxed`: the counter makes no happens-before promise about any
/// other memory.
///
/// # Overflow
///
/// Additions wrap using two's-complement arithmetic. Overflow is neither
/// detected nor reported.
///
/// # Example
///
/// ```rust
/// use rate_counter::AtomicCounter;
///
/// let counter = AtomicCounter::new();
/// counter.incr(5);
/// counter.incr(-2);
/// assert_eq!(counter.value(), 3);
/// assert_eq!(counter.to_string(), "3");
/// ```
#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicCount,
}

impl AtomicCounter {
    /// Creates a counter starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_value(0)
    }

    /// Creates a counter starting at `value`.
    #[must_use]
    pub const fn with_value(value: Count) -> Self {
        AtomicCounter {
            value: AtomicCount::new(value),
        }
    }

    /// Atomically adds `delta` to the stored value.
    ///
    /// `delta` may be negative. The addition wraps on overflow.
    #[inline]
    pub fn incr(&self, delta: Count) {
        self.value.fetch_add(delta, Ordering::Relaxed);
    }

    /// Atomically reads the stored value.
    #[inline]
    pub fn value(&self) -> Count {
        self.value.load(Ordering::Relaxed)
    }
}

impl fmt::Display for AtomicCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
