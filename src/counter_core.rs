//! Core trait for counters.
//!
//! This module defines the unified trait implemented by the plain
//! [`AtomicCounter`] and the [`WindowedRateCounter`]. It lets callers record
//! events without caring whether the counter rotates.

pub use crate::types::Count;
use crate::{AtomicCounter, WindowedRateCounter};

/// The core trait implemented by every counter in this crate.
///
/// Implementors must be safe to share between threads: recording and reading
/// take `&self`.
///
/// # Example
///
/// ```rust
/// use rate_counter::{AtomicCounter, CounterCore, WindowedRateCounter};
/// use std::time::Duration;
///
/// fn record_request(counter: &dyn CounterCore) {
///     counter.hit();
/// }
///
/// let plain = AtomicCounter::new();
/// let windowed = WindowedRateCounter::new(Duration::ZERO, Duration::ZERO)?;
/// record_request(&plain);
/// record_request(&windowed);
/// assert_eq!(plain.rate(), 1);
/// assert_eq!(windowed.rate(), 1);
/// # Ok::<(), rate_counter::RateCounterError>(())
/// ```
pub trait CounterCore: Send + Sync {
    /// Adds `delta` (which may be negative) to the live count.
    fn incr(&self, delta: Count);

    /// Records a single event. Equivalent to `incr(1)`.
    fn hit(&self) {
        self.incr(1);
    }

    /// Returns the live count.
    ///
    /// For a windowed counter this is the count accumulated since the last
    /// rotation; for a plain counter it is the count since construction.
    fn rate(&self) -> Count;
}

impl CounterCore for AtomicCounter {
    #[inline]
    fn incr(&self, delta: Count) {
        AtomicCounter::incr(self, delta);
    }

    #[inline]
    fn rate(&self) -> Count {
        self.value()
    }
}

impl CounterCore for WindowedRateCounter {
    #[inline]
    fn incr(&self, delta: Count) {
        WindowedRateCounter::incr(self, delta);
    }

    #[inline]
    fn rate(&self) -> Count {
        WindowedRateCounter::rate(self)
    }
}
