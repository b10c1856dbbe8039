//! Integer type aliases for counter values.
//!
//! Every count in this crate is a signed 64-bit integer. Deltas may be
//! negative, and arithmetic wraps on overflow (two's-complement) rather than
//! panicking or saturating.

use std::sync::atomic::AtomicI64;

/// Alias for the signed integer type used for counts and deltas.
///
/// Signed so that [`incr`](crate::AtomicCounter::incr) accepts negative
/// deltas and so that rotation can subtract the archived value from the live
/// counter.
pub type Count = i64;

/// Atomic storage matching [`Count`].
pub type AtomicCount = AtomicI64;
