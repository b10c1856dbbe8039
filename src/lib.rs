//! A thread-safe sliding window rate counter.
//!
//! This library counts events over a recent span of time and reports the
//! count, refreshing the window automatically as time passes. It is meant for
//! approximate "events per interval" metrics such as requests per second,
//! recorded from many threads at once.
//!
//! # Quick Start
//!
//! ```rust
//! use rate_counter::WindowedRateCounter;
//! use std::time::Duration;
//!
//! // Rotate every second, keep a minute of history
//! let requests = WindowedRateCounter::new(Duration::from_secs(1), Duration::from_secs(60))?;
//!
//! requests.hit();
//! requests.hit();
//! println!("requests this second: {}", requests);
//! println!("requests this minute: {}", requests.total_rate());
//!
//! requests.stop()?;
//! # Ok::<(), rate_counter::RateCounterError>(())
//! ```
//!
//! # Counters
//!
//! ## [Atomic Counter](AtomicCounter)
//! A lock-free signed 64-bit counter with atomic add and read:
//! ```rust
//! # use rate_counter::AtomicCounter;
//! let counter = AtomicCounter::new();
//! counter.incr(3);
//! assert_eq!(counter.value(), 3);
//! ```
//!
//! ## [Windowed Rate Counter](WindowedRateCounter)
//! Buckets time into fixed periods and keeps a bounded tail of them:
//! ```rust
//! # use rate_counter::WindowedRateCounter;
//! # use std::time::Duration;
//! // Zero quantile: no rotation, a plain unbounded counter
//! let counter = WindowedRateCounter::new(Duration::ZERO, Duration::ZERO)?;
//! for _ in 0..10 {
//!     counter.hit();
//! }
//! assert_eq!(counter.rate(), 10);
//! assert_eq!(counter.tail_rate(), 0);
//! assert_eq!(counter.total_rate(), 10);
//! # Ok::<(), rate_counter::RateCounterError>(())
//! ```
//!
//! # Core Concepts
//!
//! ## Periods and Tail
//! A *period* is one `quantile` long bucket. The *tail* is the retained
//! history, made of `tail / quantile` periods. A background thread *rotates*
//! on every period boundary: the live count is archived into the tail and the
//! live counter starts again from zero.
//!
//! ## Approximation
//! Rotation is driven by a timer, not by event timestamps, and it reads the
//! live value before subtracting it. Events racing with a rotation may land in
//! either neighbouring period. The counter trades exactness for lock-free
//! recording.
//!
//! ## Error Handling
//! Counting never fails. Only the rotation thread lifecycle can report a
//! [`RateCounterError`]:
//! - **[`Spawn`](RateCounterError::Spawn)** - the thread could not be started
//! - **[`RotationPanicked`](RateCounterError::RotationPanicked)** - the thread
//!   panicked before `stop` joined it
//!
//! ## Logging
//! The rotation thread emits [`tracing`] events: `debug` on start and stop,
//! `trace` on every rotation. No subscriber is installed by this crate.

pub mod config;
pub mod counter;
pub mod counter_core;
pub mod error;
pub mod period_ring;
pub mod prelude;
pub mod types;
pub mod windowed;

pub use config::{RateCounterConfig, DEFAULT_THREAD_NAME};
pub use counter::AtomicCounter;
pub use counter_core::CounterCore;
pub use error::{RateCounterError, RateCounterResult};
pub use period_ring::PeriodRing;
pub use types::{AtomicCount, Count};
pub use windowed::WindowedRateCounter;
