//! Convenience re-exports.
//!
//! ```rust
//! use rate_counter::prelude::*;
//! ```

pub use crate::config::RateCounterConfig;
pub use crate::counter::AtomicCounter;
pub use crate::counter_core::CounterCore;
pub use crate::error::{RateCounterError, RateCounterResult};
pub use crate::types::Count;
pub use crate::windowed::WindowedRateCounter;
