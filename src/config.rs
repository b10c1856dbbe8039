//! Construction parameters for [`WindowedRateCounter`](crate::WindowedRateCounter).

use std::time::Duration;

/// Default name given to the background rotation thread.
pub const DEFAULT_THREAD_NAME: &str = "rate-counter-rotation";

/// Configuration for a windowed rate counter.
///
/// # Parameters
///
/// * `quantile` - Length of one period. [`Duration::ZERO`] disables rotation
///   entirely and turns the counter into a plain unbounded counter.
/// * `tail` - Amount of history to retain. A zero tail, or one shorter than
///   `quantile`, is treated as exactly one period.
/// * `thread_name` - Name of the rotation thread, visible in debuggers and
///   panic messages.
///
/// Negative durations cannot be expressed with [`Duration`], so there is no
/// validation step.
///
/// # Example
///
/// ```rust
/// use rate_counter::RateCounterConfig;
/// use std::time::Duration;
///
/// let config = RateCounterConfig::new(Duration::from_secs(1), Duration::from_millis(500));
/// assert_eq!(config.tail(), Duration::from_secs(1));
/// assert_eq!(config.period_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateCounterConfig {
    quantile: Duration,
    tail: Duration,
    #[cfg_attr(feature = "serde", serde(default = "default_thread_name"))]
    thread_name: String,
}

#[cfg(feature = "serde")]
fn default_thread_name() -> String {
    DEFAULT_THREAD_NAME.to_string()
}

impl RateCounterConfig {
    /// Creates a configuration for the given period length and history span.
    pub fn new(quantile: Duration, tail: Duration) -> Self {
        RateCounterConfig {
            quantile,
            tail,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }

    /// Sets the name of the rotation thread.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Returns a copy with the tail coerced to at least one period.
    ///
    /// Configurations that went through serde may carry a raw tail, so every
    /// accessor below goes through the same coercion.
    #[must_use]
    pub fn normalized(&self) -> Self {
        RateCounterConfig {
            quantile: self.quantile,
            tail: self.tail(),
            thread_name: self.thread_name.clone(),
        }
    }

    /// Length of one period.
    #[inline]
    pub fn quantile(&self) -> Duration {
        self.quantile
    }

    /// Retained history, never shorter than [`quantile`](Self::quantile).
    #[inline]
    pub fn tail(&self) -> Duration {
        if self.tail.is_zero() || self.tail < self.quantile {
            self.quantile
        } else {
            self.tail
        }
    }

    /// Name of the rotation thread.
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// Whether a background rotation thread is needed.
    #[inline]
    pub fn rotates(&self) -> bool {
        !self.quantile.is_zero()
    }

    /// Number of historical periods retained: `tail / quantile`, truncated.
    ///
    /// Zero when rotation is disabled, at least one otherwise.
    pub fn period_count(&self) -> usize {
        if !self.rotates() {
            return 0;
        }
        let count = self.tail().as_nanos() / self.quantile.as_nanos();
        usize::try_from(count).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tail_becomes_one_period() {
        let config = RateCounterConfig::new(Duration::from_millis(100), Duration::ZERO);
        assert_eq!(config.tail(), Duration::from_millis(100));
        assert_eq!(config.period_count(), 1);
    }

    #[test]
    fn short_tail_matches_equal_tail() {
        let short = RateCounterConfig::new(Duration::from_secs(2), Duration::from_secs(1));
        let equal = RateCounterConfig::new(Duration::from_secs(2), Duration::from_secs(2));
        assert_eq!(short.normalized(), equal.normalized());
        assert_eq!(short.period_count(), equal.period_count());
    }

    #[test]
    fn period_count_truncates() {
        let config = RateCounterConfig::new(Duration::from_secs(2), Duration::from_secs(7));
        assert_eq!(config.period_count(), 3);
    }

    #[test]
    fn zero_quantile_has_no_periods() {
        let config = RateCounterConfig::new(Duration::ZERO, Duration::from_secs(10));
        assert!(!config.rotates());
        assert_eq!(config.period_count(), 0);
    }

    #[test]
    fn thread_name_defaults_and_overrides() {
        let config = RateCounterConfig::new(Duration::from_secs(1), Duration::ZERO);
        assert_eq!(config.thread_name(), DEFAULT_THREAD_NAME);
        let config = config.with_thread_name("http-rps");
        assert_eq!(config.thread_name(), "http-rps");
    }
}
