use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, select, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace, warn};

use crate::config::RateCounterConfig;
use crate::counter::AtomicCounter;
use crate::error::{RateCounterError, RateCounterResult};
use crate::period_ring::PeriodRing;
use crate::types::Count;

/// Thread-safe sliding window rate counter.
///
/// Time is divided into periods of `quantile` length. Events are recorded into
/// a live [`AtomicCounter`]; a background thread wakes every `quantile`,
/// archives the live value into a bounded ring of historical periods and
/// resets the live counter. The ring keeps `tail / quantile` periods.
///
/// # Reads
///
/// - [`rate`](Self::rate) - events since the last rotation
/// - [`tail_rate`](Self::tail_rate) - events across the retained periods
/// - [`total_rate`](Self::total_rate) - both combined
///
/// # Concurrency
///
/// `incr`, `hit` and `rate` never take a lock. `tail_rate` takes a shared
/// read lock on the ring, which rotation holds exclusively while it archives
/// a period. Rotation reads the live value and then subtracts it rather than
/// swapping in zero, so an increment landing between the two steps may be
/// counted in either neighbouring period. The result is approximate by at most
/// one period's worth of boundary events.
///
/// # Lifecycle
///
/// The rotation thread runs until [`stop`](Self::stop) is called or the
/// counter is dropped. After stopping, the counter is inert: it can still be
/// incremented and read, but no further rotation happens.
///
/// # Example
///
/// ```rust
/// use rate_counter::WindowedRateCounter;
/// use std::time::Duration;
///
/// // One-second periods, ten seconds of history
/// let counter = WindowedRateCounter::new(Duration::from_secs(1), Duration::from_secs(10))?;
/// assert_eq!(counter.period_count(), 10);
///
/// counter.hit();
/// counter.incr(4);
/// assert_eq!(counter.rate(), 5);
///
/// counter.stop()?;
/// # Ok::<(), rate_counter::RateCounterError>(())
/// ```
#[derive(Debug)]
pub struct WindowedRateCounter {
    config: RateCounterConfig,
    shared: Arc<Shared>,
    rotation: Mutex<Option<RotationHandle>>,
}

/// State shared with the rotation thread.
#[derive(Debug)]
struct Shared {
    current: AtomicCounter,
    periods: RwLock<PeriodRing>,
}

/// Handles owned by the counter for its rotation thread.
#[derive(Debug)]
struct RotationHandle {
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl Shared {
    /// Archives the live period and starts a fresh one.
    fn rotate(&self) {
        let mut periods = self.periods.write();
        if periods.capacity() == 0 {
            return;
        }

        let value = self.current.value();
        self.current.incr(value.wrapping_neg());
        let evicted = periods.push(value);
        let fill_level = periods.fill_level();
        let cursor = periods.cursor();
        drop(periods);

        trace!(
            archived = value,
            evicted = ?evicted,
            fill_level,
            cursor,
            "rotated period"
        );
    }
}

impl WindowedRateCounter {
    /// Creates a counter with `quantile` long periods retaining `tail` of
    /// history, and starts its rotation thread.
    ///
    /// # Parameters
    ///
    /// * `quantile` - Period length. [`Duration::ZERO`] disables rotation: no
    ///   thread is started and [`rate`](Self::rate) counts forever.
    /// * `tail` - Retained history. Zero, or anything shorter than `quantile`,
    ///   means exactly one period.
    ///
    /// # Errors
    ///
    /// Returns [`RateCounterError::Spawn`] if the rotation thread cannot be
    /// spawned.
    pub fn new(quantile: Duration, tail: Duration) -> RateCounterResult<Self> {
        Self::from_config(RateCounterConfig::new(quantile, tail))
    }

    /// Creates a counter from a [`RateCounterConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`RateCounterError::Spawn`] if the rotation thread cannot be
    /// spawned.
    pub fn from_config(config: RateCounterConfig) -> RateCounterResult<Self> {
        let config = config.normalized();
        let shared = Arc::new(Shared {
            current: AtomicCounter::new(),
            periods: RwLock::new(PeriodRing::new(config.period_count())),
        });

        let rotation = if config.rotates() {
            Some(spawn_rotation(Arc::clone(&shared), &config)?)
        } else {
            None
        };

        Ok(WindowedRateCounter {
            config,
            shared,
            rotation: Mutex::new(rotation),
        })
    }

    /// Adds `delta` to the live period. `delta` may be negative.
    #[inline]
    pub fn incr(&self, delta: Count) {
        self.shared.current.incr(delta);
    }

    /// Records one event in the live period.
    #[inline]
    pub fn hit(&self) {
        self.incr(1);
    }

    /// Events recorded since the last rotation, or since construction if no
    /// rotation has happened yet.
    #[inline]
    pub fn rate(&self) -> Count {
        self.shared.current.value()
    }

    /// Sum of all retained historical periods. Excludes the live period.
    pub fn tail_rate(&self) -> Count {
        self.shared.periods.read().sum()
    }

    /// [`tail_rate`](Self::tail_rate) plus [`rate`](Self::rate).
    ///
    /// The two reads are independent. A rotation landing between them can
    /// count the boundary period twice or not at all.
    pub fn total_rate(&self) -> Count {
        self.tail_rate().wrapping_add(self.rate())
    }

    /// Retained historical periods ordered from oldest to newest.
    pub fn snapshots(&self) -> Vec<Count> {
        self.shared.periods.read().snapshots()
    }

    /// Number of historical periods archived so far, at most
    /// [`period_count`](Self::period_count).
    pub fn fill_level(&self) -> usize {
        self.shared.periods.read().fill_level()
    }

    /// Archives the live period immediately.
    ///
    /// This is the routine the rotation thread runs on every tick. It is a
    /// no-op for counters built with a zero quantile, which retain no history.
    pub fn rotate(&self) {
        self.shared.rotate();
    }

    /// Stops the rotation thread and waits for it to exit.
    ///
    /// Calling `stop` more than once is harmless: later calls return
    /// `Ok(())` without doing anything. Counters with a zero quantile have no
    /// thread and always return `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns [`RateCounterError::RotationPanicked`] if the rotation thread
    /// panicked.
    pub fn stop(&self) -> RateCounterResult<()> {
        let handle = self.rotation.lock().take();
        let Some(RotationHandle { stop_tx, thread }) = handle else {
            return Ok(());
        };

        // A full channel or a gone receiver both mean the thread is on its way out.
        let _ = stop_tx.try_send(());
        thread.join().map_err(|_| RateCounterError::RotationPanicked)
    }

    /// Name of the running rotation thread, if any.
    ///
    /// `None` once the counter is stopped or when rotation is disabled.
    pub fn rotation_thread_name(&self) -> Option<String> {
        self.rotation
            .lock()
            .as_ref()
            .and_then(|handle| handle.thread.thread().name().map(str::to_string))
    }

    /// Whether the rotation thread is still owned by this counter.
    pub fn is_rotating(&self) -> bool {
        self.rotation.lock().is_some()
    }

    /// Period length.
    #[inline]
    pub fn quantile(&self) -> Duration {
        self.config.quantile()
    }

    /// Retained history after coercion to at least one period.
    #[inline]
    pub fn tail(&self) -> Duration {
        self.config.tail()
    }

    /// Capacity of the history ring: `tail / quantile`, or zero without
    /// rotation.
    #[inline]
    pub fn period_count(&self) -> usize {
        self.config.period_count()
    }

    /// The normalized configuration this counter was built from.
    pub fn config(&self) -> &RateCounterConfig {
        &self.config
    }
}

impl fmt::Display for WindowedRateCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rate())
    }
}

impl Drop for WindowedRateCounter {
    fn drop(&mut self) {
        if self.rotation.get_mut().is_none() {
            return;
        }
        warn!(
            thread = self.config.thread_name(),
            "rate counter dropped while rotating, stopping rotation thread"
        );
        if let Err(e) = self.stop() {
            warn!(error = %e, "rotation thread did not stop cleanly");
        }
    }
}

fn spawn_rotation(
    shared: Arc<Shared>,
    config: &RateCounterConfig,
) -> RateCounterResult<RotationHandle> {
    let (stop_tx, stop_rx) = channel::bounded(1);
    let ticker = channel::tick(config.quantile());
    let quantile = config.quantile();
    let period_count = config.period_count();

    let thread = thread::Builder::new()
        .name(config.thread_name().to_string())
        .spawn(move || rotation_main(&shared, ticker, stop_rx, quantile, period_count))
        .map_err(RateCounterError::Spawn)?;

    Ok(RotationHandle { stop_tx, thread })
}

fn rotation_main(
    shared: &Shared,
    ticker: Receiver<Instant>,
    stop_rx: Receiver<()>,
    quantile: Duration,
    period_count: usize,
) {
    debug!(?quantile, period_count, "rotation thread started");

    loop {
        select! {
            recv(ticker) -> _ => shared.rotate(),
            // Disconnection counts as a stop request too.
            recv(stop_rx) -> _ => break,
        }
    }

    debug!(?quantile, period_count, "rotation thread stopped");
}
