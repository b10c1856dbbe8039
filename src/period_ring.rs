use crate::types::Count;

/// Bounded history of archived period values.
///
/// The ring grows lazily: nothing is reserved up front, so a huge capacity
/// costs nothing until rotations arrive. The first `capacity` archived values
/// are appended, after which the slot at `cursor` is overwritten and the
/// cursor advances.
/// Since the ring fills in order, the slot under the cursor always holds the
/// oldest value.
///
/// # Example
///
/// ```rust
/// use rate_counter::PeriodRing;
///
/// let mut ring = PeriodRing::new(3);
/// for v in 1..=5 {
///     ring.push(v);
/// }
/// assert_eq!(ring.snapshots(), vec![3, 4, 5]);
/// assert_eq!(ring.sum(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodRing {
    periods: Vec<Count>,
    capacity: usize,
    cursor: usize,
}

impl PeriodRing {
    /// Creates an empty ring holding at most `capacity` values.
    ///
    /// A zero capacity ring discards everything pushed into it.
    pub fn new(capacity: usize) -> Self {
        PeriodRing {
            periods: Vec::new(),
            capacity,
            cursor: 0,
        }
    }

    /// Archives `value`, evicting the oldest entry once the ring is full.
    ///
    /// Returns the evicted value, if any.
    pub fn push(&mut self, value: Count) -> Option<Count> {
        if self.capacity == 0 {
            return None;
        }
        if !self.is_full() {
            self.periods.push(value);
            return None;
        }
        let evicted = self
            .periods
            .get_mut(self.cursor)
            .map(|slot| std::mem::replace(slot, value));
        self.cursor = (self.cursor + 1) % self.capacity;
        evicted
    }

    /// Sum of all retained values, wrapping on overflow.
    pub fn sum(&self) -> Count {
        self.periods
            .iter()
            .fold(0, |total: Count, v| total.wrapping_add(*v))
    }

    /// Number of valid entries written so far. Saturates at the capacity.
    #[inline]
    pub fn fill_level(&self) -> usize {
        self.periods.len()
    }

    /// Maximum number of retained values.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of the next slot to overwrite once the ring is full.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether every slot holds a value.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.periods.len() == self.capacity
    }

    /// Retained values ordered from oldest to newest.
    pub fn snapshots(&self) -> Vec<Count> {
        let (newer, older) = self.periods.split_at(self.cursor);
        older.iter().chain(newer).copied().collect()
    }
}
