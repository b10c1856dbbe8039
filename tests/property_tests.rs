//! Property-based tests for rate-counter using quickcheck.
//!
//! Rotation is driven manually so every property is deterministic.

use std::time::Duration;

use quickcheck_macros::quickcheck;
use rate_counter::{AtomicCounter, Count, PeriodRing, RateCounterConfig, WindowedRateCounter};

const MANUAL_QUANTILE: Duration = Duration::from_secs(3600);

fn manual_counter(period_count: u32) -> WindowedRateCounter {
    WindowedRateCounter::new(MANUAL_QUANTILE, MANUAL_QUANTILE * period_count)
        .expect("rotation thread should spawn")
}

fn wrapping_sum(values: &[Count]) -> Count {
    values.iter().fold(0, |acc: Count, v| acc.wrapping_add(*v))
}

#[quickcheck]
fn prop_atomic_counter_is_algebraic_sum(deltas: Vec<Count>) -> bool {
    let counter = AtomicCounter::new();
    for delta in &deltas {
        counter.incr(*delta);
    }
    counter.value() == wrapping_sum(&deltas)
}

#[quickcheck]
fn prop_rate_without_rotation_is_sum(deltas: Vec<i32>) -> bool {
    let counter = WindowedRateCounter::new(Duration::ZERO, Duration::ZERO).unwrap();
    for delta in &deltas {
        counter.incr(Count::from(*delta));
    }
    let expected: Count = deltas.iter().map(|d| Count::from(*d)).sum();
    counter.rate() == expected && counter.tail_rate() == 0 && counter.total_rate() == expected
}

#[quickcheck]
fn prop_ring_retains_latest_values(capacity: u8, values: Vec<Count>) -> bool {
    let capacity = usize::from(capacity % 16) + 1;
    let mut ring = PeriodRing::new(capacity);
    for v in &values {
        ring.push(*v);
    }

    let keep_from = values.len().saturating_sub(capacity);
    let expected = values.get(keep_from..).unwrap_or_default().to_vec();

    ring.fill_level() <= capacity
        && ring.fill_level() == values.len().min(capacity)
        && ring.snapshots() == expected
        && ring.sum() == wrapping_sum(&expected)
}

#[quickcheck]
fn prop_rotation_conserves_or_evicts(period_count: u8, periods: Vec<i16>) -> bool {
    let period_count = u32::from(period_count % 8) + 1;
    let counter = manual_counter(period_count);

    let mut archived: Vec<Count> = Vec::new();
    for value in &periods {
        counter.incr(Count::from(*value));
        let before_tail = counter.tail_rate();
        let live = counter.rate();
        counter.rotate();
        archived.push(live);

        let evicted = if archived.len() > period_count as usize {
            archived[archived.len() - 1 - period_count as usize]
        } else {
            0
        };
        if counter.rate() != 0 || counter.tail_rate() != before_tail + live - evicted {
            return false;
        }
    }
    counter.fill_level() <= period_count as usize
}

#[quickcheck]
fn prop_total_is_tail_plus_rate(before: Vec<i16>, after: Vec<i16>) -> bool {
    let counter = manual_counter(4);
    for v in &before {
        counter.incr(Count::from(*v));
    }
    counter.rotate();
    for v in &after {
        counter.incr(Count::from(*v));
    }
    counter.total_rate() == counter.tail_rate() + counter.rate()
}

#[quickcheck]
fn prop_short_tail_normalizes_to_quantile(quantile_ms: u16, tail_ms: u16) -> bool {
    let quantile = Duration::from_millis(u64::from(quantile_ms) + 1);
    let tail = Duration::from_millis(u64::from(tail_ms));
    let config = RateCounterConfig::new(quantile, tail);

    if tail < quantile {
        config.tail() == quantile && config.period_count() == 1
    } else {
        config.tail() == tail && config.period_count() >= 1
    }
}
