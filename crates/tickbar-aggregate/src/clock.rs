//! Epoch-aligned interval clock.

use chrono::{DateTime, Utc};
use tickbar_types::{IntervalKey, IntervalLength};

/// Returns the interval a timestamp falls into.
///
/// Intervals are aligned to the Unix epoch, so the same timestamp maps to
/// the same key across runs and across symbols regardless of when the
/// process started. Sub-second precision never moves a timestamp into the
/// next interval; timestamps before the epoch floor toward negative keys.
#[must_use]
pub fn interval_key(timestamp: DateTime<Utc>, length: IntervalLength) -> IntervalKey {
    IntervalKey::new(timestamp.timestamp().div_euclid(length.as_i64()))
}

/// Maps timestamps to interval keys for a fixed interval length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalClock {
    length: IntervalLength,
}

impl IntervalClock {
    /// Creates a clock for the given interval length.
    #[must_use]
    pub const fn new(length: IntervalLength) -> Self {
        Self { length }
    }

    /// Returns the key of the interval containing `timestamp`.
    #[must_use]
    pub fn key_for(&self, timestamp: DateTime<Utc>) -> IntervalKey {
        interval_key(timestamp, self.length)
    }
}

/// Returns the first instant of the interval, or `None` if it is outside
/// the representable date range.
pub(crate) fn start_of(key: IntervalKey, length: IntervalLength) -> Option<DateTime<Utc>> {
    key.index()
        .checked_mul(length.as_i64())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
