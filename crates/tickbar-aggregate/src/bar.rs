//! Finalized bar data structure.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tickbar_types::{IntervalKey, IntervalLength, Symbol};

/// A finalized bar for one symbol over one interval.
///
/// Bars are immutable snapshots: they are created when an interval closes,
/// handed to the sink, and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Symbol the bar belongs to.
    pub symbol: Symbol,
    /// Interval the bar covers.
    pub interval_key: IntervalKey,
    /// Length of the interval.
    pub length: IntervalLength,
    /// First price observed in the interval.
    pub open: Decimal,
    /// Highest price observed in the interval.
    pub high: Decimal,
    /// Lowest price observed in the interval.
    pub low: Decimal,
    /// Last price observed in the interval.
    pub close: Decimal,
    /// Sum of reported volumes (0 when the source reports none).
    pub volume: u64,
    /// Number of observations folded into the bar.
    pub observations: u32,
}

impl Bar {
    /// Returns the first instant of the bar's interval.
    #[must_use]
    pub fn start(&self) -> Option<DateTime<Utc>> {
        crate::clock::start_of(self.interval_key, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_start() {
        let length = IntervalLength::new(60).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap();
        let bar = Bar {
            symbol: Symbol::new("SPY"),
            interval_key: IntervalKey::new(start.timestamp() / 60),
            length,
            open: Decimal::new(100, 0),
            high: Decimal::new(105, 0),
            low: Decimal::new(99, 0),
            close: Decimal::new(101, 0),
            volume: 0,
            observations: 4,
        };

        assert_eq!(bar.start(), Some(start));
    }
}
