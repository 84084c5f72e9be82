//! NDJSON output format.

use rust_decimal::Decimal;
use serde::Serialize;
use tickbar_aggregate::Bar;
use tickbar_types::BarSpec;

use crate::formatter::interval_start;
use crate::{FormatError, Formatter};

/// Renders each bar as one JSON object per line.
///
/// Prices are encoded as decimal strings so that no precision is lost;
/// volume is an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonFormatter {
    spec: BarSpec,
    timestamps: bool,
}

/// Wire shape of one NDJSON bar.
#[derive(Serialize)]
struct BarRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    open: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    high: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    low: Option<Decimal>,
    close: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume: Option<u64>,
}

impl JsonFormatter {
    /// Creates a JSON formatter for the given bar field selection.
    #[must_use]
    pub const fn new(spec: BarSpec) -> Self {
        Self {
            spec,
            timestamps: false,
        }
    }

    /// Sets whether each object carries the interval start as `time`.
    #[must_use]
    pub const fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }
}

impl Formatter for JsonFormatter {
    fn render(&self, bar: &Bar) -> Result<String, FormatError> {
        let ohlc = self.spec.kind.is_ohlc();
        let record = BarRecord {
            time: if self.timestamps {
                Some(interval_start(bar)?)
            } else {
                None
            },
            open: ohlc.then(|| bar.open.normalize()),
            high: ohlc.then(|| bar.high.normalize()),
            low: ohlc.then(|| bar.low.normalize()),
            close: bar.close.normalize(),
            volume: self.spec.volume.then_some(bar.volume),
        };

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        Ok(line)
    }

    fn extension(&self) -> &str {
        "ndjson"
    }
}
