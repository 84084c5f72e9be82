//! Output format abstraction.

use tickbar_aggregate::Bar;
use tickbar_types::BarSpec;
use thiserror::Error;

use crate::{CsvFormatter, JsonFormatter, TupleFormatter};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Numeric tuple, one per line.
    #[default]
    Tuple,
    /// Comma-separated fields.
    Csv,
    /// Newline-delimited JSON.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Tuple => "bars",
            Self::Csv => "csv",
            Self::Ndjson => "ndjson",
        }
    }

    /// Builds a formatter of this format for the given bar field selection.
    #[must_use]
    pub fn formatter(&self, spec: BarSpec, timestamps: bool) -> Box<dyn Formatter> {
        match self {
            Self::Tuple => Box::new(TupleFormatter::new(spec).with_timestamps(timestamps)),
            Self::Csv => Box::new(CsvFormatter::new(spec).with_timestamps(timestamps)),
            Self::Ndjson => Box::new(JsonFormatter::new(spec).with_timestamps(timestamps)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Tuple => "tuple",
            Self::Csv => "csv",
            Self::Ndjson => "ndjson",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tuple" | "bars" => Ok(Self::Tuple),
            "csv" => Ok(Self::Csv),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// The bar's interval start is outside the representable date range.
    #[error("Interval {0} has no representable start time")]
    UnrepresentableTime(i64),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a field into the line failed.
    #[error("Failed to render bar: {0}")]
    Render(#[from] std::fmt::Error),
}

/// Trait for bar renderers.
pub trait Formatter: Send + Sync + std::fmt::Debug {
    /// Renders one bar as a single newline-terminated line.
    ///
    /// # Errors
    ///
    /// Returns an error if the bar cannot be encoded.
    fn render(&self, bar: &Bar) -> Result<String, FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

/// Formats the interval start of a bar for a leading timestamp column.
pub(crate) fn interval_start(bar: &Bar) -> Result<String, FormatError> {
    bar.start()
        .map(|start| start.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .ok_or_else(|| FormatError::UnrepresentableTime(bar.interval_key.index()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use rust_decimal::Decimal;
    use tickbar_aggregate::Bar;
    use tickbar_types::{IntervalKey, IntervalLength, Symbol};

    /// Bar for 2024-01-15 14:30:00 UTC with o/h/l/c 10/12.5/9.75/11 and volume 1500.
    pub(crate) fn sample_bar() -> Bar {
        Bar {
            symbol: Symbol::new("SPY"),
            interval_key: IntervalKey::new(1_705_329_000 / 60),
            length: IntervalLength::new(60).unwrap(),
            open: Decimal::new(1000, 2),
            high: Decimal::new(125, 1),
            low: Decimal::new(975, 2),
            close: Decimal::new(11, 0),
            volume: 1500,
            observations: 6,
        }
    }
}
