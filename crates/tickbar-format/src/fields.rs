//! Field selection for each `BarSpec`.

use rust_decimal::Decimal;
use tickbar_aggregate::Bar;
use tickbar_types::{BarKind, BarSpec};

/// A single emitted bar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    Close,
    /// Summed volume.
    Volume,
}

impl Field {
    /// Returns the field name used in headers and JSON keys.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }

    /// Reads this field from a bar.
    #[must_use]
    pub fn value(&self, bar: &Bar) -> FieldValue {
        match self {
            Self::Open => FieldValue::Price(bar.open),
            Self::High => FieldValue::Price(bar.high),
            Self::Low => FieldValue::Price(bar.low),
            Self::Close => FieldValue::Price(bar.close),
            Self::Volume => FieldValue::Volume(bar.volume),
        }
    }
}

/// A field value ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// A price.
    Price(Decimal),
    /// A volume.
    Volume(u64),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Normalized so 12.50 and 12.5 render identically.
            Self::Price(price) => write!(f, "{}", price.normalize()),
            Self::Volume(volume) => write!(f, "{volume}"),
        }
    }
}

/// Returns the fields emitted for a `BarSpec`, in output order.
#[must_use]
pub const fn fields_for(spec: BarSpec) -> &'static [Field] {
    match (spec.kind, spec.volume) {
        (BarKind::Close, false) => &[Field::Close],
        (BarKind::Close, true) => &[Field::Close, Field::Volume],
        (BarKind::Ohlc, false) => &[Field::Open, Field::High, Field::Low, Field::Close],
        (BarKind::Ohlc, true) => &[
            Field::Open,
            Field::High,
            Field::Low,
            Field::Close,
            Field::Volume,
        ],
    }
}
