//! Bar field selection.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Price fields carried by a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BarKind {
    /// Close price only.
    #[default]
    Close,
    /// Open, high, low and close.
    Ohlc,
}

impl BarKind {
    /// Returns true for open/high/low/close bars.
    #[must_use]
    pub const fn is_ohlc(&self) -> bool {
        matches!(self, Self::Ohlc)
    }
}

/// Full field selection of a bar: price kind plus optional volume.
///
/// Resolved once at startup; the four combinations map to the interval-type
/// tags `C`, `CV`, `OHLC` and `OHLCV` used in output file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct BarSpec {
    /// Price fields.
    pub kind: BarKind,
    /// Whether volume is aggregated and emitted.
    pub volume: bool,
}

impl BarSpec {
    /// Creates a new bar field selection.
    #[must_use]
    pub const fn new(kind: BarKind, volume: bool) -> Self {
        Self { kind, volume }
    }

    /// Close-only bars without volume.
    #[must_use]
    pub const fn close() -> Self {
        Self::new(BarKind::Close, false)
    }

    /// OHLC bars without volume.
    #[must_use]
    pub const fn ohlc() -> Self {
        Self::new(BarKind::Ohlc, false)
    }

    /// Enables or disables volume.
    #[must_use]
    pub const fn with_volume(mut self, volume: bool) -> Self {
        self.volume = volume;
        self
    }

    /// Returns the interval-type tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match (self.kind, self.volume) {
            (BarKind::Close, false) => "C",
            (BarKind::Close, true) => "CV",
            (BarKind::Ohlc, false) => "OHLC",
            (BarKind::Ohlc, true) => "OHLCV",
        }
    }
}

impl std::fmt::Display for BarSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for BarSpec {
    type Err = BarSpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "C" => Ok(Self::new(BarKind::Close, false)),
            "CV" => Ok(Self::new(BarKind::Close, true)),
            "OHLC" => Ok(Self::new(BarKind::Ohlc, false)),
            "OHLCV" => Ok(Self::new(BarKind::Ohlc, true)),
            _ => Err(BarSpecParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid interval-type tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid interval type '{0}', expected one of: C, CV, OHLC, OHLCV")]
pub struct BarSpecParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        assert_eq!(BarSpec::close().tag(), "C");
        assert_eq!(BarSpec::close().with_volume(true).tag(), "CV");
        assert_eq!(BarSpec::ohlc().tag(), "OHLC");
        assert_eq!(BarSpec::ohlc().with_volume(true).tag(), "OHLCV");
    }

    #[test]
    fn test_parse_tag() {
        let specs = [
            BarSpec::close(),
            BarSpec::close().with_volume(true),
            BarSpec::ohlc(),
            BarSpec::ohlc().with_volume(true),
        ];
        for spec in specs {
            assert_eq!(spec.tag().parse::<BarSpec>().unwrap(), spec);
        }
        assert_eq!("ohlcv".parse::<BarSpec>().unwrap(), BarSpec::ohlc().with_volume(true));

        let err = "hlc".parse::<BarSpec>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid interval type 'hlc', expected one of: C, CV, OHLC, OHLCV"
        );
    }
}
