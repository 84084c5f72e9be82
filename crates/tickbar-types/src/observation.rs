//! Quote observations delivered by a quote source.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Symbol;

/// A single timestamped last-price quote for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// The symbol this quote belongs to.
    pub symbol: Symbol,
    /// Time the quote was observed (UTC).
    pub timestamp: DateTime<Utc>,
    /// Last traded price.
    #[serde(alias = "last")]
    pub price: Decimal,
    /// Traded volume attached to this quote, if the source reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl Observation {
    /// Creates a new observation without volume.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>, timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            price,
            volume: None,
        }
    }

    /// Attaches a volume to the observation.
    #[must_use]
    pub const fn with_volume(mut self, volume: u64) -> Self {
        self.volume = Some(volume);
        self
    }
}
