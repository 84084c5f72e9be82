//! Benchmark utilities for tickbar.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use tickbar_lib::{Observation, Symbol};

/// Shape of a synthetic quote stream.
#[derive(Debug, Clone)]
pub struct QuoteStream {
    /// Number of distinct symbols, quoted round-robin.
    pub symbols: usize,
    /// Total number of quotes.
    pub quotes: usize,
    /// Time between consecutive quotes in milliseconds.
    pub step_millis: i64,
}

impl QuoteStream {
    /// Symbol names `SYM0`, `SYM1`, ...
    pub fn symbol_names(&self) -> Vec<String> {
        (0..self.symbols).map(|i| format!("SYM{i}")).collect()
    }

    /// Generates the quotes in timestamp order.
    ///
    /// Prices walk up and down by one cent around 100.00 so every bar has a
    /// distinct high and low.
    pub fn generate(&self) -> Vec<Observation> {
        let symbols: Vec<Symbol> = self.symbol_names().into_iter().map(Symbol::from).collect();
        let start = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(19_737);

        (0..self.quotes)
            .map(|i| {
                let symbol = symbols[i % symbols.len()].clone();
                let offset = i64::try_from(i).unwrap_or(i64::MAX);
                let timestamp = start + TimeDelta::milliseconds(offset * self.step_millis);
                let cents = 10_000 + (offset % 40) - 20;
                Observation::new(symbol, timestamp, Decimal::new(cents, 2))
                    .with_volume((offset % 7 + 1).unsigned_abs())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_ordered_round_robin() {
        let stream = QuoteStream {
            symbols: 3,
            quotes: 9,
            step_millis: 250,
        };
        let quotes = stream.generate();
        assert_eq!(quotes.len(), 9);
        assert_eq!(quotes[0].symbol.as_str(), "SYM0");
        assert_eq!(quotes[4].symbol.as_str(), "SYM1");
        assert!(quotes.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }
}
