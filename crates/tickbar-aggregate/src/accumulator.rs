//! Per-symbol open/high/low/close/volume accumulation.

use rust_decimal::Decimal;
use tickbar_types::{IntervalKey, IntervalLength, Symbol};

use crate::Bar;

/// Accumulates observations for one symbol's current interval.
///
/// The accumulator does not look at timestamps: the caller decides, by
/// comparing interval keys, whether an observation belongs to the current
/// interval ([`observe`](Self::observe)) or closes it
/// ([`snapshot_and_reset`](Self::snapshot_and_reset)).
#[derive(Debug, Clone)]
pub struct BarAccumulator {
    symbol: Symbol,
    length: IntervalLength,
    interval_key: Option<IntervalKey>,
    current: Option<BarBuilder>,
}

impl BarAccumulator {
    /// Creates an empty accumulator that has not yet seen any interval.
    #[must_use]
    pub const fn new(symbol: Symbol, length: IntervalLength) -> Self {
        Self {
            symbol,
            length,
            interval_key: None,
            current: None,
        }
    }

    /// Returns the symbol this accumulator belongs to.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the key of the interval currently being accumulated.
    ///
    /// `None` until the first observation arrives.
    #[must_use]
    pub const fn interval_key(&self) -> Option<IntervalKey> {
        self.interval_key
    }

    /// Returns true if at least one observation landed in the current interval.
    #[must_use]
    pub const fn has_observation(&self) -> bool {
        self.current.is_some()
    }

    /// Folds an observation into the current interval.
    ///
    /// The first observation sets open, high, low and close; later ones
    /// widen high/low, replace close, and add to volume. A missing volume
    /// counts as zero.
    pub fn observe(&mut self, price: Decimal, volume: Option<u64>) {
        let volume = volume.unwrap_or(0);
        match &mut self.current {
            Some(builder) => builder.update(price, volume),
            None => self.current = Some(BarBuilder::new(price, volume)),
        }
    }

    /// Finalizes the current interval and starts `new_key`.
    ///
    /// Returns the finished bar only if the interval received at least one
    /// observation; an empty interval yields `None` and leaves no trace.
    pub fn snapshot_and_reset(&mut self, new_key: IntervalKey) -> Option<Bar> {
        let bar = self.take_bar();
        self.interval_key = Some(new_key);
        bar
    }

    /// Finalizes the current interval without moving to a new one.
    ///
    /// Afterwards the accumulator still reports the same interval key but
    /// holds no observations.
    pub fn flush(&mut self) -> Option<Bar> {
        self.take_bar()
    }

    fn take_bar(&mut self) -> Option<Bar> {
        let builder = self.current.take()?;
        let interval_key = self.interval_key?;
        Some(builder.finish(self.symbol.clone(), interval_key, self.length))
    }
}

/// Running state of an interval with at least one observation.
#[derive(Debug, Clone)]
struct BarBuilder {
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: u64,
    observations: u32,
}

impl BarBuilder {
    const fn new(price: Decimal, volume: u64) -> Self {
        Self {
            open: price,
            high: price,
            low: price,
            close: price,
            volume,
            observations: 1,
        }
    }

    fn update(&mut self, price: Decimal, volume: u64) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.volume = self.volume.saturating_add(volume);
        self.observations = self.observations.saturating_add(1);
    }

    const fn finish(self, symbol: Symbol, interval_key: IntervalKey, length: IntervalLength) -> Bar {
        Bar {
            symbol,
            interval_key,
            length,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            observations: self.observations,
        }
    }
}
