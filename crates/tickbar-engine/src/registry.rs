//! Symbol registry.

use std::collections::HashMap;
use tickbar_aggregate::BarAccumulator;
use tickbar_sink::BarSink;
use tickbar_types::{IntervalLength, Symbol};

/// Accumulator and destination of one subscribed symbol.
#[derive(Debug)]
pub struct SymbolEntry<D> {
    /// Current interval state.
    pub accumulator: BarAccumulator,
    /// Where finished bars for this symbol go.
    pub destination: D,
}

/// Per-symbol state owned by the engine.
///
/// One entry per subscribed symbol is created at startup and none is ever
/// added or removed during a run.
#[derive(Debug)]
pub struct SymbolRegistry<D> {
    entries: HashMap<Symbol, SymbolEntry<D>>,
}

impl<D: std::fmt::Debug> SymbolRegistry<D> {
    /// Creates entries for every symbol, resolving each destination once.
    ///
    /// # Errors
    ///
    /// Returns the first destination resolution error.
    pub fn build<S>(
        symbols: &[Symbol],
        length: IntervalLength,
        sink: &mut S,
    ) -> tickbar_sink::Result<Self>
    where
        S: BarSink<Destination = D>,
    {
        let mut entries = HashMap::with_capacity(symbols.len());
        for symbol in symbols {
            let destination = sink.resolve(symbol)?;
            entries.insert(
                symbol.clone(),
                SymbolEntry {
                    accumulator: BarAccumulator::new(symbol.clone(), length),
                    destination,
                },
            );
        }
        Ok(Self { entries })
    }

    /// Returns the entry for a symbol.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<&SymbolEntry<D>> {
        self.entries.get(symbol)
    }

    /// Returns the entry for a symbol, mutably.
    pub fn get_mut(&mut self, symbol: &Symbol) -> Option<&mut SymbolEntry<D>> {
        self.entries.get_mut(symbol)
    }

    /// Iterates over all entries mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Symbol, &mut SymbolEntry<D>)> {
        self.entries.iter_mut()
    }

    /// Returns true if the symbol is subscribed.
    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.entries.contains_key(symbol)
    }

    /// Returns the number of subscribed symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no symbols are subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
