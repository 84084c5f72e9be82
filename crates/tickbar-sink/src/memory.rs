//! In-memory sink.

use std::collections::HashMap;
use tickbar_types::Symbol;

use crate::{BarSink, Result};

/// Collects rendered bars in memory, keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: HashMap<Symbol, Vec<String>>,
    writes: usize,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every line written for a symbol, in write order.
    #[must_use]
    pub fn lines(&self, symbol: &Symbol) -> &[String] {
        self.lines.get(symbol).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the total number of lines written.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl BarSink for MemorySink {
    type Destination = Symbol;

    fn resolve(&mut self, symbol: &Symbol) -> Result<Symbol> {
        self.lines.entry(symbol.clone()).or_default();
        Ok(symbol.clone())
    }

    fn write(&mut self, destination: &Symbol, line: &str) -> Result<()> {
        self.lines
            .entry(destination.clone())
            .or_default()
            .push(line.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_per_symbol() {
        let mut sink = MemorySink::new();
        let a = sink.resolve(&Symbol::new("A")).unwrap();
        let b = sink.resolve(&Symbol::new("B")).unwrap();

        sink.write(&a, "1\n").unwrap();
        sink.write(&b, "2\n").unwrap();
        sink.write(&a, "3\n").unwrap();

        assert_eq!(sink.lines(&a), ["1\n", "3\n"]);
        assert_eq!(sink.lines(&b), ["2\n"]);
        assert!(sink.lines(&Symbol::new("C")).is_empty());
        assert_eq!(sink.writes(), 3);
    }
}
