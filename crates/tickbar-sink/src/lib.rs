//! Append-only per-symbol bar destinations for tickbar.
//!
//! - [`BarSink`] - Where the engine hands rendered bars
//! - [`FileSink`] - One append-only file per symbol
//! - [`MemorySink`] - In-memory sink for tests and benchmarks
//! - [`DestinationNaming`] - Output file naming scheme

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod file;
mod memory;
mod naming;

pub use error::{Result, SinkError};
pub use file::FileSink;
pub use memory::MemorySink;
pub use naming::{DestinationNaming, escape_symbol};

use tickbar_types::Symbol;

/// Receives rendered bars from the aggregation engine.
///
/// Destinations are resolved once per symbol when the engine starts and
/// reused for every bar of that symbol, so the same symbol always lands in
/// the same place for the whole run.
pub trait BarSink {
    /// Handle identifying where one symbol's bars go.
    type Destination: std::fmt::Debug;

    /// Resolves the destination for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if no destination can be assigned to the symbol.
    fn resolve(&mut self, symbol: &Symbol) -> Result<Self::Destination>;

    /// Appends one rendered, newline-terminated bar line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line could not be durably appended.
    fn write(&mut self, destination: &Self::Destination, line: &str) -> Result<()>;
}
