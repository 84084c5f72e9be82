//! Streaming quote-to-bar aggregation library.
//!
//! This is a facade crate that re-exports functionality from the tickbar
//! workspace crates for convenient access.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickbar_types::*;

// Re-export aggregation
pub use tickbar_aggregate::{Bar, BarAccumulator, IntervalClock, interval_key};

// Re-export formatters
pub use tickbar_format::{
    CsvFormatter, Field, FieldValue, FormatError, Formatter, JsonFormatter, OutputFormat,
    TupleFormatter, fields_for,
};

// Re-export sinks
pub use tickbar_sink::{BarSink, DestinationNaming, FileSink, MemorySink, SinkError, escape_symbol};

// Re-export quote sources
#[cfg(feature = "feed")]
pub use tickbar_feed::{
    ChannelSource, FeedConfig, FeedError, Handshake, LineSource, QuoteSource, StreamSource,
    TcpQuoteSource, normalize_address,
};

// Re-export the engine
#[cfg(feature = "engine")]
pub use tickbar_engine::{
    AggregationEngine, EngineConfig, EngineError, EngineRunner, EngineStats, Ingest, RunOutcome,
    SinkFailurePolicy, StopHandle, StopReason, SymbolEntry, SymbolRegistry, validate_output_dir,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tickbar_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickbar_types::{
        BarKind, BarSpec, ConfigError, IntervalKey, IntervalLength, Observation, Symbol,
    };

    pub use tickbar_aggregate::{Bar, IntervalClock};

    pub use tickbar_format::{Formatter, OutputFormat};

    pub use tickbar_sink::{BarSink, DestinationNaming, FileSink, MemorySink};

    #[cfg(feature = "feed")]
    pub use tickbar_feed::{ChannelSource, FeedConfig, QuoteSource, TcpQuoteSource};

    #[cfg(feature = "engine")]
    pub use tickbar_engine::{
        AggregationEngine, EngineConfig, EngineRunner, RunOutcome, SinkFailurePolicy,
        StopHandle, StopReason,
    };
}
