//! Streaming quote-to-bar aggregation engine for tickbar.
//!
//! - [`EngineConfig`] - Validated startup configuration
//! - [`AggregationEngine`] - Synchronous routing, rollover detection and emission
//! - [`SymbolRegistry`] - Per-symbol accumulators and destinations
//! - [`EngineRunner`] - Async intake loop over a quote source
//! - [`StopHandle`] - Stop the runner from another task or thread
//! - [`RunOutcome`] - Terminal status of a run

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod engine;
mod error;
mod registry;
mod runner;
mod stats;
mod stop;

pub use config::{EngineConfig, SinkFailurePolicy, validate_output_dir};
pub use engine::{AggregationEngine, Ingest};
pub use error::{EngineError, Result};
pub use registry::{SymbolEntry, SymbolRegistry};
pub use runner::{EngineRunner, RunOutcome, StopReason};
pub use stats::EngineStats;
pub use stop::StopHandle;
