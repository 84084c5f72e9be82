//! Core types for the tickbar quote-to-bar aggregation daemon.
//!
//! This crate provides the fundamental data structures used throughout tickbar:
//!
//! - [`Symbol`] - Normalized instrument symbol
//! - [`Observation`] - A single timestamped last-price (and volume) quote
//! - [`IntervalLength`] - Validated bar length in seconds
//! - [`IntervalKey`] - Epoch-aligned index of a fixed-length interval
//! - [`BarKind`] / [`BarSpec`] - Which fields a bar carries
//! - [`ConfigError`] - Startup configuration failures

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar_spec;
mod error;
mod interval;
mod observation;
mod symbol;

pub use bar_spec::{BarKind, BarSpec, BarSpecParseError};
pub use error::{ConfigError, Result};
pub use interval::{IntervalKey, IntervalLength};
pub use observation::Observation;
pub use symbol::Symbol;
