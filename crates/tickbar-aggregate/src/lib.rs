//! Interval clock and per-symbol bar accumulation for tickbar.
//!
//! This crate provides the pure, synchronous pieces of aggregation:
//!
//! - [`IntervalClock`] / [`interval_key`] - Map timestamps to epoch-aligned intervals
//! - [`BarAccumulator`] - Open/high/low/close/volume state for one symbol
//! - [`Bar`] - A finalized bar

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accumulator;
mod bar;
mod clock;

pub use accumulator::BarAccumulator;
pub use bar::Bar;
pub use clock::{IntervalClock, interval_key};
