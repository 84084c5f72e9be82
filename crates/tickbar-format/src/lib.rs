//! Bar renderers for tickbar output files.
//!
//! This crate turns a finalized [`Bar`](tickbar_aggregate::Bar) into one
//! line of text:
//!
//! - [`Field`] / [`fields_for`] - Which fields a `BarSpec` emits
//! - [`TupleFormatter`] - Compact numeric tuple (the default)
//! - [`CsvFormatter`] - Delimited fields
//! - [`JsonFormatter`] - One JSON object per line

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod fields;
mod formatter;
mod json;
mod tuple;

pub use crate::csv::CsvFormatter;
pub use fields::{Field, FieldValue, fields_for};
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::JsonFormatter;
pub use tuple::TupleFormatter;
