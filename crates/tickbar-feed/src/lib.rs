//! Quote source adapters for tickbar.
//!
//! - [`QuoteSource`] - Cancellation-safe pull of the next observation
//! - [`ChannelSource`] - Observations pushed through a Tokio channel
//! - [`StreamSource`] - Any `futures` stream of observations
//! - [`LineSource`] - Newline-delimited JSON observations from a reader
//! - [`TcpQuoteSource`] - Line source over TCP with a subscription handshake

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod channel;
mod error;
mod lines;
mod source;
mod tcp;

pub use channel::{ChannelSource, StreamSource};
pub use error::{FeedError, Result};
pub use lines::LineSource;
pub use source::QuoteSource;
pub use tcp::{FeedConfig, Handshake, TcpQuoteSource, normalize_address};
