//! Engine error types.

use thiserror::Error;
use tickbar_format::FormatError;
use tickbar_sink::SinkError;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that stop the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A finalized bar could not be written.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// A finalized bar could not be rendered.
    #[error(transparent)]
    Format(#[from] FormatError),
}
