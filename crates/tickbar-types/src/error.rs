//! Error types for tickbar configuration.

use std::path::PathBuf;
use thiserror::Error;

use crate::Symbol;

/// Result type alias for configuration checks.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors detected while validating the startup configuration.
///
/// Every variant is fatal: the engine is never started with a
/// configuration that produced one of these.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Interval length was zero or negative.
    #[error("Invalid interval length: {0} seconds (must be a positive integer)")]
    InvalidInterval(i64),

    /// No symbols were given.
    #[error("No symbols configured")]
    NoSymbols,

    /// A symbol was empty after trimming.
    #[error("Empty symbol in symbol list")]
    EmptySymbol,

    /// The same symbol was listed twice (after normalization).
    #[error("Duplicate symbol: {0}")]
    DuplicateSymbol(Symbol),

    /// The output directory does not exist.
    #[error("Output directory does not exist: '{path}'")]
    OutputDirMissing {
        /// The configured directory.
        path: PathBuf,
    },

    /// The output path exists but is not a directory.
    #[error("Output path is not a directory: '{path}'")]
    OutputDirNotDirectory {
        /// The configured path.
        path: PathBuf,
    },

    /// The output directory could not be inspected.
    #[error("Failed to access output directory '{path}': {source}")]
    OutputDir {
        /// The configured directory.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
