//! Daemon lifecycle errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from PID file handling and background spawning.
#[derive(Error, Debug)]
pub enum DaemonError {
    /// A PID file already exists, so another instance may be running.
    #[error(
        "PID file '{path}' already exists{}; is the daemon already running?",
        .pid.map(|pid| format!(" (pid {pid})")).unwrap_or_default()
    )]
    AlreadyRunning {
        /// The existing PID file.
        path: PathBuf,
        /// Process id recorded in the file, if it holds one.
        pid: Option<u32>,
    },

    /// Failed to create a directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to determine the current executable.
    #[error("Failed to determine executable path: {source}")]
    ExecutablePath {
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to spawn the background process.
    #[error("Failed to spawn '{executable}': {source}")]
    Spawn {
        /// The executable that could not be spawned.
        executable: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for daemon operations.
pub type Result<T> = std::result::Result<T, DaemonError>;
