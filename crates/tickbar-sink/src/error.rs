//! Sink error types.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for sink operations.
pub type Result<T> = std::result::Result<T, SinkError>;

/// Errors raised while writing bars.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Appending to a destination file failed.
    #[error("Failed to append bar to '{path}': {source}")]
    Write {
        /// The destination file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl SinkError {
    /// Returns true if the failure affects every destination, not just one.
    ///
    /// A vanished output directory, a full disk, or a read-only filesystem
    /// will fail every subsequent write as well.
    #[must_use]
    pub fn is_systemic(&self) -> bool {
        let Self::Write { source, .. } = self;
        matches!(
            source.kind(),
            ErrorKind::NotFound
                | ErrorKind::StorageFull
                | ErrorKind::NotADirectory
                | ErrorKind::ReadOnlyFilesystem
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_error(kind: ErrorKind) -> SinkError {
        SinkError::Write {
            path: PathBuf::from("/out/x.bars"),
            source: std::io::Error::from(kind),
        }
    }

    #[test]
    fn test_systemic_classification() {
        assert!(write_error(ErrorKind::NotFound).is_systemic());
        assert!(write_error(ErrorKind::StorageFull).is_systemic());
        assert!(!write_error(ErrorKind::PermissionDenied).is_systemic());
    }
}
