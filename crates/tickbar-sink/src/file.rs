//! Append-only file sink.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tickbar_types::Symbol;
use tracing::{debug, trace};

use crate::{BarSink, DestinationNaming, Result, SinkError};

/// Appends bars to one file per symbol.
///
/// Each bar opens the file in append mode, writes the whole line, and
/// closes it again. Files are never truncated, so restarting on the same
/// day continues the existing files.
#[derive(Debug, Clone)]
pub struct FileSink {
    naming: DestinationNaming,
    sync: bool,
}

impl FileSink {
    /// Creates a file sink using the given naming scheme.
    #[must_use]
    pub const fn new(naming: DestinationNaming) -> Self {
        Self {
            naming,
            sync: false,
        }
    }

    /// Sets whether each append is followed by `fsync` of the file data.
    #[must_use]
    pub const fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Returns the naming scheme.
    #[must_use]
    pub const fn naming(&self) -> &DestinationNaming {
        &self.naming
    }

    fn append(&self, path: &Path, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(line.as_bytes())?;
        if self.sync {
            file.sync_data()?;
        }
        Ok(())
    }
}

impl BarSink for FileSink {
    type Destination = PathBuf;

    fn resolve(&mut self, symbol: &Symbol) -> Result<PathBuf> {
        let path = self.naming.path_for(symbol);
        debug!(%symbol, path = %path.display(), "resolved bar destination");
        Ok(path)
    }

    fn write(&mut self, destination: &PathBuf, line: &str) -> Result<()> {
        self.append(destination, line)
            .map_err(|source| SinkError::Write {
                path: destination.clone(),
                source,
            })?;
        trace!(path = %destination.display(), "appended bar");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tickbar_types::{BarSpec, IntervalLength};

    fn sink_in(dir: &TempDir) -> FileSink {
        let naming = DestinationNaming::new(
            dir.path(),
            BarSpec::close(),
            IntervalLength::new(60).unwrap(),
            "bars",
        )
        .with_date_stamp("20240115");
        FileSink::new(naming)
    }

    #[test]
    fn test_appends_lines() {
        let dir = TempDir::new().unwrap();
        let mut sink = sink_in(&dir);
        let dest = sink.resolve(&Symbol::new("SPY")).unwrap();

        sink.write(&dest, "10\n").unwrap();
        sink.write(&dest, "11\n").unwrap();

        let content = std::fs::read_to_string(&dest).unwrap();
        assert_eq!(content, "10\n11\n");
        assert_eq!(dest, dir.path().join("20240115_SPY_C_60sec.bars"));
    }

    #[test]
    fn test_restart_does_not_truncate() {
        let dir = TempDir::new().unwrap();
        let dest = {
            let mut sink = sink_in(&dir);
            let dest = sink.resolve(&Symbol::new("SPY")).unwrap();
            sink.write(&dest, "10\n").unwrap();
            dest
        };

        let mut restarted = sink_in(&dir).with_sync(true);
        let again = restarted.resolve(&Symbol::new("spy")).unwrap();
        assert_eq!(again, dest);
        restarted.write(&again, "12\n").unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "10\n12\n");
    }

    #[test]
    fn test_missing_directory_is_systemic() {
        let dir = TempDir::new().unwrap();
        let mut sink = sink_in(&dir);
        let dest = sink.resolve(&Symbol::new("SPY")).unwrap();
        drop(dir);

        let err = sink.write(&dest, "10\n").unwrap_err();
        assert!(err.is_systemic());
        assert!(matches!(err, SinkError::Write { .. }));
    }
}
