//! PID file guard.

use crate::{DaemonError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Holds a PID file for the lifetime of the process.
///
/// The file is created exclusively, so a second instance pointed at the
/// same path fails with [`DaemonError::AlreadyRunning`]. The file is
/// removed when the guard is dropped.
#[derive(Debug)]
pub struct PidFile {
    path: PathBuf,
    pid: u32,
}

impl PidFile {
    /// Writes the current process id to `path`.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists or cannot be written.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DaemonError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                let pid = Self::read(&path).ok().flatten();
                return Err(DaemonError::AlreadyRunning { path, pid });
            }
            Err(source) => return Err(DaemonError::WriteFile { path, source }),
        };

        let pid = std::process::id();
        if let Err(source) = writeln!(file, "{pid}") {
            let _ = fs::remove_file(&path);
            return Err(DaemonError::WriteFile { path, source });
        }

        debug!(path = %path.display(), pid, "wrote PID file");
        Ok(Self { path, pid })
    }

    /// Reads the process id stored in a PID file.
    ///
    /// Returns `None` if the file does not exist or holds no valid id.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    fn read(path: &Path) -> Result<Option<u32>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(contents.trim().parse().ok()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(DaemonError::ReadFile {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Returns the PID file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the recorded process id.
    #[must_use]
    pub const fn pid(&self) -> u32 {
        self.pid
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed PID file"),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!(path = %self.path.display(), error = %err, "failed to remove PID file"),
        }
    }
}
