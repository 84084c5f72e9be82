//! Default runtime file locations.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const PID_FILE_NAME: &str = "tickbar.pid";
const ERROR_FILE_NAME: &str = "tickbar.err";

/// Directory holding the daemon's PID and error files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePaths {
    directory: PathBuf,
}

impl RuntimePaths {
    /// Uses the given directory.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Uses the platform's local data directory for tickbar.
    #[must_use]
    pub fn default_paths() -> Self {
        let directory = ProjectDirs::from("", "", "tickbar").map_or_else(dirs_fallback, |dirs| {
            dirs.data_local_dir().to_path_buf()
        });
        Self { directory }
    }

    /// Returns the runtime directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the default PID file path.
    #[must_use]
    pub fn pid_file(&self) -> PathBuf {
        self.directory.join(PID_FILE_NAME)
    }

    /// Returns the default error file path.
    #[must_use]
    pub fn error_file(&self) -> PathBuf {
        self.directory.join(ERROR_FILE_NAME)
    }
}

impl Default for RuntimePaths {
    fn default() -> Self {
        Self::default_paths()
    }
}

fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".tickbar")
}
