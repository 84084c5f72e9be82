//! Detached background spawning.
//!
//! The daemon backgrounds itself by re-executing the current binary with the
//! same arguments in a new process group. The child's stdout and stderr are
//! appended to the error file so diagnostics survive the parent exiting.

use crate::{DaemonError, Result};
use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tracing::info;

/// Environment variable set in the re-executed child.
///
/// The child sees it and runs in the foreground instead of spawning again.
pub const DAEMON_CHILD_ENV: &str = "TICKBAR_DAEMON_CHILD";

/// Spawns a detached copy of an executable.
#[derive(Debug, Clone)]
pub struct BackgroundSpawner {
    executable_path: PathBuf,
    error_file: PathBuf,
}

impl BackgroundSpawner {
    /// Creates a spawner for the current executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the current executable path cannot be determined.
    pub fn new(error_file: impl Into<PathBuf>) -> Result<Self> {
        let executable_path =
            std::env::current_exe().map_err(|source| DaemonError::ExecutablePath { source })?;
        Ok(Self {
            executable_path,
            error_file: error_file.into(),
        })
    }

    /// Creates a spawner for a specific executable.
    #[must_use]
    pub const fn with_executable(executable_path: PathBuf, error_file: PathBuf) -> Self {
        Self {
            executable_path,
            error_file,
        }
    }

    /// Returns true if this process is a spawned background child.
    #[must_use]
    pub fn is_child() -> bool {
        std::env::var_os(DAEMON_CHILD_ENV).is_some()
    }

    /// Spawns the executable detached with `args` and returns its process id.
    ///
    /// # Errors
    ///
    /// Returns an error if the error file cannot be opened or the process
    /// cannot be spawned.
    pub fn spawn<I, A>(&self, args: I) -> Result<u32>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let stdout = self.open_error_file()?;
        let stderr = stdout.try_clone().map_err(|source| DaemonError::WriteFile {
            path: self.error_file.clone(),
            source,
        })?;

        let mut command = Command::new(&self.executable_path);
        command
            .args(args)
            .env(DAEMON_CHILD_ENV, "1")
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr);

        let child = self.spawn_detached(&mut command)?;
        let pid = child.id();
        info!(
            pid,
            executable = %self.executable_path.display(),
            error_file = %self.error_file.display(),
            "spawned background process"
        );
        Ok(pid)
    }

    fn open_error_file(&self) -> Result<File> {
        if let Some(parent) = self.error_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DaemonError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.error_file)
            .map_err(|source| DaemonError::WriteFile {
                path: self.error_file.clone(),
                source,
            })
    }

    /// Spawn a detached child process.
    #[cfg(unix)]
    fn spawn_detached(&self, command: &mut Command) -> Result<Child> {
        use std::os::unix::process::CommandExt;

        command
            .process_group(0) // Detach from the parent's process group
            .spawn()
            .map_err(|source| DaemonError::Spawn {
                executable: self.executable_path.clone(),
                source,
            })
    }

    /// Spawn a detached child process on Windows.
    #[cfg(windows)]
    fn spawn_detached(&self, command: &mut Command) -> Result<Child> {
        use std::os::windows::process::CommandExt;

        const CREATE_NEW_PROCESS_GROUP: u32 = 0x00000200;
        const DETACHED_PROCESS: u32 = 0x00000008;

        command
            .creation_flags(CREATE_NEW_PROCESS_GROUP | DETACHED_PROCESS)
            .spawn()
            .map_err(|source| DaemonError::Spawn {
                executable: self.executable_path.clone(),
                source,
            })
    }

    /// Spawn a child process (fallback for other platforms).
    #[cfg(not(any(unix, windows)))]
    fn spawn_detached(&self, command: &mut Command) -> Result<Child> {
        command.spawn().map_err(|source| DaemonError::Spawn {
            executable: self.executable_path.clone(),
            source,
        })
    }

    /// Returns the executable path.
    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable_path
    }

    /// Returns the error file path.
    #[must_use]
    pub fn error_file(&self) -> &Path {
        &self.error_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_executable() {
        let spawner = BackgroundSpawner::with_executable(
            PathBuf::from("/custom/tickbar"),
            PathBuf::from("/tmp/tickbar.err"),
        );
        assert_eq!(spawner.executable(), Path::new("/custom/tickbar"));
        assert_eq!(spawner.error_file(), Path::new("/tmp/tickbar.err"));
    }

    #[test]
    fn test_missing_executable_fails() {
        let dir = TempDir::new().unwrap();
        let spawner = BackgroundSpawner::with_executable(
            dir.path().join("does-not-exist"),
            dir.path().join("tickbar.err"),
        );
        let err = spawner.spawn(["run"]).unwrap_err();
        assert!(matches!(err, DaemonError::Spawn { .. }));
        // The error file is opened before spawning.
        assert!(dir.path().join("tickbar.err").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_appends_output_to_error_file() {
        let dir = TempDir::new().unwrap();
        let error_file = dir.path().join("logs").join("tickbar.err");
        fs::create_dir_all(error_file.parent().unwrap()).unwrap();
        fs::write(&error_file, "earlier\n").unwrap();

        let spawner = BackgroundSpawner::with_executable(PathBuf::from("/bin/sh"), error_file.clone());
        if !spawner.executable().exists() {
            return;
        }
        spawner
            .spawn(["-c", "echo \"child $TICKBAR_DAEMON_CHILD\""])
            .unwrap();

        // The child is detached, so poll for its output.
        let mut contents = String::new();
        for _ in 0..100 {
            contents = fs::read_to_string(&error_file).unwrap();
            if contents.contains("child 1") {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert!(contents.starts_with("earlier\n"));
        assert!(contents.contains("child 1"));
    }
}
