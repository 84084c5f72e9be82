//! Process lifecycle helpers for the tickbar daemon.
//!
//! - [`PidFile`] - PID file guard removed on drop
//! - [`BackgroundSpawner`] - Re-executes the binary as a detached process
//! - [`RuntimePaths`] - Default PID and error file locations

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod paths;
mod pidfile;
mod spawn;

pub use error::{DaemonError, Result};
pub use paths::RuntimePaths;
pub use pidfile::PidFile;
pub use spawn::{BackgroundSpawner, DAEMON_CHILD_ENV};
