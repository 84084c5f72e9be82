//! Cross-task stop signal.

use std::sync::Arc;
use tokio::sync::watch;

/// Shared stop flag for an engine run.
///
/// Cloning is cheap; every clone controls the same run. [`stop`](Self::stop)
/// may be called from any thread, including a signal handler task, and
/// wakes the intake loop even while it is waiting on the quote source.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// Creates a handle in the running state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Requests the run to stop. Idempotent.
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    /// Returns true until a stop has been requested or the run ended.
    #[must_use]
    pub fn running(&self) -> bool {
        !*self.tx.borrow()
    }

    /// Resolves once a stop has been requested.
    pub async fn stopped(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}
