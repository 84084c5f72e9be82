//! Quote source abstraction.

use async_trait::async_trait;
use tickbar_types::Observation;

use crate::Result;

/// A push-style stream of quote observations, consumed by pulling.
///
/// Implementations deliver observations in the order the upstream produced
/// them. `next_observation` must be cancellation safe: dropping the future
/// before it resolves must not lose an observation that was not returned,
/// which lets the engine race it against a stop signal.
#[async_trait]
pub trait QuoteSource: Send {
    /// Waits for the next observation.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream became unavailable.
    async fn next_observation(&mut self) -> Result<Option<Observation>>;

    /// Releases the upstream connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection could not be shut down cleanly.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
