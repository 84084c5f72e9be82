//! Engine diagnostics counters.

/// Counters describing what the engine did with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStats {
    /// Observations routed to a subscribed symbol.
    pub observations: u64,
    /// Bars written to the sink.
    pub bars_emitted: u64,
    /// Late observations folded into the still-open interval.
    pub late_folded: u64,
    /// Late observations dropped because no interval was open.
    pub late_dropped: u64,
    /// Observations for symbols that are not subscribed.
    pub unknown_symbol: u64,
    /// Sink failures logged and tolerated under the isolate policy.
    pub sink_failures: u64,
}

impl EngineStats {
    /// Returns the number of out-of-order observations seen.
    #[must_use]
    pub const fn ordering_anomalies(&self) -> u64 {
        self.late_folded + self.late_dropped
    }
}

impl std::fmt::Display for EngineStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} observations, {} bars, {} late folded, {} late dropped, {} unknown, {} sink failures",
            self.observations,
            self.bars_emitted,
            self.late_folded,
            self.late_dropped,
            self.unknown_symbol,
            self.sink_failures
        )
    }
}
