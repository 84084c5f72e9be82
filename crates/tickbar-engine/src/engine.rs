//! Synchronous aggregation engine.

use std::collections::HashSet;
use tickbar_aggregate::{Bar, IntervalClock};
use tickbar_format::Formatter;
use tickbar_sink::BarSink;
use tickbar_types::{IntervalKey, Observation, Symbol};
use tracing::{debug, error, info, trace, warn};

use crate::{EngineConfig, EngineStats, Result, SinkFailurePolicy, SymbolRegistry};

/// What happened to one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// Started a new interval; the previous one (if any) had no observations.
    Opened,
    /// Closed the interval with this key, wrote its bar, and started a new one.
    RolledOver(IntervalKey),
    /// Updated the current interval.
    Updated,
    /// Arrived for an earlier interval and was folded into the current one.
    LateFolded,
    /// Arrived for an earlier interval while nothing was open; discarded.
    LateDropped,
    /// Named a symbol that is not subscribed; discarded.
    UnknownSymbol,
}

/// Routes observations to per-symbol accumulators and emits finished bars.
///
/// The engine is single-threaded and synchronous: observations are handled
/// one at a time in delivery order, and each finished bar is rendered and
/// written before the next observation is looked at. Rollover is detected
/// only by a later observation crossing an interval boundary, never by a
/// timer, and independently for every symbol.
///
/// Observations whose interval is earlier than the symbol's current one
/// are folded into the current interval when it holds data and dropped
/// otherwise. Under network jitter this can misplace a bar's close; the
/// counts in [`EngineStats`] make such anomalies visible.
#[derive(Debug)]
pub struct AggregationEngine<S: BarSink> {
    clock: IntervalClock,
    registry: SymbolRegistry<S::Destination>,
    formatter: Box<dyn Formatter>,
    sink: S,
    policy: SinkFailurePolicy,
    stats: EngineStats,
    unknown_seen: HashSet<Symbol>,
}

impl<S: BarSink> AggregationEngine<S> {
    /// Creates an engine, resolving one destination per configured symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if a destination cannot be resolved.
    pub fn new(config: &EngineConfig, formatter: Box<dyn Formatter>, mut sink: S) -> Result<Self> {
        let registry = SymbolRegistry::build(config.symbols(), config.interval(), &mut sink)?;

        info!(
            symbols = registry.len(),
            interval = %config.interval(),
            bars = %config.spec(),
            "aggregation engine ready"
        );

        Ok(Self {
            clock: IntervalClock::new(config.interval()),
            registry,
            formatter,
            sink,
            policy: config.sink_policy(),
            stats: EngineStats::default(),
            unknown_seen: HashSet::new(),
        })
    }

    /// Processes one observation.
    ///
    /// # Errors
    ///
    /// Returns an error if a finished bar could not be rendered or written
    /// and the failure policy requires stopping.
    pub fn process(&mut self, observation: Observation) -> Result<Ingest> {
        let Self {
            clock,
            registry,
            formatter,
            sink,
            policy,
            stats,
            unknown_seen,
        } = self;

        let Some(entry) = registry.get_mut(&observation.symbol) else {
            stats.unknown_symbol += 1;
            if unknown_seen.insert(observation.symbol.clone()) {
                warn!(symbol = %observation.symbol, "ignoring observation for unsubscribed symbol");
            }
            return Ok(Ingest::UnknownSymbol);
        };
        stats.observations += 1;

        let key = clock.key_for(observation.timestamp);
        match entry.accumulator.interval_key() {
            Some(current) if key == current => {
                entry.accumulator.observe(observation.price, observation.volume);
                Ok(Ingest::Updated)
            }
            Some(current) if key < current => {
                if entry.accumulator.has_observation() {
                    entry.accumulator.observe(observation.price, observation.volume);
                    stats.late_folded += 1;
                    debug!(
                        symbol = %observation.symbol,
                        interval = %key,
                        current = %current,
                        "late observation folded into current interval"
                    );
                    Ok(Ingest::LateFolded)
                } else {
                    stats.late_dropped += 1;
                    debug!(
                        symbol = %observation.symbol,
                        interval = %key,
                        current = %current,
                        "late observation dropped"
                    );
                    Ok(Ingest::LateDropped)
                }
            }
            _ => {
                let finished = entry.accumulator.snapshot_and_reset(key);
                let ingest = match finished {
                    Some(bar) => {
                        emit(
                            &**formatter,
                            sink,
                            *policy,
                            stats,
                            &entry.destination,
                            &bar,
                        )?;
                        Ingest::RolledOver(bar.interval_key)
                    }
                    None => Ingest::Opened,
                };
                entry.accumulator.observe(observation.price, observation.volume);
                Ok(ingest)
            }
        }
    }

    /// Writes every partially accumulated bar.
    ///
    /// Accumulators keep their interval key but become empty, so late
    /// observations for the flushed interval are dropped afterwards.
    /// Returns the number of bars written.
    ///
    /// # Errors
    ///
    /// Returns an error if a bar could not be written and the failure
    /// policy requires stopping.
    pub fn flush(&mut self) -> Result<usize> {
        let Self {
            registry,
            formatter,
            sink,
            policy,
            stats,
            ..
        } = self;

        let mut flushed = 0;
        for (_, entry) in registry.iter_mut() {
            if let Some(bar) = entry.accumulator.flush() {
                emit(
                    &**formatter,
                    sink,
                    *policy,
                    stats,
                    &entry.destination,
                    &bar,
                )?;
                flushed += 1;
            }
        }
        if flushed > 0 {
            info!(bars = flushed, "flushed partial bars");
        }
        Ok(flushed)
    }

    /// Returns the diagnostics counters.
    #[must_use]
    pub const fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Returns the interval clock.
    #[must_use]
    pub const fn clock(&self) -> &IntervalClock {
        &self.clock
    }

    /// Returns the symbol registry.
    #[must_use]
    pub const fn registry(&self) -> &SymbolRegistry<S::Destination> {
        &self.registry
    }

    /// Returns the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the engine, returning the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Renders and writes one finished bar, applying the failure policy.
fn emit<S: BarSink>(
    formatter: &dyn Formatter,
    sink: &mut S,
    policy: SinkFailurePolicy,
    stats: &mut EngineStats,
    destination: &S::Destination,
    bar: &Bar,
) -> Result<()> {
    let line = formatter.render(bar)?;
    match sink.write(destination, &line) {
        Ok(()) => {
            stats.bars_emitted += 1;
            trace!(symbol = %bar.symbol, interval = %bar.interval_key, "bar written");
            Ok(())
        }
        Err(err) if policy == SinkFailurePolicy::Isolate && !err.is_systemic() => {
            stats.sink_failures += 1;
            error!(symbol = %bar.symbol, interval = %bar.interval_key, error = %err, "bar lost, continuing");
            Ok(())
        }
        Err(err) => {
            error!(symbol = %bar.symbol, interval = %bar.interval_key, error = %err, "bar write failed");
            Err(err.into())
        }
    }
}
