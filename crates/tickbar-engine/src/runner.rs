//! Async intake loop.

use tickbar_feed::QuoteSource;
use tickbar_sink::BarSink;
use tracing::{error, info, warn};

use crate::{AggregationEngine, EngineStats, StopHandle};

/// Why a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// [`StopHandle::stop`] was called.
    Stopped,
    /// The quote source ended its stream.
    SourceExhausted,
    /// The quote source failed.
    AdapterFailed(String),
    /// A bar could not be written (or rendered).
    SinkFailed(String),
}

/// Terminal status of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Why the run ended.
    pub reason: StopReason,
    /// Counters at the time the run ended.
    pub stats: EngineStats,
}

impl RunOutcome {
    /// Returns true if the run ended without a failure.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(
            self.reason,
            StopReason::Stopped | StopReason::SourceExhausted
        )
    }
}

/// Drives an [`AggregationEngine`] from a [`QuoteSource`] until stopped.
///
/// The loop waits on the source and the stop handle at the same time, so a
/// stop is honored even while no quotes arrive. Bars already written are
/// never affected by stopping. Partially accumulated bars are discarded
/// unless flush-on-stop is enabled, and are always discarded when the
/// source or the sink failed.
#[derive(Debug)]
pub struct EngineRunner<Q, S: BarSink> {
    engine: AggregationEngine<S>,
    source: Q,
    stop: StopHandle,
    flush_on_stop: bool,
}

impl<Q, S> EngineRunner<Q, S>
where
    Q: QuoteSource,
    S: BarSink,
{
    /// Creates a runner with a fresh stop handle.
    #[must_use]
    pub fn new(engine: AggregationEngine<S>, source: Q) -> Self {
        Self {
            engine,
            source,
            stop: StopHandle::new(),
            flush_on_stop: false,
        }
    }

    /// Sets whether partial bars are written when the run stops cleanly.
    #[must_use]
    pub const fn with_flush_on_stop(mut self, flush: bool) -> Self {
        self.flush_on_stop = flush;
        self
    }

    /// Uses an existing stop handle.
    #[must_use]
    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    /// Returns a handle that stops this run.
    #[must_use]
    pub fn handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Runs until stopped, the source ends, or a fatal error occurs.
    pub async fn run(self) -> RunOutcome {
        self.run_with_engine().await.0
    }

    /// Runs like [`run`](Self::run) and also returns the engine.
    pub async fn run_with_engine(mut self) -> (RunOutcome, AggregationEngine<S>) {
        let stop = self.stop.clone();
        info!("intake loop started");

        let mut reason = loop {
            let next = tokio::select! {
                biased;
                () = stop.stopped() => None,
                next = self.source.next_observation() => Some(next),
            };

            match next {
                None => break StopReason::Stopped,
                Some(Ok(Some(observation))) => {
                    if let Err(err) = self.engine.process(observation) {
                        break StopReason::SinkFailed(err.to_string());
                    }
                }
                Some(Ok(None)) => break StopReason::SourceExhausted,
                Some(Err(err)) => {
                    error!(error = %err, "quote source failed");
                    break StopReason::AdapterFailed(err.to_string());
                }
            }
        };

        // Whatever ended the loop, the run is no longer live.
        stop.stop();

        let clean = matches!(reason, StopReason::Stopped | StopReason::SourceExhausted);
        if self.flush_on_stop && clean {
            if let Err(err) = self.engine.flush() {
                reason = StopReason::SinkFailed(err.to_string());
            }
        }

        if let Err(err) = self.source.close().await {
            warn!(error = %err, "failed to close quote source");
        }

        let outcome = RunOutcome {
            reason,
            stats: self.engine.stats(),
        };
        info!(reason = ?outcome.reason, stats = %outcome.stats, "intake loop finished");
        (outcome, self.engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineConfig;
    use async_trait::async_trait;
    use chrono::DateTime;
    use rust_decimal::Decimal;
    use std::time::Duration;
    use tempfile::TempDir;
    use tickbar_feed::{ChannelSource, FeedError, StreamSource};
    use tickbar_format::TupleFormatter;
    use tickbar_sink::{DestinationNaming, FileSink, MemorySink};
    use tickbar_types::{BarSpec, Observation, Symbol};

    fn obs(symbol: &str, secs: i64, price: i64) -> Observation {
        Observation::new(
            symbol,
            DateTime::from_timestamp(secs, 0).unwrap(),
            Decimal::new(price, 0),
        )
    }

    fn memory_engine(symbols: &[&str]) -> AggregationEngine<MemorySink> {
        let spec = BarSpec::close();
        let config = EngineConfig::new(60, spec, symbols.iter().copied()).unwrap();
        AggregationEngine::new(&config, Box::new(TupleFormatter::new(spec)), MemorySink::new())
            .unwrap()
    }

    #[tokio::test]
    async fn test_source_exhausted_discards_partial() {
        let quotes = vec![obs("X", 5, 10), obs("X", 30, 12), obs("X", 65, 11)];
        let runner = EngineRunner::new(
            memory_engine(&["X"]),
            StreamSource::new(futures::stream::iter(quotes)),
        );

        let (outcome, engine) = runner.run_with_engine().await;
        assert_eq!(outcome.reason, StopReason::SourceExhausted);
        assert!(outcome.is_success());
        assert_eq!(engine.sink().lines(&Symbol::new("X")), ["12\n"]);
    }

    #[tokio::test]
    async fn test_flush_on_stop_writes_partial() {
        let quotes = vec![obs("X", 5, 10), obs("X", 65, 11)];
        let runner = EngineRunner::new(
            memory_engine(&["X"]),
            StreamSource::new(futures::stream::iter(quotes)),
        )
        .with_flush_on_stop(true);

        let (_, engine) = runner.run_with_engine().await;
        assert_eq!(engine.sink().lines(&Symbol::new("X")), ["10\n", "11\n"]);
    }

    #[tokio::test]
    async fn test_stop_while_waiting_for_quotes() {
        let (tx, source) = ChannelSource::channel(16);
        let runner = EngineRunner::new(memory_engine(&["X"]), source);
        let handle = runner.handle();
        assert!(handle.running());

        let task = tokio::spawn(runner.run_with_engine());
        tx.send(obs("X", 5, 10)).await.unwrap();
        tx.send(obs("X", 61, 11)).await.unwrap();

        // Wait until the rollover bar is written, then stop with the sender still open.
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.stop();

        let (outcome, engine) = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.reason, StopReason::Stopped);
        assert!(!handle.running());
        assert_eq!(engine.sink().lines(&Symbol::new("X")), ["10\n"]);
        drop(tx);
    }

    /// Source that yields some quotes and then fails.
    #[derive(Debug)]
    struct FailingSource {
        quotes: Vec<Observation>,
    }

    #[async_trait]
    impl QuoteSource for FailingSource {
        async fn next_observation(&mut self) -> tickbar_feed::Result<Option<Observation>> {
            if self.quotes.is_empty() {
                return Err(FeedError::Io(std::io::Error::from(
                    std::io::ErrorKind::ConnectionReset,
                )));
            }
            Ok(Some(self.quotes.remove(0)))
        }
    }

    #[tokio::test]
    async fn test_adapter_failure_stops_without_flush() {
        let source = FailingSource {
            quotes: vec![obs("X", 5, 10)],
        };
        let runner = EngineRunner::new(memory_engine(&["X"]), source).with_flush_on_stop(true);
        let handle = runner.handle();

        let (outcome, engine) = runner.run_with_engine().await;
        assert!(matches!(outcome.reason, StopReason::AdapterFailed(_)));
        assert!(!outcome.is_success());
        assert!(!handle.running());
        assert_eq!(engine.sink().writes(), 0);
    }

    #[tokio::test]
    async fn test_sink_failure_is_terminal() {
        let dir = TempDir::new().unwrap();
        let spec = BarSpec::close();
        let config = EngineConfig::new(60, spec, ["X"]).unwrap();
        let naming = DestinationNaming::new(dir.path(), spec, config.interval(), "bars");
        let engine =
            AggregationEngine::new(&config, Box::new(TupleFormatter::new(spec)), FileSink::new(naming))
                .unwrap();

        // The directory disappears before the first bar is due.
        let path = dir.path().to_path_buf();
        drop(dir);
        assert!(!path.exists());

        let quotes = vec![obs("X", 5, 10), obs("X", 65, 11), obs("X", 125, 12)];
        let outcome = EngineRunner::new(engine, StreamSource::new(futures::stream::iter(quotes)))
            .run()
            .await;

        assert!(matches!(outcome.reason, StopReason::SinkFailed(_)));
        assert_eq!(outcome.stats.bars_emitted, 0);
        assert_eq!(outcome.stats.observations, 2);
    }

    #[tokio::test]
    async fn test_file_output_end_to_end() {
        let dir = TempDir::new().unwrap();
        let spec = BarSpec::ohlc().with_volume(true);
        let config = EngineConfig::new(60, spec, ["SPY", "/ES"]).unwrap();
        let naming = DestinationNaming::new(dir.path(), spec, config.interval(), "bars")
            .with_date_stamp("20240115");
        let engine =
            AggregationEngine::new(&config, Box::new(TupleFormatter::new(spec)), FileSink::new(naming))
                .unwrap();

        let quotes = vec![
            obs("SPY", 0, 10).with_volume(1),
            obs("/ES", 1, 4000).with_volume(2),
            obs("SPY", 20, 12).with_volume(3),
            obs("SPY", 60, 11).with_volume(4),
            obs("/ES", 61, 4001).with_volume(5),
        ];
        let outcome = EngineRunner::new(engine, StreamSource::new(futures::stream::iter(quotes)))
            .run()
            .await;
        assert_eq!(outcome.stats.bars_emitted, 2);

        let spy = std::fs::read_to_string(dir.path().join("20240115_SPY_OHLCV_60sec.bars")).unwrap();
        let es = std::fs::read_to_string(dir.path().join("20240115_-S-ES_OHLCV_60sec.bars")).unwrap();
        assert_eq!(spy, "(10, 12, 10, 12, 4)\n");
        assert_eq!(es, "(4000, 4000, 4000, 4000, 2)\n");
    }
}
