//! Run command implementation.
//!
//! Validates the configuration, optionally re-executes itself in the
//! background, then connects to the quote source and writes bars until a
//! signal arrives, the source ends, or a fatal error occurs.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tickbar_daemon::{BackgroundSpawner, PidFile, RuntimePaths};
use tickbar_lib::prelude::*;
use tickbar_lib::{EngineStats, validate_output_dir};
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// How often the supervising loop checks that the engine is still running.
const LIVENESS_PERIOD: Duration = Duration::from_secs(1);

/// Arguments for `tickbar run`.
#[derive(Debug, Args)]
pub(crate) struct RunArgs {
    /// Quote source address ("host:port" or "host port")
    addr: String,

    /// Directory the bar files are written to (must exist)
    outdir: PathBuf,

    /// Interval length in seconds
    interval: i64,

    /// Symbols to aggregate
    #[arg(required = true, num_args = 1..)]
    symbols: Vec<String>,

    /// Interval type tag: C, CV, OHLC or OHLCV
    #[arg(long = "type", value_name = "TAG", conflicts_with_all = ["ohlc", "vol"])]
    bar_type: Option<BarSpec>,

    /// Emit open, high, low and close instead of close only
    #[arg(long)]
    ohlc: bool,

    /// Append interval volume to each bar
    #[arg(long)]
    vol: bool,

    /// Password sent in the quote source handshake
    #[arg(long)]
    auth: Option<String>,

    /// Bar line format (tuple, csv, ndjson)
    #[arg(short, long, default_value = "tuple")]
    format: OutputFormat,

    /// Prefix each bar with its interval start time
    #[arg(long)]
    timestamps: bool,

    /// Write partially accumulated bars when stopping
    #[arg(long)]
    flush_on_stop: bool,

    /// Keep running when a single symbol's file cannot be written
    #[arg(long)]
    isolate_sink_errors: bool,

    /// Sync each bar to disk after writing
    #[arg(long)]
    sync: bool,

    /// Connect timeout in seconds
    #[arg(long, default_value = "5")]
    connect_timeout: u64,

    /// PID file path. Defaults to the tickbar data directory.
    #[arg(long)]
    pidfile: Option<PathBuf>,

    /// Error file for a background process. Defaults to the tickbar data directory.
    #[arg(long)]
    errorfile: Option<PathBuf>,

    /// Detach and run in the background
    #[arg(long)]
    background: bool,
}

impl RunArgs {
    fn spec(&self) -> BarSpec {
        if let Some(spec) = self.bar_type {
            return spec;
        }
        let spec = if self.ohlc {
            BarSpec::ohlc()
        } else {
            BarSpec::close()
        };
        spec.with_volume(self.vol)
    }

    fn engine_config(&self) -> Result<EngineConfig> {
        let policy = if self.isolate_sink_errors {
            SinkFailurePolicy::Isolate
        } else {
            SinkFailurePolicy::Halt
        };
        let config = EngineConfig::new(self.interval, self.spec(), &self.symbols)
            .context("Invalid configuration")?
            .with_sink_policy(policy)
            .with_flush_on_stop(self.flush_on_stop);
        validate_output_dir(&self.outdir).context("Invalid output directory")?;
        Ok(config)
    }

    fn feed_config(&self, config: &EngineConfig) -> Result<FeedConfig> {
        let feed = FeedConfig::new(&self.addr, config.symbols().to_vec(), config.spec().volume)
            .with_context(|| format!("Invalid quote source address: {}", self.addr))?
            .with_auth(self.auth.clone())
            .with_connect_timeout(Duration::from_secs(self.connect_timeout));
        Ok(feed)
    }
}

/// Execute `tickbar run`.
pub(crate) async fn run(args: RunArgs) -> Result<ExitCode> {
    // Nothing is spawned or connected until the configuration is valid.
    let config = args.engine_config()?;
    let feed = args.feed_config(&config)?;
    let paths = RuntimePaths::default_paths();

    if args.background && !BackgroundSpawner::is_child() {
        let error_file = args.errorfile.clone().unwrap_or_else(|| paths.error_file());
        let spawner = BackgroundSpawner::new(error_file.clone())?;
        let pid = spawner.spawn(std::env::args_os().skip(1))?;
        println!("tickbar started in background (pid {pid})");
        println!("Diagnostics: {}", error_file.display());
        return Ok(ExitCode::SUCCESS);
    }

    let pidfile = args.pidfile.clone().unwrap_or_else(|| paths.pid_file());
    let _pid_guard = PidFile::create(pidfile)?;

    let spec = config.spec();
    let naming = DestinationNaming::new(&args.outdir, spec, config.interval(), args.format.extension());
    let sink = FileSink::new(naming).with_sync(args.sync);
    let formatter = args.format.formatter(spec, args.timestamps);
    let engine = AggregationEngine::new(&config, formatter, sink)
        .context("Failed to prepare bar destinations")?;

    let source = TcpQuoteSource::connect(&feed)
        .await
        .context("Failed to connect to quote source")?;
    info!(
        address = source.address(),
        symbols = config.symbols().len(),
        interval = %config.interval(),
        tag = spec.tag(),
        "connected"
    );

    let runner = EngineRunner::new(engine, source).with_flush_on_stop(config.flush_on_stop());
    let stop = runner.handle();
    let run_task = tokio::spawn(runner.run());
    tokio::spawn(stop_on_signal(stop.clone()));

    supervise(&stop, &run_task, LIVENESS_PERIOD).await;

    let outcome = run_task.await.context("Intake task panicked")?;
    report(&outcome.reason, &outcome.stats);
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Waits until a stop is requested or the intake task has ended.
///
/// The task can finish without touching `stop` when it panics, so both are
/// checked on every tick.
async fn supervise<T>(stop: &StopHandle, task: &JoinHandle<T>, period: Duration) {
    let mut liveness = tokio::time::interval(period);
    while stop.running() && !task.is_finished() {
        liveness.tick().await;
        debug!("engine running");
    }
}

fn report(reason: &StopReason, stats: &EngineStats) {
    match reason {
        StopReason::Stopped => info!(%stats, "stopped"),
        StopReason::SourceExhausted => info!(%stats, "quote source closed the stream"),
        StopReason::AdapterFailed(message) => {
            error!(%stats, "quote source failed: {message}");
        }
        StopReason::SinkFailed(message) => {
            error!(%stats, "bar output failed: {message}");
        }
    }
}

/// Stops the engine on SIGINT or SIGTERM.
async fn stop_on_signal(stop: StopHandle) {
    match wait_for_signal().await {
        Ok(name) => {
            info!(signal = name, "received signal, stopping");
            stop.stop();
        }
        Err(err) => warn!(error = %err, "failed to install signal handlers"),
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    tokio::select! {
        result = signal::ctrl_c() => result.map(|()| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    signal::ctrl_c().await.map(|()| "Ctrl+C")
}
