//! Aggregation throughput benchmarks.
//!
//! Run with: `cargo bench --package tickbar-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tempfile::TempDir;
use tickbar_bench::QuoteStream;
use tickbar_lib::prelude::*;
use tickbar_lib::StreamSource;

fn stream_configs() -> Vec<(&'static str, QuoteStream)> {
    vec![
        (
            "1-symbol",
            QuoteStream {
                symbols: 1,
                quotes: 100_000,
                step_millis: 100,
            },
        ),
        (
            "50-symbols",
            QuoteStream {
                symbols: 50,
                quotes: 100_000,
                step_millis: 10,
            },
        ),
    ]
}

fn engine_config(stream: &QuoteStream, spec: BarSpec) -> EngineConfig {
    EngineConfig::new(60, spec, stream.symbol_names()).unwrap()
}

/// Engine routing and rollover into an in-memory sink.
fn memory_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_memory");

    for (name, stream) in stream_configs() {
        let quotes = stream.generate();
        group.throughput(Throughput::Elements(quotes.len() as u64));

        for format in [OutputFormat::Tuple, OutputFormat::Csv, OutputFormat::Ndjson] {
            let spec = BarSpec::ohlc().with_volume(true);
            let config = engine_config(&stream, spec);
            group.bench_with_input(
                BenchmarkId::new(format.to_string(), name),
                &quotes,
                |b, quotes| {
                    b.iter_batched(
                        || {
                            AggregationEngine::new(
                                &config,
                                format.formatter(spec, false),
                                MemorySink::new(),
                            )
                            .unwrap()
                        },
                        |mut engine| {
                            for quote in quotes {
                                engine.process(quote.clone()).unwrap();
                            }
                            engine.stats()
                        },
                        criterion::BatchSize::LargeInput,
                    );
                },
            );
        }
    }

    group.finish();
}

/// End to end through the async runner with open-append-close file output.
fn file_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("runner_file");
    group.sample_size(10);

    for (name, stream) in stream_configs() {
        let quotes = stream.generate();
        group.throughput(Throughput::Elements(quotes.len() as u64));

        let spec = BarSpec::close();
        let config = engine_config(&stream, spec);
        group.bench_with_input(BenchmarkId::new("tuple", name), &quotes, |b, quotes| {
            b.to_async(&runtime).iter_batched(
                || {
                    let dir = TempDir::new().unwrap();
                    let naming = DestinationNaming::new(dir.path(), spec, config.interval(), "bars");
                    let engine = AggregationEngine::new(
                        &config,
                        OutputFormat::Tuple.formatter(spec, false),
                        FileSink::new(naming),
                    )
                    .unwrap();
                    (dir, engine, quotes.clone())
                },
                |(dir, engine, quotes)| async move {
                    let source = StreamSource::new(futures::stream::iter(quotes));
                    let outcome = EngineRunner::new(engine, source).run().await;
                    drop(dir);
                    outcome
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, memory_benchmark, file_benchmark);
criterion_main!(benches);
