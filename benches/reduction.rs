//! Loading and reduction benchmarks
//!
//! Results files are small (one row per sweep step), so these mostly guard
//! against accidental quadratic behavior in the loader and reducer.
//!
//! Run with: cargo bench --bench reduction

use std::fmt::Write;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use shard_sweep::results::{ResultLoader, TrimPolicy};
use shard_sweep::stats::StatisticalReducer;

const SAMPLES_PER_ROW: usize = 10;

/// Results text in the executables' format with random latencies
fn results_text(rows: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut text = String::new();
    for i in 0..rows {
        write!(text, "{}\t", 1u64 << (i % 32)).unwrap();
        for _ in 0..SAMPLES_PER_ROW {
            write!(text, "{}\t", rng.gen_range(0.001..2.0)).unwrap();
        }
        text.push('\n');
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_results");
    for rows in [8, 1_000, 100_000] {
        let text = results_text(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &text, |b, text| {
            b.iter(|| {
                let origin = Path::new("bench");
                ResultLoader::parse(black_box(text), TrimPolicy::LabelAndSentinel, origin).unwrap()
            });
        });
    }
    group.finish();
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");
    for rows in [8, 1_000, 100_000] {
        let text = results_text(rows);
        let table =
            ResultLoader::parse(&text, TrimPolicy::LabelAndSentinel, Path::new("bench")).unwrap();

        group.bench_with_input(BenchmarkId::new("latency", rows), &table, |b, table| {
            let reducer = StatisticalReducer::new();
            b.iter(|| reducer.reduce(black_box(table)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("latency_throughput", rows), &table, |b, table| {
            let reducer = StatisticalReducer::with_throughput(131_072.0).unwrap();
            b.iter(|| reducer.reduce(black_box(table)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_reduce);
criterion_main!(benches);
