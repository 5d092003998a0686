//! Property-based tests for the statistical reducer
//!
//! - Reduction is a pure function of the table
//! - Constant latency gives zero spread and exact throughput
//! - Mean sits inside the sample range
//! - Run with ProptestConfig::with_cases(100)

use proptest::prelude::*;
use shard_sweep::results::{ResultLoader, ResultRow, ResultTable, TrimPolicy};
use shard_sweep::stats::{summarize, StatisticalReducer};
use shard_sweep::Error;

// ============================================================================
// Strategies
// ============================================================================

/// Latencies in seconds, as the executables report them
fn arb_latencies() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(1e-6f64..100.0, 1..20)
}

fn arb_table() -> impl Strategy<Value = ResultTable> {
    proptest::collection::vec(arb_latencies(), 1..10).prop_map(|rows| {
        ResultTable::new(
            rows.into_iter()
                .enumerate()
                .map(|(i, samples)| ResultRow::new((1u64 << (i + 10)).to_string(), samples))
                .collect(),
        )
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: reducing the same table twice gives identical output
    #[test]
    fn prop_reduction_is_idempotent(table in arb_table(), payload in 1.0f64..1e6) {
        let reducer = StatisticalReducer::with_throughput(payload).unwrap();
        let first = reducer.reduce(&table).unwrap();
        let second = reducer.reduce(&table).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: one reduced row per input row, labels preserved
    #[test]
    fn prop_rows_and_labels_preserved(table in arb_table()) {
        let reduced = StatisticalReducer::new().reduce(&table).unwrap();
        prop_assert_eq!(reduced.len(), table.len());
        for (row, out) in table.rows().iter().zip(reduced.rows()) {
            prop_assert_eq!(row.label(), out.label.as_str());
            prop_assert_eq!(out.latency.count, row.samples().len());
            prop_assert!(out.throughput.is_none());
        }
    }

    /// Property: all-equal latencies give mean L, std 0, throughput payload / L
    #[test]
    fn prop_constant_latency(
        latency in 1e-3f64..10.0,
        n in 1usize..20,
        payload in 1.0f64..1e6,
    ) {
        let table = ResultTable::new(vec![ResultRow::new("x", vec![latency; n])]);
        let reduced = StatisticalReducer::with_throughput(payload).unwrap().reduce(&table).unwrap();
        let row = &reduced.rows()[0];
        prop_assert!((row.latency.mean - latency).abs() <= latency * 1e-12);
        prop_assert!(row.latency.std_dev <= latency * 1e-9);
        let throughput = row.throughput.unwrap();
        prop_assert!((throughput.mean - payload / latency).abs() <= (payload / latency) * 1e-12);
        prop_assert!(throughput.std_dev <= (payload / latency) * 1e-9);
    }

    /// Property: min <= mean <= max and std >= 0
    #[test]
    fn prop_mean_within_sample_range(samples in arb_latencies()) {
        let summary = summarize(&samples).unwrap();
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(summary.mean >= min * (1.0 - 1e-12));
        prop_assert!(summary.mean <= max * (1.0 + 1e-12));
        prop_assert!(summary.std_dev >= 0.0);
    }

    /// Property: executable-format text parses back to the same samples
    #[test]
    fn prop_executable_text_parses(samples in arb_latencies()) {
        let mut text = String::from("1024\t");
        for s in &samples {
            text.push_str(&format!("{s}\t"));
        }
        text.push('\n');
        let origin = std::path::Path::new("prop");
        let table = ResultLoader::parse(&text, TrimPolicy::LabelAndSentinel, origin).unwrap();
        prop_assert_eq!(table.rows()[0].samples(), samples.as_slice());
    }
}

#[test]
fn test_zero_latency_fails_throughput_reduction() {
    let table = ResultTable::new(vec![
        ResultRow::new("1", vec![0.5, 0.4]),
        ResultRow::new("2", vec![0.5, 0.0]),
    ]);
    let err = StatisticalReducer::with_throughput(131_072.0)
        .unwrap()
        .reduce(&table)
        .unwrap_err();
    match err {
        Error::Reduction(msg) => assert!(msg.contains("label '2'"), "{msg}"),
        other => panic!("expected Reduction, got {other:?}"),
    }

    // latency alone is still defined
    assert!(StatisticalReducer::new().reduce(&table).is_ok());
}

#[test]
fn test_empty_row_fails_reduction() {
    let table = ResultTable::new(vec![ResultRow::new("1", Vec::new())]);
    assert!(matches!(
        StatisticalReducer::new().reduce(&table),
        Err(Error::Reduction(_))
    ));
}

#[test]
fn test_non_positive_payload_rejected() {
    assert!(StatisticalReducer::with_throughput(0.0).is_err());
    assert!(StatisticalReducer::with_throughput(f64::NAN).is_err());
}
