//! Tests for error types

use std::path::PathBuf;

use shard_sweep::Error;

#[test]
fn test_invalid_config_error() {
    let error = Error::InvalidConfig("send count must be positive".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid configuration"));
    assert!(error_str.contains("send count must be positive"));
}

#[test]
fn test_execution_error_carries_stderr() {
    let error = Error::Execution {
        config: "sharded send=4 fetch=2 threads=1 users=2 shards=1 runs=1 warmup=0".to_string(),
        reason: "exited with status 101".to_string(),
        stderr: "thread 'main' panicked".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Execution failed for sharded send=4"));
    assert!(error_str.contains("exited with status 101"));
    assert!(error_str.contains("thread 'main' panicked"));
}

#[test]
fn test_malformed_row_names_location() {
    let error = Error::MalformedRow {
        path: PathBuf::from("data/message-scaling/baseline-8192-48.csv"),
        line: 3,
        reason: "'abc' in column 2 is not a number".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("baseline-8192-48.csv:3"));
    assert!(error_str.contains("column 2"));
}

#[test]
fn test_missing_sentinel_suggests_policy() {
    let error = Error::MissingSentinel {
        path: PathBuf::from("rows.csv"),
        line: 1,
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("rows.csv:1"));
    assert!(error_str.contains("LabelOnly"));
}

#[test]
fn test_series_mismatch_error() {
    let error = Error::SeriesMismatch {
        series: "Sharded".to_string(),
        expected: 8,
        actual: 7,
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("'Sharded' has 7 points"));
    assert!(error_str.contains("x-domain has 8"));
}

#[test]
fn test_reduction_plot_schema_errors() {
    assert!(Error::Reduction("no samples".to_string())
        .to_string()
        .starts_with("Reduction error"));
    assert!(Error::Plot("backend".to_string())
        .to_string()
        .starts_with("Plot error"));
    assert!(Error::Schema("version 9".to_string())
        .to_string()
        .starts_with("Schema error"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_error.into();
    assert!(matches!(error, Error::Json(_)));
}

#[test]
fn test_error_debug() {
    let error = Error::InvalidConfig("test".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("InvalidConfig"));
}
