//! Error types for shard-sweep
//!
//! One variant per failure class: configuration, execution, I/O, loading and
//! reduction. Messages name the offending file, line or configuration so an
//! operator can act on them without reading the code.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// shard-sweep error types
#[derive(Error, Debug)]
pub enum Error {
    /// A config point or sweep descriptor is invalid. Raised before any child
    /// process is launched.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A benchmark executable failed or produced output that is not a result row
    #[error("Execution failed for {config}: {reason}\nstderr:\n{stderr}")]
    Execution {
        /// Rendered config point that was running
        config: String,
        /// What was wrong with the run
        reason: String,
        /// Raw text the process wrote to its error stream
        stderr: String,
    },

    /// A results row could not be parsed
    #[error("Malformed row at {}:{line}: {reason}", path.display())]
    MalformedRow {
        /// File the row came from (empty for in-memory text)
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What was wrong with the row
        reason: String,
    },

    /// Trim policy expects a trailing sentinel column that the row does not have
    #[error("Missing trailing sentinel at {}:{line}\nThe trim policy expects an empty final column; load with TrimPolicy::LabelOnly if this file has none.", path.display())]
    MissingSentinel {
        /// File the row came from
        path: PathBuf,
        /// 1-based line number
        line: usize,
    },

    /// Statistical reduction hit an undefined value
    #[error("Reduction error: {0}")]
    Reduction(String),

    /// Series handed to the plotter do not share a common x-domain
    #[error("Series length mismatch: '{series}' has {actual} points but the x-domain has {expected}")]
    SeriesMismatch {
        /// Name of the offending series
        series: String,
        /// Number of x values
        expected: usize,
        /// Number of points in the series
        actual: usize,
    },

    /// Chart rendering failed
    #[error("Plot error: {0}")]
    Plot(String),

    /// Results schema sidecar is unsupported
    #[error("Schema error: {0}")]
    Schema(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (schema sidecar / run ledger) error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
