//! Statistical reduction of results tables
//!
//! Per row: arithmetic mean and sample standard deviation of the latency
//! samples. Throughput is derived per sample (`payload / latency`) and then
//! reduced on its own, so mean throughput is the mean of reciprocals and not
//! `payload / mean latency`.

use serde::Serialize;
use tracing::warn;

use crate::plot::Series;
use crate::results::ResultTable;
use crate::{Error, Result};

/// Mean and sample standard deviation of one set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (n - 1 divisor), 0 for a single value
    pub std_dev: f64,
    /// Number of values summarized
    pub count: usize,
}

/// Summarize `values`.
///
/// # Errors
///
/// Returns `Reduction` if `values` is empty.
#[allow(clippy::cast_precision_loss)]
pub fn summarize(values: &[f64]) -> Result<Summary> {
    if values.is_empty() {
        return Err(Error::Reduction("no samples to summarize".to_string()));
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std_dev = if values.len() < 2 {
        0.0
    } else {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    };
    Ok(Summary {
        mean,
        std_dev,
        count: values.len(),
    })
}

/// Element-wise `payload / latency`.
///
/// # Errors
///
/// Returns `Reduction` for a zero, negative or non-finite latency.
pub fn throughput(payload: f64, latencies: &[f64]) -> Result<Vec<f64>> {
    latencies
        .iter()
        .enumerate()
        .map(|(i, &latency)| {
            if !latency.is_finite() || latency <= 0.0 {
                return Err(Error::Reduction(format!(
                    "latency sample {i} is {latency}; throughput is undefined"
                )));
            }
            Ok(payload / latency)
        })
        .collect()
}

/// Reduced statistics of one results row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReducedRow {
    /// Label column of the source row
    pub label: String,
    /// Latency summary
    pub latency: Summary,
    /// Throughput summary, when the reducer has a payload size
    pub throughput: Option<Summary>,
}

/// Reduced statistics of a whole table, in row order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReducedSeries {
    rows: Vec<ReducedRow>,
}

impl ReducedSeries {
    /// Get the reduced rows.
    #[must_use]
    pub fn rows(&self) -> &[ReducedRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows.
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self {
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Labels of rows reduced from a single sample (std reported as 0).
    #[must_use]
    pub fn single_sample_labels(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| r.latency.count < 2)
            .map(|r| r.label.as_str())
            .collect()
    }

    /// Latency means, one per row.
    #[must_use]
    pub fn latency_means(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.latency.mean).collect()
    }

    /// Latency standard deviations, one per row.
    #[must_use]
    pub fn latency_std_devs(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.latency.std_dev).collect()
    }

    /// Latency as a named plot series.
    #[must_use]
    pub fn latency_series(&self, name: impl Into<String>) -> Series {
        Series::new(name, self.latency_means(), self.latency_std_devs())
    }

    /// Throughput as a named plot series.
    ///
    /// # Errors
    ///
    /// Returns `Reduction` if the series was reduced without a payload size.
    pub fn throughput_series(&self, name: impl Into<String>) -> Result<Series> {
        let summaries = self
            .rows
            .iter()
            .map(|r| {
                r.throughput.ok_or_else(|| {
                    Error::Reduction(format!(
                        "row '{}' was reduced without a payload size",
                        r.label
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Series::new(
            name,
            summaries.iter().map(|s| s.mean).collect(),
            summaries.iter().map(|s| s.std_dev).collect(),
        ))
    }
}

/// Reduces results tables to per-row statistics. Stateless.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatisticalReducer {
    payload: Option<f64>,
}

impl StatisticalReducer {
    /// Reducer that computes latency statistics only.
    #[must_use]
    pub const fn new() -> Self {
        Self { payload: None }
    }

    /// Reducer that also derives throughput from a fixed payload size
    /// (messages per trial).
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `payload` is positive and finite.
    pub fn with_throughput(payload: f64) -> Result<Self> {
        if !payload.is_finite() || payload <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "throughput payload must be positive, got {payload}"
            )));
        }
        Ok(Self {
            payload: Some(payload),
        })
    }

    /// Get the payload size, if throughput is derived.
    #[must_use]
    pub const fn payload(&self) -> Option<f64> {
        self.payload
    }

    /// Reduce every row of `table`.
    ///
    /// # Errors
    ///
    /// Returns `Reduction` for a row without samples or, when deriving
    /// throughput, a non-positive latency. The message names the row label.
    pub fn reduce(&self, table: &ResultTable) -> Result<ReducedSeries> {
        let rows = table
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let context = |e: Error| match e {
                    Error::Reduction(msg) => {
                        Error::Reduction(format!("row {} (label '{}'): {msg}", i + 1, row.label()))
                    }
                    other => other,
                };
                let latency = summarize(row.samples()).map_err(context)?;
                let throughput = match self.payload {
                    Some(payload) => Some(
                        throughput(payload, row.samples())
                            .and_then(|t| summarize(&t))
                            .map_err(context)?,
                    ),
                    None => None,
                };
                Ok(ReducedRow {
                    label: row.label().to_string(),
                    latency,
                    throughput,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let reduced = ReducedSeries { rows };
        let single = reduced.single_sample_labels();
        if !single.is_empty() {
            warn!(rows = ?single, "single-sample rows have no spread; std reported as 0");
        }
        Ok(reduced)
    }
}
