//! Result Row - one parsed line of a results file

use std::path::Path;

use super::TrimPolicy;
use crate::{Error, Result};

/// A label followed by the latency samples of one config point execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    label: String,
    samples: Vec<f64>,
}

impl ResultRow {
    /// Create a row from already-parsed values.
    #[must_use]
    pub fn new(label: impl Into<String>, samples: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            samples,
        }
    }

    /// Parse one line of in-memory text (e.g. captured stdout).
    ///
    /// # Errors
    ///
    /// Returns `MalformedRow` or `MissingSentinel`.
    pub fn parse(line: &str, trim: TrimPolicy) -> Result<Self> {
        Self::parse_at(line, trim, Path::new("<output>"), 1)
    }

    /// Parse one line, reporting errors against `path:line_no`.
    pub(crate) fn parse_at(
        line: &str,
        trim: TrimPolicy,
        path: &Path,
        line_no: usize,
    ) -> Result<Self> {
        let malformed = |reason: String| Error::MalformedRow {
            path: path.to_path_buf(),
            line: line_no,
            reason,
        };

        let line = line.trim_end_matches(['\n', '\r']);
        let mut cells: Vec<&str> = line.split('\t').collect();
        let label = cells.remove(0).trim();
        if label.is_empty() {
            return Err(malformed("empty label column".to_string()));
        }

        match trim {
            TrimPolicy::LabelAndSentinel => match cells.last() {
                Some(last) if last.trim().is_empty() => {
                    cells.pop();
                }
                _ => {
                    return Err(Error::MissingSentinel {
                        path: path.to_path_buf(),
                        line: line_no,
                    })
                }
            },
            TrimPolicy::LabelOnly => {
                while cells.last().is_some_and(|c| c.trim().is_empty()) {
                    cells.pop();
                }
            }
        }

        let samples = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                // column numbers are 1-based and count the label
                let column = i + 2;
                let cell = cell.trim();
                if cell.is_empty() {
                    return Err(malformed(format!("empty cell in column {column}")));
                }
                let value: f64 = cell.parse().map_err(|_| {
                    malformed(format!("'{cell}' in column {column} is not a number"))
                })?;
                if !value.is_finite() {
                    return Err(malformed(format!(
                        "'{cell}' in column {column} is not finite"
                    )));
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            label: label.to_string(),
            samples,
        })
    }

    /// Get the label column.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the latency samples.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Copy of this row without its first `n` samples.
    #[must_use]
    pub fn skip_leading(&self, n: usize) -> Self {
        Self {
            label: self.label.clone(),
            samples: self.samples.iter().skip(n).copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_executable_line() {
        let row = ResultRow::parse("262144\t0.5\t0.25\t1e-1\t\n", TrimPolicy::LabelAndSentinel)
            .unwrap();
        assert_eq!(row.label(), "262144");
        assert_eq!(row.samples(), &[0.5, 0.25, 0.1]);
    }

    #[test]
    fn test_label_only_ignores_trailing_empties() {
        let row = ResultRow::parse("7\t1.0\t2.0\t\t", TrimPolicy::LabelOnly).unwrap();
        assert_eq!(row.samples(), &[1.0, 2.0]);
        let row = ResultRow::parse("7\t1.0\t2.0", TrimPolicy::LabelOnly).unwrap();
        assert_eq!(row.samples(), &[1.0, 2.0]);
    }

    #[test]
    fn test_missing_sentinel() {
        let err = ResultRow::parse("7\t1.0\t2.0\n", TrimPolicy::LabelAndSentinel).unwrap_err();
        assert!(matches!(err, Error::MissingSentinel { line: 1, .. }));
    }

    #[test]
    fn test_interior_empty_cell_is_malformed() {
        let err = ResultRow::parse("7\t1.0\t\t2.0\t", TrimPolicy::LabelAndSentinel).unwrap_err();
        assert!(err.to_string().contains("empty cell in column 3"));
    }

    #[test]
    fn test_non_numeric_and_nan_rejected() {
        assert!(ResultRow::parse("7\tabc\t", TrimPolicy::LabelAndSentinel).is_err());
        assert!(ResultRow::parse("7\tNaN\t", TrimPolicy::LabelAndSentinel).is_err());
        assert!(ResultRow::parse("7\tinf\t", TrimPolicy::LabelAndSentinel).is_err());
    }

    #[test]
    fn test_skip_leading() {
        let row = ResultRow::new("1", vec![9.0, 1.0, 2.0]);
        assert_eq!(row.skip_leading(1).samples(), &[1.0, 2.0]);
        assert!(row.skip_leading(5).samples().is_empty());
    }
}
