//! Result loader - reads results files into ragged numeric tables

use std::path::{Path, PathBuf};

use super::{ResultRow, ResultsSchema, TrimPolicy};
use crate::{Error, Result};

/// Rows loaded from one or more results files, in file order.
///
/// Rows may have different sample counts: a file accumulates rows from
/// independently configured runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Table from already-parsed rows.
    #[must_use]
    pub const fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    /// Get the rows.
    #[must_use]
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Label column, one entry per row.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(ResultRow::label).collect()
    }

    /// The first `n` rows (all rows if there are fewer).
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self {
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Drop the first `n` samples of every row, e.g. warmup trials.
    #[must_use]
    pub fn skip_leading(&self, n: usize) -> Self {
        Self {
            rows: self.rows.iter().map(|r| r.skip_leading(n)).collect(),
        }
    }
}

/// Reads results files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultLoader;

impl ResultLoader {
    /// Load one results file with an explicit trim policy. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an I/O error, or `MalformedRow`/`MissingSentinel` naming the
    /// offending line.
    pub fn load(path: impl AsRef<Path>, trim: TrimPolicy) -> Result<ResultTable> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, trim, path)
    }

    /// Load one results file with the trim policy from its schema sidecar.
    ///
    /// # Errors
    ///
    /// Returns `Schema` if there is no sidecar, plus everything [`ResultLoader::load`] returns.
    pub fn load_with_schema(path: impl AsRef<Path>) -> Result<ResultTable> {
        let path = path.as_ref();
        let schema = ResultsSchema::read(path)?.ok_or_else(|| {
            Error::Schema(format!(
                "{} has no schema sidecar; load it with an explicit trim policy",
                path.display()
            ))
        })?;
        Self::load(path, schema.trim())
    }

    /// Load several files and concatenate their rows in argument order.
    ///
    /// # Errors
    ///
    /// Fails on the first file that fails to load.
    pub fn load_all<P: AsRef<Path>>(paths: &[P], trim: TrimPolicy) -> Result<ResultTable> {
        let mut rows = Vec::new();
        for path in paths {
            rows.extend(Self::load(path, trim)?.rows);
        }
        Ok(ResultTable { rows })
    }

    /// Parse results text that came from `origin`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRow`/`MissingSentinel` naming the offending line.
    pub fn parse(text: &str, trim: TrimPolicy, origin: &Path) -> Result<ResultTable> {
        let origin: PathBuf = origin.to_path_buf();
        let rows = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| ResultRow::parse_at(line, trim, &origin, i + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(ResultTable { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ragged_rows() {
        let text = "1\t0.1\t0.2\t\n2\t0.3\t\n\n3\t0.4\t0.5\t0.6\t\n";
        let table = ResultLoader::parse(text, TrimPolicy::LabelAndSentinel, Path::new("t"))
            .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.labels(), ["1", "2", "3"]);
        assert_eq!(table.rows()[1].samples(), &[0.3]);
        assert_eq!(table.rows()[2].samples().len(), 3);
    }

    #[test]
    fn test_error_reports_line_number() {
        let text = "1\t0.1\t\n2\t0.2\n";
        let err = ResultLoader::parse(text, TrimPolicy::LabelAndSentinel, Path::new("t.csv"))
            .unwrap_err();
        assert!(matches!(err, Error::MissingSentinel { line: 2, .. }));
        assert!(err.to_string().contains("t.csv:2"));
    }

    #[test]
    fn test_head_and_skip_leading() {
        let text = "1\t9\t0.1\t\n2\t9\t0.2\t\n3\t9\t0.3\t\n";
        let table = ResultLoader::parse(text, TrimPolicy::LabelAndSentinel, Path::new("t"))
            .unwrap();
        let trimmed = table.head(2).skip_leading(1);
        assert_eq!(trimmed.len(), 2);
        assert_eq!(trimmed.rows()[1].samples(), &[0.2]);
    }

    #[test]
    fn test_load_with_schema_requires_sidecar() {
        let path = std::env::temp_dir()
            .join(format!("shard_sweep_nosidecar_{}.csv", std::process::id()));
        std::fs::write(&path, "1\t0.1\t\n").unwrap();
        assert!(matches!(
            ResultLoader::load_with_schema(&path),
            Err(Error::Schema(_))
        ));
        std::fs::remove_file(&path).ok();
    }
}
