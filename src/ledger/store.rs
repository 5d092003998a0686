//! Run Ledger - append-only JSON-lines log of sweep invocations and runs
//!
//! The ledger sits next to the results files of an experiment. It is a
//! diagnostic record for the operator; the analysis phase never reads it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ExperimentRecord, RunRecord};
use crate::results::append_text;
use crate::Result;

/// One line of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LedgerEntry {
    /// A sweep invocation started
    Experiment(ExperimentRecord),
    /// A config point finished (successfully or not)
    Run(RunRecord),
}

/// Append-only ledger file.
#[derive(Debug, Clone)]
pub struct RunLedger {
    path: PathBuf,
}

impl RunLedger {
    /// Ledger stored at `path`. Nothing is written until the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the ledger path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an experiment record.
    ///
    /// # Errors
    ///
    /// Returns an I/O or JSON error.
    pub fn record_experiment(&self, record: ExperimentRecord) -> Result<()> {
        self.append(&LedgerEntry::Experiment(record))
    }

    /// Append a finished run record.
    ///
    /// # Errors
    ///
    /// Returns an I/O or JSON error.
    pub fn record_run(&self, record: RunRecord) -> Result<()> {
        self.append(&LedgerEntry::Run(record))
    }

    fn append(&self, entry: &LedgerEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        append_text(&self.path, &line)
    }

    /// Read every entry, in write order.
    ///
    /// # Errors
    ///
    /// Returns an I/O error or a JSON error for a corrupt line.
    pub fn entries(&self) -> Result<Vec<LedgerEntry>> {
        let text = std::fs::read_to_string(&self.path)?;
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Into::into))
            .collect()
    }

    /// Runs recorded for `experiment`, ordered by step.
    ///
    /// # Errors
    ///
    /// Same as [`RunLedger::entries`].
    pub fn runs_for_experiment(&self, experiment: &str) -> Result<Vec<RunRecord>> {
        let mut runs: Vec<RunRecord> = self
            .entries()?
            .into_iter()
            .filter_map(|entry| match entry {
                LedgerEntry::Run(run) if run.experiment() == experiment => Some(run),
                _ => None,
            })
            .collect();

        // stable: runs of one step keep participant order
        runs.sort_by_key(RunRecord::step);

        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigPoint, Implementation};
    use crate::ledger::RunStatus;

    #[test]
    fn test_ledger_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("shard_sweep_ledger_{}.jsonl", std::process::id()));
        std::fs::remove_file(&path).ok();
        let ledger = RunLedger::new(&path);

        ledger.record_experiment(ExperimentRecord::new("exp", 2)).unwrap();
        let point = ConfigPoint::builder(Implementation::Baseline)
            .send_count(4)
            .fetch_count(1)
            .thread_count(1)
            .build();
        for step in [1, 0] {
            let mut run = RunRecord::new("exp", step, point.clone());
            run.start();
            run.succeed();
            ledger.record_run(run).unwrap();
        }

        assert_eq!(ledger.entries().unwrap().len(), 3);
        let runs = ledger.runs_for_experiment("exp").unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].step(), 0);
        assert_eq!(runs[1].status(), RunStatus::Success);
        std::fs::remove_file(&path).ok();
    }
}
