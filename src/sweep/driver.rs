//! Sweep driver - the sequential run loop
//!
//! For each sweep step, each participant in turn: launch, wait, check the
//! output is a results row, append it. One child process at a time; the
//! benchmarks use every core, so overlapping runs would skew each other.

use tracing::{debug, error, info, warn};

use super::{Experiment, SweepPlan};
use crate::config::{validate_contracts, ConfigPoint};
use crate::invoke::{CapturedOutput, Invoke, ProcessInvoker};
use crate::ledger::{ExperimentRecord, RunLedger, RunRecord};
use crate::results::{ResultRecorder, ResultRow, ResultsSchema, TrimPolicy};
use crate::{Error, Result};

/// Outcome of a finished sweep.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SweepSummary {
    /// Rows appended to results files
    pub rows_recorded: usize,
    /// Runs that failed and were skipped (only with continue-on-error)
    pub failures: Vec<String>,
}

/// Runs experiments with a given invoker.
#[derive(Debug, Clone)]
pub struct SweepDriver<I = ProcessInvoker> {
    invoker: I,
}

impl SweepDriver<ProcessInvoker> {
    /// Driver that launches real child processes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the argument table is inconsistent.
    pub fn new() -> Result<Self> {
        Self::with_invoker(ProcessInvoker::new())
    }
}

impl<I: Invoke> SweepDriver<I> {
    /// Driver using `invoker`. Validates the argument table once.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the argument table is inconsistent.
    pub fn with_invoker(invoker: I) -> Result<Self> {
        validate_contracts()?;
        Ok(Self { invoker })
    }

    /// Run every step of `experiment`.
    ///
    /// A sweep stopped at step k leaves the rows of the runs before it intact.
    ///
    /// # Errors
    ///
    /// Configuration errors before anything launches; I/O errors always;
    /// execution errors unless the experiment continues on error.
    pub fn run(&self, experiment: &Experiment) -> Result<SweepSummary> {
        let plan = SweepPlan::new(experiment)?;
        let recorder = ResultRecorder::new(ResultsSchema::new(experiment.trim()));
        let ledger = RunLedger::new(experiment.ledger_path());
        ledger.record_experiment(
            ExperimentRecord::builder(experiment.name(), plan.steps())
                .config(serde_json::to_value(experiment)?)
                .build(),
        )?;

        info!(
            experiment = experiment.name(),
            steps = plan.steps(),
            runs = plan.total_runs(),
            "starting sweep"
        );

        let mut summary = SweepSummary::default();
        for step in 0..plan.steps() {
            for (index, participant) in experiment.participants().iter().enumerate() {
                let point = &plan.points(index)[step];
                let path = experiment.results_path(participant);
                info!(step, config = %point, "running");

                let mut run = RunRecord::new(experiment.name(), step, point.clone());
                run.start();
                let outcome = self
                    .invoker
                    .run(point, participant.launcher())
                    .and_then(|captured| check_output(point, &captured, experiment.trim()))
                    .and_then(|row| recorder.append(&path, &row).map(|()| row));

                match outcome {
                    Ok(row) => {
                        info!(step, row = row.trim_end(), "recorded");
                        run.succeed();
                        ledger.record_run(run)?;
                        summary.rows_recorded += 1;
                    }
                    Err(e @ Error::Execution { .. }) => {
                        error!(step, config = %point, "{e}");
                        run.fail(e.to_string());
                        ledger.record_run(run)?;
                        if !experiment.continue_on_error() {
                            return Err(e);
                        }
                        summary.failures.push(e.to_string());
                    }
                    Err(e) => {
                        error!(step, config = %point, "{e}");
                        run.fail(e.to_string());
                        ledger.record_run(run)?;
                        return Err(e);
                    }
                }
            }
        }

        info!(
            experiment = experiment.name(),
            rows = summary.rows_recorded,
            failures = summary.failures.len(),
            "sweep finished"
        );
        Ok(summary)
    }
}

/// Classify captured output. On success returns the text to append,
/// newline-terminated so the next row starts on its own line.
///
/// # Errors
///
/// Returns `Execution` for a non-zero exit, empty output, output that is not
/// a results row under `trim`, or a row without samples.
pub fn check_output(
    point: &ConfigPoint,
    captured: &CapturedOutput,
    trim: TrimPolicy,
) -> Result<String> {
    let execution = |reason: String| Error::Execution {
        config: point.to_string(),
        reason,
        stderr: captured.stderr.clone(),
    };

    if !captured.success() {
        let reason = captured.exit_code.map_or_else(
            || "terminated by signal".to_string(),
            |code| format!("exited with status {code}"),
        );
        return Err(execution(reason));
    }
    if !captured.stderr.trim().is_empty() {
        debug!(config = %point, stderr = captured.stderr.trim_end(), "benchmark stderr");
    }

    let mut lines = captured.stdout.lines().filter(|l| !l.trim().is_empty()).peekable();
    if lines.peek().is_none() {
        return Err(execution("produced no output".to_string()));
    }
    for line in lines {
        let row = ResultRow::parse(line, trim)
            .map_err(|e| execution(format!("unparsable output ({e}): {line:?}")))?;
        if row.samples().is_empty() {
            return Err(execution("row has no latency samples".to_string()));
        }
        let expected = point.expected_samples();
        if u64::try_from(row.samples().len()).map_or(true, |n| n != expected) {
            warn!(
                config = %point,
                samples = row.samples().len(),
                expected,
                "sample count differs from runs + warmup"
            );
        }
    }

    let mut text = captured.stdout.clone();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Implementation;

    fn point() -> ConfigPoint {
        ConfigPoint::builder(Implementation::Baseline)
            .send_count(4)
            .fetch_count(2)
            .thread_count(1)
            .run_count(2)
            .build()
    }

    fn check(stdout: &str, stderr: &str, exit_code: Option<i32>) -> Result<String> {
        let captured = CapturedOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code,
        };
        check_output(&point(), &captured, TrimPolicy::LabelAndSentinel)
    }

    #[test]
    fn test_good_output_passes_through() {
        let text = check("4\t0.1\t0.2\t\n", "", Some(0)).unwrap();
        assert_eq!(text, "4\t0.1\t0.2\t\n");
    }

    #[test]
    fn test_missing_newline_is_terminated() {
        let text = check("4\t0.1\t0.2\t", "", Some(0)).unwrap();
        assert!(text.ends_with("\t\n"));
    }

    #[test]
    fn test_nonzero_exit_keeps_stderr() {
        let err = check("", "panicked at main.rs", Some(101)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("exited with status 101"));
        assert!(msg.contains("panicked at main.rs"));
    }

    #[test]
    fn test_signal_and_empty_output() {
        let err = check("", "", None).unwrap_err();
        assert!(err.to_string().contains("signal"));
        let err = check("\n", "", Some(0)).unwrap_err();
        assert!(err.to_string().contains("no output"));
    }

    #[test]
    fn test_garbage_output_is_execution_error() {
        let err = check("Compiling baseline v0.1.0\n", "", Some(0)).unwrap_err();
        assert!(matches!(err, Error::Execution { .. }));
    }
}
