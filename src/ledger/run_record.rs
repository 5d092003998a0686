//! Run Record - one benchmark execution within a sweep

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ConfigPoint;

/// Status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    /// Run is planned but not yet launched.
    Pending,
    /// Child process is running.
    Running,
    /// Output was parsed and appended to the results file.
    Success,
    /// Child failed or its output was rejected; nothing was appended.
    Failed,
}

/// Run Record tracks one config point execution from launch to completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunRecord {
    experiment: String,
    step: usize,
    config: ConfigPoint,
    status: RunStatus,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RunRecord {
    /// Create a new run record in Pending status.
    ///
    /// # Arguments
    ///
    /// * `experiment` - Name of the parent experiment
    /// * `step` - Zero-based sweep step
    /// * `config` - Config point being run
    #[must_use]
    pub fn new(experiment: impl Into<String>, step: usize, config: ConfigPoint) -> Self {
        Self {
            experiment: experiment.into(),
            step,
            config,
            status: RunStatus::Pending,
            started_at: None,
            ended_at: None,
            error: None,
        }
    }

    /// Get the parent experiment name.
    #[must_use]
    pub fn experiment(&self) -> &str {
        &self.experiment
    }

    /// Get the sweep step.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Get the config point.
    #[must_use]
    pub const fn config(&self) -> &ConfigPoint {
        &self.config
    }

    /// Get the current run status.
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Get the start timestamp, if the run has started.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Get the end timestamp, if the run has completed.
    #[must_use]
    pub const fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Get the failure message (including captured stderr), if the run failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start the run, transitioning from Pending to Running.
    pub fn start(&mut self) {
        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Complete the run successfully.
    pub fn succeed(&mut self) {
        self.status = RunStatus::Success;
        self.ended_at = Some(Utc::now());
    }

    /// Complete the run as failed, keeping the error text.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = RunStatus::Failed;
        self.error = Some(error.into());
        self.ended_at = Some(Utc::now());
    }
}
