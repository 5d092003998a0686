//! Experiment Record - one sweep invocation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Experiment Record marks the start of one sweep invocation.
///
/// Re-running a sweep appends rows to the same results files, so the ledger
/// gets one of these per invocation to tell the batches apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentRecord {
    experiment: String,
    created_at: DateTime<Utc>,
    steps: usize,
    config: Option<serde_json::Value>,
}

impl ExperimentRecord {
    /// Create a new experiment record.
    ///
    /// # Arguments
    ///
    /// * `experiment` - Experiment name (also its data directory)
    /// * `steps` - Number of sweep steps planned
    #[must_use]
    pub fn new(experiment: impl Into<String>, steps: usize) -> Self {
        Self {
            experiment: experiment.into(),
            created_at: Utc::now(),
            steps,
            config: None,
        }
    }

    /// Create a builder for constructing an experiment record with optional fields.
    #[must_use]
    pub fn builder(experiment: impl Into<String>, steps: usize) -> ExperimentRecordBuilder {
        ExperimentRecordBuilder::new(experiment, steps)
    }

    /// Get the experiment name.
    #[must_use]
    pub fn experiment(&self) -> &str {
        &self.experiment
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the number of planned sweep steps.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Get the experiment descriptor, if recorded.
    #[must_use]
    pub const fn config(&self) -> Option<&serde_json::Value> {
        self.config.as_ref()
    }
}

/// Builder for `ExperimentRecord`.
#[derive(Debug)]
pub struct ExperimentRecordBuilder {
    experiment: String,
    created_at: DateTime<Utc>,
    steps: usize,
    config: Option<serde_json::Value>,
}

impl ExperimentRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(experiment: impl Into<String>, steps: usize) -> Self {
        Self {
            experiment: experiment.into(),
            created_at: Utc::now(),
            steps,
            config: None,
        }
    }

    /// Set the serialized experiment descriptor.
    #[must_use]
    pub fn config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom creation timestamp (useful for testing).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Build the `ExperimentRecord`.
    #[must_use]
    pub fn build(self) -> ExperimentRecord {
        ExperimentRecord {
            experiment: self.experiment,
            created_at: self.created_at,
            steps: self.steps,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experiment_record_builder() {
        let config = serde_json::json!({"name": "message-scaling"});
        let record = ExperimentRecord::builder("message-scaling", 8)
            .config(config.clone())
            .build();
        assert_eq!(record.experiment(), "message-scaling");
        assert_eq!(record.steps(), 8);
        assert_eq!(record.config(), Some(&config));
    }
}
