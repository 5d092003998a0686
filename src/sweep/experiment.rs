//! Experiment descriptors
//!
//! An [`Experiment`] names a sweep axis and the implementations compared
//! along it. Each [`Participant`] carries its own fixed template, executable
//! and (optionally) its own axis, so an implementation can hold a field
//! steady that the others couple.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::SweepAxis;
use crate::config::{ConfigPoint, Implementation};
use crate::invoke::Executable;
use crate::results::TrimPolicy;
use crate::{Error, Result};

/// Default root under which each experiment gets its own data directory.
pub const DEFAULT_DATA_ROOT: &str = "data";

/// Name of the run ledger inside an experiment's data directory.
pub const LEDGER_FILE: &str = "runs.jsonl";

/// One implementation taking part in an experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    template: ConfigPoint,
    executable: Executable,
    #[serde(skip_serializing_if = "Option::is_none")]
    axis: Option<SweepAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
}

impl Participant {
    /// Participant built with `cargo run --release` in the implementation's
    /// default directory.
    #[must_use]
    pub fn new(template: ConfigPoint) -> Self {
        let executable = Executable::cargo_release(template.implementation().default_dir());
        Self {
            template,
            executable,
            axis: None,
            file_name: None,
        }
    }

    /// Use a different executable.
    #[must_use]
    pub fn executable(mut self, executable: Executable) -> Self {
        self.executable = executable;
        self
    }

    /// Sweep this participant along its own axis instead of the experiment's.
    /// The domain must have the same length.
    #[must_use]
    pub fn axis(mut self, axis: SweepAxis) -> Self {
        self.axis = Some(axis);
        self
    }

    /// Override the derived results file name.
    #[must_use]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Get the implementation under test.
    #[must_use]
    pub const fn implementation(&self) -> Implementation {
        self.template.implementation()
    }

    /// Get the fixed template.
    #[must_use]
    pub const fn template(&self) -> &ConfigPoint {
        &self.template
    }

    /// Get the executable.
    #[must_use]
    pub const fn launcher(&self) -> &Executable {
        &self.executable
    }

    /// Axis override, if any.
    #[must_use]
    pub const fn axis_override(&self) -> Option<&SweepAxis> {
        self.axis.as_ref()
    }

    /// Results file name: `<implementation>-<fixed values>.csv`, where the
    /// fixed values are the contract positionals this participant does not
    /// sweep, in argument order.
    #[must_use]
    pub fn results_file_name(&self, experiment_axis: &SweepAxis) -> String {
        if let Some(name) = &self.file_name {
            return name.clone();
        }
        let axis = self.axis.as_ref().unwrap_or(experiment_axis);
        let mut name = self.implementation().name().to_string();
        for &dim in self.implementation().contract().positionals {
            if axis.varies(dim) {
                continue;
            }
            if let Some(value) = self.template.dimension(dim) {
                name.push('-');
                name.push_str(&value.to_string());
            }
        }
        name.push_str(".csv");
        name
    }
}

/// A declarative sweep: one axis, several implementations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Experiment {
    name: String,
    data_root: PathBuf,
    axis: SweepAxis,
    participants: Vec<Participant>,
    trim: TrimPolicy,
    continue_on_error: bool,
}

impl Experiment {
    /// Create a builder.
    #[must_use]
    pub fn builder(name: impl Into<String>, axis: SweepAxis) -> ExperimentBuilder {
        ExperimentBuilder::new(name, axis)
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the shared sweep axis.
    #[must_use]
    pub const fn axis(&self) -> &SweepAxis {
        &self.axis
    }

    /// Get the participants, in execution order within each step.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Trim policy that reads this experiment's results files.
    #[must_use]
    pub const fn trim(&self) -> TrimPolicy {
        self.trim
    }

    /// Whether a failed run is logged and skipped instead of ending the sweep.
    #[must_use]
    pub const fn continue_on_error(&self) -> bool {
        self.continue_on_error
    }

    /// Same experiment, recorded under another data root.
    #[must_use]
    pub fn with_data_root(mut self, root: impl AsRef<Path>) -> Self {
        self.data_root = root.as_ref().to_path_buf();
        self
    }

    /// `<data root>/<experiment name>`.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_root.join(&self.name)
    }

    /// Path of the run ledger.
    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir().join(LEDGER_FILE)
    }

    /// Results file of a participant.
    #[must_use]
    pub fn results_path(&self, participant: &Participant) -> PathBuf {
        self.data_dir()
            .join(participant.results_file_name(&self.axis))
    }

    /// Results file of the first participant running `implementation`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if no participant runs it.
    pub fn results_path_for(&self, implementation: Implementation) -> Result<PathBuf> {
        self.participant_for(implementation).map(|p| self.results_path(p))
    }

    /// The first participant running `implementation`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if no participant runs `implementation`.
    pub fn participant_for(&self, implementation: Implementation) -> Result<&Participant> {
        self.participants
            .iter()
            .find(|p| p.implementation() == implementation)
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "experiment '{}' has no {implementation} participant",
                    self.name
                ))
            })
    }
}

/// Builder for `Experiment`.
#[derive(Debug)]
pub struct ExperimentBuilder {
    name: String,
    data_root: PathBuf,
    axis: SweepAxis,
    participants: Vec<Participant>,
    trim: TrimPolicy,
    continue_on_error: bool,
}

impl ExperimentBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, axis: SweepAxis) -> Self {
        Self {
            name: name.into(),
            data_root: PathBuf::from(DEFAULT_DATA_ROOT),
            axis,
            participants: Vec::new(),
            trim: TrimPolicy::default(),
            continue_on_error: false,
        }
    }

    /// Add a participant. Participants run in insertion order at each step.
    #[must_use]
    pub fn participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }

    /// Set the data root (default `data`).
    #[must_use]
    pub fn data_root(mut self, root: impl AsRef<Path>) -> Self {
        self.data_root = root.as_ref().to_path_buf();
        self
    }

    /// Set the trim policy the executables' output is checked and read with.
    #[must_use]
    pub const fn trim(mut self, trim: TrimPolicy) -> Self {
        self.trim = trim;
        self
    }

    /// Log and skip failed runs instead of stopping the sweep.
    #[must_use]
    pub const fn continue_on_error(mut self, enabled: bool) -> Self {
        self.continue_on_error = enabled;
        self
    }

    /// Build the `Experiment`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an unusable name, no participants, a
    /// malformed axis, or two participants sharing one results file.
    pub fn build(self) -> Result<Experiment> {
        if self.name.is_empty()
            || !self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::InvalidConfig(format!(
                "experiment name '{}' must be non-empty ASCII letters, digits, '-' or '_'",
                self.name
            )));
        }
        if self.participants.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "experiment '{}' has no participants",
                self.name
            )));
        }
        self.axis.validate()?;

        let experiment = Experiment {
            name: self.name,
            data_root: self.data_root,
            axis: self.axis,
            participants: self.participants,
            trim: self.trim,
            continue_on_error: self.continue_on_error,
        };
        let files: Vec<String> = experiment
            .participants
            .iter()
            .map(|p| p.results_file_name(&experiment.axis))
            .collect();
        for (i, file) in files.iter().enumerate() {
            if files[..i].contains(file) {
                return Err(Error::InvalidConfig(format!(
                    "experiment '{}' writes two participants to {file}",
                    experiment.name
                )));
            }
        }
        Ok(experiment)
    }
}
