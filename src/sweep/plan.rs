//! Sweep planner - expands axes into ordered config points

use super::{Experiment, Participant, SweepAxis};
use crate::config::ConfigPoint;
use crate::{Error, Result};

/// One config point per domain value of `axis`, in domain order, each
/// validated against its implementation's contract.
///
/// # Errors
///
/// Returns `InvalidConfig` for a malformed axis, a coupling overflow, or a
/// point outside the implementation's accepted range. Nothing is clamped.
pub fn plan_points(template: &ConfigPoint, axis: &SweepAxis) -> Result<Vec<ConfigPoint>> {
    axis.validate()?;
    axis.domain()
        .values()
        .iter()
        .enumerate()
        .map(|(step, &value)| {
            let mut point = axis
                .tied_dimensions()
                .iter()
                .fold(template.clone(), |p, &dim| p.with_dimension(dim, value));
            if let Some(coupling) = axis.coupling() {
                point = point.with_dimension(coupling.target, coupling.apply(value)?);
            }
            point.validate().map_err(|e| match e {
                Error::InvalidConfig(msg) => {
                    Error::InvalidConfig(format!("sweep step {step} (value {value}): {msg}"))
                }
                other => other,
            })?;
            Ok(point)
        })
        .collect()
}

/// Every participant's config points for one experiment.
///
/// Built in full before anything runs, so configuration errors surface
/// before the first child process is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepPlan {
    steps: usize,
    points: Vec<Vec<ConfigPoint>>,
}

impl SweepPlan {
    /// Plan `experiment`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for any invalid point, or when a participant's
    /// axis override has a different number of steps than the experiment.
    pub fn new(experiment: &Experiment) -> Result<Self> {
        let steps = experiment.axis().domain().len();
        let points = experiment
            .participants()
            .iter()
            .map(|participant| plan_participant(experiment, participant, steps))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps, points })
    }

    /// Number of sweep steps.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Config points of participant `index`, in sweep order.
    #[must_use]
    pub fn points(&self, index: usize) -> &[ConfigPoint] {
        self.points.get(index).map_or(&[], Vec::as_slice)
    }

    /// Total number of runs the plan launches.
    #[must_use]
    pub fn total_runs(&self) -> usize {
        self.points.iter().map(Vec::len).sum()
    }
}

fn plan_participant(
    experiment: &Experiment,
    participant: &Participant,
    steps: usize,
) -> Result<Vec<ConfigPoint>> {
    let axis = participant.axis_override().unwrap_or_else(|| experiment.axis());
    if axis.domain().len() != steps {
        return Err(Error::InvalidConfig(format!(
            "{} axis in '{}' has {} steps, the experiment has {steps}",
            participant.implementation(),
            experiment.name(),
            axis.domain().len()
        )));
    }
    plan_points(participant.template(), axis).map_err(|e| match e {
        Error::InvalidConfig(msg) => Error::InvalidConfig(format!(
            "{} in '{}': {msg}",
            participant.implementation(),
            experiment.name()
        )),
        other => other,
    })
}
