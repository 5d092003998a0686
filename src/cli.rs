//! Binary entry points
//!
//! The sweep binaries take no arguments: their parameters live in
//! [`crate::experiments`] and their whole body is [`run_sweep`]. The figure
//! binary parses [`FigureArgs`].

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crate::figures::FIGURE_DIR;
use crate::logging;
use crate::sweep::{Experiment, SweepDriver, SweepSummary, DEFAULT_DATA_ROOT};

/// Options for the figure binary.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "figures", about = "Render comparison charts from recorded results.")]
pub struct FigureArgs {
    /// Root directory the sweeps recorded under
    #[arg(long, default_value = DEFAULT_DATA_ROOT)]
    pub data_root: PathBuf,

    /// Directory the SVG files are written to
    #[arg(long, default_value = FIGURE_DIR)]
    pub out_dir: PathBuf,

    /// Render only these figures (by file stem, e.g. `storage`)
    #[arg(long)]
    pub only: Vec<String>,
}

/// Body of a sweep binary: install logging, run `experiment` with real child
/// processes, report skipped runs.
///
/// # Errors
///
/// Fails if the descriptor did not build or the sweep stopped.
pub fn run_sweep(experiment: crate::Result<Experiment>) -> anyhow::Result<SweepSummary> {
    logging::init();

    let experiment = experiment.context("building the sweep experiment")?;
    let summary = SweepDriver::new()?
        .run(&experiment)
        .with_context(|| format!("sweep '{}' stopped", experiment.name()))?;

    for failure in &summary.failures {
        warn!("{failure}");
    }
    info!(
        experiment = experiment.name(),
        rows = summary.rows_recorded,
        data = %experiment.data_dir().display(),
        "done"
    );
    Ok(summary)
}
