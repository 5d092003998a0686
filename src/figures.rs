//! Figure catalog
//!
//! Each figure loads the results files of one catalog experiment, reduces
//! them, and lines the series up against the experiment's own domain.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Implementation;
use crate::experiments;
use crate::plot::{Chart, XScale, YAxis};
use crate::results::{ResultLoader, TrimPolicy};
use crate::stats::StatisticalReducer;
use crate::sweep::Experiment;
use crate::{Error, Result};

/// Directory figures are written to.
pub const FIGURE_DIR: &str = "figs";

/// Messages delivered per trial in the subqueue experiment, for throughput.
pub const SUBQUEUE_PAYLOAD: f64 = 131_072.0;

/// One results file to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSource {
    /// Legend entry
    pub name: String,
    /// Results file
    pub path: PathBuf,
    /// Trim policy for the file
    pub trim: TrimPolicy,
    /// Plot only the first `n` rows
    pub rows: Option<usize>,
    /// Leading warmup samples dropped from every row
    pub warmup: usize,
}

impl SeriesSource {
    /// Source for the results file of `implementation` in `experiment`.
    /// Warmup samples follow the participant's warmup count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the experiment does not run `implementation`.
    pub fn from_experiment(
        name: impl Into<String>,
        experiment: &Experiment,
        implementation: Implementation,
    ) -> Result<Self> {
        let participant = experiment.participant_for(implementation)?;
        let warmup = usize::try_from(participant.template().warmup_count()).map_err(|_| {
            Error::InvalidConfig(format!(
                "warmup count {} does not fit in memory",
                participant.template().warmup_count()
            ))
        })?;
        Ok(Self {
            name: name.into(),
            path: experiment.results_path(participant),
            trim: experiment.trim(),
            rows: None,
            warmup,
        })
    }

    /// Restrict to the first `n` rows.
    #[must_use]
    pub const fn rows(mut self, n: usize) -> Self {
        self.rows = Some(n);
        self
    }
}

/// A latency chart, optionally with throughput on a secondary axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Output file name inside the figure directory
    pub file_name: String,
    /// Chart title
    pub title: String,
    /// X-axis label
    pub x_label: String,
    /// X-axis scale
    pub x_scale: XScale,
    /// Shared x-domain
    pub x: Vec<f64>,
    /// Series on the latency axis
    pub sources: Vec<SeriesSource>,
    /// Payload size for a throughput axis, if any
    pub throughput_payload: Option<f64>,
}

impl Figure {
    /// Output file name without its extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map_or(self.file_name.as_str(), |(stem, _)| stem)
    }

    /// Load, reduce and assemble the chart.
    ///
    /// # Errors
    ///
    /// Loader, reduction and series-length errors, unchanged.
    pub fn chart(&self) -> Result<Chart> {
        let reducer = match self.throughput_payload {
            Some(payload) => StatisticalReducer::with_throughput(payload)?,
            None => StatisticalReducer::new(),
        };
        let mut latency = Vec::with_capacity(self.sources.len());
        let mut throughput = Vec::new();
        for source in &self.sources {
            let mut table =
                ResultLoader::load(&source.path, source.trim)?.skip_leading(source.warmup);
            if let Some(n) = source.rows {
                table = table.head(n);
            }
            let reduced = reducer.reduce(&table)?;
            latency.push(reduced.latency_series(source.name.as_str()));
            if self.throughput_payload.is_some() {
                throughput.push(reduced.throughput_series(format!("{} throughput", source.name))?);
            }
        }

        let mut chart = Chart::new(
            self.title.as_str(),
            self.x_label.as_str(),
            self.x.clone(),
            YAxis::new("Latency (s)", latency),
        )
        .x_scale(self.x_scale);
        if !throughput.is_empty() {
            chart = chart.secondary(YAxis::new("Throughput (msg/s)", throughput));
        }
        Ok(chart)
    }

    /// Render into `dir`, returning the written path.
    ///
    /// # Errors
    ///
    /// Same as [`Figure::chart`], plus rendering errors.
    pub fn render(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        self.chart()?.render_svg(&path)?;
        info!(figure = %path.display(), "rendered");
        Ok(path)
    }
}

#[allow(clippy::cast_precision_loss)]
fn domain_x(experiment: &Experiment) -> Vec<f64> {
    experiment
        .axis()
        .domain()
        .values()
        .iter()
        .map(|&v| v as f64)
        .collect()
}

fn comparison_sources(experiment: &Experiment) -> Result<Vec<SeriesSource>> {
    Ok(vec![
        SeriesSource::from_experiment("Baseline", experiment, Implementation::Baseline)?,
        SeriesSource::from_experiment("Sharded", experiment, Implementation::Sharded)?,
        SeriesSource::from_experiment(
            "Distributed Sharded",
            experiment,
            Implementation::DistributedSharded,
        )?,
    ])
}

/// Latency against database size.
///
/// # Errors
///
/// Returns `InvalidConfig` if the catalog experiment changed shape.
pub fn storage(data_root: &Path) -> Result<Figure> {
    let experiment = experiments::message_scaling()?.with_data_root(data_root);
    Ok(Figure {
        file_name: "storage.svg".to_string(),
        title: "Database Size vs. Latency".to_string(),
        x_label: "Database Size (msgs)".to_string(),
        x_scale: XScale::Log2,
        x: domain_x(&experiment),
        sources: comparison_sources(&experiment)?,
        throughput_payload: None,
    })
}

/// Latency against scale (messages = fetches = users).
///
/// # Errors
///
/// Returns `InvalidConfig` if the catalog experiment changed shape.
pub fn scale(data_root: &Path) -> Result<Figure> {
    let experiment = experiments::user_message_scaling()?.with_data_root(data_root);
    Ok(Figure {
        file_name: "user-message-scaling.svg".to_string(),
        title: "Scale vs. Latency".to_string(),
        x_label: "Scale".to_string(),
        x_scale: XScale::Log2,
        x: domain_x(&experiment),
        sources: comparison_sources(&experiment)?,
        throughput_payload: None,
    })
}

/// Latency against compute budget (shards, with coupled threads).
///
/// # Errors
///
/// Returns `InvalidConfig` if the catalog experiment changed shape.
pub fn compute(data_root: &Path) -> Result<Figure> {
    let experiment = experiments::submap_scaling()?.with_data_root(data_root);
    let x = domain_x(&experiment);
    let mut sources = comparison_sources(&experiment)?;
    // the distributed file also holds rows from longer shard sweeps
    if let Some(distributed) = sources.pop() {
        sources.push(distributed.rows(x.len()));
    }
    Ok(Figure {
        file_name: "compute-scaling.svg".to_string(),
        title: "Compute vs. Latency".to_string(),
        x_label: "Compute".to_string(),
        x_scale: XScale::Linear,
        x,
        sources,
        throughput_payload: None,
    })
}

/// Latency and throughput against distributed subqueue count.
///
/// # Errors
///
/// Returns `InvalidConfig` if the catalog experiment changed shape.
pub fn subqueues(data_root: &Path) -> Result<Figure> {
    let experiment = experiments::subqueue_scaling()?.with_data_root(data_root);
    Ok(Figure {
        file_name: "d-scaling.svg".to_string(),
        title: "Subqueues vs. Latency".to_string(),
        x_label: "# Subqueues".to_string(),
        x_scale: XScale::Linear,
        x: domain_x(&experiment),
        sources: vec![SeriesSource::from_experiment(
            "Latency",
            &experiment,
            Implementation::DistributedSharded,
        )?],
        throughput_payload: Some(SUBQUEUE_PAYLOAD),
    })
}

/// Every catalog figure, reading results under `data_root`.
///
/// # Errors
///
/// Returns the first descriptor that fails to build.
pub fn all(data_root: &Path) -> Result<Vec<Figure>> {
    Ok(vec![
        storage(data_root)?,
        scale(data_root)?,
        compute(data_root)?,
        subqueues(data_root)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_x_domains() {
        let root = Path::new(crate::sweep::DEFAULT_DATA_ROOT);
        let storage = storage(root).unwrap();
        assert_eq!(storage.x.len(), 8);
        assert!((storage.x[0] - 262_144.0).abs() < f64::EPSILON);
        assert_eq!(storage.stem(), "storage");
        assert!(storage.sources.iter().all(|s| s.warmup == 0));
        assert_eq!(compute(root).unwrap().sources[2].rows, Some(5));
        assert_eq!(subqueues(root).unwrap().x.len(), 15);
    }

    #[test]
    fn test_sources_follow_data_root() {
        let figure = scale(Path::new("/tmp/sweeps")).unwrap();
        let dir = Path::new("/tmp/sweeps/user-message-scaling");
        assert!(figure.sources.iter().all(|s| s.path.starts_with(dir)));
        assert_eq!(figure.sources[0].path, dir.join("baseline-48.csv"));
    }

    #[test]
    fn test_missing_results_file_is_io_error() {
        let figure = Figure {
            file_name: "x.svg".to_string(),
            title: "t".to_string(),
            x_label: "x".to_string(),
            x_scale: XScale::Linear,
            x: vec![1.0],
            sources: vec![SeriesSource {
                name: "a".to_string(),
                path: PathBuf::from("/nonexistent/shard-sweep/rows.csv"),
                trim: TrimPolicy::LabelAndSentinel,
                rows: None,
                warmup: 0,
            }],
            throughput_payload: None,
        };
        assert!(matches!(figure.chart(), Err(crate::Error::Io(_))));
    }
}
