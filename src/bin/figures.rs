//! Render the figure catalog from recorded results.
//!
//! A figure whose results are missing or malformed is reported and skipped;
//! the exit status is non-zero if any figure failed.

use anyhow::{bail, Context};
use clap::Parser;
use shard_sweep::cli::FigureArgs;
use shard_sweep::figures;
use shard_sweep::logging;
use tracing::{error, warn};

fn main() -> anyhow::Result<()> {
    let args = FigureArgs::parse();
    logging::init();

    let catalog = figures::all(&args.data_root).context("building the figure catalog")?;
    for name in &args.only {
        if !catalog.iter().any(|f| f.stem() == name.as_str()) {
            warn!(figure = name.as_str(), "no such figure");
        }
    }

    let mut failed = 0usize;
    for figure in catalog
        .iter()
        .filter(|f| args.only.is_empty() || args.only.iter().any(|n| n == f.stem()))
    {
        if let Err(e) = figure.render(&args.out_dir) {
            error!(figure = figure.stem(), "{e}");
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{failed} figure(s) failed to render");
    }
    Ok(())
}
