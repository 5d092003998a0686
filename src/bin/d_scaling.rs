//! Subqueue sweep for the distributed implementation only.

use shard_sweep::{cli, experiments};

fn main() -> anyhow::Result<()> {
    cli::run_sweep(experiments::subqueue_scaling()).map(drop)
}
