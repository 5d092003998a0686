//! Compute sweep: shards 1 to 5, eight more threads per shard.

use shard_sweep::{cli, experiments};

fn main() -> anyhow::Result<()> {
    cli::run_sweep(experiments::submap_scaling()).map(drop)
}
