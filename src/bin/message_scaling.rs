//! Database-size sweep; results land in `<data root>/message-scaling/`.

use shard_sweep::{cli, experiments};

fn main() -> anyhow::Result<()> {
    cli::run_sweep(experiments::message_scaling()).map(drop)
}
