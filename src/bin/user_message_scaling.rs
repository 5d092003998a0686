//! Scale sweep (messages = fetches = users) behind the user-message-scaling figure.

use shard_sweep::{cli, experiments};

fn main() -> anyhow::Result<()> {
    cli::run_sweep(experiments::user_message_scaling()).map(drop)
}
