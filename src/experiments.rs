//! Experiment catalog
//!
//! The sweeps behind each figure. Parameters are constants: changing a sweep
//! means editing its domain here, not passing flags.

use crate::config::{ConfigPoint, Dimension, Implementation};
use crate::sweep::{Coupling, Domain, Experiment, Participant, SweepAxis};
use crate::Result;

/// Measured trials per config point.
pub const RUNS: u64 = 10;
/// Warmup trials per config point.
pub const WARMUP: u64 = 0;
/// Threads available on the benchmark host.
pub const THREADS: u64 = 48;
/// Fetches (and users) for the fixed-fetch sweeps.
pub const FETCHES: u64 = 8192;
/// Shards used by the in-process sharded implementation.
pub const SHARDS: u64 = 5;
/// Shards used by the distributed sharded implementation.
pub const DISTRIBUTED_SHARDS: u64 = 15;
/// Messages stored for the fixed-size sweeps.
pub const SENDS: u64 = 1 << 20;

fn template(implementation: Implementation) -> ConfigPoint {
    ConfigPoint::builder(implementation)
        .run_count(RUNS)
        .warmup_count(WARMUP)
        .build()
}

fn baseline(fetches: u64, threads: u64) -> ConfigPoint {
    template(Implementation::Baseline)
        .with_dimension(Dimension::Fetch, fetches)
        .with_dimension(Dimension::Thread, threads)
}

fn sharded(implementation: Implementation, users: u64, threads: u64, shards: u64) -> ConfigPoint {
    template(implementation)
        .with_dimension(Dimension::Fetch, users)
        .with_dimension(Dimension::Thread, threads)
        .with_dimension(Dimension::User, users)
        .with_dimension(Dimension::Shard, shards)
}

/// Database size: send count over `2^18..=2^25` at 8192 fetches.
///
/// # Errors
///
/// Returns `InvalidConfig` only if the constants above are inconsistent.
pub fn message_scaling() -> Result<Experiment> {
    let axis = SweepAxis::single(Dimension::Send, Domain::powers_of_two(18..=25)?);
    Experiment::builder("message-scaling", axis)
        .participant(Participant::new(baseline(FETCHES, THREADS)))
        .participant(Participant::new(sharded(
            Implementation::Sharded,
            FETCHES,
            THREADS,
            SHARDS,
        )))
        .participant(Participant::new(sharded(
            Implementation::DistributedSharded,
            FETCHES,
            THREADS,
            DISTRIBUTED_SHARDS,
        )))
        .build()
}

/// Scale: send = fetch = users over `2^18..=2^23`.
///
/// # Errors
///
/// Returns `InvalidConfig` only if the constants above are inconsistent.
pub fn user_message_scaling() -> Result<Experiment> {
    let axis = SweepAxis::tied(
        vec![Dimension::Send, Dimension::Fetch, Dimension::User],
        Domain::powers_of_two(18..=23)?,
    );
    Experiment::builder("user-message-scaling", axis)
        .participant(Participant::new(
            template(Implementation::Baseline).with_dimension(Dimension::Thread, THREADS),
        ))
        .participant(Participant::new(
            template(Implementation::Sharded)
                .with_dimension(Dimension::Thread, THREADS)
                .with_dimension(Dimension::Shard, SHARDS),
        ))
        .participant(Participant::new(
            template(Implementation::DistributedSharded)
                .with_dimension(Dimension::Thread, THREADS)
                .with_dimension(Dimension::Shard, DISTRIBUTED_SHARDS),
        ))
        .build()
}

/// Compute: shards `1..=5` with threads = 8 * shards + 8. The distributed
/// implementation spreads shards over nodes, so it keeps all 48 threads.
///
/// # Errors
///
/// Returns `InvalidConfig` only if the constants above are inconsistent.
pub fn submap_scaling() -> Result<Experiment> {
    let shards = Domain::range(1..=5)?;
    let axis = SweepAxis::paired(
        Dimension::Shard,
        shards.clone(),
        Coupling::new(Dimension::Thread, 8, 8),
    );
    Experiment::builder("submap-scaling", axis)
        .participant(Participant::new(
            baseline(FETCHES, THREADS).with_dimension(Dimension::Send, SENDS),
        ))
        .participant(Participant::new(
            sharded(Implementation::Sharded, FETCHES, THREADS, 1)
                .with_dimension(Dimension::Send, SENDS),
        ))
        .participant(
            Participant::new(
                sharded(Implementation::DistributedSharded, FETCHES, THREADS, 1)
                    .with_dimension(Dimension::Send, SENDS),
            )
            .axis(SweepAxis::single(Dimension::Shard, shards)),
        )
        .build()
}

/// Subqueues: distributed shards `1..=15` at `2^20` messages and users.
///
/// # Errors
///
/// Returns `InvalidConfig` only if the constants above are inconsistent.
pub fn subqueue_scaling() -> Result<Experiment> {
    let axis = SweepAxis::single(Dimension::Shard, Domain::range(1..=DISTRIBUTED_SHARDS)?);
    Experiment::builder("d-scaling", axis)
        .participant(Participant::new(
            sharded(Implementation::DistributedSharded, SENDS, THREADS, 1)
                .with_dimension(Dimension::Send, SENDS),
        ))
        .build()
}

/// Every catalog experiment, in the order the binaries list them.
///
/// # Errors
///
/// Returns the first descriptor that fails to build.
pub fn all() -> Result<Vec<Experiment>> {
    Ok(vec![
        message_scaling()?,
        user_message_scaling()?,
        submap_scaling()?,
        subqueue_scaling()?,
    ])
}
