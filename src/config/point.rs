//! Config Point - one resolved parameter vector for one benchmark run

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Dimension, Implementation};
use crate::{Error, Result};

/// One fully-resolved parameter vector for one implementation at one sweep step.
///
/// `user_count` and `shard_count` are optional: an implementation whose
/// contract does not take them never sees them, and an absent value is never
/// rendered as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPoint {
    implementation: Implementation,
    send_count: u64,
    fetch_count: u64,
    thread_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shard_count: Option<u64>,
    run_count: u64,
    warmup_count: u64,
}

impl ConfigPoint {
    /// Create a builder for the given implementation.
    ///
    /// Counts start at zero (invalid) except `run_count`, which defaults to
    /// one trial like the executables themselves.
    #[must_use]
    pub const fn builder(implementation: Implementation) -> ConfigPointBuilder {
        ConfigPointBuilder::new(implementation)
    }

    /// Get the implementation under test.
    #[must_use]
    pub const fn implementation(&self) -> Implementation {
        self.implementation
    }

    /// Get the number of messages sent.
    #[must_use]
    pub const fn send_count(&self) -> u64 {
        self.send_count
    }

    /// Get the number of messages fetched per trial.
    #[must_use]
    pub const fn fetch_count(&self) -> u64 {
        self.fetch_count
    }

    /// Get the worker thread count.
    #[must_use]
    pub const fn thread_count(&self) -> u64 {
        self.thread_count
    }

    /// Get the user count, if set.
    #[must_use]
    pub const fn user_count(&self) -> Option<u64> {
        self.user_count
    }

    /// Get the shard count, if set.
    #[must_use]
    pub const fn shard_count(&self) -> Option<u64> {
        self.shard_count
    }

    /// Get the number of measured trials.
    #[must_use]
    pub const fn run_count(&self) -> u64 {
        self.run_count
    }

    /// Get the number of warmup trials.
    #[must_use]
    pub const fn warmup_count(&self) -> u64 {
        self.warmup_count
    }

    /// Samples the executable prints per row: warmup trials plus measured trials.
    /// Saturates at `u64::MAX`.
    #[must_use]
    pub const fn expected_samples(&self) -> u64 {
        self.run_count.saturating_add(self.warmup_count)
    }

    /// Value of a workload dimension, `None` if unset.
    #[must_use]
    pub const fn dimension(&self, dimension: Dimension) -> Option<u64> {
        match dimension {
            Dimension::Send => Some(self.send_count),
            Dimension::Fetch => Some(self.fetch_count),
            Dimension::Thread => Some(self.thread_count),
            Dimension::User => self.user_count,
            Dimension::Shard => self.shard_count,
        }
    }

    /// Return a copy with `dimension` set to `value`.
    #[must_use]
    pub fn with_dimension(mut self, dimension: Dimension, value: u64) -> Self {
        match dimension {
            Dimension::Send => self.send_count = value,
            Dimension::Fetch => self.fetch_count = value,
            Dimension::Thread => self.thread_count = value,
            Dimension::User => self.user_count = Some(value),
            Dimension::Shard => self.shard_count = Some(value),
        }
        self
    }

    /// Return a copy retargeted at another implementation.
    #[must_use]
    pub const fn for_implementation(mut self, implementation: Implementation) -> Self {
        self.implementation = implementation;
        self
    }

    /// Check every field the implementation's contract needs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first missing or out-of-range field.
    pub fn validate(&self) -> Result<()> {
        let contract = self.implementation.contract();
        for &dim in contract.positionals {
            match self.dimension(dim) {
                None => {
                    return Err(Error::InvalidConfig(format!(
                        "{self}: {} requires {dim}",
                        self.implementation
                    )))
                }
                Some(0) => {
                    return Err(Error::InvalidConfig(format!(
                        "{self}: {dim} must be positive"
                    )))
                }
                Some(_) => {}
            }
        }
        if self.run_count == 0 {
            return Err(Error::InvalidConfig(format!(
                "{self}: run count must be positive"
            )));
        }
        if let (Some(limit), Some(shards)) = (contract.max_shard_count, self.shard_count) {
            if shards > limit {
                return Err(Error::InvalidConfig(format!(
                    "{self}: {shards} shards exceeds the limit of {limit}"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ConfigPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} send={} fetch={} threads={}",
            self.implementation, self.send_count, self.fetch_count, self.thread_count
        )?;
        if let Some(users) = self.user_count {
            write!(f, " users={users}")?;
        }
        if let Some(shards) = self.shard_count {
            write!(f, " shards={shards}")?;
        }
        write!(f, " runs={} warmup={}", self.run_count, self.warmup_count)
    }
}

/// Builder for `ConfigPoint`.
#[derive(Debug, Clone)]
pub struct ConfigPointBuilder {
    point: ConfigPoint,
}

impl ConfigPointBuilder {
    /// Create a new builder for the given implementation.
    #[must_use]
    pub const fn new(implementation: Implementation) -> Self {
        Self {
            point: ConfigPoint {
                implementation,
                send_count: 0,
                fetch_count: 0,
                thread_count: 0,
                user_count: None,
                shard_count: None,
                run_count: 1,
                warmup_count: 0,
            },
        }
    }

    /// Set the number of messages sent.
    #[must_use]
    pub const fn send_count(mut self, value: u64) -> Self {
        self.point.send_count = value;
        self
    }

    /// Set the number of messages fetched per trial.
    #[must_use]
    pub const fn fetch_count(mut self, value: u64) -> Self {
        self.point.fetch_count = value;
        self
    }

    /// Set the worker thread count.
    #[must_use]
    pub const fn thread_count(mut self, value: u64) -> Self {
        self.point.thread_count = value;
        self
    }

    /// Set the user count.
    #[must_use]
    pub const fn user_count(mut self, value: u64) -> Self {
        self.point.user_count = Some(value);
        self
    }

    /// Set the shard count.
    #[must_use]
    pub const fn shard_count(mut self, value: u64) -> Self {
        self.point.shard_count = Some(value);
        self
    }

    /// Set the number of measured trials.
    #[must_use]
    pub const fn run_count(mut self, value: u64) -> Self {
        self.point.run_count = value;
        self
    }

    /// Set the number of warmup trials.
    #[must_use]
    pub const fn warmup_count(mut self, value: u64) -> Self {
        self.point.warmup_count = value;
        self
    }

    /// Build the `ConfigPoint`. Validation is separate, see [`ConfigPoint::validate`].
    #[must_use]
    pub fn build(self) -> ConfigPoint {
        self.point
    }
}
