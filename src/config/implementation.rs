//! Implementations under test and their command-line contracts
//!
//! The positional order of each executable is tabulated here and nowhere
//! else. A wrong order still produces a plausible-looking run, so call sites
//! never assemble arguments by hand; they go through [`CliContract::build_args`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ConfigPoint;
use crate::{Error, Result};

/// Largest shard count the sharded executables accept (shard index is one byte).
pub const MAX_SHARD_COUNT: u64 = 256;

/// A workload dimension of a [`ConfigPoint`] that can be passed positionally
/// or swept over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    /// Total messages sent into the store
    Send,
    /// Total messages fetched per trial
    Fetch,
    /// Worker threads
    Thread,
    /// Users in the user store
    User,
    /// Internal partitions (submaps)
    Shard,
}

impl Dimension {
    /// Short name used in file names and log lines.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Fetch => "fetch",
            Self::Thread => "threads",
            Self::User => "users",
            Self::Shard => "shards",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trial counters passed as flags rather than positionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialCounter {
    /// Measured trials (`run_count`)
    Runs,
    /// Warmup trials (`warmup_count`)
    Warmup,
}

/// A `-x value` flag slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSlot {
    /// Flag text, e.g. `-r`
    pub flag: &'static str,
    /// Counter the value comes from
    pub counter: TrialCounter,
}

/// Positional and flag layout of one benchmark executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliContract {
    /// Positional arguments, in order
    pub positionals: &'static [Dimension],
    /// Trailing flags, in order
    pub flags: &'static [FlagSlot],
    /// Upper bound on `shard_count`, if the executable takes one
    pub max_shard_count: Option<u64>,
}

const TRIAL_FLAGS: &[FlagSlot] = &[
    FlagSlot {
        flag: "-r",
        counter: TrialCounter::Runs,
    },
    FlagSlot {
        flag: "-w",
        counter: TrialCounter::Warmup,
    },
];

const BASELINE_CONTRACT: CliContract = CliContract {
    positionals: &[Dimension::Send, Dimension::Fetch, Dimension::Thread],
    flags: TRIAL_FLAGS,
    max_shard_count: None,
};

const SHARDED_CONTRACT: CliContract = CliContract {
    positionals: &[
        Dimension::Send,
        Dimension::Fetch,
        Dimension::Thread,
        Dimension::User,
        Dimension::Shard,
    ],
    flags: TRIAL_FLAGS,
    max_shard_count: Some(MAX_SHARD_COUNT),
};

/// Benchmarked executable family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Implementation {
    /// Single oblivious-sort multiqueue, no partitioning
    Baseline,
    /// Sharded load balancer over in-process submaps
    Sharded,
    /// Sharded load balancer with submaps distributed across nodes
    DistributedSharded,
}

impl Implementation {
    /// Every implementation, in comparison order.
    pub const ALL: [Self; 3] = [Self::Baseline, Self::Sharded, Self::DistributedSharded];

    /// Stable name used in results file names and the run ledger.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Sharded => "sharded",
            Self::DistributedSharded => "distributed-sharded",
        }
    }

    /// Source directory of the executable, relative to the sweep's working directory.
    #[must_use]
    pub const fn default_dir(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Sharded => "sparta",
            Self::DistributedSharded => "sparta-d",
        }
    }

    /// The executable's argument layout.
    #[must_use]
    pub const fn contract(self) -> &'static CliContract {
        match self {
            Self::Baseline => &BASELINE_CONTRACT,
            Self::Sharded | Self::DistributedSharded => &SHARDED_CONTRACT,
        }
    }

    /// Whether `dimension` is part of this implementation's argument vector.
    #[must_use]
    pub fn accepts(self, dimension: Dimension) -> bool {
        self.contract().positionals.contains(&dimension)
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl CliContract {
    /// Check the table itself: core positionals present, no slot repeated,
    /// flags well-formed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` describing the first inconsistency.
    pub fn validate(&self, implementation: Implementation) -> Result<()> {
        for required in [Dimension::Send, Dimension::Fetch, Dimension::Thread] {
            if !self.positionals.contains(&required) {
                return Err(Error::InvalidConfig(format!(
                    "{implementation} contract is missing the {required} positional"
                )));
            }
        }
        for (i, dim) in self.positionals.iter().enumerate() {
            if self.positionals[..i].contains(dim) {
                return Err(Error::InvalidConfig(format!(
                    "{implementation} contract lists {dim} twice"
                )));
            }
        }
        for (i, slot) in self.flags.iter().enumerate() {
            if !slot.flag.starts_with('-') || slot.flag.len() < 2 {
                return Err(Error::InvalidConfig(format!(
                    "{implementation} contract has malformed flag '{}'",
                    slot.flag
                )));
            }
            if self.flags[..i].iter().any(|s| s.flag == slot.flag) {
                return Err(Error::InvalidConfig(format!(
                    "{implementation} contract repeats flag '{}'",
                    slot.flag
                )));
            }
        }
        if self.positionals.contains(&Dimension::Shard) != self.max_shard_count.is_some() {
            return Err(Error::InvalidConfig(format!(
                "{implementation} contract has a shard positional without a shard bound (or vice versa)"
            )));
        }
        Ok(())
    }

    /// Build the argument vector for `point`, positionals first, then flags.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a positional this contract requires is
    /// absent from `point`.
    pub fn build_args(&self, point: &ConfigPoint) -> Result<Vec<String>> {
        let mut args = Vec::with_capacity(self.positionals.len() + 2 * self.flags.len());
        for &dim in self.positionals {
            let value = point.dimension(dim).ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "{} requires {dim} but the config point has none",
                    point.implementation()
                ))
            })?;
            args.push(value.to_string());
        }
        for slot in self.flags {
            let value = match slot.counter {
                TrialCounter::Runs => point.run_count(),
                TrialCounter::Warmup => point.warmup_count(),
            };
            args.push(slot.flag.to_string());
            args.push(value.to_string());
        }
        Ok(args)
    }
}

/// Validate every contract in the table. Called once when a sweep driver starts.
///
/// # Errors
///
/// Returns the first contract inconsistency.
pub fn validate_contracts() -> Result<()> {
    Implementation::ALL
        .iter()
        .try_for_each(|imp| imp.contract().validate(*imp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_table_is_consistent() {
        assert!(validate_contracts().is_ok());
    }

    #[test]
    fn test_duplicate_positional_rejected() {
        let broken = CliContract {
            positionals: &[Dimension::Send, Dimension::Fetch, Dimension::Thread, Dimension::Send],
            flags: TRIAL_FLAGS,
            max_shard_count: None,
        };
        let err = broken.validate(Implementation::Baseline).unwrap_err();
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn test_baseline_does_not_accept_shards() {
        assert!(!Implementation::Baseline.accepts(Dimension::Shard));
        assert!(!Implementation::Baseline.accepts(Dimension::User));
        assert!(Implementation::Sharded.accepts(Dimension::Shard));
    }

    #[test]
    fn test_implementation_serde_names() {
        let json = serde_json::to_string(&Implementation::DistributedSharded).unwrap();
        assert_eq!(json, "\"distributed-sharded\"");
    }
}
