//! Run ledger for sweep invocations
//!
//! ## Schema Overview
//!
//! ```text
//! ExperimentRecord (1) ──< RunRecord (N)   [one JSON object per line]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use shard_sweep::config::{ConfigPoint, Implementation};
//! use shard_sweep::ledger::{RunRecord, RunStatus};
//!
//! let point = ConfigPoint::builder(Implementation::Baseline)
//!     .send_count(1 << 18)
//!     .fetch_count(8192)
//!     .thread_count(48)
//!     .build();
//!
//! let mut run = RunRecord::new("message-scaling", 0, point);
//! run.start();
//! run.succeed();
//! assert_eq!(run.status(), RunStatus::Success);
//! ```

mod experiment_record;
mod run_record;
mod store;

pub use experiment_record::{ExperimentRecord, ExperimentRecordBuilder};
pub use run_record::{RunRecord, RunStatus};
pub use store::{LedgerEntry, RunLedger};
