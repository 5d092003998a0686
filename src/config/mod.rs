//! Config points and the per-implementation argument tables
//!
//! ```rust
//! use shard_sweep::config::{ConfigPoint, Implementation};
//!
//! let point = ConfigPoint::builder(Implementation::Sharded)
//!     .send_count(1 << 20)
//!     .fetch_count(8192)
//!     .thread_count(48)
//!     .user_count(8192)
//!     .shard_count(5)
//!     .run_count(10)
//!     .build();
//! point.validate()?;
//!
//! let args = Implementation::Sharded.contract().build_args(&point)?;
//! assert_eq!(args, ["1048576", "8192", "48", "8192", "5", "-r", "10", "-w", "0"]);
//! # Ok::<(), shard_sweep::Error>(())
//! ```

mod implementation;
mod point;

pub use implementation::{
    validate_contracts, CliContract, Dimension, FlagSlot, Implementation, TrialCounter,
    MAX_SHARD_COUNT,
};
pub use point::{ConfigPoint, ConfigPointBuilder};
