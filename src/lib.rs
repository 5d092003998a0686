//! # shard-sweep: benchmark sweeps for baseline vs. sharded multiqueues
//!
//! Drives controlled comparisons between external benchmark executables (a
//! baseline, a sharded and a distributed-sharded implementation) and reduces
//! the latency samples they print into comparative statistics and charts.
//!
//! ## Phases
//!
//! - **Online**: [`sweep::SweepPlan`] expands an experiment into config
//!   points, [`sweep::SweepDriver`] runs them one at a time through
//!   [`invoke::ProcessInvoker`], and [`results::ResultRecorder`] appends each
//!   output row to the experiment's results files.
//! - **Offline**: [`results::ResultLoader`] reads those files,
//!   [`stats::StatisticalReducer`] turns rows into mean/std latency and
//!   throughput, and [`plot::Chart`] renders them side by side.
//!
//! The two phases share nothing but the tab-separated results files.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use shard_sweep::experiments;
//! use shard_sweep::sweep::SweepDriver;
//!
//! let experiment = experiments::message_scaling()?;
//! let summary = SweepDriver::new()?.run(&experiment)?;
//! println!("{} rows recorded", summary.rows_recorded);
//! # Ok::<(), shard_sweep::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod cli;
pub mod config;
pub mod error;
pub mod experiments;
pub mod figures;
pub mod invoke;
pub mod ledger;
pub mod logging;
pub mod plot;
pub mod results;
pub mod stats;
pub mod sweep;

pub use error::{Error, Result};
