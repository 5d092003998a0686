//! Sweep planning and execution
//!
//! ```text
//! Experiment ──> SweepPlan ──> SweepDriver ──> ProcessInvoker ──> ResultRecorder
//!   (axis,          (config        (sequential       (child            (append-only
//!    participants)   points)        loop)             process)          results file)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use shard_sweep::config::{ConfigPoint, Dimension, Implementation};
//! use shard_sweep::sweep::{plan_points, Coupling, Domain, SweepAxis};
//!
//! let template = ConfigPoint::builder(Implementation::Sharded)
//!     .send_count(1 << 20)
//!     .fetch_count(8192)
//!     .user_count(8192)
//!     .build();
//! let axis = SweepAxis::paired(
//!     Dimension::Shard,
//!     Domain::range(1..=2)?,
//!     Coupling::new(Dimension::Thread, 8, 8),
//! );
//!
//! let points = plan_points(&template, &axis)?;
//! assert_eq!(points[0].thread_count(), 16);
//! assert_eq!(points[1].thread_count(), 24);
//! # Ok::<(), shard_sweep::Error>(())
//! ```

mod axis;
mod driver;
mod experiment;
mod plan;

pub use axis::{Coupling, Domain, SweepAxis};
pub use driver::{check_output, SweepDriver, SweepSummary};
pub use experiment::{Experiment, ExperimentBuilder, Participant, DEFAULT_DATA_ROOT, LEDGER_FILE};
pub use plan::{plan_points, SweepPlan};
