//! Results files: schema, append-only recording and loading
//!
//! The on-disk format is the only contract between the sweep phase and the
//! analysis phase. It stays plain tab-separated text so a results file can be
//! inspected with `cat`; the [`ResultsSchema`] sidecar records the column
//! semantics and the trim policy that reads it back.
//!
//! ```rust
//! use shard_sweep::results::{ResultRow, TrimPolicy};
//!
//! let row = ResultRow::parse("1048576\t0.91\t0.88\t0.90\t\n", TrimPolicy::LabelAndSentinel)?;
//! assert_eq!(row.samples().len(), 3);
//! # Ok::<(), shard_sweep::Error>(())
//! ```

mod loader;
mod recorder;
mod row;
mod schema;

pub use loader::{ResultLoader, ResultTable};
pub use recorder::{append_text, ResultRecorder};
pub use row::ResultRow;
pub use schema::{ResultsSchema, TrimPolicy, SCHEMA_VERSION};
