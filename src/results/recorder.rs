//! Result recorder - append-only writes to results files

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::ResultsSchema;
use crate::Result;

/// Appends captured benchmark output to results files.
///
/// Files are never truncated or rewritten. There is no locking: one writer
/// per file at a time is assumed, which the sequential sweep driver provides.
#[derive(Debug, Clone)]
pub struct ResultRecorder {
    schema: ResultsSchema,
}

impl ResultRecorder {
    /// Recorder that stamps files with `schema`.
    #[must_use]
    pub const fn new(schema: ResultsSchema) -> Self {
        Self { schema }
    }

    /// Get the schema written alongside results files.
    #[must_use]
    pub const fn schema(&self) -> &ResultsSchema {
        &self.schema
    }

    /// Append `text` verbatim, creating the file, its parent directory and its
    /// schema sidecar if absent.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be created or
    /// written, or `Schema` if the file was recorded under another schema.
    pub fn append(&self, path: &Path, text: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.schema.write_if_absent(path)?;
        append_text(path, text)
    }
}

/// Open `path` in append mode, write `text`, flush. The handle is dropped on
/// every return path.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or written.
pub fn append_text(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(())
}
