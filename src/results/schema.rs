//! Results file schema and trim policy
//!
//! Schema version 1:
//!
//! ```text
//! <label> \t <sample_1> \t ... \t <sample_n> \t \n
//! ```
//!
//! Column 0 is the label the executable prints (the send count for every
//! executable in this suite). Samples are trial latencies in seconds, warmup
//! trials first. Each sample is followed by a tab, so a row ends in one empty
//! sentinel cell.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Which non-sample columns to strip before numeric interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrimPolicy {
    /// Drop the label column; trailing empty cells are treated as absent.
    LabelOnly,
    /// Drop the label column and require (then drop) an empty final sentinel cell.
    #[default]
    LabelAndSentinel,
}

/// Versioned description of a results file, stored as a JSON sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsSchema {
    version: u32,
    trim: TrimPolicy,
    label: String,
    sample_unit: String,
}

impl ResultsSchema {
    /// Version-1 schema with the given trim policy.
    #[must_use]
    pub fn new(trim: TrimPolicy) -> Self {
        Self {
            version: SCHEMA_VERSION,
            trim,
            label: "send count".to_string(),
            sample_unit: "seconds".to_string(),
        }
    }

    /// Get the schema version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Get the trim policy.
    #[must_use]
    pub const fn trim(&self) -> TrimPolicy {
        self.trim
    }

    /// Sidecar location for a results file: `<file>.schema.json`.
    #[must_use]
    pub fn sidecar_path(results: &Path) -> PathBuf {
        let mut name = results.as_os_str().to_owned();
        name.push(".schema.json");
        PathBuf::from(name)
    }

    /// Write the sidecar next to `results` unless one already exists.
    ///
    /// An existing sidecar must describe the same schema.
    ///
    /// # Errors
    ///
    /// Returns `Schema` if an existing sidecar disagrees, or an I/O/JSON error.
    pub fn write_if_absent(&self, results: &Path) -> Result<()> {
        if let Some(existing) = Self::read(results)? {
            if existing != *self {
                return Err(Error::Schema(format!(
                    "{} was recorded with {:?}, refusing to append rows recorded with {:?}",
                    results.display(),
                    existing,
                    self
                )));
            }
            return Ok(());
        }
        let sidecar = Self::sidecar_path(results);
        if let Some(parent) = sidecar.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&sidecar, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Read the sidecar for `results`, `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns `Schema` for an unsupported version, or an I/O/JSON error.
    pub fn read(results: &Path) -> Result<Option<Self>> {
        let sidecar = Self::sidecar_path(results);
        let text = match std::fs::read_to_string(&sidecar) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let schema: Self = serde_json::from_str(&text)?;
        if schema.version != SCHEMA_VERSION {
            return Err(Error::Schema(format!(
                "{} has schema version {}, expected {SCHEMA_VERSION}",
                sidecar.display(),
                schema.version
            )));
        }
        Ok(Some(schema))
    }
}
