//! History persistence collaborator.
//!
//! The engine treats persistence as a best-effort side effect: load runs
//! once at startup, save runs at the analysis cadence and on clear or
//! bulk replace. Failures are logged by the engine and never abort the
//! in-memory operation that triggered them.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::GeoGuardError;
use crate::{LocationSample, Result};

/// Load/save seam between the engine and on-disk history.
pub trait HistoryPersistence {
    /// Load the persisted sample sequence. A missing backing store is an
    /// empty history, not an error.
    fn load(&self) -> Result<Vec<LocationSample>>;

    /// Persist the full sample sequence, replacing any previous contents.
    fn save(&self, samples: &[LocationSample]) -> Result<()>;
}

/// File-backed persistence encoding the history as a JSON array.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Create a persistence collaborator backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_string(&self) -> String {
        self.path.display().to_string()
    }
}

impl HistoryPersistence for JsonFilePersistence {
    fn load(&self) -> Result<Vec<LocationSample>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| GeoGuardError::Persistence {
            path: self.path_string(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| GeoGuardError::HistorySerde {
            path: self.path_string(),
            source: e,
        })
    }

    fn save(&self, samples: &[LocationSample]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| GeoGuardError::Persistence {
                    path: self.path_string(),
                    source: e,
                })?;
            }
        }

        let file = fs::File::create(&self.path).map_err(|e| GeoGuardError::Persistence {
            path: self.path_string(),
            source: e,
        })?;

        serde_json::to_writer(BufWriter::new(file), samples).map_err(|e| {
            GeoGuardError::HistorySerde {
                path: self.path_string(),
                source: e,
            }
        })
    }
}
