//! Unified error handling for the privacy engine.
//!
//! The generation and sensitivity operations are total over finite numeric
//! input and never return these errors; all fallibility lives in the
//! analysis and persistence paths, which degrade to "retain previous state"
//! at the engine level.

use thiserror::Error;

/// Errors that can occur in analysis and persistence paths.
#[derive(Debug, Error)]
pub enum GeoGuardError {
    /// Not enough history samples for a clustering pass.
    #[error("insufficient history: {actual} samples, {required} required")]
    InsufficientSamples {
        /// Minimum history size for clustering
        required: usize,
        /// Actual history size
        actual: usize,
    },

    /// Clustering failed for the current pass (degenerate feature space,
    /// non-finite coordinates). The engine retains the prior snapshot.
    #[error("analysis failed: {reason}")]
    Analysis {
        /// Description of what went wrong
        reason: String,
    },

    /// History load/save failed in the persistence collaborator.
    #[error("persistence failed at {path}: {source}")]
    Persistence {
        /// File path involved
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// History could not be encoded or decoded as JSON.
    #[error("history serialization failed at {path}: {source}")]
    HistorySerde {
        /// File path involved
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GeoGuardError {
    /// Create an Analysis error.
    pub fn analysis(reason: impl Into<String>) -> Self {
        Self::Analysis {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeoGuardError>;
