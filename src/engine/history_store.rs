//! Append-only location history with an analysis cadence.
//!
//! Owns the raw sample sequence. Samples are immutable once appended;
//! ordering is insertion order. The store itself never clusters; it only
//! reports when the cadence fires so the engine can run a pass.

use chrono::Utc;

use crate::{LocationSample, PrivacyConfig};

/// Append-only ordered sequence of timestamped coordinate samples.
#[derive(Debug)]
pub struct HistoryStore {
    samples: Vec<LocationSample>,
    /// Cadence: every Nth sample triggers re-analysis
    analysis_interval: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(PrivacyConfig::default().analysis_interval)
    }
}

impl HistoryStore {
    /// Create an empty history with the given analysis cadence.
    pub fn new(analysis_interval: usize) -> Self {
        Self {
            samples: Vec::new(),
            analysis_interval,
        }
    }

    /// Append a sample, defaulting the timestamp to the current UTC time.
    ///
    /// Returns `true` when the analysis cadence fires on this append.
    pub fn append(&mut self, lat: f64, lng: f64, timestamp: Option<String>) -> bool {
        let timestamp = timestamp.unwrap_or_else(|| Utc::now().to_rfc3339());
        self.samples.push(LocationSample::new(lat, lng, timestamp));

        self.analysis_interval > 0 && self.samples.len() % self.analysis_interval == 0
    }

    /// Atomically swap the whole sequence (bulk import).
    ///
    /// The caller is expected to run one analysis pass immediately,
    /// regardless of the modulo cadence.
    pub fn replace_all(&mut self, samples: Vec<LocationSample>) {
        self.samples = samples;
    }

    /// Empty the history.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// All samples in insertion order.
    pub fn samples(&self) -> &[LocationSample] {
        &self.samples
    }

    /// Number of samples in the history.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
