//! # Privacy Engine
//!
//! The engine owns the privacy context (history, clusters, POIs) and
//! exposes the operations the boundary layer calls into.
//!
//! ## Architecture
//!
//! Focused subcomponents:
//! - `HistoryStore` - append-only sample sequence with analysis cadence
//! - `AnalysisSnapshot` - immutable cluster/POI state, swapped per pass
//! - `HistoryPersistence` - best-effort load/save collaborator
//!
//! Analysis passes fully replace the snapshot; protect and sensitivity
//! queries read the snapshot installed at call start. A failed pass logs
//! and retains the previous snapshot, so queries never observe a partial
//! or broken state.

pub mod history_store;
pub mod snapshot;

pub use history_store::HistoryStore;
pub use snapshot::{AnalysisOutcome, AnalysisSnapshot};

use std::sync::Arc;

use log::{info, warn};
use serde::Serialize;

use crate::persistence::HistoryPersistence;
use crate::privacy::{protect_location, sensitive_poi};
use crate::{cluster_samples, LocationSample, PrivacyConfig};

/// Location privacy engine.
///
/// Single logical owner of the privacy context: history ingestion mutates
/// state and may trigger re-analysis; protect/sensitivity queries are
/// read-only against the current snapshot.
pub struct PrivacyEngine {
    history: HistoryStore,
    snapshot: Arc<AnalysisSnapshot>,
    config: PrivacyConfig,
    persistence: Option<Box<dyn HistoryPersistence>>,
}

impl Default for PrivacyEngine {
    fn default() -> Self {
        Self::new(PrivacyConfig::default())
    }
}

impl PrivacyEngine {
    /// Create an engine with no persistence collaborator.
    pub fn new(config: PrivacyConfig) -> Self {
        Self {
            history: HistoryStore::new(config.analysis_interval),
            snapshot: Arc::new(AnalysisSnapshot::empty()),
            config,
            persistence: None,
        }
    }

    /// Create an engine backed by a persistence collaborator.
    ///
    /// Loads any existing history at startup and runs one analysis pass
    /// over it. Load failures are logged and leave the engine empty; they
    /// never abort construction.
    pub fn with_persistence(
        config: PrivacyConfig,
        persistence: Box<dyn HistoryPersistence>,
    ) -> Self {
        let mut engine = Self::new(config);

        match persistence.load() {
            Ok(samples) if !samples.is_empty() => {
                info!("Loaded {} location points from history", samples.len());
                engine.history.replace_all(samples);
                engine.analyze();
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to load location history: {}", e),
        }

        engine.persistence = Some(persistence);
        engine
    }

    // ========================================================================
    // History Ingestion
    // ========================================================================

    /// Append a location sample to the history.
    ///
    /// Every Nth cumulative append (per `analysis_interval`) triggers a
    /// clustering pass and a best-effort persistence flush.
    pub fn append_sample(&mut self, lat: f64, lng: f64, timestamp: Option<String>) {
        if self.history.append(lat, lng, timestamp) {
            self.analyze();
            self.flush();
        }
    }

    /// Atomically replace the whole history (bulk import).
    ///
    /// Always runs one analysis pass, regardless of the append cadence,
    /// then flushes.
    pub fn replace_history(&mut self, samples: Vec<LocationSample>) -> AnalysisOutcome {
        self.history.replace_all(samples);
        let outcome = self.analyze();
        self.flush();
        outcome
    }

    /// Empty the history, clusters, and POIs together.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.snapshot = Arc::new(AnalysisSnapshot::empty());
        self.flush();
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Generate a privacy-preserving surrogate for an actual coordinate.
    ///
    /// Total over finite numeric input; reads the snapshot installed at
    /// call start. See [`crate::privacy::protect_location`] for the policy.
    pub fn protect(&self, lat: f64, lng: f64, privacy_level: Option<u8>) -> (f64, f64) {
        let snapshot = Arc::clone(&self.snapshot);
        protect_location(
            snapshot.clusters(),
            snapshot.pois(),
            lat,
            lng,
            privacy_level,
            &self.config,
        )
    }

    /// Test whether a coordinate is near a known point of interest.
    ///
    /// Returns the sensitivity verdict and, when sensitive, the matched
    /// POI's center. When several POIs qualify, any one may be returned.
    pub fn is_sensitive(&self, lat: f64, lng: f64) -> (bool, Option<(f64, f64)>) {
        let snapshot = Arc::clone(&self.snapshot);
        match sensitive_poi(snapshot.pois(), lat, lng, self.config.sensitivity_radius) {
            Some(poi) => (true, Some(poi.center())),
            None => (false, None),
        }
    }

    /// Current context counts for monitoring.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            cluster_count: self.snapshot.cluster_count() as u32,
            poi_count: self.snapshot.poi_count() as u32,
            sample_count: self.history.len() as u32,
        }
    }

    /// The currently installed analysis snapshot.
    pub fn snapshot(&self) -> Arc<AnalysisSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Engine configuration.
    pub fn config(&self) -> &PrivacyConfig {
        &self.config
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    /// Run one clustering pass over the full history.
    ///
    /// On success the fresh snapshot replaces the previous one atomically.
    /// On failure (including insufficient history) the previous snapshot
    /// is retained and the outcome says why; analysis never fails the
    /// operation that triggered it.
    pub fn analyze(&mut self) -> AnalysisOutcome {
        match cluster_samples(self.history.samples(), &self.config) {
            Ok(clusters) => {
                let snapshot =
                    AnalysisSnapshot::from_clusters(clusters, self.config.poi_threshold);
                let outcome = AnalysisOutcome::Recomputed {
                    cluster_count: snapshot.cluster_count(),
                    poi_count: snapshot.poi_count(),
                };
                info!(
                    "Analysis complete: {} clusters, {} POIs",
                    snapshot.cluster_count(),
                    snapshot.poi_count()
                );
                self.snapshot = Arc::new(snapshot);
                outcome
            }
            Err(e) => {
                warn!("Analysis pass retained previous state: {}", e);
                AnalysisOutcome::Retained {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Best-effort persistence flush; failures are logged, never surfaced.
    fn flush(&self) {
        if let Some(persistence) = &self.persistence {
            if let Err(e) = persistence.save(self.history.samples()) {
                warn!("Failed to save location history: {}", e);
            }
        }
    }
}

/// Context counts for monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub cluster_count: u32,
    pub poi_count: u32,
    pub sample_count: u32,
}
