//! # GeoGuard
//!
//! Location privacy engine for client devices.
//!
//! This library provides:
//! - Incremental discovery of significant places from unlabeled GPS history
//!   (density-based clustering)
//! - Point-of-interest classification by visit count
//! - Sensitivity testing of arbitrary coordinates against known places
//! - Privacy-preserving surrogate coordinate generation with
//!   distance-bounded, deterministic noise
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel neighbor computation with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use geoguard::{PrivacyConfig, PrivacyEngine};
//!
//! let mut engine = PrivacyEngine::new(PrivacyConfig::default());
//!
//! // Feed location history (normally streamed from the device)
//! for i in 0..12 {
//!     let jitter = i as f64 * 1e-5;
//!     engine.append_sample(37.7749 + jitter, -122.4194 - jitter, None);
//! }
//!
//! // Request a surrogate for a fresh fix
//! let (lat, lng) = engine.protect(37.7749, -122.4194, Some(5));
//! assert!((lat - 37.7749).abs() < 0.1);
//! assert!((lng + 122.4194).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{GeoGuardError, Result};

// Geographic utilities (haversine distance, degree-offset conversion)
pub mod geo_utils;

// Density-based place clustering
pub mod clustering;
pub use clustering::cluster_samples;

// Sensitivity testing and surrogate generation
pub mod privacy;
pub use privacy::{nearest_cluster, protect_location, sensitive_poi};

// Privacy engine with history store and analysis snapshots
pub mod engine;
pub use engine::{AnalysisOutcome, AnalysisSnapshot, EngineStats, HistoryStore, PrivacyEngine};

// History persistence collaborator
pub mod persistence;
pub use persistence::{HistoryPersistence, JsonFilePersistence};

// ============================================================================
// Core Types
// ============================================================================

/// A timestamped GPS fix from the device.
///
/// Samples are immutable once appended to the history; ordering is insertion
/// order (chronological by convention, not enforced).
///
/// # Example
/// ```
/// use geoguard::LocationSample;
/// let sample = LocationSample::new(51.5074, -0.1278, "2026-08-30T12:00:00Z".to_string());
/// assert!(sample.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    /// ISO-8601 timestamp of the fix
    pub timestamp: String,
}

impl LocationSample {
    /// Create a new location sample.
    pub fn new(latitude: f64, longitude: f64, timestamp: String) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    /// Check if the sample has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// A significant place discovered by density clustering.
///
/// Clusters are derived entities: every analysis pass recomputes the full
/// set from history and replaces the previous one atomically. A cluster
/// whose `member_count` meets the configured POI threshold is treated as a
/// point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Latitude of the cluster center (mean of member points)
    pub center_lat: f64,
    /// Longitude of the cluster center (mean of member points)
    pub center_lng: f64,
    /// Number of history samples assigned to this cluster
    pub member_count: u32,
    /// Max geodesic distance in meters from center to any member point
    pub radius: f64,
}

impl Cluster {
    /// Center as a (lat, lng) pair.
    pub fn center(&self) -> (f64, f64) {
        (self.center_lat, self.center_lng)
    }
}

/// Configuration for clustering, sensitivity, and surrogate generation.
#[derive(Debug, Clone)]
pub struct PrivacyConfig {
    /// Distance in meters within which a point counts as "near" a POI.
    /// Default: 100.0 meters
    pub sensitivity_radius: f64,

    /// Visit count at which a cluster becomes a point of interest.
    /// Default: 5
    pub poi_threshold: u32,

    /// Minimum history size before clustering runs at all.
    /// Below this, analysis passes are skipped and prior state retained.
    /// Default: 10
    pub min_history_for_analysis: usize,

    /// Analysis cadence: every Nth cumulative append triggers a pass.
    /// Default: 10
    pub analysis_interval: usize,

    /// DBSCAN neighborhood distance in standardized feature space.
    /// Scale-invariant: coordinates are normalized to zero mean and unit
    /// variance per axis before the neighborhood test.
    /// Default: 0.1
    pub cluster_eps: f64,

    /// Minimum neighborhood size for a core point in DBSCAN.
    /// Default: 3
    pub cluster_min_samples: usize,

    /// Privacy level applied when the caller supplies none.
    /// Default: 5
    pub default_privacy_level: u8,

    /// Minimum privacy level enforced for sensitive locations.
    /// A floor, never a ceiling: an explicitly higher caller level wins.
    /// Default: 8
    pub sensitive_level_floor: u8,

    /// Levels at or above this use global noise mode even near a cluster.
    /// Default: 7
    pub cluster_mode_max_level: u8,

    /// Meters of offset per privacy level in global noise mode.
    /// Default: 50.0 (so levels 1-10 span roughly 50-500 m)
    pub global_offset_step: f64,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            sensitivity_radius: 100.0,
            poi_threshold: 5,
            min_history_for_analysis: 10,
            analysis_interval: 10,
            cluster_eps: 0.1,
            cluster_min_samples: 3,
            default_privacy_level: 5,
            sensitive_level_floor: 8,
            cluster_mode_max_level: 7,
            global_offset_step: 50.0,
        }
    }
}
