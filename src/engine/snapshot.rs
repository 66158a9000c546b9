//! Immutable analysis snapshots.
//!
//! Each clustering pass produces a fresh snapshot that replaces the
//! previous one atomically. Queries read whichever snapshot is installed
//! when they start, so they see either the old state or the fully-replaced
//! new one, never a partial mix.

use crate::Cluster;

/// The cluster and POI sets produced by one analysis pass.
///
/// POIs are clusters whose member count meets the configured threshold,
/// computed here so the two sets can never disagree. No POI survives a
/// pass under a different identity: both sets are rebuilt together.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSnapshot {
    clusters: Vec<Cluster>,
    pois: Vec<Cluster>,
}

impl AnalysisSnapshot {
    /// The empty snapshot installed at startup and after `clear`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from a fresh cluster set, classifying POIs by
    /// visit-count threshold.
    pub fn from_clusters(clusters: Vec<Cluster>, poi_threshold: u32) -> Self {
        let pois = clusters
            .iter()
            .filter(|c| c.member_count >= poi_threshold)
            .cloned()
            .collect();
        Self { clusters, pois }
    }

    /// All clusters from the pass.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// The POI subset of the clusters.
    pub fn pois(&self) -> &[Cluster] {
        &self.pois
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn poi_count(&self) -> usize {
        self.pois.len()
    }
}

/// Result of one analysis pass.
///
/// Analysis is best-effort: a failed or skipped pass retains the previous
/// snapshot rather than propagating an error through the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// A new snapshot was produced and installed.
    Recomputed {
        cluster_count: usize,
        poi_count: usize,
    },
    /// The previous snapshot was retained.
    Retained {
        /// Why the pass did not produce a new snapshot
        reason: String,
    },
}
