//! Density-based place clustering over location history.
//!
//! Groups history samples into clusters such that any two members are
//! connected by a chain of points each within a neighborhood distance of
//! the next (DBSCAN). Coordinates are standardized to zero mean and unit
//! variance per axis before the neighborhood test, so the density threshold
//! is scale-invariant across the latitude/longitude feature space. Points
//! not reachable into a sufficiently dense group are discarded as noise and
//! never become clusters.
//!
//! Cluster membership is decided in the normalized space; the emitted
//! cluster `radius` is post-computed in real meters with the haversine
//! distance.

use crate::error::GeoGuardError;
use crate::geo_utils::haversine_distance;
use crate::{Cluster, LocationSample, PrivacyConfig, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Label for points not assigned to any cluster.
const NOISE: i32 = -1;
/// Label for points not yet visited by the scan.
const UNVISITED: i32 = -2;

/// Cluster the full history into significant places.
///
/// Returns the fresh cluster set, intended to fully replace the previous
/// one. Errors if the history is too small or the feature space is
/// degenerate; callers retain their prior state in that case.
///
/// Note that standardization makes the density test relative to the
/// overall spread of the history: a place registers as a cluster when its
/// fixes sit much tighter together than the history as a whole.
///
/// # Example
/// ```
/// use geoguard::{cluster_samples, LocationSample, PrivacyConfig};
///
/// // Ten repeated fixes at home, two passing fixes nearby
/// let mut samples: Vec<LocationSample> = (0..10)
///     .map(|_| LocationSample::new(37.7749, -122.4194, String::new()))
///     .collect();
/// samples.push(LocationSample::new(37.77512, -122.4194, String::new()));
/// samples.push(LocationSample::new(37.77468, -122.4194, String::new()));
///
/// let clusters = cluster_samples(&samples, &PrivacyConfig::default()).unwrap();
/// assert_eq!(clusters.len(), 1);
/// assert_eq!(clusters[0].member_count, 10);
/// ```
pub fn cluster_samples(samples: &[LocationSample], config: &PrivacyConfig) -> Result<Vec<Cluster>> {
    if samples.len() < config.min_history_for_analysis {
        return Err(GeoGuardError::InsufficientSamples {
            required: config.min_history_for_analysis,
            actual: samples.len(),
        });
    }

    let coords: Vec<[f64; 2]> = samples.iter().map(|s| [s.latitude, s.longitude]).collect();

    if coords
        .iter()
        .any(|c| !c[0].is_finite() || !c[1].is_finite())
    {
        return Err(GeoGuardError::analysis("non-finite coordinate in history"));
    }

    let normalized = standardize(&coords);
    let labels = dbscan(&normalized, config.cluster_eps, config.cluster_min_samples);

    let cluster_count = labels.iter().copied().max().unwrap_or(NOISE) + 1;

    let mut clusters = Vec::with_capacity(cluster_count as usize);
    for label in 0..cluster_count {
        let members: Vec<&[f64; 2]> = coords
            .iter()
            .zip(&labels)
            .filter(|(_, &l)| l == label)
            .map(|(c, _)| c)
            .collect();

        // Emitted clusters always have >= min_samples members
        let center_lat = members.iter().map(|c| c[0]).sum::<f64>() / members.len() as f64;
        let center_lng = members.iter().map(|c| c[1]).sum::<f64>() / members.len() as f64;

        let radius = members
            .iter()
            .map(|c| haversine_distance(center_lat, center_lng, c[0], c[1]))
            .fold(0.0f64, f64::max);

        clusters.push(Cluster {
            center_lat,
            center_lng,
            member_count: members.len() as u32,
            radius,
        });
    }

    Ok(clusters)
}

/// Standardize coordinates to zero mean and unit variance per axis.
///
/// A zero-variance axis is scaled by 1.0, matching the degenerate handling
/// of standard feature scalers, so a history of identical points still
/// clusters instead of failing.
fn standardize(coords: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let n = coords.len() as f64;

    let mut mean = [0.0f64; 2];
    for c in coords {
        mean[0] += c[0];
        mean[1] += c[1];
    }
    mean[0] /= n;
    mean[1] /= n;

    let mut var = [0.0f64; 2];
    for c in coords {
        var[0] += (c[0] - mean[0]).powi(2);
        var[1] += (c[1] - mean[1]).powi(2);
    }
    let scale = [
        if var[0] > 0.0 { (var[0] / n).sqrt() } else { 1.0 },
        if var[1] > 0.0 { (var[1] / n).sqrt() } else { 1.0 },
    ];

    coords
        .iter()
        .map(|c| [(c[0] - mean[0]) / scale[0], (c[1] - mean[1]) / scale[1]])
        .collect()
}

/// DBSCAN over normalized points. Returns per-point labels: 0..k for
/// cluster members, -1 for noise. Assignment follows data order, so output
/// is deterministic for a given input sequence.
fn dbscan(points: &[[f64; 2]], eps: f64, min_samples: usize) -> Vec<i32> {
    let neighbors = compute_neighbors(points, eps);
    let mut labels = vec![UNVISITED; points.len()];
    let mut next_label = 0;

    for i in 0..points.len() {
        if labels[i] != UNVISITED {
            continue;
        }
        if neighbors[i].len() < min_samples {
            labels[i] = NOISE;
            continue;
        }

        // New core point: grow its cluster by breadth-first expansion
        let label = next_label;
        next_label += 1;
        labels[i] = label;

        let mut queue: Vec<usize> = neighbors[i].clone();
        let mut head = 0;
        while head < queue.len() {
            let j = queue[head];
            head += 1;

            if labels[j] == NOISE {
                // Border point: reachable, but not itself dense
                labels[j] = label;
            }
            if labels[j] != UNVISITED {
                continue;
            }
            labels[j] = label;

            if neighbors[j].len() >= min_samples {
                queue.extend(neighbors[j].iter().copied());
            }
        }
    }

    labels
}

/// Precompute the eps-neighborhood of every point (self included, as in the
/// standard density definition).
#[cfg(not(feature = "parallel"))]
fn compute_neighbors(points: &[[f64; 2]], eps: f64) -> Vec<Vec<usize>> {
    (0..points.len())
        .map(|i| neighborhood_of(points, i, eps))
        .collect()
}

/// Precompute the eps-neighborhood of every point (self included), in
/// parallel.
#[cfg(feature = "parallel")]
fn compute_neighbors(points: &[[f64; 2]], eps: f64) -> Vec<Vec<usize>> {
    (0..points.len())
        .into_par_iter()
        .map(|i| neighborhood_of(points, i, eps))
        .collect()
}

fn neighborhood_of(points: &[[f64; 2]], i: usize, eps: f64) -> Vec<usize> {
    let eps_sq = eps * eps;
    let p = points[i];
    points
        .iter()
        .enumerate()
        .filter(|(_, q)| {
            let dx = p[0] - q[0];
            let dy = p[1] - q[1];
            dx * dx + dy * dy <= eps_sq
        })
        .map(|(j, _)| j)
        .collect()
}
