//! Sensitivity testing and privacy-preserving surrogate generation.
//!
//! Two noise modes:
//! - **Cluster-relative**: for a recognized place at moderate privacy
//!   levels, the surrogate stays within the place's observed footprint,
//!   scaled by the requested level. Uses fresh randomness so repeated
//!   queries jitter inside the footprint.
//! - **Global**: for unrecognized locations or high privacy levels, the
//!   offset is seeded from a hash of the exact input coordinates, so
//!   identical input always yields the identical surrogate instead of
//!   jittering on every call.
//!
//! The degree-offset conversion is anchored at the cluster center's
//! latitude in cluster-relative mode but at the actual point's latitude in
//! global mode. The asymmetry is intentional and load-bearing for the
//! surrogate distribution.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::geo_utils::{degree_offset, haversine_distance};
use crate::{Cluster, PrivacyConfig};

/// Find the first POI whose center is within the sensitivity radius of the
/// query point.
///
/// First-match order is POI iteration order; when several qualify, callers
/// must not depend on which one is returned.
pub fn sensitive_poi<'a>(
    pois: &'a [Cluster],
    lat: f64,
    lng: f64,
    sensitivity_radius: f64,
) -> Option<&'a Cluster> {
    pois.iter()
        .find(|poi| haversine_distance(lat, lng, poi.center_lat, poi.center_lng) <= sensitivity_radius)
}

/// Find the nearest cluster to a point by geodesic distance.
///
/// Searches ALL clusters, not just POIs.
pub fn nearest_cluster<'a>(clusters: &'a [Cluster], lat: f64, lng: f64) -> Option<&'a Cluster> {
    clusters.iter().min_by(|a, b| {
        let da = haversine_distance(lat, lng, a.center_lat, a.center_lng);
        let db = haversine_distance(lat, lng, b.center_lat, b.center_lng);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Generate a privacy-preserving surrogate for an actual coordinate.
///
/// Policy, in order:
/// 1. If the point is sensitive (near a POI) and the supplied level is
///    unset or below the configured floor, the floor applies. An explicitly
///    higher caller level is preserved.
/// 2. An unset level falls back to the configured default.
/// 3. With a nearby cluster and a level below the cluster-mode cutoff, the
///    surrogate is drawn inside the cluster footprint; otherwise a
///    deterministic hash-seeded offset of `level * global_offset_step`
///    meters is applied at the actual point.
///
/// Total over finite numeric input: never fails, never validates output
/// against degenerate coordinates (poles, antimeridian).
pub fn protect_location(
    clusters: &[Cluster],
    pois: &[Cluster],
    actual_lat: f64,
    actual_lng: f64,
    privacy_level: Option<u8>,
    config: &PrivacyConfig,
) -> (f64, f64) {
    let is_sensitive = sensitive_poi(pois, actual_lat, actual_lng, config.sensitivity_radius).is_some();

    let level = match privacy_level {
        Some(l) if is_sensitive && l < config.sensitive_level_floor => config.sensitive_level_floor,
        Some(l) => l,
        None if is_sensitive => config.sensitive_level_floor,
        None => config.default_privacy_level,
    };

    let cluster = nearest_cluster(clusters, actual_lat, actual_lng);

    match cluster {
        Some(c) if level < config.cluster_mode_max_level => {
            // Cluster-relative: fresh randomness, anchored at the cluster
            // center so the surrogate stays plausible within the place
            let bearing = rand::thread_rng().gen_range(0.0..(2.0 * PI));
            let noise_radius = c.radius * (level as f64 / 10.0);
            let (dlat, dlng) = degree_offset(noise_radius, bearing, c.center_lat);
            (c.center_lat + dlat, c.center_lng + dlng)
        }
        _ => {
            // Global: hash-seeded so the same input maps to the same output
            let mut rng = StdRng::seed_from_u64(coordinate_seed(actual_lat, actual_lng));
            let bearing = rng.gen_range(0.0..(2.0 * PI));
            let offset_distance = level as f64 * config.global_offset_step;
            let (dlat, dlng) = degree_offset(offset_distance, bearing, actual_lat);
            (actual_lat + dlat, actual_lng + dlng)
        }
    }
}

/// Derive a stable RNG seed from the exact coordinate pair.
///
/// SHA-256 over the textual pair; the first 8 bytes become the seed.
/// Identical (lat, lng) always produces the identical seed.
fn coordinate_seed(lat: f64, lng: f64) -> u64 {
    let digest = Sha256::digest(format!("{lat},{lng}").as_bytes());
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(seed)
}
