//! Tests for the place clusterer

use geoguard::geo_utils::haversine_distance;
use geoguard::{cluster_samples, GeoGuardError, LocationSample, PrivacyConfig};

const HOME: (f64, f64) = (37.7749, -122.4194);

fn sample(lat: f64, lng: f64) -> LocationSample {
    LocationSample::new(lat, lng, "2026-08-30T12:00:00Z".to_string())
}

/// Ten repeated fixes at home plus two passing fixes ~25 m away.
fn home_history() -> Vec<LocationSample> {
    let mut samples: Vec<LocationSample> = (0..10).map(|_| sample(HOME.0, HOME.1)).collect();
    samples.push(sample(HOME.0 + 0.00022, HOME.1));
    samples.push(sample(HOME.0 - 0.00022, HOME.1));
    samples
}

#[test]
fn test_insufficient_history_is_an_error() {
    let samples: Vec<LocationSample> = (0..9).map(|_| sample(HOME.0, HOME.1)).collect();
    let result = cluster_samples(&samples, &PrivacyConfig::default());
    assert!(matches!(
        result,
        Err(GeoGuardError::InsufficientSamples {
            required: 10,
            actual: 9
        })
    ));
}

#[test]
fn test_single_place_forms_one_cluster() {
    let clusters = cluster_samples(&home_history(), &PrivacyConfig::default()).unwrap();

    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].member_count, 10);
    // Center sits on the repeated fix; the two passing fixes are noise
    assert!((clusters[0].center_lat - HOME.0).abs() < 1e-9);
    assert!((clusters[0].center_lng - HOME.1).abs() < 1e-9);
}

#[test]
fn test_identical_points_cluster_despite_zero_variance() {
    let samples: Vec<LocationSample> = (0..12).map(|_| sample(HOME.0, HOME.1)).collect();
    let clusters = cluster_samples(&samples, &PrivacyConfig::default()).unwrap();

    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].member_count, 12);
    assert_eq!(clusters[0].radius, 0.0);
}

#[test]
fn test_two_places_form_two_clusters() {
    // Home: two tight sub-clumps 11 m apart; work: 5.5 km away
    let mut samples: Vec<LocationSample> = Vec::new();
    for _ in 0..5 {
        samples.push(sample(HOME.0, HOME.1));
    }
    for _ in 0..5 {
        samples.push(sample(HOME.0 + 0.0001, HOME.1));
    }
    for _ in 0..5 {
        samples.push(sample(HOME.0 + 0.05, HOME.1));
    }

    let clusters = cluster_samples(&samples, &PrivacyConfig::default()).unwrap();
    assert_eq!(clusters.len(), 2);

    // Assignment follows data order: home first
    assert_eq!(clusters[0].member_count, 10);
    assert_eq!(clusters[1].member_count, 5);

    // Home radius covers the 11 m sub-clump spread from the midpoint
    assert!(clusters[0].radius > 4.0 && clusters[0].radius < 8.0);
    assert_eq!(clusters[1].radius, 0.0);
}

#[test]
fn test_radius_covers_every_known_member() {
    let samples = home_history();
    let clusters = cluster_samples(&samples, &PrivacyConfig::default()).unwrap();
    let c = &clusters[0];

    // All ten repeated fixes are members; the center-to-member distance
    // can never exceed the radius
    let d = haversine_distance(c.center_lat, c.center_lng, HOME.0, HOME.1);
    assert!(d <= c.radius + 1e-9);
}

#[test]
fn test_evenly_scattered_points_are_all_noise() {
    // Uniform spread normalizes to unit variance, so no region is denser
    // than the history as a whole
    let samples: Vec<LocationSample> = (0..20)
        .map(|i| sample(HOME.0 + i as f64 * 0.01, HOME.1 + i as f64 * 0.01))
        .collect();

    let clusters = cluster_samples(&samples, &PrivacyConfig::default()).unwrap();
    assert!(clusters.is_empty());
}

#[test]
fn test_non_finite_coordinate_is_analysis_error() {
    let mut samples = home_history();
    samples[3].latitude = f64::NAN;

    let result = cluster_samples(&samples, &PrivacyConfig::default());
    assert!(matches!(result, Err(GeoGuardError::Analysis { .. })));
}
