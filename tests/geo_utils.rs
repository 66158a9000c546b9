//! Tests for geo_utils module

use geoguard::geo_utils::{degree_offset, haversine_distance, METERS_PER_DEGREE};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_haversine_distance_same_point() {
    assert_eq!(
        haversine_distance(51.5074, -0.1278, 51.5074, -0.1278),
        0.0
    );
}

#[test]
fn test_haversine_distance_known_value() {
    // London to Paris is approximately 344 km
    let dist = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
    assert!(approx_eq(dist, 343_560.0, 5_000.0)); // Within 5km
}

#[test]
fn test_haversine_distance_symmetric() {
    let d1 = haversine_distance(37.7749, -122.4194, 40.7128, -74.0060);
    let d2 = haversine_distance(40.7128, -74.0060, 37.7749, -122.4194);
    assert!(approx_eq(d1, d2, 1e-9));
}

#[test]
fn test_haversine_distance_non_negative() {
    let points = [
        (0.0, 0.0),
        (37.7749, -122.4194),
        (-33.8688, 151.2093),
        (51.5074, -0.1278),
    ];
    for &(la, lo) in &points {
        for &(lb, lob) in &points {
            assert!(haversine_distance(la, lo, lb, lob) >= 0.0);
        }
    }
}

#[test]
fn test_haversine_triangle_inequality() {
    let p = (51.5074, -0.1278); // London
    let q = (48.8566, 2.3522); // Paris
    let r = (52.5200, 13.4050); // Berlin

    let pq = haversine_distance(p.0, p.1, q.0, q.1);
    let qr = haversine_distance(q.0, q.1, r.0, r.1);
    let pr = haversine_distance(p.0, p.1, r.0, r.1);

    assert!(pr <= pq + qr + 1e-6);
}

#[test]
fn test_degree_offset_due_north() {
    let (dlat, dlng) = degree_offset(111_111.0, 0.0, 45.0);
    assert!(approx_eq(dlat, 1.0, 1e-9));
    assert!(approx_eq(dlng, 0.0, 1e-9));
}

#[test]
fn test_degree_offset_due_east_scales_with_latitude() {
    let (dlat_eq, dlng_eq) = degree_offset(METERS_PER_DEGREE, std::f64::consts::FRAC_PI_2, 0.0);
    assert!(approx_eq(dlat_eq, 0.0, 1e-9));
    assert!(approx_eq(dlng_eq, 1.0, 1e-9));

    // Same distance at 60N spans twice the longitude degrees
    let (_, dlng_60) = degree_offset(METERS_PER_DEGREE, std::f64::consts::FRAC_PI_2, 60.0);
    assert!(approx_eq(dlng_60, 2.0, 1e-6));
}

#[test]
fn test_degree_offset_round_trip_magnitude() {
    // Applying the offset and measuring it back with haversine should
    // recover the requested distance within flat-earth tolerance
    let lat = 37.7749;
    let lng = -122.4194;
    for radius in [50.0, 150.0, 400.0] {
        for bearing in [0.3, 1.1, 2.8, 4.6, 6.0] {
            let (dlat, dlng) = degree_offset(radius, bearing, lat);
            let measured = haversine_distance(lat, lng, lat + dlat, lng + dlng);
            assert!(
                approx_eq(measured, radius, radius * 0.02 + 1.0),
                "radius {radius} bearing {bearing}: measured {measured}"
            );
        }
    }
}
