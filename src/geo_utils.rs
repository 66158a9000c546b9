//! Geographic utilities: great-circle distance and degree-offset conversion.
//!
//! All distance math in the crate goes through this module. Cluster radii
//! and sensitivity tests use the haversine distance; surrogate generation
//! converts planar polar offsets to coordinate deltas with a small-offset
//! flat-earth approximation.

/// Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of latitude (and of longitude at the equator)
pub const METERS_PER_DEGREE: f64 = 111_111.0;

/// Calculate the great-circle distance between two points in meters.
///
/// Inputs are decimal degrees. The result is always >= 0, and the distance
/// from a point to itself is exactly 0.
///
/// # Example
/// ```
/// use geoguard::geo_utils::haversine_distance;
/// let d = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
/// assert!((d - 343_560.0).abs() < 5_000.0); // London to Paris, ~344 km
/// ```
pub fn haversine_distance(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> f64 {
    let lat1 = lat_a.to_radians();
    let lat2 = lat_b.to_radians();
    let dlat = (lat_b - lat_a).to_radians();
    let dlng = (lng_b - lng_a).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Convert a planar polar offset (distance + bearing) at a reference
/// latitude into coordinate-degree deltas.
///
/// Uses 111,111 m/degree for latitude and `111,111 * cos(lat)` m/degree for
/// longitude. This is a small-offset flat-earth approximation, not
/// geodesically exact; acceptable because noise offsets are bounded to
/// hundreds of meters. Degenerate near the poles, where the longitude
/// scale factor approaches zero.
///
/// Returns `(delta_lat_deg, delta_lng_deg)`.
pub fn degree_offset(radius_m: f64, bearing_rad: f64, reference_lat_deg: f64) -> (f64, f64) {
    let dlat = (radius_m / METERS_PER_DEGREE) * bearing_rad.cos();
    let dlng =
        (radius_m / (METERS_PER_DEGREE * reference_lat_deg.to_radians().cos())) * bearing_rad.sin();
    (dlat, dlng)
}
