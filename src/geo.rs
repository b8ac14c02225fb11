//! Geographic utilities: haversine distance and radius membership.
//!
//! All functions are pure and re-entrant. Distances assume a spherical Earth
//! with a fixed radius; at city scale the error against an ellipsoid model is
//! well under the GPS noise floor.
//!
//! Behavior for non-finite or out-of-range coordinates is undefined: a NaN
//! input yields a NaN distance, which compares false against every radius.
//! Callers that need a hard rejection should validate with
//! [`Coordinate::validate`](crate::Coordinate::validate) at ingestion.

use crate::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers (haversine).
///
/// Symmetric, zero for identical points, monotonically increasing with
/// angular separation.
///
/// # Example
/// ```
/// use placemap::geo::distance_km;
/// use placemap::Coordinate;
///
/// let london = Coordinate::new(51.505, -0.09);
/// let paris = Coordinate::new(48.8566, 2.3522);
/// let d = distance_km(&london, &paris);
/// assert!((d - 343.5).abs() < 2.0);
/// ```
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlng = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Great-circle distance between two coordinates in meters.
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    distance_km(a, b) * 1000.0
}

/// Check whether `point` lies within `radius_km` of `center`.
///
/// The boundary is inclusive. A radius of 0 matches only the exact center
/// point, subject to floating-point equality.
pub fn is_within_radius_km(point: &Coordinate, center: &Coordinate, radius_km: f64) -> bool {
    distance_km(point, center) <= radius_km
}

/// Check whether `point` lies within `radius_meters` of `center`.
///
/// Meter-denominated variant used for user-drawn area selections.
pub fn is_within_radius_meters(
    point: &Coordinate,
    center: &Coordinate,
    radius_meters: f64,
) -> bool {
    is_within_radius_km(point, center, radius_meters / 1000.0)
}

/// Convert a distance in meters to degrees of longitude at a given latitude.
///
/// Used to size bounding boxes for radius searches on the spatial index.
/// The scale is clamped near the poles to avoid division by zero.
pub fn meters_to_degrees(meters: f64, latitude: f64) -> f64 {
    let meters_per_degree = (111_320.0 * latitude.to_radians().cos()).max(1.0);
    meters / meters_per_degree
}
