//! Tests for geo module

use placemap::geo::*;
use placemap::Coordinate;

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

#[test]
fn test_distance_same_point_is_zero() {
    let p = Coordinate::new(51.505, -0.09);
    assert_eq!(distance_km(&p, &p), 0.0);
}

#[test]
fn test_distance_symmetry() {
    let london = Coordinate::new(51.505, -0.09);
    let paris = Coordinate::new(48.8566, 2.3522);
    assert_eq!(distance_km(&london, &paris), distance_km(&paris, &london));

    let sydney = Coordinate::new(-33.8688, 151.2093);
    let tokyo = Coordinate::new(35.6762, 139.6503);
    assert_eq!(distance_km(&sydney, &tokyo), distance_km(&tokyo, &sydney));
}

#[test]
fn test_distance_known_value_london_paris() {
    // London to Paris is approximately 343.5 km
    let london = Coordinate::new(51.505, -0.09);
    let paris = Coordinate::new(48.8566, 2.3522);
    let dist = distance_km(&london, &paris);
    assert!(approx_eq(dist, 343.5, 2.0), "got {dist} km");
}

#[test]
fn test_distance_meters_matches_km() {
    let london = Coordinate::new(51.505, -0.09);
    let paris = Coordinate::new(48.8566, 2.3522);
    let km = distance_km(&london, &paris);
    let m = distance_meters(&london, &paris);
    assert!(approx_eq(m, km * 1000.0, 1e-6));
}

#[test]
fn test_distance_increases_with_separation() {
    let origin = Coordinate::new(51.505, -0.09);
    let near = Coordinate::new(51.515, -0.09);
    let far = Coordinate::new(51.605, -0.09);
    assert!(distance_km(&origin, &near) < distance_km(&origin, &far));
}

#[test]
fn test_radius_membership_monotonicity() {
    let center = Coordinate::new(51.505, -0.09);
    let point = Coordinate::new(51.51, -0.10);
    let dist = distance_km(&point, &center);

    assert!(is_within_radius_km(&point, &center, dist + 0.1));
    // Any larger radius must also match
    assert!(is_within_radius_km(&point, &center, dist + 1.0));
    assert!(is_within_radius_km(&point, &center, dist + 100.0));
    // A smaller radius must not
    assert!(!is_within_radius_km(&point, &center, dist - 0.1));
}

#[test]
fn test_radius_boundary_is_inclusive() {
    let center = Coordinate::new(51.505, -0.09);
    let point = Coordinate::new(51.505, -0.09);
    // Radius 0 matches the exact center point
    assert!(is_within_radius_km(&point, &center, 0.0));
}

#[test]
fn test_radius_meters_area_scenario() {
    // ~450 m north of center is inside a 500 m area, ~550 m is not
    let center = Coordinate::new(51.505, -0.09);
    let inside = Coordinate::new(51.505 + 0.00404, -0.09);
    let outside = Coordinate::new(51.505 + 0.00495, -0.09);

    let d_inside = distance_meters(&inside, &center);
    let d_outside = distance_meters(&outside, &center);
    assert!(approx_eq(d_inside, 450.0, 10.0), "got {d_inside} m");
    assert!(approx_eq(d_outside, 550.0, 10.0), "got {d_outside} m");

    assert!(is_within_radius_meters(&inside, &center, 500.0));
    assert!(!is_within_radius_meters(&outside, &center, 500.0));
}

#[test]
fn test_nan_coordinate_yields_nan_distance() {
    let center = Coordinate::new(51.505, -0.09);
    let bad = Coordinate::new(f64::NAN, -0.09);
    let dist = distance_km(&bad, &center);
    assert!(dist.is_nan());
    // NaN compares false against any radius, so the point is never within
    assert!(!is_within_radius_km(&bad, &center, f64::MAX));
}

#[test]
fn test_meters_to_degrees() {
    // At the equator, 111.32 km = 1 degree
    let deg = meters_to_degrees(111_320.0, 0.0);
    assert!(approx_eq(deg, 1.0, 0.01));

    // At higher latitude, the same distance covers more degrees
    let deg_45 = meters_to_degrees(111_320.0, 45.0);
    assert!(deg_45 > 1.0);
}
