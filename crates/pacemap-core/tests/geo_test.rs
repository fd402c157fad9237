// ABOUTME: Tests for great-circle distance, semicircle conversion, and coordinate validation
// ABOUTME: Covers symmetry, coincident points, and known reference distances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pacemap_core::geo::{
    haversine_distance, haversine_meters, is_valid_coordinate, semicircles_to_degrees,
};
use pacemap_core::models::Point;

#[test]
fn test_haversine_is_symmetric() {
    let pairs = [
        (Point::new(45.5017, -73.5673), Point::new(46.8139, -71.2080)),
        (Point::new(-33.8688, 151.2093), Point::new(51.5074, -0.1278)),
        (Point::new(0.0, 179.9), Point::new(0.0, -179.9)),
    ];

    for (a, b) in &pairs {
        assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
    }
}

#[test]
fn test_haversine_zero_for_coincident_points() {
    let a = Point::new(48.8566, 2.3522);
    assert_eq!(haversine_distance(&a, &a), 0.0);
}

#[test]
fn test_haversine_one_degree_of_latitude() {
    // 2 * pi * 6_371_000 / 360
    let distance = haversine_meters(0.0, 0.0, 1.0, 0.0);
    assert!((distance - 111_194.93).abs() < 0.1, "got {distance}");
}

#[test]
fn test_semicircle_conversion() {
    assert_eq!(semicircles_to_degrees(0.0), 0.0);
    assert!((semicircles_to_degrees(2_147_483_648.0) - 180.0).abs() < f64::EPSILON);
    assert!((semicircles_to_degrees(-1_073_741_824.0) + 90.0).abs() < f64::EPSILON);
    assert!(semicircles_to_degrees(f64::NAN).is_nan());
}

#[test]
fn test_coordinate_validation() {
    assert!(is_valid_coordinate(90.0, 180.0));
    assert!(is_valid_coordinate(-90.0, -180.0));
    assert!(!is_valid_coordinate(90.0001, 0.0));
    assert!(!is_valid_coordinate(0.0, -180.5));
    assert!(!is_valid_coordinate(f64::NAN, 0.0));
    assert!(!is_valid_coordinate(0.0, f64::INFINITY));
    assert!(Point::try_new(91.0, 0.0).is_none());
    assert!(Point::try_new(45.0, 7.0).is_some());
}
