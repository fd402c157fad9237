// ABOUTME: Geodesic helpers for great-circle distance and coordinate validation
// ABOUTME: Converts fixed-point semicircle angles from binary telemetry into degrees
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

use crate::constants::geodesy::{
    EARTH_RADIUS_METERS, MAX_LATITUDE, MAX_LONGITUDE, SEMICIRCLES_PER_180_DEGREES,
};
use crate::models::Point;

/// Great-circle distance in meters between two coordinates (haversine)
///
/// Symmetric in its arguments and exactly zero for coincident coordinates.
#[must_use]
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * c
}

/// Great-circle distance in meters between two points
#[must_use]
pub fn haversine_distance(a: &Point, b: &Point) -> f64 {
    haversine_meters(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Convert a semicircle angle to degrees (`semicircles * 180 / 2^31`)
#[must_use]
pub fn semicircles_to_degrees(semicircles: f64) -> f64 {
    semicircles * 180.0 / SEMICIRCLES_PER_180_DEGREES
}

/// Whether a latitude/longitude pair is finite and inside the valid ranges
#[must_use]
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-MAX_LATITUDE..=MAX_LATITUDE).contains(&latitude)
        && (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&longitude)
}
