// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Geodesic values, unit conversions, and source format identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

//! Constants grouped by domain rather than kept in one flat list.

/// Geodesic constants
pub mod geodesy {
    /// Mean Earth radius used by the haversine formula (meters)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
    /// Semicircles spanning 180 degrees in the binary telemetry encoding (2^31)
    pub const SEMICIRCLES_PER_180_DEGREES: f64 = 2_147_483_648.0;
    /// Valid latitude range bound (degrees)
    pub const MAX_LATITUDE: f64 = 90.0;
    /// Valid longitude range bound (degrees)
    pub const MAX_LONGITUDE: f64 = 180.0;
}

/// Unit conversion constants
pub mod units {
    /// Meters per kilometer
    pub const METERS_PER_KILOMETER: f64 = 1000.0;
    /// Seconds per minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Milliseconds per second
    pub const MILLIS_PER_SECOND: f64 = 1000.0;
}

/// Short names of the supported source formats
pub mod formats {
    /// Route/track exchange document
    pub const GPX: &str = "gpx";
    /// Binary telemetry container
    pub const FIT: &str = "fit";
    /// XML training-session document
    pub const TCX: &str = "tcx";
}
