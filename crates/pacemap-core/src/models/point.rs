// ABOUTME: Telemetry sample model shared by every format adapter
// ABOUTME: Position is required, every sensor channel is explicitly optional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::is_valid_coordinate;

/// One telemetry sample in recording order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Latitude in degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, within [-180, 180]
    pub longitude: f64,
    /// Elevation in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    /// Sample time (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Heart rate (BPM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,
    /// Cadence (RPM or steps/min)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence: Option<u32>,
    /// Power (watts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<u32>,
    /// Temperature (Celsius)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl Point {
    /// Creates a point with only a position; sensor channels start absent
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
            timestamp: None,
            heart_rate: None,
            cadence: None,
            power: None,
            temperature: None,
        }
    }

    /// Creates a point only when the coordinate is finite and in range
    #[must_use]
    pub fn try_new(latitude: f64, longitude: f64) -> Option<Self> {
        is_valid_coordinate(latitude, longitude).then(|| Self::new(latitude, longitude))
    }

    /// Seconds elapsed from `earlier` to this point, when both carry a timestamp
    #[must_use]
    pub fn seconds_since(&self, earlier: &Self) -> Option<f64> {
        match (earlier.timestamp, self.timestamp) {
            (Some(start), Some(end)) => Some(seconds_between(start, end)),
            _ => None,
        }
    }

    /// Elevation change from `earlier` to this point, when both carry elevation
    #[must_use]
    pub fn elevation_change_since(&self, earlier: &Self) -> Option<f64> {
        match (earlier.elevation, self.elevation) {
            (Some(from), Some(to)) => Some(to - from),
            _ => None,
        }
    }
}

/// Signed seconds between two instants with millisecond resolution
#[must_use]
pub fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / crate::constants::units::MILLIS_PER_SECOND
}
