// ABOUTME: Canonical activity model including Activity, ActivityBuilder, and aggregate totals
// ABOUTME: Totals are taken from the source document when declared, recomputed otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{seconds_between, Point, SportType};
use crate::constants::units::{METERS_PER_KILOMETER, SECONDS_PER_MINUTE};
use crate::errors::{ActivityError, ActivityResult};
use crate::geo::{haversine_distance, is_valid_coordinate};

/// Geographic bounding box of an activity's points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southernmost latitude (degrees)
    pub min_latitude: f64,
    /// Northernmost latitude (degrees)
    pub max_latitude: f64,
    /// Westernmost longitude (degrees)
    pub min_longitude: f64,
    /// Easternmost longitude (degrees)
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Smallest box containing every point, `None` for an empty slice
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let seed = Self {
            min_latitude: first.latitude,
            max_latitude: first.latitude,
            min_longitude: first.longitude,
            max_longitude: first.longitude,
        };
        Some(points.iter().skip(1).fold(seed, |bounds, point| Self {
            min_latitude: bounds.min_latitude.min(point.latitude),
            max_latitude: bounds.max_latitude.max(point.latitude),
            min_longitude: bounds.min_longitude.min(point.longitude),
            max_longitude: bounds.max_longitude.max(point.longitude),
        }))
    }
}

/// Aggregate totals of an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTotals {
    /// Total distance covered in meters
    pub distance_meters: f64,
    /// Sum of positive elevation changes in meters
    pub elevation_gain_meters: f64,
    /// Elapsed time from first to last sample in seconds
    pub elapsed_seconds: f64,
    /// Average pace in minutes per kilometer (0 when no distance was covered)
    pub average_pace_min_per_km: f64,
    /// Average heart rate (BPM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<f64>,
    /// Maximum heart rate (BPM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
}

impl ActivityTotals {
    /// Recompute every total from the point sequence
    ///
    /// Distance sums consecutive great-circle distances, elevation gain sums
    /// only the ascents between points that both carry elevation, and elapsed
    /// time is last minus first timestamp (0 when either end lacks one).
    #[must_use]
    pub fn recompute(points: &[Point]) -> Self {
        let distance_meters: f64 = points
            .windows(2)
            .map(|pair| haversine_distance(&pair[0], &pair[1]))
            .sum();

        let elevation_gain_meters: f64 = points
            .windows(2)
            .filter_map(|pair| pair[1].elevation_change_since(&pair[0]))
            .filter(|delta| *delta > 0.0)
            .sum();

        let elapsed_seconds = match (points.first(), points.last()) {
            (Some(first), Some(last)) => last.seconds_since(first).unwrap_or(0.0),
            _ => 0.0,
        };

        let heart_rates: Vec<u32> = points.iter().filter_map(|p| p.heart_rate).collect();
        let average_heart_rate = (!heart_rates.is_empty()).then(|| {
            heart_rates.iter().map(|hr| f64::from(*hr)).sum::<f64>() / heart_rates.len() as f64
        });
        let max_heart_rate = heart_rates.iter().copied().max();

        Self {
            distance_meters,
            elevation_gain_meters,
            elapsed_seconds,
            average_pace_min_per_km: average_pace(elapsed_seconds, distance_meters),
            average_heart_rate,
            max_heart_rate,
        }
    }
}

/// Average pace in minutes per kilometer, 0 for a zero-distance activity
fn average_pace(elapsed_seconds: f64, distance_meters: f64) -> f64 {
    if distance_meters > 0.0 {
        (elapsed_seconds / SECONDS_PER_MINUTE) / (distance_meters / METERS_PER_KILOMETER)
    } else {
        0.0
    }
}

/// Canonical activity produced by exactly one format adapter
///
/// Fields are private to keep the activity immutable after parsing - use the
/// accessor methods to read and `ActivityBuilder` to construct. Deserializing
/// also goes through the builder, so bounds are always recomputed and an
/// empty or out-of-range track is rejected.
///
/// # Examples
///
/// ```rust
/// use pacemap_core::models::{ActivityBuilder, Point};
///
/// let activity = ActivityBuilder::new("Morning Run", "gpx")
///     .points(vec![Point::new(45.0, -73.0), Point::new(45.001, -73.0)])
///     .build()
///     .unwrap();
///
/// assert_eq!(activity.name(), "Morning Run");
/// assert!(activity.totals().distance_meters > 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ActivityRecord")]
pub struct Activity {
    /// Human-readable name/title of the activity
    name: String,
    /// When the activity started (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<DateTime<Utc>>,
    /// Sport declared by the source document
    #[serde(skip_serializing_if = "Option::is_none")]
    sport: Option<SportType>,
    /// Samples in recording order
    points: Vec<Point>,
    /// Aggregate totals
    totals: ActivityTotals,
    /// Geographic extent of the samples
    bounds: BoundingBox,
    /// Short name of the source format
    source: String,
}

/// Accessor methods for Activity fields
impl Activity {
    /// Returns the activity name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns when the activity started (UTC)
    #[must_use]
    pub const fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    /// Returns the sport declared by the source document
    #[must_use]
    pub const fn sport(&self) -> Option<&SportType> {
        self.sport.as_ref()
    }

    /// Returns the samples in recording order
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the aggregate totals
    #[must_use]
    pub const fn totals(&self) -> &ActivityTotals {
        &self.totals
    }

    /// Returns the geographic bounding box
    #[must_use]
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Returns the short name of the source format
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Builder for `Activity`
///
/// Totals declared by the source document override the recomputed ones field
/// by field; average pace always derives from the final distance and time.
#[derive(Debug, Clone)]
pub struct ActivityBuilder {
    name: String,
    source: String,
    date: Option<DateTime<Utc>>,
    sport: Option<SportType>,
    points: Vec<Point>,
    distance_meters: Option<f64>,
    elevation_gain_meters: Option<f64>,
    elapsed_seconds: Option<f64>,
    average_heart_rate: Option<f64>,
    max_heart_rate: Option<u32>,
}

impl ActivityBuilder {
    /// Creates a new `ActivityBuilder` with required fields
    #[must_use]
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            date: None,
            sport: None,
            points: Vec::new(),
            distance_meters: None,
            elevation_gain_meters: None,
            elapsed_seconds: None,
            average_heart_rate: None,
            max_heart_rate: None,
        }
    }

    /// Sets the samples in recording order
    #[must_use]
    pub fn points(mut self, points: Vec<Point>) -> Self {
        self.points = points;
        self
    }

    /// Sets the start date (optional)
    #[must_use]
    pub const fn date(mut self, value: Option<DateTime<Utc>>) -> Self {
        self.date = value;
        self
    }

    /// Sets the sport (optional)
    #[must_use]
    pub fn sport(mut self, value: Option<SportType>) -> Self {
        self.sport = value;
        self
    }

    /// Sets the declared total distance in meters (optional)
    #[must_use]
    pub const fn distance_meters(mut self, value: Option<f64>) -> Self {
        self.distance_meters = value;
        self
    }

    /// Sets the declared total ascent in meters (optional)
    #[must_use]
    pub const fn elevation_gain_meters(mut self, value: Option<f64>) -> Self {
        self.elevation_gain_meters = value;
        self
    }

    /// Sets the declared elapsed time in seconds (optional)
    #[must_use]
    pub const fn elapsed_seconds(mut self, value: Option<f64>) -> Self {
        self.elapsed_seconds = value;
        self
    }

    /// Sets the declared average heart rate (optional)
    #[must_use]
    pub const fn average_heart_rate(mut self, value: Option<f64>) -> Self {
        self.average_heart_rate = value;
        self
    }

    /// Sets the declared maximum heart rate (optional)
    #[must_use]
    pub const fn max_heart_rate(mut self, value: Option<u32>) -> Self {
        self.max_heart_rate = value;
        self
    }

    /// Builds the `Activity`
    ///
    /// # Errors
    ///
    /// Returns `ActivityError::NoTrackData` when no points were supplied
    pub fn build(self) -> ActivityResult<Activity> {
        let Some(bounds) = BoundingBox::from_points(&self.points) else {
            return Err(ActivityError::no_track_data(self.source));
        };

        let recomputed = ActivityTotals::recompute(&self.points);
        let distance_meters = self.distance_meters.unwrap_or(recomputed.distance_meters);
        let elapsed_seconds = self.elapsed_seconds.unwrap_or(recomputed.elapsed_seconds);
        let totals = ActivityTotals {
            distance_meters,
            elevation_gain_meters: self
                .elevation_gain_meters
                .unwrap_or(recomputed.elevation_gain_meters),
            elapsed_seconds,
            average_pace_min_per_km: average_pace(elapsed_seconds, distance_meters),
            average_heart_rate: self.average_heart_rate.or(recomputed.average_heart_rate),
            max_heart_rate: self.max_heart_rate.or(recomputed.max_heart_rate),
        };

        debug!(
            source = %self.source,
            points = self.points.len(),
            distance_m = totals.distance_meters,
            declared_distance = self.distance_meters.is_some(),
            declared_elapsed = self.elapsed_seconds.is_some(),
            "Built canonical activity"
        );

        Ok(Activity {
            name: self.name,
            date: self.date,
            sport: self.sport,
            points: self.points,
            totals,
            bounds,
            source: self.source,
        })
    }
}

/// Serialized form of an `Activity`, validated through `ActivityBuilder`
#[derive(Deserialize)]
struct ActivityRecord {
    name: String,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
    #[serde(default)]
    sport: Option<SportType>,
    points: Vec<Point>,
    #[serde(default)]
    totals: Option<ActivityTotals>,
    source: String,
}

impl TryFrom<ActivityRecord> for Activity {
    type Error = ActivityError;

    fn try_from(record: ActivityRecord) -> ActivityResult<Self> {
        if let Some(index) = record
            .points
            .iter()
            .position(|p| !is_valid_coordinate(p.latitude, p.longitude))
        {
            return Err(ActivityError::malformed(
                record.source,
                format!("point {index} has out-of-range coordinates"),
            ));
        }

        let mut builder = ActivityBuilder::new(record.name, record.source)
            .date(record.date)
            .sport(record.sport)
            .points(record.points);
        if let Some(totals) = record.totals {
            builder = builder
                .distance_meters(Some(totals.distance_meters))
                .elevation_gain_meters(Some(totals.elevation_gain_meters))
                .elapsed_seconds(Some(totals.elapsed_seconds))
                .average_heart_rate(totals.average_heart_rate)
                .max_heart_rate(totals.max_heart_rate);
        }
        builder.build()
    }
}
