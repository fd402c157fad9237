// ABOUTME: Per-point metrics engine: cumulative distance, speed, pace, grade, and normalization
// ABOUTME: Smooths pace and grade causally and scales pace/HR/power into a percentile band
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

//! Per-point metrics calculation
//!
//! Index 0 is the reference origin: zero distance, pace, grade, and speed.
//! Every later sample is measured against its predecessor.

use pacemap_core::constants::units::{METERS_PER_KILOMETER, SECONDS_PER_MINUTE};
use pacemap_core::geo::haversine_distance;
use pacemap_core::models::{Point, ProcessedPoint};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::statistics::{percentile, trailing_smooth};

/// Seconds assumed between samples when either timestamp is missing
const FALLBACK_TIME_DELTA_SECONDS: f64 = 1.0;

/// Instantaneous measurements between two consecutive samples
struct Step {
    distance: f64,
    speed: f64,
    pace: f64,
    grade: f64,
}

impl Step {
    fn between(previous: &Point, current: &Point) -> Self {
        let distance = haversine_distance(previous, current);
        let time_delta = current
            .seconds_since(previous)
            .unwrap_or(FALLBACK_TIME_DELTA_SECONDS);

        let speed = if time_delta > 0.0 {
            distance / time_delta
        } else {
            0.0
        };
        let pace = if speed > 0.0 {
            METERS_PER_KILOMETER / (speed * SECONDS_PER_MINUTE)
        } else {
            0.0
        };

        let elevation_delta = current.elevation_change_since(previous).unwrap_or(0.0);
        let grade = if distance > 0.0 {
            elevation_delta / distance * 100.0
        } else {
            0.0
        };

        Self {
            distance,
            speed,
            pace,
            grade,
        }
    }
}

/// Compute distance, speed, smoothed pace, and smoothed grade for every point
///
/// Preserves length and order. Normalized fields are left empty; see
/// [`normalize_metrics`].
#[must_use]
pub fn compute_metrics(points: &[Point], config: &AnalysisConfig) -> Vec<ProcessedPoint> {
    let mut distances = Vec::with_capacity(points.len());
    let mut speeds = Vec::with_capacity(points.len());
    let mut raw_pace = Vec::with_capacity(points.len());
    let mut raw_grade = Vec::with_capacity(points.len());

    let mut cumulative = 0.0;
    for (index, point) in points.iter().enumerate() {
        let step = match index.checked_sub(1) {
            Some(previous) => Step::between(&points[previous], point),
            None => Step {
                distance: 0.0,
                speed: 0.0,
                pace: 0.0,
                grade: 0.0,
            },
        };
        cumulative += step.distance;
        distances.push(cumulative);
        speeds.push(step.speed);
        raw_pace.push(step.pace);
        raw_grade.push(step.grade);
    }

    let pace = trailing_smooth(&raw_pace, config.pace_smoothing_window);
    let grade = trailing_smooth(&raw_grade, config.grade_smoothing_window);

    debug!(
        points = points.len(),
        distance_m = cumulative,
        "Computed per-point metrics"
    );

    points
        .iter()
        .enumerate()
        .map(|(i, point)| ProcessedPoint {
            distance: distances[i],
            pace: pace[i],
            grade: grade[i],
            speed: speeds[i],
            ..ProcessedPoint::origin(point.clone())
        })
        .collect()
}

/// Percentile band a metric is scaled against
#[derive(Debug, Clone, Copy)]
struct Band {
    low: f64,
    high: f64,
}

impl Band {
    fn from_values(values: &[f64], config: &AnalysisConfig) -> Self {
        Self {
            low: percentile(values, config.percentile_low),
            high: percentile(values, config.percentile_high),
        }
    }

    /// Scale into [0, 1]; a degenerate band maps everything to 0.5
    fn scale(self, value: f64) -> f64 {
        if self.high == self.low {
            0.5
        } else {
            ((value - self.low) / (self.high - self.low)).clamp(0.0, 1.0)
        }
    }
}

/// Scale pace, heart rate, and power into [0, 1] against their percentile bands
///
/// Each metric's band comes from the points carrying that metric (pace:
/// positive values only). Points without heart rate or power keep those
/// normalized fields absent; pace is always normalized.
#[must_use]
pub fn normalize_metrics(
    mut points: Vec<ProcessedPoint>,
    config: &AnalysisConfig,
) -> Vec<ProcessedPoint> {
    let paces: Vec<f64> = points.iter().map(|p| p.pace).filter(|p| *p > 0.0).collect();
    let heart_rates: Vec<f64> = points
        .iter()
        .filter_map(|p| p.point.heart_rate.map(f64::from))
        .collect();
    let powers: Vec<f64> = points
        .iter()
        .filter_map(|p| p.point.power.map(f64::from))
        .collect();

    let pace_band = Band::from_values(&paces, config);
    let hr_band = Band::from_values(&heart_rates, config);
    let power_band = Band::from_values(&powers, config);

    for processed in &mut points {
        processed.normalized_pace = Some(pace_band.scale(processed.pace));
        processed.normalized_heart_rate = processed
            .point
            .heart_rate
            .map(|hr| hr_band.scale(f64::from(hr)));
        processed.normalized_power = processed
            .point
            .power
            .map(|watts| power_band.scale(f64::from(watts)));
    }

    points
}
