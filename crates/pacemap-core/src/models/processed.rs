// ABOUTME: Analysis output models: per-point metrics, fixed-distance splits, highlight segments
// ABOUTME: ProcessedActivity is the read-only contract consumed by rendering and export layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

use serde::{Deserialize, Serialize};

use super::{Activity, Point};

/// A `Point` annotated with distance, pace, grade, and normalized scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedPoint {
    /// The raw sample
    #[serde(flatten)]
    pub point: Point,
    /// Cumulative distance from the first sample in meters
    pub distance: f64,
    /// Smoothed pace in minutes per kilometer (0 when stationary)
    pub pace: f64,
    /// Smoothed grade in percent
    pub grade: f64,
    /// Instantaneous speed in meters per second
    pub speed: f64,
    /// Pace scaled into [0, 1] against the activity's percentile band
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_pace: Option<f64>,
    /// Heart rate scaled into [0, 1], absent when the sample has no heart rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_heart_rate: Option<f64>,
    /// Power scaled into [0, 1], absent when the sample has no power
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_power: Option<f64>,
}

impl ProcessedPoint {
    /// Wrap a sample at the reference origin (zero distance, pace, grade, speed)
    #[must_use]
    pub const fn origin(point: Point) -> Self {
        Self {
            point,
            distance: 0.0,
            pace: 0.0,
            grade: 0.0,
            speed: 0.0,
            normalized_pace: None,
            normalized_heart_rate: None,
            normalized_power: None,
        }
    }
}

/// Fixed-distance aggregation bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Zero-based split number
    pub index: usize,
    /// Distance marker closing this split in meters (`(index + 1) * split distance`)
    pub distance_marker: f64,
    /// Index of the first processed point in the split
    pub start_index: usize,
    /// Index of the last processed point in the split
    pub end_index: usize,
    /// Elapsed seconds between the split's first and last samples
    pub duration_seconds: f64,
    /// Mean pace across the split's samples (min/km)
    pub average_pace: f64,
    /// Sum of ascents inside the split in meters
    pub elevation_gain: f64,
    /// Mean heart rate across samples carrying one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<f64>,
}

/// What a highlight segment represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Steepest sustained climb
    SteepestClimb,
    /// Window around the peak heart rate sample
    PeakHeartRate,
}

/// Arbitrary contiguous range of processed points used for highlights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Highlight kind
    pub kind: SegmentKind,
    /// Index of the first processed point
    pub start_index: usize,
    /// Index of the last processed point (inclusive)
    pub end_index: usize,
    /// Distance covered in meters
    pub distance: f64,
    /// Elevation change from start to end in meters
    pub elevation_gain: f64,
    /// Average grade in percent
    pub grade: f64,
    /// Human-readable description
    pub description: String,
}

/// Full analysis result for one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedActivity {
    /// The canonical activity
    pub activity: Activity,
    /// Per-sample metrics, same length and order as `activity.points()`
    pub points: Vec<ProcessedPoint>,
    /// Complete fixed-distance splits
    pub splits: Vec<Split>,
    /// Split with the lowest average pace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fastest_split: Option<Split>,
    /// Steepest sustained climb
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steepest_climb: Option<Segment>,
    /// Window around the peak heart rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_heart_rate: Option<Segment>,
}
