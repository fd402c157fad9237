// ABOUTME: Segmentation engine for fixed-distance splits and highlight segments
// ABOUTME: Finds the fastest split, the steepest sustained climb, and the peak heart rate window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors
#![allow(clippy::cast_precision_loss)] // Safe: split indices are small

//! Splits and highlight segments
//!
//! All functions here operate on an already processed point sequence and
//! return empty or `None` results rather than failing on degenerate input.

use pacemap_core::models::{ProcessedPoint, Segment, SegmentKind, Split};
use tracing::debug;

use crate::statistics::mean;

/// Sum of positive elevation changes between consecutive points
fn elevation_gain(points: &[ProcessedPoint]) -> f64 {
    points
        .windows(2)
        .filter_map(|pair| pair[1].point.elevation_change_since(&pair[0].point))
        .filter(|delta| *delta > 0.0)
        .sum()
}

fn build_split(
    index: usize,
    split_distance: f64,
    start_index: usize,
    slice: &[ProcessedPoint],
) -> Split {
    let duration_seconds = match (slice.first(), slice.last()) {
        (Some(first), Some(last)) => last.point.seconds_since(&first.point).unwrap_or(0.0),
        _ => 0.0,
    };

    Split {
        index,
        distance_marker: (index + 1) as f64 * split_distance,
        start_index,
        end_index: start_index + slice.len().saturating_sub(1),
        duration_seconds,
        average_pace: mean(slice.iter().map(|p| p.pace)).unwrap_or(0.0),
        elevation_gain: elevation_gain(slice),
        average_heart_rate: mean(
            slice
                .iter()
                .filter_map(|p| p.point.heart_rate.map(f64::from)),
        ),
    }
}

/// Cut the sequence into complete splits of `split_distance` meters
///
/// A split closes at the first point where the distance accumulated since
/// the previous boundary reaches `split_distance`; that boundary point
/// belongs to both neighbouring splits. A trailing partial split is dropped.
#[must_use]
pub fn detect_splits(points: &[ProcessedPoint], split_distance: f64) -> Vec<Split> {
    if !(split_distance.is_finite() && split_distance > 0.0) {
        debug!(split_distance, "Non-positive split distance, no splits");
        return Vec::new();
    }

    let mut splits = Vec::new();
    let mut boundary = 0;
    let mut accumulated = 0.0;

    for i in 1..points.len() {
        accumulated += points[i].distance - points[i - 1].distance;
        if accumulated >= split_distance {
            splits.push(build_split(
                splits.len(),
                split_distance,
                boundary,
                &points[boundary..=i],
            ));
            boundary = i;
            accumulated = 0.0;
        }
    }

    splits
}

/// Split with the lowest average pace; the earliest wins ties
#[must_use]
pub fn find_fastest_split(splits: &[Split]) -> Option<Split> {
    splits
        .iter()
        .fold(None::<&Split>, |fastest, split| match fastest {
            Some(best) if best.average_pace <= split.average_pace => Some(best),
            _ => Some(split),
        })
        .cloned()
}

/// Steepest climb at least `min_distance` meters long
///
/// From every start index the scan only looks ahead while the distance
/// stays under `2 * min_distance`, which bounds the work per start index.
/// A candidate replaces the best only with a strictly greater grade, so
/// the earliest of equally steep climbs is kept.
#[must_use]
pub fn find_steepest_climb(points: &[ProcessedPoint], min_distance: f64) -> Option<Segment> {
    if !(min_distance.is_finite() && min_distance > 0.0) {
        return None;
    }
    let max_distance = 2.0 * min_distance;
    let mut best: Option<Segment> = None;

    for (i, start) in points.iter().enumerate() {
        let Some(start_elevation) = start.point.elevation else {
            continue;
        };

        for (j, end) in points.iter().enumerate().skip(i + 1) {
            let distance = end.distance - start.distance;
            if distance >= max_distance {
                break;
            }
            if distance < min_distance {
                continue;
            }
            let Some(end_elevation) = end.point.elevation else {
                continue;
            };
            let gain = end_elevation - start_elevation;
            if gain <= 0.0 {
                continue;
            }

            let grade = gain / distance * 100.0;
            let steeper = match &best {
                Some(b) => grade > b.grade,
                None => true,
            };
            if steeper {
                best = Some(Segment {
                    kind: SegmentKind::SteepestClimb,
                    start_index: i,
                    end_index: j,
                    distance,
                    elevation_gain: gain,
                    grade,
                    description: format!(
                        "{grade:.1}% climb gaining {gain:.0} m over {distance:.0} m"
                    ),
                });
            }
        }
    }

    best
}

/// Window of `half_width` samples either side of the peak heart rate
///
/// The first sample holding the maximum heart rate is the centre; the window
/// is clamped to the sequence bounds.
#[must_use]
pub fn find_max_hr_segment(points: &[ProcessedPoint], half_width: usize) -> Option<Segment> {
    let (peak_index, peak_hr) = points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.point.heart_rate.map(|hr| (i, hr)))
        .fold(None::<(usize, u32)>, |best, (i, hr)| match best {
            Some((_, best_hr)) if best_hr >= hr => best,
            _ => Some((i, hr)),
        })?;

    let start_index = peak_index.saturating_sub(half_width);
    let end_index = peak_index
        .saturating_add(half_width)
        .min(points.len() - 1);
    let start = &points[start_index];
    let end = &points[end_index];

    let distance = end.distance - start.distance;
    let elevation_gain = end.point.elevation_change_since(&start.point).unwrap_or(0.0);
    let grade = if distance > 0.0 {
        elevation_gain / distance * 100.0
    } else {
        0.0
    };

    Some(Segment {
        kind: SegmentKind::PeakHeartRate,
        start_index,
        end_index,
        distance,
        elevation_gain,
        grade,
        description: format!("Peak heart rate of {peak_hr} bpm"),
    })
}
