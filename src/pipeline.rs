// ABOUTME: Orchestrator running adapters, the metrics engine, and the segmentation engine
// ABOUTME: Turns one raw document or canonical activity into a ProcessedActivity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

//! # Processing Pipeline
//!
//! ```text
//! bytes --adapter--> Activity --metrics--> ProcessedPoint[] --segmentation--> ProcessedActivity
//! ```
//!
//! Parsing is the only step that can fail. Once an [`Activity`] exists,
//! [`process_activity`] always produces a result, with highlights left empty
//! when the data cannot support them.

use pacemap_core::errors::ActivityResult;
use pacemap_core::models::{Activity, ProcessedActivity};
use pacemap_intelligence::{
    compute_metrics, detect_splits, find_fastest_split, find_max_hr_segment,
    find_steepest_climb, normalize_metrics, AnalysisConfig,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapters::{
    ActivityAdapter, BinaryTelemetryAdapter, RouteAdapter, TrainingXmlAdapter,
};

/// Input document kind, chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// GPX route/track exchange document
    Route,
    /// FIT binary telemetry container
    BinaryTelemetry,
    /// TCX training-session document
    TrainingXml,
}

impl InputFormat {
    /// Adapter handling this format
    #[must_use]
    pub fn adapter(self) -> &'static dyn ActivityAdapter {
        match self {
            Self::Route => &RouteAdapter,
            Self::BinaryTelemetry => &BinaryTelemetryAdapter,
            Self::TrainingXml => &TrainingXmlAdapter,
        }
    }
}

/// Parse one raw document with the adapter for `format`
///
/// # Errors
///
/// Returns the adapter's error: malformed input, a failed integrity check,
/// or a document without usable points
pub fn parse_activity(
    format: InputFormat,
    input: &[u8],
    file_name: &str,
) -> ActivityResult<Activity> {
    let adapter = format.adapter();
    debug!(
        format = adapter.format(),
        file_name,
        bytes = input.len(),
        "Parsing activity document"
    );
    adapter.parse(input, file_name)
}

/// Compute metrics, splits, and highlights for a canonical activity
///
/// Deterministic: the same activity and configuration always produce an
/// identical result.
#[must_use]
pub fn process_activity(activity: &Activity, config: &AnalysisConfig) -> ProcessedActivity {
    let points = normalize_metrics(compute_metrics(activity.points(), config), config);
    let splits = detect_splits(&points, config.split_distance_m);
    let fastest_split = find_fastest_split(&splits);
    let steepest_climb = find_steepest_climb(&points, config.climb_min_distance_m);
    let peak_heart_rate = find_max_hr_segment(&points, config.peak_hr_half_width);

    info!(
        activity = activity.name(),
        source = activity.source(),
        points = points.len(),
        distance_m = points.last().map_or(0.0, |p| p.distance),
        splits = splits.len(),
        fastest_split = fastest_split.as_ref().map(|s| s.index),
        has_climb = steepest_climb.is_some(),
        has_peak_hr = peak_heart_rate.is_some(),
        "Processed activity"
    );

    ProcessedActivity {
        activity: activity.clone(),
        points,
        splits,
        fastest_split,
        steepest_climb,
        peak_heart_rate,
    }
}

/// Parse a raw document and process the resulting activity
///
/// # Errors
///
/// Returns an error when parsing fails; processing itself cannot fail
pub fn process_document(
    format: InputFormat,
    input: &[u8],
    file_name: &str,
    config: &AnalysisConfig,
) -> ActivityResult<ProcessedActivity> {
    let activity = parse_activity(format, input, file_name)?;
    Ok(process_activity(&activity, config))
}
