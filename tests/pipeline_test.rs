// ABOUTME: End-to-end tests for the processing orchestrator
// ABOUTME: Parses GPX/TCX fixtures and checks metrics, splits, highlights, and determinism
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{gpx_track, northbound, tcx_activity, tcx_document, tcx_lap};
use pacemap::errors::ActivityError;
use pacemap::intelligence::AnalysisConfig;
use pacemap::models::{ActivityBuilder, Point, SegmentKind};
use pacemap::pipeline::{parse_activity, process_activity, process_document, InputFormat};

/// 26 samples (~2.5 km) climbing 2 m per sample
fn ramp_gpx() -> String {
    gpx_track(Some("Ramp"), &northbound(26, |i| 100.0 + i as f64 * 2.0))
}

fn ramp_tcx() -> String {
    let samples = northbound(26, |i| 100.0 + i as f64 * 2.0);
    tcx_document(&tcx_activity("Running", &tcx_lap(&samples, None, None)))
}

#[test]
fn test_processed_points_match_activity_points() {
    let processed = process_document(
        InputFormat::Route,
        ramp_gpx().as_bytes(),
        "ramp.gpx",
        &AnalysisConfig::default(),
    )
    .unwrap();

    assert_eq!(processed.points.len(), processed.activity.points().len());
    for (processed_point, point) in processed.points.iter().zip(processed.activity.points()) {
        assert_eq!(&processed_point.point, point);
    }

    let origin = &processed.points[0];
    assert_eq!(origin.distance, 0.0);
    assert_eq!(origin.pace, 0.0);
    assert_eq!(origin.grade, 0.0);
    assert_eq!(origin.speed, 0.0);

    assert!(processed
        .points
        .windows(2)
        .all(|pair| pair[1].distance >= pair[0].distance));
    assert!(processed.points.iter().all(|p| {
        p.normalized_pace
            .is_some_and(|n| (0.0..=1.0).contains(&n))
    }));
}

#[test]
fn test_splits_and_climb_on_ramp() {
    let processed = process_document(
        InputFormat::Route,
        ramp_gpx().as_bytes(),
        "ramp.gpx",
        &AnalysisConfig::default(),
    )
    .unwrap();

    assert_eq!(processed.splits.len(), 2);
    assert_eq!(processed.splits[0].distance_marker, 1000.0);
    assert_eq!(processed.splits[1].distance_marker, 2000.0);
    assert_eq!(processed.splits[0].end_index, processed.splits[1].start_index);
    assert!(processed.splits.iter().all(|s| s.duration_seconds > 0.0));
    assert!(processed.fastest_split.is_some());

    let climb = processed.steepest_climb.unwrap();
    assert_eq!(climb.kind, SegmentKind::SteepestClimb);
    assert!(climb.elevation_gain > 0.0);
    assert!(climb.distance >= 100.0);
    assert!((climb.grade - 2.0).abs() < 0.05);

    // GPX has no heart rate channel
    assert!(processed.peak_heart_rate.is_none());
}

#[test]
fn test_config_changes_split_distance() {
    let config = AnalysisConfig {
        split_distance_m: 500.0,
        ..AnalysisConfig::default()
    };
    let processed =
        process_document(InputFormat::Route, ramp_gpx().as_bytes(), "ramp.gpx", &config).unwrap();

    assert_eq!(processed.splits.len(), 5);
    assert_eq!(processed.splits[4].distance_marker, 2500.0);
}

#[test]
fn test_peak_heart_rate_from_training_xml() {
    let processed = process_document(
        InputFormat::TrainingXml,
        ramp_tcx().as_bytes(),
        "ramp.tcx",
        &AnalysisConfig::default(),
    )
    .unwrap();

    // Heart rate cycles 130..=149; the first 149 is sample 19
    let peak = processed.peak_heart_rate.unwrap();
    assert_eq!(peak.kind, SegmentKind::PeakHeartRate);
    assert_eq!((peak.start_index, peak.end_index), (0, 25));
    assert!(peak.description.contains("149"));

    assert!(processed
        .points
        .iter()
        .all(|p| p.normalized_heart_rate.is_some()));
    assert!(processed.points.iter().all(|p| p.normalized_power.is_none()));
    assert!(processed
        .splits
        .iter()
        .all(|s| s.average_heart_rate.is_some()));
}

#[test]
fn test_processing_is_deterministic() {
    let config = AnalysisConfig::default();
    let activity = parse_activity(InputFormat::TrainingXml, ramp_tcx().as_bytes(), "ramp.tcx")
        .unwrap();

    let first = process_activity(&activity, &config);
    let second = process_activity(&activity, &config);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_single_point_activity_has_no_highlights() {
    let mut point = Point::new(46.5, 7.9);
    point.elevation = Some(1200.0);
    point.heart_rate = Some(101);
    let activity = ActivityBuilder::new("Summit photo", "gpx")
        .points(vec![point])
        .build()
        .unwrap();

    let processed = process_activity(&activity, &AnalysisConfig::default());

    assert_eq!(processed.points.len(), 1);
    assert!(processed.splits.is_empty());
    assert!(processed.fastest_split.is_none());
    assert!(processed.steepest_climb.is_none());

    let peak = processed.peak_heart_rate.unwrap();
    assert_eq!((peak.start_index, peak.end_index), (0, 0));
}

#[test]
fn test_parse_errors_propagate() {
    let err = process_document(
        InputFormat::BinaryTelemetry,
        b"not a fit file",
        "broken.fit",
        &AnalysisConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ActivityError::Integrity(_)));

    let err = process_document(
        InputFormat::Route,
        b"<gpx",
        "broken.gpx",
        &AnalysisConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ActivityError::Malformed { .. }));
}

#[test]
fn test_input_format_dispatch() {
    assert_eq!(InputFormat::Route.adapter().format(), "gpx");
    assert_eq!(InputFormat::BinaryTelemetry.adapter().format(), "fit");
    assert_eq!(InputFormat::TrainingXml.adapter().format(), "tcx");

    assert_eq!(
        serde_json::to_string(&InputFormat::BinaryTelemetry).unwrap(),
        "\"binary_telemetry\""
    );
    let format: InputFormat = serde_json::from_str("\"training_xml\"").unwrap();
    assert_eq!(format, InputFormat::TrainingXml);
}

#[test]
fn test_processed_activity_serializes_without_empty_highlights() {
    let samples = northbound(3, |_| 0.0);
    let activity =
        parse_activity(InputFormat::Route, gpx_track(None, &samples).as_bytes(), "flat.gpx")
            .unwrap();
    let processed = process_activity(&activity, &AnalysisConfig::default());

    let json = serde_json::to_value(&processed).unwrap();
    assert!(json.get("steepest_climb").is_none());
    assert!(json.get("peak_heart_rate").is_none());
    assert!(json.get("fastest_split").is_none());
    assert_eq!(json["points"].as_array().unwrap().len(), 3);
}
