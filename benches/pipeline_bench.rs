// ABOUTME: Criterion benchmarks for the metrics engine, segmentation engine, and full pipeline
// ABOUTME: Uses synthetic rolling-terrain tracks of increasing length
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

//! Criterion benchmarks for activity processing.
//!
//! Measures per-point metrics, split and highlight detection, and the
//! end-to-end GPX parse-and-process path.

#![allow(clippy::missing_docs_in_private_items, clippy::panic, missing_docs)]

use std::fmt::Write as _;

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pacemap::intelligence::{
    compute_metrics, detect_splits, find_max_hr_segment, find_steepest_climb, normalize_metrics,
    AnalysisConfig,
};
use pacemap::models::{Activity, ActivityBuilder, Point};
use pacemap::pipeline::{process_activity, process_document, InputFormat};

/// Track lengths in samples (1 Hz recording: ~17 min, ~2.8 h)
const TRACK_SIZES: [usize; 2] = [1_000, 10_000];

/// Latitude step per sample, about 3 m (a 5:30 min/km pace at 1 Hz)
const LAT_STEP: f64 = 0.000_027;

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 14, 8, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Rolling terrain with a heart rate that follows the hills
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn generate_points(count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let phase = i as f64 / 120.0;
            let mut point = Point::new(45.0 + i as f64 * LAT_STEP, 6.0 + phase.sin() * 0.0005);
            point.elevation = Some(phase.sin().mul_add(40.0, 300.0));
            point.timestamp = Some(start_time() + Duration::seconds(i as i64));
            point.heart_rate = Some(phase.sin().mul_add(15.0, 150.0) as u32);
            point.cadence = Some(88);
            point.power = Some(phase.cos().mul_add(40.0, 250.0) as u32);
            point
        })
        .collect()
}

fn generate_activity(count: usize) -> Activity {
    ActivityBuilder::new(format!("bench_activity_{count}"), "gpx")
        .points(generate_points(count))
        .build()
        .unwrap_or_else(|e| panic!("synthetic activity must build: {e}"))
}

fn generate_gpx(count: usize) -> String {
    let mut doc = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><gpx version="1.1" creator="pacemap-bench"><trk><trkseg>"#,
    );
    for point in generate_points(count) {
        let _ = write!(
            doc,
            r#"<trkpt lat="{}" lon="{}"><ele>{}</ele><time>{}</time></trkpt>"#,
            point.latitude,
            point.longitude,
            point.elevation.unwrap_or_default(),
            point
                .timestamp
                .unwrap_or_default()
                .format("%Y-%m-%dT%H:%M:%SZ"),
        );
    }
    doc.push_str("</trkseg></trk></gpx>");
    doc
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");
    let config = AnalysisConfig::default();

    for size in TRACK_SIZES {
        let points = generate_points(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("compute_and_normalize", size),
            &points,
            |b, points| {
                b.iter(|| normalize_metrics(compute_metrics(black_box(points), &config), &config));
            },
        );
    }

    group.finish();
}

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");
    let config = AnalysisConfig::default();

    for size in TRACK_SIZES {
        let processed = compute_metrics(&generate_points(size), &config);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("detect_splits", size),
            &processed,
            |b, processed| b.iter(|| detect_splits(black_box(processed), config.split_distance_m)),
        );
        group.bench_with_input(
            BenchmarkId::new("find_steepest_climb", size),
            &processed,
            |b, processed| {
                b.iter(|| find_steepest_climb(black_box(processed), config.climb_min_distance_m));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("find_max_hr_segment", size),
            &processed,
            |b, processed| {
                b.iter(|| find_max_hr_segment(black_box(processed), config.peak_hr_half_width));
            },
        );
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let config = AnalysisConfig::default();

    for size in TRACK_SIZES {
        let activity = generate_activity(size);
        let document = generate_gpx(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("process_activity", size),
            &activity,
            |b, activity| b.iter(|| process_activity(black_box(activity), &config)),
        );
        group.bench_with_input(
            BenchmarkId::new("process_gpx_document", size),
            &document,
            |b, document| {
                b.iter(|| {
                    process_document(
                        InputFormat::Route,
                        black_box(document.as_bytes()),
                        "bench.gpx",
                        &config,
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_metrics, bench_segmentation, bench_pipeline);
criterion_main!(benches);
