// ABOUTME: Shared fixture builders for integration tests
// ABOUTME: Produces small GPX and TCX documents along a straight northbound line
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `pacemap`
//!
//! Tracks run north along the prime meridian. A latitude step of 0.0009
//! degrees is roughly 100.07 m, so 26 samples cover just over 2.5 km.

use std::fmt::Write as _;

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Latitude step between consecutive samples, about 100 m
pub const LAT_STEP: f64 = 0.0009;

/// Seconds between consecutive samples
pub const SAMPLE_SECONDS: i64 = 30;

/// One synthetic sample
#[derive(Debug, Clone)]
pub struct Sample {
    pub lat: f64,
    pub lon: f64,
    pub elevation: Option<f64>,
    pub time: Option<DateTime<Utc>>,
    pub heart_rate: Option<u32>,
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 14, 8, 0, 0).unwrap()
}

/// `count` samples heading north, with elevation from `profile(index)`
pub fn northbound(count: usize, profile: impl Fn(usize) -> f64) -> Vec<Sample> {
    (0..count)
        .map(|i| Sample {
            lat: i as f64 * LAT_STEP,
            lon: 0.0,
            elevation: Some(profile(i)),
            time: Some(start_time() + Duration::seconds(i as i64 * SAMPLE_SECONDS)),
            heart_rate: Some(130 + (i as u32 % 20)),
        })
        .collect()
}

fn iso(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// `<trkpt>` or `<rtept>` elements for the samples
pub fn gpx_points(tag: &str, samples: &[Sample]) -> String {
    let mut out = String::new();
    for s in samples {
        write!(out, r#"<{tag} lat="{}" lon="{}">"#, s.lat, s.lon).unwrap();
        if let Some(ele) = s.elevation {
            write!(out, "<ele>{ele}</ele>").unwrap();
        }
        if let Some(time) = s.time {
            write!(out, "<time>{}</time>", iso(time)).unwrap();
        }
        write!(out, "</{tag}>").unwrap();
    }
    out
}

/// GPX 1.1 document wrapping the given body (tracks, routes)
pub fn gpx_document(metadata_name: Option<&str>, body: &str) -> String {
    let metadata = metadata_name
        .map(|name| format!("<metadata><name>{name}</name></metadata>"))
        .unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="pacemap-tests" xmlns="http://www.topografix.com/GPX/1/1">{metadata}{body}</gpx>"#
    )
}

/// Single-track, single-segment GPX document
pub fn gpx_track(name: Option<&str>, samples: &[Sample]) -> String {
    let name = name.map(|n| format!("<name>{n}</name>")).unwrap_or_default();
    gpx_document(
        None,
        &format!("<trk>{name}<trkseg>{}</trkseg></trk>", gpx_points("trkpt", samples)),
    )
}

/// `<Trackpoint>` element; power goes under `Extensions/TPX/Watts`
pub fn tcx_trackpoint(sample: &Sample, power: Option<u32>) -> String {
    let mut out = String::from("<Trackpoint>");
    if let Some(time) = sample.time {
        write!(out, "<Time>{}</Time>", iso(time)).unwrap();
    }
    write!(
        out,
        "<Position><LatitudeDegrees>{}</LatitudeDegrees><LongitudeDegrees>{}</LongitudeDegrees></Position>",
        sample.lat, sample.lon
    )
    .unwrap();
    if let Some(ele) = sample.elevation {
        write!(out, "<AltitudeMeters>{ele}</AltitudeMeters>").unwrap();
    }
    if let Some(hr) = sample.heart_rate {
        write!(out, "<HeartRateBpm><Value>{hr}</Value></HeartRateBpm>").unwrap();
    }
    if let Some(watts) = power {
        write!(
            out,
            "<Extensions><ns3:TPX><ns3:Watts>{watts}</ns3:Watts></ns3:TPX></Extensions>"
        )
        .unwrap();
    }
    out.push_str("</Trackpoint>");
    out
}

/// `<Lap>` element with optional declared totals
pub fn tcx_lap(
    samples: &[Sample],
    total_seconds: Option<f64>,
    distance_meters: Option<f64>,
) -> String {
    let mut out = format!(r#"<Lap StartTime="{}">"#, iso(start_time()));
    if let Some(seconds) = total_seconds {
        write!(out, "<TotalTimeSeconds>{seconds}</TotalTimeSeconds>").unwrap();
    }
    if let Some(meters) = distance_meters {
        write!(out, "<DistanceMeters>{meters}</DistanceMeters>").unwrap();
    }
    out.push_str("<Track>");
    for s in samples {
        out.push_str(&tcx_trackpoint(s, None));
    }
    out.push_str("</Track></Lap>");
    out
}

/// `<Activity>` element with an `Id` of [`start_time`]
pub fn tcx_activity(sport: &str, laps: &str) -> String {
    format!(
        r#"<Activity Sport="{sport}"><Id>{}</Id>{laps}</Activity>"#,
        iso(start_time())
    )
}

/// TCX document wrapping the given activities
pub fn tcx_document(activities: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2" xmlns:ns3="http://www.garmin.com/xmlschemas/ActivityExtension/v2"><Activities>{activities}</Activities></TrainingCenterDatabase>"#
    )
}
