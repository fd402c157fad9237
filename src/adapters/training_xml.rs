// ABOUTME: TCX adapter reading the first activity's laps, tracks, and trackpoints
// ABOUTME: Uses lap totals when present and reads power/cadence from either extension location
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

use chrono::{DateTime, Utc};
use pacemap_core::constants::formats::TCX;
use pacemap_core::errors::{ActivityError, ActivityResult};
use pacemap_core::models::{Activity, ActivityBuilder, Point, SportType};
use roxmltree::{Document, Node};
use tracing::debug;

use super::{name_from_file, non_blank, ActivityAdapter};

/// Adapter for TCX training-session documents
///
/// Elements are matched by local name, so documents with or without the
/// usual Garmin namespace prefixes read the same. Only the first activity of
/// a multi-activity document is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainingXmlAdapter;

impl ActivityAdapter for TrainingXmlAdapter {
    fn format(&self) -> &'static str {
        TCX
    }

    fn parse(&self, input: &[u8], file_name: &str) -> ActivityResult<Activity> {
        let text = std::str::from_utf8(input)
            .map_err(|e| ActivityError::malformed(TCX, format!("document is not UTF-8: {e}")))?;
        let document =
            Document::parse(text).map_err(|e| ActivityError::malformed(TCX, e.to_string()))?;

        let activity = document
            .root_element()
            .descendants()
            .find(|n| is_element(n, "Activity"))
            .ok_or_else(|| ActivityError::malformed(TCX, "no Activity element"))?;

        let laps: Vec<Node<'_, '_>> = children(activity, "Lap").collect();
        let trackpoints: Vec<Node<'_, '_>> = laps
            .iter()
            .flat_map(|lap| children(*lap, "Track"))
            .flat_map(|track| children(track, "Trackpoint"))
            .collect();
        let points: Vec<Point> = trackpoints.iter().filter_map(|tp| to_point(*tp)).collect();
        let totals = LapTotals::from_laps(&laps);
        debug!(
            file_name,
            laps = laps.len(),
            trackpoints = trackpoints.len(),
            dropped = trackpoints.len() - points.len(),
            "Flattened TCX laps"
        );

        let sport_label = non_blank(activity.attribute("Sport"));
        let name = non_blank(child_text(activity, "Notes"))
            .or_else(|| sport_label.clone())
            .unwrap_or_else(|| name_from_file(file_name));
        let date = child_text(activity, "Id")
            .and_then(parse_iso)
            .or_else(|| laps.first().and_then(|lap| lap.attribute("StartTime")).and_then(parse_iso))
            .or_else(|| points.iter().find_map(|p| p.timestamp));

        ActivityBuilder::new(name, TCX)
            .date(date)
            .sport(sport_label.as_deref().map(SportType::from_label))
            .distance_meters(totals.distance_meters)
            .elapsed_seconds(totals.elapsed_seconds)
            .max_heart_rate(totals.max_heart_rate)
            .points(points)
            .build()
    }
}

/// Totals summed over every lap that declares them
#[derive(Debug, Default)]
struct LapTotals {
    distance_meters: Option<f64>,
    elapsed_seconds: Option<f64>,
    max_heart_rate: Option<u32>,
}

impl LapTotals {
    fn from_laps(laps: &[Node<'_, '_>]) -> Self {
        laps.iter().fold(Self::default(), |acc, lap| Self {
            distance_meters: add(acc.distance_meters, child_number(*lap, "DistanceMeters")),
            elapsed_seconds: add(acc.elapsed_seconds, child_number(*lap, "TotalTimeSeconds")),
            max_heart_rate: acc.max_heart_rate.max(nested_count(*lap, "MaximumHeartRateBpm")),
        })
    }
}

fn add(total: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (total, value) {
        (Some(a), Some(b)) => Some(a + b),
        (a, b) => a.or(b),
    }
}

fn to_point(trackpoint: Node<'_, '_>) -> Option<Point> {
    let position = child(trackpoint, "Position")?;
    let mut point = Point::try_new(
        child_number(position, "LatitudeDegrees")?,
        child_number(position, "LongitudeDegrees")?,
    )?;
    point.timestamp = child_text(trackpoint, "Time").and_then(parse_iso);
    point.elevation = child_number(trackpoint, "AltitudeMeters");
    point.heart_rate = nested_count(trackpoint, "HeartRateBpm");
    point.cadence = child_number(trackpoint, "Cadence")
        .and_then(to_count)
        .or_else(|| extension_count(trackpoint, "RunCadence"));
    point.power = extension_count(trackpoint, "Watts");
    Some(point)
}

/// Count stored under `Extensions`, either wrapped in a `TPX` element or directly
fn extension_count(trackpoint: Node<'_, '_>, name: &'static str) -> Option<u32> {
    let extensions = child(trackpoint, "Extensions")?;
    children(extensions, "TPX")
        .find_map(|tpx| child_number(tpx, name))
        .or_else(|| child_number(extensions, name))
        .and_then(to_count)
}

fn is_element(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |n| is_element(n, name))
}

fn child<'a, 'input: 'a>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    children(node, name).next()
}

fn child_text<'a>(node: Node<'a, '_>, name: &'static str) -> Option<&'a str> {
    child(node, name).and_then(|n| n.text()).map(str::trim)
}

fn child_number(node: Node<'_, '_>, name: &'static str) -> Option<f64> {
    child_text(node, name)
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// `<Name><Value>n</Value></Name>`, the shape used for heart-rate readings
fn nested_count(node: Node<'_, '_>, name: &'static str) -> Option<u32> {
    child(node, name)
        .and_then(|n| child_number(n, "Value"))
        .and_then(to_count)
}

fn to_count(value: f64) -> Option<u32> {
    (0.0..=f64::from(u32::MAX))
        .contains(&value)
        .then(|| value.round() as u32)
}

fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
