// ABOUTME: GPX adapter flattening every track segment and route into one point sequence
// ABOUTME: Keeps document order, per-point elevation and time; totals are always recomputed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

use std::borrow::Cow;
use std::ops::Range;

use chrono::{DateTime, Utc};
use gpx::{Gpx, Waypoint};
use pacemap_core::constants::formats::GPX;
use pacemap_core::errors::{ActivityError, ActivityResult};
use pacemap_core::geo::is_valid_coordinate;
use pacemap_core::models::{Activity, ActivityBuilder, Point};
use tracing::debug;

use super::{name_from_file, non_blank, ActivityAdapter};

/// Adapter for GPX route/track exchange documents
///
/// Line geometries (track segments first, then routes) are concatenated in
/// document order; nothing is reordered, merged, or interpolated across
/// disjoint lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteAdapter;

impl ActivityAdapter for RouteAdapter {
    fn format(&self) -> &'static str {
        GPX
    }

    fn parse(&self, input: &[u8], file_name: &str) -> ActivityResult<Activity> {
        let (usable, stripped) = without_unusable_waypoints(input);
        let document = gpx::read(&*usable)
            .map_err(|e| ActivityError::malformed(GPX, e.to_string()))?;

        let waypoints: Vec<&Waypoint> = line_geometries(&document).flatten().collect();
        let points: Vec<Point> = waypoints.iter().filter_map(|w| to_point(w)).collect();
        debug!(
            file_name,
            waypoints = waypoints.len(),
            dropped = waypoints.len() - points.len() + stripped,
            "Flattened GPX line geometries"
        );

        let date = document
            .metadata
            .as_ref()
            .and_then(|m| m.time.as_ref())
            .and_then(|t| t.format().ok())
            .and_then(|iso| parse_iso(&iso))
            .or_else(|| points.iter().find_map(|p| p.timestamp));

        ActivityBuilder::new(document_name(&document, file_name), GPX)
            .date(date)
            .points(points)
            .build()
    }
}

/// Elements the GPX reader turns into waypoints
const WAYPOINT_ELEMENTS: [&str; 3] = ["trkpt", "rtept", "wpt"];

/// Cut waypoint elements with a missing or off-globe position out of the text
///
/// The GPX reader fails the whole document on one such element, while a bad
/// sample only costs that sample everywhere else. Input the XML scan cannot
/// read is returned unchanged for the GPX reader to judge.
fn without_unusable_waypoints(input: &[u8]) -> (Cow<'_, [u8]>, usize) {
    let Ok(text) = std::str::from_utf8(input) else {
        return (Cow::Borrowed(input), 0);
    };
    let Ok(tree) = roxmltree::Document::parse(text) else {
        return (Cow::Borrowed(input), 0);
    };

    let unusable: Vec<Range<usize>> = tree
        .descendants()
        .filter(|n| n.is_element() && WAYPOINT_ELEMENTS.contains(&n.tag_name().name()))
        .filter(|n| !has_usable_position(n))
        .map(|n| n.range())
        .collect();
    if unusable.is_empty() {
        return (Cow::Borrowed(input), 0);
    }

    let mut kept = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in &unusable {
        // Waypoints never nest, ranges arrive disjoint and in document order
        if range.start < cursor {
            continue;
        }
        kept.push_str(&text[cursor..range.start]);
        cursor = range.end;
    }
    kept.push_str(&text[cursor..]);

    (Cow::Owned(kept.into_bytes()), unusable.len())
}

fn has_usable_position(node: &roxmltree::Node<'_, '_>) -> bool {
    let coordinate = |name: &str| node.attribute(name).and_then(|v| v.parse::<f64>().ok());
    match (coordinate("lat"), coordinate("lon")) {
        (Some(lat), Some(lon)) => is_valid_coordinate(lat, lon),
        _ => false,
    }
}

/// Every line geometry of the document in order: track segments, then routes
fn line_geometries(document: &Gpx) -> impl Iterator<Item = &[Waypoint]> {
    document
        .tracks
        .iter()
        .flat_map(|track| track.segments.iter().map(|s| s.points.as_slice()))
        .chain(document.routes.iter().map(|route| route.points.as_slice()))
}

/// Metadata name, else first named track, else first named route, else the file name
fn document_name(document: &Gpx, file_name: &str) -> String {
    non_blank(document.metadata.as_ref().and_then(|m| m.name.as_deref()))
        .or_else(|| {
            document
                .tracks
                .iter()
                .find_map(|t| non_blank(t.name.as_deref()))
        })
        .or_else(|| {
            document
                .routes
                .iter()
                .find_map(|r| non_blank(r.name.as_deref()))
        })
        .unwrap_or_else(|| name_from_file(file_name))
}

fn to_point(waypoint: &Waypoint) -> Option<Point> {
    let position = waypoint.point();
    let mut point = Point::try_new(position.y(), position.x())?;
    point.elevation = waypoint.elevation.filter(|e| e.is_finite());
    point.timestamp = waypoint
        .time
        .as_ref()
        .and_then(|t| t.format().ok())
        .and_then(|iso| parse_iso(&iso));
    Some(point)
}

fn parse_iso(iso: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(iso)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
