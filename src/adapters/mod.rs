// ABOUTME: Format adapters that turn raw activity documents into the canonical Activity
// ABOUTME: One adapter per input kind (GPX route, FIT telemetry, TCX training XML)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

//! # Format Adapters
//!
//! Each adapter maps exactly one raw document to an [`Activity`]. All of them
//! emit the same schema, drop samples with unusable coordinates, and fail with
//! [`ActivityError::NoTrackData`](pacemap_core::errors::ActivityError::NoTrackData)
//! when nothing usable is left. Totals declared by the document win over
//! recomputed ones.

/// FIT binary telemetry adapter
pub mod binary_telemetry;
/// GPX route/track adapter
pub mod route;
/// TCX training-session adapter
pub mod training_xml;

use std::path::Path;

use pacemap_core::errors::ActivityResult;
use pacemap_core::models::Activity;

pub use binary_telemetry::BinaryTelemetryAdapter;
pub use route::RouteAdapter;
pub use training_xml::TrainingXmlAdapter;

/// Name used when neither the document nor the file name provides one
const UNTITLED_ACTIVITY: &str = "Untitled activity";

/// Parses one raw document into a canonical activity
pub trait ActivityAdapter {
    /// Short name of the handled format (`gpx`, `fit`, `tcx`)
    fn format(&self) -> &'static str;

    /// Parse a complete document
    ///
    /// `file_name` is only used as the fallback activity name.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is malformed, fails its integrity
    /// check, or contains no usable points
    fn parse(&self, input: &[u8], file_name: &str) -> ActivityResult<Activity>;
}

/// Activity name derived from a file name (`morning_run.gpx` -> `morning_run`)
pub(crate) fn name_from_file(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| UNTITLED_ACTIVITY.to_owned())
}

/// Trimmed non-empty text, for optional document names
pub(crate) fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}
