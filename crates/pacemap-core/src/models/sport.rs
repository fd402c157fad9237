// ABOUTME: Sport type enumeration for parsed activities
// ABOUTME: Maps the sport labels found in binary and XML documents to a small closed set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

use serde::{Deserialize, Serialize};

/// Sport/activity type declared by the source document
///
/// The `Other` variant keeps labels that don't map to a standard category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SportType {
    /// Running activity
    Run,
    /// Cycling/biking activity
    Ride,
    /// Swimming activity
    Swim,
    /// Walking activity
    Walk,
    /// Hiking activity
    Hike,
    /// Other activity type not covered by standard categories
    Other(String),
}

impl SportType {
    /// Create `SportType` from a source document label
    ///
    /// Accepts binary telemetry enum names (`running`, `cycling`) as well as
    /// training document attributes (`Running`, `Biking`), case-insensitively.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "run" | "running" | "trail_running" | "treadmill_running" => Self::Run,
            "ride" | "cycling" | "biking" | "bike" | "e_biking" => Self::Ride,
            "swim" | "swimming" | "open_water" => Self::Swim,
            "walk" | "walking" => Self::Walk,
            "hike" | "hiking" => Self::Hike,
            _ => Self::Other(label.trim().to_owned()),
        }
    }

    /// Human-readable name used when a document carries no activity name
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Run => "Running",
            Self::Ride => "Cycling",
            Self::Swim => "Swimming",
            Self::Walk => "Walking",
            Self::Hike => "Hiking",
            Self::Other(name) => name,
        }
    }
}
