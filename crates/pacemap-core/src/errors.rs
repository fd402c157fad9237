// ABOUTME: Error types raised while turning raw documents into canonical activities
// ABOUTME: Distinguishes empty tracks, failed integrity checks, and structural parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

//! # Activity Error Types
//!
//! Every parse failure is terminal for its input: adapters never return a
//! partially populated activity. The analysis stages downstream of the
//! adapters are infallible and therefore never produce these errors.

use thiserror::Error;

/// Errors produced by format adapters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    /// The document parsed structurally but yielded zero usable points
    #[error("{format} document contains no usable track points")]
    NoTrackData {
        /// Short name of the source format (`gpx`, `fit`, `tcx`)
        format: String,
    },

    /// The binary container failed its embedded header or checksum check
    #[error("integrity check failed: {0}")]
    Integrity(String),

    /// The document could not be parsed at all
    #[error("malformed {format} document: {reason}")]
    Malformed {
        /// Short name of the source format
        format: String,
        /// Parser-reported reason
        reason: String,
    },
}

impl ActivityError {
    /// Create a "no track data" error
    #[must_use]
    pub fn no_track_data(format: impl Into<String>) -> Self {
        Self::NoTrackData {
            format: format.into(),
        }
    }

    /// Create an integrity error
    #[must_use]
    pub fn integrity(reason: impl Into<String>) -> Self {
        Self::Integrity(reason.into())
    }

    /// Create a "malformed document" error
    #[must_use]
    pub fn malformed(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            format: format.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used by the format adapters
pub type ActivityResult<T> = Result<T, ActivityError>;
