// ABOUTME: Configuration error types for analysis parameter validation
// ABOUTME: Defines error variants for out-of-range distances, windows, and percentile bands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

//! Configuration error types for analysis parameter validation.

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// Percentile band is not `0 <= low < high <= 1`
    #[error("Invalid percentile band: low={low}, high={high}")]
    InvalidPercentileBand {
        /// Lower percentile
        low: f64,
        /// Upper percentile
        high: f64,
    },
}
