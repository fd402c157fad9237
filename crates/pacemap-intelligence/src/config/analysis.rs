// ABOUTME: Analysis configuration for split, climb, heart rate, smoothing, and normalization
// ABOUTME: Environment-only overrides with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

//! Analysis Configuration
//!
//! Every parameter has a default matching common running-app conventions
//! (1 km splits, 100 m minimum climbs, 5th-95th percentile band). Overrides
//! come only from environment variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ConfigError;

/// Environment variable names for analysis overrides
pub mod env_keys {
    /// Split distance in meters
    pub const SPLIT_DISTANCE: &str = "PACEMAP_SPLIT_DISTANCE_M";
    /// Minimum steepest-climb distance in meters
    pub const CLIMB_MIN_DISTANCE: &str = "PACEMAP_CLIMB_MIN_DISTANCE_M";
    /// Peak heart rate half-width in samples
    pub const PEAK_HR_HALF_WIDTH: &str = "PACEMAP_PEAK_HR_HALF_WIDTH";
    /// Pace smoothing window in samples
    pub const PACE_SMOOTHING_WINDOW: &str = "PACEMAP_PACE_SMOOTHING_WINDOW";
    /// Grade smoothing window in samples
    pub const GRADE_SMOOTHING_WINDOW: &str = "PACEMAP_GRADE_SMOOTHING_WINDOW";
    /// Lower normalization percentile
    pub const PERCENTILE_LOW: &str = "PACEMAP_PERCENTILE_LOW";
    /// Upper normalization percentile
    pub const PERCENTILE_HIGH: &str = "PACEMAP_PERCENTILE_HIGH";
}

/// Caller-tunable analysis parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Distance covered by one split in meters
    pub split_distance_m: f64,
    /// Minimum steepest-climb length in meters (search window is twice this)
    pub climb_min_distance_m: f64,
    /// Samples on each side of the peak heart rate sample
    pub peak_hr_half_width: usize,
    /// Pace smoothing window in samples
    pub pace_smoothing_window: usize,
    /// Grade smoothing window in samples
    pub grade_smoothing_window: usize,
    /// Lower normalization percentile (0-1)
    pub percentile_low: f64,
    /// Upper normalization percentile (0-1)
    pub percentile_high: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            split_distance_m: 1000.0,
            climb_min_distance_m: 100.0,
            peak_hr_half_width: 30,
            pace_smoothing_window: 10,
            grade_smoothing_window: 5,
            percentile_low: 0.05,
            percentile_high: 0.95,
        }
    }
}

impl AnalysisConfig {
    /// Load analysis configuration from environment, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            split_distance_m: env_parse_or(env_keys::SPLIT_DISTANCE, defaults.split_distance_m),
            climb_min_distance_m: env_parse_or(
                env_keys::CLIMB_MIN_DISTANCE,
                defaults.climb_min_distance_m,
            ),
            peak_hr_half_width: env_parse_or(
                env_keys::PEAK_HR_HALF_WIDTH,
                defaults.peak_hr_half_width,
            ),
            pace_smoothing_window: env_parse_or(
                env_keys::PACE_SMOOTHING_WINDOW,
                defaults.pace_smoothing_window,
            ),
            grade_smoothing_window: env_parse_or(
                env_keys::GRADE_SMOOTHING_WINDOW,
                defaults.grade_smoothing_window,
            ),
            percentile_low: env_parse_or(env_keys::PERCENTILE_LOW, defaults.percentile_low),
            percentile_high: env_parse_or(env_keys::PERCENTILE_HIGH, defaults.percentile_high),
        }
    }

    /// Validate parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a distance is not positive or the
    /// percentile band is not `0 <= low < high <= 1`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.split_distance_m.is_finite() && self.split_distance_m > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "split_distance_m must be positive",
            ));
        }
        if !(self.climb_min_distance_m.is_finite() && self.climb_min_distance_m > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "climb_min_distance_m must be positive",
            ));
        }
        let band_ok = (0.0..=1.0).contains(&self.percentile_low)
            && (0.0..=1.0).contains(&self.percentile_high)
            && self.percentile_low < self.percentile_high;
        if !band_ok {
            return Err(ConfigError::InvalidPercentileBand {
                low: self.percentile_low,
                high: self.percentile_high,
            });
        }
        Ok(())
    }
}

fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!(
                key,
                value = %raw,
                error = %e,
                default = %default,
                "Invalid analysis setting, using default"
            );
            default
        }),
        Err(_) => default,
    }
}
