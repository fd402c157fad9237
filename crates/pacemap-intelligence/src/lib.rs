// ABOUTME: Activity analysis engine for the pacemap pipeline
// ABOUTME: Metrics (distance, pace, grade, normalization) and segmentation (splits, highlights)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

#![deny(unsafe_code)]

//! # Pacemap Intelligence
//!
//! Pure, deterministic analysis over a canonical point sequence. Nothing in
//! this crate keeps state between calls, so running the same input twice
//! yields identical output.

/// Analysis configuration (split distance, smoothing windows, percentile band)
pub mod config;

/// Per-point metrics and percentile normalization
pub mod metrics;

/// Fixed-distance splits and highlight segments
pub mod segmentation;

/// Percentile and trailing moving-average helpers
pub mod statistics;

pub use config::{AnalysisConfig, ConfigError};
pub use metrics::{compute_metrics, normalize_metrics};
pub use segmentation::{
    detect_splits, find_fastest_split, find_max_hr_segment, find_steepest_climb,
};
pub use statistics::{percentile, trailing_smooth};
