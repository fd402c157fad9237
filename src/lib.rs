// ABOUTME: Main library entry point for the pacemap activity ingestion and analysis pipeline
// ABOUTME: Format adapters (GPX, FIT, TCX), the processing orchestrator, and logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

#![deny(unsafe_code)]

//! # Pacemap
//!
//! Turns raw GPS activity documents into a canonical [`Activity`](models::Activity)
//! and then into a [`ProcessedActivity`](models::ProcessedActivity) with
//! per-point pace, grade, and speed, fixed-distance splits, and highlights
//! (fastest split, steepest climb, peak heart rate).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pacemap::intelligence::AnalysisConfig;
//! use pacemap::pipeline::{process_document, InputFormat};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("morning_run.gpx")?;
//! let processed = process_document(
//!     InputFormat::Route,
//!     &bytes,
//!     "morning_run.gpx",
//!     &AnalysisConfig::from_env(),
//! )?;
//! println!("{} splits", processed.splits.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Core** (`pacemap-core`): canonical model, errors, geodesy
//! - **Intelligence** (`pacemap-intelligence`): metrics and segmentation engines
//! - **Adapters**: one per input format, all producing the same schema
//! - **Pipeline**: format dispatch and end-to-end processing

/// Format adapters producing the canonical activity
pub mod adapters;

/// Logging configuration and subscriber setup
pub mod logging;

/// End-to-end processing orchestrator
pub mod pipeline;

// Re-export foundation modules so callers depend on a single crate
pub use pacemap_core::{constants, errors, geo, models};
pub use pacemap_intelligence as intelligence;
