// ABOUTME: Core data models for the pacemap activity pipeline
// ABOUTME: Re-exports Point, Activity, SportType and the processed output types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

//! # Data Models
//!
//! ## Design Principles
//!
//! - **Format Agnostic**: every adapter emits the same `Activity` schema
//! - **Explicit Absence**: optional sensor fields are `Option`, never sentinel zeros
//! - **Serializable**: all models serialize for downstream rendering and export
//!
//! ## Core Models
//!
//! - `Point`: one telemetry sample
//! - `Activity`: canonical parsed activity with totals and bounds
//! - `ProcessedActivity`: activity plus per-point metrics, splits, and highlights

mod activity;
mod point;
mod processed;
mod sport;

pub use activity::{Activity, ActivityBuilder, ActivityTotals, BoundingBox};
pub use point::{seconds_between, Point};
pub use processed::{ProcessedActivity, ProcessedPoint, Segment, SegmentKind, Split};
pub use sport::SportType;
