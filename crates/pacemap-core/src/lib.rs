// ABOUTME: Core types and constants for the pacemap activity pipeline
// ABOUTME: Foundation crate with the canonical activity model, errors, and geodesy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

#![deny(unsafe_code)]

//! # Pacemap Core
//!
//! Foundation crate providing the canonical representation every format
//! adapter produces and every analysis stage consumes. This crate is designed
//! to change infrequently, enabling incremental compilation benefits in the
//! workspace.
//!
//! ## Modules
//!
//! - **errors**: `ActivityError` taxonomy shared by all format adapters
//! - **constants**: Geodesic, unit conversion, and format name constants
//! - **geo**: Great-circle distance and fixed-point coordinate conversion
//! - **models**: `Point`, `Activity`, and the processed output types

/// Error taxonomy for document parsing
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Geodesic helpers (haversine distance, semicircle conversion)
pub mod geo;

/// Canonical and processed activity models
pub mod models;
