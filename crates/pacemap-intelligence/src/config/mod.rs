// ABOUTME: Configuration module for pacemap-intelligence crate
// ABOUTME: Re-exports analysis configuration and validation error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

/// Caller-tunable analysis parameters
pub mod analysis;

/// Configuration validation errors
pub mod error;

pub use analysis::AnalysisConfig;
pub use error::ConfigError;
