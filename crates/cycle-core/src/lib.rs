// ABOUTME: Core types and constants for the cycle forecast engine
// ABOUTME: Foundation crate with error handling, record models, and the symptom taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cycle Core
//!
//! Foundation crate providing shared types and constants for cycle forecasting.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Physiological bounds and statistical defaults
//! - **models**: Cycle and symptom records plus the symptom tag table

/// Unified error handling system with standard error codes
pub mod errors;

/// Physiological bounds, defaults, and thresholds organized by domain
pub mod constants;

/// Core data models (`CycleRecord`, `SymptomRecord`, `SymptomType`)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
