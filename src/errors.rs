// ABOUTME: Error handling re-exports from cycle-core
// ABOUTME: Keeps crate::errors paths stable and converts service-layer errors into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! `AppError` and `ErrorCode` live in `cycle-core` so the algorithm crate can
//! return them too. Model loading has its own cloneable error type in
//! [`crate::model::ModelLoadError`] so a cached failure can be handed to every
//! waiter; it converts into `AppError` at the service boundary.

pub use cycle_core::errors::{AppError, AppResult, ErrorCode};

use crate::config::ConfigError;
use crate::model::ModelLoadError;

impl From<ModelLoadError> for AppError {
    fn from(error: ModelLoadError) -> Self {
        let code = match &error {
            ModelLoadError::MalformedArtifact(_) => ErrorCode::MalformedArtifact,
            ModelLoadError::ExternalService { .. } => ErrorCode::ExternalServiceError,
            ModelLoadError::Fetch(_) | ModelLoadError::Parse(_) => ErrorCode::ModelLoadFailure,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string()).with_source(error)
    }
}
