// ABOUTME: Unified error type and error codes for the cycle forecast engine
// ABOUTME: Every error surfaced to callers carries a stable code plus a readable message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Most failures inside the engine are recovered locally by falling back to a
//! lower prediction tier. The errors defined here are the ones that cross a
//! crate boundary: malformed records handed in by the storage collaborator,
//! malformed model artifacts, and configuration problems.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller-supplied data is malformed
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Too few records for the requested computation
    #[serde(rename = "INSUFFICIENT_DATA")]
    InsufficientData = 3001,

    // Model artifacts (4000-4999)
    /// Model or scaler could not be fetched or parsed
    #[serde(rename = "MODEL_LOAD_FAILURE")]
    ModelLoadFailure = 4000,
    /// Declared architecture disagrees with the weight and bias arrays
    #[serde(rename = "MALFORMED_ARTIFACT")]
    MalformedArtifact = 4001,

    // External services (5000-5999)
    /// The artifact host returned an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,

    // Configuration (6000-6999)
    /// Configuration is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InsufficientData => "Not enough data for this computation",
            Self::ModelLoadFailure => "The prediction model could not be loaded",
            Self::MalformedArtifact => "The prediction model artifact is malformed",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Insufficient data
    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientData, message)
    }

    /// Malformed model artifact
    pub fn malformed_artifact(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedArtifact, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::invalid_input("cycle c-3 ends before it starts");
        let rendered = error.to_string();

        assert!(rendered.starts_with("The provided input is invalid"));
        assert!(rendered.contains("c-3"));
    }

    #[test]
    fn test_error_code_serializes_screaming_case() {
        let json = serde_json::to_string(&ErrorCode::MalformedArtifact).unwrap();
        assert_eq!(json, "\"MALFORMED_ARTIFACT\"");
    }

    #[test]
    fn test_serde_json_error_converts() {
        let parse_error = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let error = AppError::from(parse_error);

        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(Error::source(&error).is_some());
    }
}
