// ABOUTME: Model artifact loading: where artifacts come from and how the loaded model is cached
// ABOUTME: Defines the cloneable load error shared by every waiter on a failed fetch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Model Loading
//!
//! The pretrained network arrives as two JSON documents, `model.json` and
//! `scaler.json`, from an [`ArtifactSource`]. [`ModelStore`] fetches them at
//! most once, shares a single in-flight fetch between concurrent callers, and
//! caches either the validated model or the failure.

/// Artifact sources over HTTP and the filesystem
pub mod source;
/// Lazily loaded, explicitly owned model cache
pub mod store;

pub use source::{source_from_config, ArtifactSource, FileArtifactSource, HttpArtifactSource};
pub use store::{ModelState, ModelStore};

use thiserror::Error;

/// File name of the network document
pub const MODEL_FILE: &str = "model.json";

/// File name of the scaler document
pub const SCALER_FILE: &str = "scaler.json";

/// Why the model could not be loaded
///
/// Cloneable so one cached failure can be returned to every caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelLoadError {
    /// Transport or filesystem failure while fetching an artifact
    #[error("Failed to fetch model artifact: {0}")]
    Fetch(String),

    /// Artifact body is not the expected JSON document
    #[error("Failed to parse model artifact: {0}")]
    Parse(String),

    /// Declared architecture disagrees with the weights, biases, or scaler
    #[error("Malformed model artifact: {0}")]
    MalformedArtifact(String),

    /// Artifact host answered with a non-success status
    #[error("Artifact host returned status {status} for {url}")]
    ExternalService {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },
}
