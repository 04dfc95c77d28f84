// ABOUTME: Main library entry point for the cycle forecast engine
// ABOUTME: Wires model loading, neural and statistical prediction, and symptom signals together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cycle Forecast
//!
//! Predicts the next period onset, its expected end, the ovulation date, and
//! the fertile window from a personal history of cycle start/end dates and
//! optional symptom logs.
//!
//! ## Architecture
//!
//! - **`cycle-core`**: record types, symptom taxonomy, errors, constants
//! - **`cycle-intelligence`**: synchronous algorithms (statistics, network
//!   math, symptom learning, baseline rules, signal combination)
//! - **this crate**: lazy model artifact loading, the async `NeuralPredictor`,
//!   the `PredictionOrchestrator`, configuration, and logging
//!
//! Predictions fall back through three tiers (ml, statistical, default) so a
//! caller always receives the best available estimate.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use cycle_forecast::config::PredictionConfig;
//! use cycle_forecast::errors::AppResult;
//! use cycle_forecast::model::{FileArtifactSource, ModelStore};
//! use cycle_forecast::prediction::PredictionOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = PredictionConfig::default();
//!     let store = Arc::new(ModelStore::new(Arc::new(FileArtifactSource::new("./model"))));
//!     let orchestrator = PredictionOrchestrator::new(store, &config);
//!
//!     let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap_or_default();
//!     if let Some(prediction) = orchestrator.predict(&[], &[], today).await? {
//!         println!("next period: {}", prediction.next_period_start);
//!     }
//!     Ok(())
//! }
//! ```

/// Environment-driven prediction configuration
pub mod config;

/// Unified error handling
pub mod errors;

/// Re-exported prediction algorithms
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Model artifact sources and the lazily loaded model cache
pub mod model;

/// Neural predictor and the prediction orchestrator
pub mod prediction;

/// Re-exported record types and symptom taxonomy
pub mod models {
    pub use cycle_core::models::*;
}
