// ABOUTME: Prediction layer combining the async neural tier with the synchronous algorithms
// ABOUTME: Exposes the orchestrator, its output types, and the neural predictor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Network-backed cycle-length prediction
pub mod neural_predictor;
/// Tier selection, date derivation, and symptom adjustment
pub mod orchestrator;

pub use neural_predictor::NeuralPredictor;
pub use orchestrator::{
    CycleDayInfo, CyclePhase, ExtendedPrediction, PredictionOrchestrator, PredictionSource,
};
