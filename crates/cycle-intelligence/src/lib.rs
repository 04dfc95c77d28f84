// ABOUTME: Cycle forecasting algorithms extracted from the prediction service
// ABOUTME: Statistics, network inference, symptom learning, and signal reconciliation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Cycle Intelligence
//!
//! Pure, synchronous algorithms behind the cycle forecast. Nothing in this
//! crate performs I/O: the pretrained network arrives as an already-parsed
//! artifact and every function works on an immutable snapshot of records.

/// Rule-based symptom analysis without personal history
pub mod baseline_analyzer;
/// Feature extraction and feed-forward inference
pub mod neural_network;
/// Baseline/learned signal reconciliation
pub mod signal_combiner;
/// Symptom signal types and cycle context
pub mod signals;
/// Cycle-length statistics, confidence, and trend
pub mod statistics;
/// Personal symptom-timing profile learning
pub mod symptom_learning;

pub use baseline_analyzer::BaselineSymptomAnalyzer;
pub use neural_network::{
    prepare_features, Activation, FeedForwardModel, ModelArchitecture, ModelArtifact,
    ScalerParams,
};
pub use signal_combiner::SignalCombiner;
pub use signals::{CycleContext, SignalType, SymptomSignal};
pub use statistics::{
    linear_regression, round_half_up, ConfidenceInterval, CycleStats, CycleTrend,
    RegressionResult, StatisticalEstimator,
};
pub use symptom_learning::{LearnedSymptomPattern, PersonalSymptomProfile, SymptomProfileLearner};
