// ABOUTME: Intelligence module re-exports from the cycle-intelligence crate
// ABOUTME: Lets service code and callers import algorithms through one crate path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Re-exports the synchronous prediction algorithms. The async model loading
//! that feeds the network lives in [`crate::model`].

pub use cycle_intelligence::*;

// Submodules for path-based access (e.g., crate::intelligence::statistics::CycleTrend)
pub use cycle_intelligence::{
    baseline_analyzer, neural_network, signal_combiner, signals, statistics, symptom_learning,
};
