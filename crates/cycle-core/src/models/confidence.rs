// ABOUTME: Three-level confidence scale shared by statistical and symptom predictions
// ABOUTME: Serialized as lowercase strings for UI consumption
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// How much a prediction or signal should be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// Weak evidence
    Low,
    /// Moderate evidence
    Medium,
    /// Strong evidence
    High,
}
