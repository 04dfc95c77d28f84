// ABOUTME: Symptom signal types shared by the baseline analyzer, learner, and combiner
// ABOUTME: Defines signal kinds, their fixed priorities, and the cycle context they read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Duration, NaiveDate};
use cycle_core::constants::{bounds::MAX_DAYS_ADJUSTMENT, defaults};
use cycle_core::models::{ConfidenceLevel, SymptomType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a symptom signal indicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    /// Fertility signs are present now
    FertileWindow,
    /// Period onset looks close
    PeriodImminent,
    /// Symptoms match a learned pre-menstrual pattern
    PmsPatternMatch,
    /// Symptoms match a learned ovulation pattern
    OvulationPatternMatch,
}

impl SignalType {
    /// Resolution priority when two different signals compete (higher wins)
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::FertileWindow => 4,
            Self::PeriodImminent => 3,
            Self::OvulationPatternMatch => 2,
            Self::PmsPatternMatch => 1,
        }
    }
}

/// A symptom-based inference about the current cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomSignal {
    /// What the signal indicates
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    /// How much to trust it
    pub confidence: ConfidenceLevel,
    /// Shift to apply to the predicted next period start, within [-5, 5]
    pub days_adjustment: i64,
    /// Symptoms that produced the signal
    pub relevant_symptoms: BTreeSet<SymptomType>,
    /// Human-readable explanation
    pub message: String,
    /// Cycles of personal history behind the signal (0 = general knowledge only)
    pub based_on_cycles: usize,
}

impl SymptomSignal {
    /// Build a signal, clamping the adjustment to the accepted range
    pub fn new(
        signal_type: SignalType,
        confidence: ConfidenceLevel,
        days_adjustment: i64,
        relevant_symptoms: impl IntoIterator<Item = SymptomType>,
        message: impl Into<String>,
        based_on_cycles: usize,
    ) -> Self {
        Self {
            signal_type,
            confidence,
            days_adjustment: clamp_adjustment(days_adjustment),
            relevant_symptoms: relevant_symptoms.into_iter().collect(),
            message: message.into(),
            based_on_cycles,
        }
    }
}

/// Clamp a day shift into [-5, 5]
#[must_use]
pub const fn clamp_adjustment(days: i64) -> i64 {
    if days > MAX_DAYS_ADJUSTMENT {
        MAX_DAYS_ADJUSTMENT
    } else if days < -MAX_DAYS_ADJUSTMENT {
        -MAX_DAYS_ADJUSTMENT
    } else {
        days
    }
}

/// Where the user is in the current cycle, as seen by the symptom analyzers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleContext {
    /// Date the analysis runs for
    pub today: NaiveDate,
    /// 1-based day of the current cycle
    pub current_cycle_day: i64,
    /// Average cycle length used for phase checks
    pub average_cycle_length: i64,
    /// Days from `today` until the predicted next period start
    pub days_until_period: i64,
    /// Predicted next period start before any symptom adjustment
    pub predicted_period_start: NaiveDate,
}

impl CycleContext {
    /// Context used when no cycle has ever been logged
    #[must_use]
    pub fn without_history(today: NaiveDate) -> Self {
        let days_until_period = defaults::CYCLE_LENGTH - defaults::CYCLE_DAY;
        Self {
            today,
            current_cycle_day: defaults::CYCLE_DAY,
            average_cycle_length: defaults::CYCLE_LENGTH,
            days_until_period,
            predicted_period_start: today
                .checked_add_signed(Duration::days(days_until_period))
                .unwrap_or(NaiveDate::MAX),
        }
    }
}
