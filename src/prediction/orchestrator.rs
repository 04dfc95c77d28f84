// ABOUTME: Prediction orchestrator selecting the neural, statistical, or default tier
// ABOUTME: Derives period, ovulation, and fertile dates and applies symptom adjustments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Duration, NaiveDate};
use cycle_core::constants::{defaults, luteal, neural};
use cycle_core::models::{CycleRecord, SymptomRecord};
use cycle_core::{AppError, AppResult};
use cycle_intelligence::{
    BaselineSymptomAnalyzer, ConfidenceInterval, CycleContext, CycleStats, CycleTrend,
    SignalCombiner, StatisticalEstimator, SymptomProfileLearner, SymptomSignal,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use super::NeuralPredictor;
use crate::config::PredictionConfig;
use crate::model::ModelStore;

/// Minimum valid deltas for a statistical estimate
const MIN_STATISTICAL_DELTAS: usize = 2;

/// Cycles of history the learned profile needs before it is consulted
const MIN_LEARNED_CYCLES: usize = 2;

/// Which tier produced the cycle length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    /// Pretrained network
    Ml,
    /// Weighted statistical average
    Statistical,
    /// Population default of 28 days
    Default,
}

/// Full forecast for the next cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedPrediction {
    /// First day of the next period
    pub next_period_start: NaiveDate,
    /// Last day of the next period
    pub next_period_end: NaiveDate,
    /// First fertile day
    pub fertile_window_start: NaiveDate,
    /// Last fertile day
    pub fertile_window_end: NaiveDate,
    /// Estimated ovulation day
    pub ovulation_date: NaiveDate,
    /// Uncertainty around `next_period_start`
    pub confidence: ConfidenceInterval,
    /// Cycle-length drift
    pub trend: CycleTrend,
    /// Tier that produced the cycle length
    pub source: PredictionSource,
    /// Luteal phase length used for ovulation
    pub estimated_luteal_phase: i64,
    /// Symptom signal that informed the prediction, if any
    pub symptom_signal: Option<SymptomSignal>,
}

/// Phase of the menstrual cycle on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    /// Within the average period length
    Menstrual,
    /// Between the period and the fertile window
    Follicular,
    /// Within the fertile window
    Ovulatory,
    /// After the fertile window
    Luteal,
}

/// Cycle day and phase for a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleDayInfo {
    /// 1-based day counted from the most recent start on or before the date
    pub cycle_day: i64,
    /// Phase on that day
    pub phase: CyclePhase,
}

/// Combines statistics, the network, and symptom signals into one forecast
#[derive(Debug, Clone)]
pub struct PredictionOrchestrator {
    estimator: StatisticalEstimator,
    baseline: BaselineSymptomAnalyzer,
    learner: SymptomProfileLearner,
    anchor_fertile_window: bool,
    neural: Option<NeuralPredictor>,
}

impl PredictionOrchestrator {
    /// Create an orchestrator consulting the network held by `store`
    #[must_use]
    pub fn new(store: Arc<ModelStore>, config: &PredictionConfig) -> Self {
        Self {
            neural: Some(NeuralPredictor::new(store, config.estimator())),
            ..Self::statistical_only(config)
        }
    }

    /// Create an orchestrator with no model; the neural tier always falls back
    #[must_use]
    pub fn statistical_only(config: &PredictionConfig) -> Self {
        Self {
            estimator: config.estimator(),
            baseline: config.baseline_analyzer(),
            learner: config.symptom_learner(),
            anchor_fertile_window: config.anchor_fertile_window_to_unadjusted_start,
            neural: None,
        }
    }

    /// Forecast the next cycle as of `today`
    ///
    /// Returns `Ok(None)` when no cycle has been logged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a cycle ends before it starts or a derived
    /// date falls outside the calendar range
    pub async fn predict(
        &self,
        cycles: &[CycleRecord],
        symptoms: &[SymptomRecord],
        today: NaiveDate,
    ) -> AppResult<Option<ExtendedPrediction>> {
        if let Some(bad) = cycles.iter().find(|cycle| cycle.ends_before_start()) {
            return Err(AppError::invalid_input(format!(
                "Cycle {} ends before it starts",
                bad.id
            )));
        }
        let Some(last_start) = cycles.iter().map(|cycle| cycle.start_date).max() else {
            return Ok(None);
        };

        let symptoms = Self::valid_symptoms(symptoms);
        let (cycle_length, source) = self.select_cycle_length(cycles).await;

        let next_start = shift_date(last_start, cycle_length)?;
        let period_length = self.estimator.average_period_length(cycles);
        let luteal_phase = self.estimator.estimate_luteal_phase(cycles);

        let context = CycleContext {
            today,
            current_cycle_day: (today - last_start).num_days() + 1,
            average_cycle_length: self.estimator.average_cycle_length(cycles),
            days_until_period: (next_start - today).num_days(),
            predicted_period_start: next_start,
        };
        let symptom_signal = self.symptom_signal(cycles, &symptoms, &context);
        let adjustment = symptom_signal
            .as_ref()
            .map_or(0, |signal| signal.days_adjustment);

        let adjusted_start = shift_date(next_start, adjustment)?;
        let ovulation_anchor = if self.anchor_fertile_window {
            next_start
        } else {
            adjusted_start
        };
        let ovulation_date = shift_date(ovulation_anchor, -luteal_phase)?;

        Ok(Some(ExtendedPrediction {
            next_period_start: adjusted_start,
            next_period_end: shift_date(adjusted_start, period_length - 1)?,
            fertile_window_start: shift_date(
                ovulation_date,
                -luteal::FERTILE_DAYS_BEFORE_OVULATION,
            )?,
            fertile_window_end: shift_date(ovulation_date, luteal::FERTILE_DAYS_AFTER_OVULATION)?,
            ovulation_date,
            confidence: self.estimator.prediction_confidence(cycles),
            trend: self.estimator.cycle_trend(cycles),
            source,
            estimated_luteal_phase: luteal_phase,
            symptom_signal,
        }))
    }

    /// Summary statistics over the full history
    #[must_use]
    pub fn cycle_stats(&self, cycles: &[CycleRecord]) -> CycleStats {
        self.estimator.cycle_stats(cycles)
    }

    /// Cycle day and phase on `date`, or `None` if no cycle started on or before it
    ///
    /// Phases come from the average period length, the average cycle length,
    /// and the estimated luteal phase.
    #[must_use]
    pub fn cycle_day_info(&self, cycles: &[CycleRecord], date: NaiveDate) -> Option<CycleDayInfo> {
        let start = cycles
            .iter()
            .map(|cycle| cycle.start_date)
            .filter(|&start| start <= date)
            .max()?;
        let cycle_day = (date - start).num_days() + 1;

        let period_length = self.estimator.average_period_length(cycles);
        let ovulation_day = self.estimator.average_cycle_length(cycles) + 1
            - self.estimator.estimate_luteal_phase(cycles);
        let fertile_start = ovulation_day - luteal::FERTILE_DAYS_BEFORE_OVULATION;
        let fertile_end = ovulation_day + luteal::FERTILE_DAYS_AFTER_OVULATION;

        let phase = if cycle_day <= period_length {
            CyclePhase::Menstrual
        } else if (fertile_start..=fertile_end).contains(&cycle_day) {
            CyclePhase::Ovulatory
        } else if cycle_day > fertile_end {
            CyclePhase::Luteal
        } else {
            CyclePhase::Follicular
        };

        Some(CycleDayInfo { cycle_day, phase })
    }

    async fn select_cycle_length(&self, cycles: &[CycleRecord]) -> (i64, PredictionSource) {
        let delta_count = StatisticalEstimator::valid_deltas(cycles).len();

        if delta_count >= neural::SEQUENCE_LENGTH {
            if let Some(neural) = &self.neural {
                if let Some(length) = neural.predict(cycles).await {
                    debug!(length, deltas = delta_count, "Using neural cycle length");
                    return (length, PredictionSource::Ml);
                }
            }
            debug!(
                deltas = delta_count,
                "Neural prediction unavailable, falling back to statistics"
            );
        }

        if delta_count >= MIN_STATISTICAL_DELTAS {
            let length = self.estimator.weighted_average_cycle_length(cycles);
            debug!(length, deltas = delta_count, "Using statistical cycle length");
            return (length, PredictionSource::Statistical);
        }

        debug!(deltas = delta_count, "Too little history, using default cycle length");
        (defaults::CYCLE_LENGTH, PredictionSource::Default)
    }

    fn valid_symptoms(symptoms: &[SymptomRecord]) -> Vec<SymptomRecord> {
        symptoms
            .iter()
            .filter(|symptom| {
                let valid = symptom.has_valid_severity();
                if !valid {
                    warn!(
                        symptom.id = %symptom.id,
                        symptom.severity = symptom.severity,
                        "Dropping symptom with out-of-range severity"
                    );
                }
                valid
            })
            .cloned()
            .collect()
    }

    fn symptom_signal(
        &self,
        cycles: &[CycleRecord],
        symptoms: &[SymptomRecord],
        context: &CycleContext,
    ) -> Option<SymptomSignal> {
        if symptoms.is_empty() {
            return None;
        }

        let baseline = self.baseline.analyze(symptoms, context);

        let lookback = self.learner.lookback_days();
        let has_recent = symptoms.iter().any(|symptom| {
            (0..=lookback).contains(&(context.today - symptom.date).num_days())
        });
        let learned = if has_recent {
            let profile = SymptomProfileLearner::learn_profile(symptoms, cycles);
            if profile.cycles_analyzed >= MIN_LEARNED_CYCLES {
                self.learner.detect_signal(&profile, symptoms, context)
            } else {
                None
            }
        } else {
            None
        };

        let combined = SignalCombiner::combine(baseline, learned);
        if let Some(signal) = &combined {
            debug!(
                signal.kind = ?signal.signal_type,
                signal.adjustment = signal.days_adjustment,
                "Symptom signal applied"
            );
        }
        combined
    }
}

/// Move `date` by `days`, rejecting results outside the calendar range
fn shift_date(date: NaiveDate, days: i64) -> AppResult<NaiveDate> {
    date.checked_add_signed(Duration::days(days)).ok_or_else(|| {
        AppError::invalid_input(format!(
            "Predicted date out of range: {date} shifted by {days} days"
        ))
    })
}
