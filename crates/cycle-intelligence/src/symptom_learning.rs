// ABOUTME: Learns when each symptom tends to appear relative to the next period
// ABOUTME: Builds a personal symptom-timing profile and matches recent symptoms against it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: occurrence and cycle counts are small

//! Symptom Profile Learning
//!
//! For every completed cycle (two consecutive starts 15-60 days apart) the
//! learner records, for each symptom logged between seven days before the
//! cycle start and the next start, how many days before the next period it
//! occurred. Symptoms seen at least twice become patterns, which are bucketed
//! by timing and by the phase tags in the symptom catalog:
//!
//! | Bucket    | Average days before period | Required tag |
//! |-----------|----------------------------|--------------|
//! | pms       | 1-7                        | `PMS`        |
//! | ovulation | 12-18                      | `OVULATION`  |
//! | period    | at most 5                  | `PERIOD`     |

use chrono::{Duration, NaiveDate};
use cycle_core::constants::symptoms::{
    LEARNED_LOOKBACK_DAYS, MAX_COMPLETED_CYCLE_DAYS, MIN_COMPLETED_CYCLE_DAYS,
    MIN_MATCH_FREQUENCY, MIN_PATTERN_OCCURRENCES, PRE_CYCLE_LOOKBACK_DAYS,
};
use cycle_core::models::{
    ConfidenceLevel, CycleRecord, SymptomRecord, SymptomTags, SymptomType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::signals::{CycleContext, SignalType, SymptomSignal};
use crate::statistics::round_half_up;

const PMS_DAYS: (f64, f64) = (1.0, 7.0);
const OVULATION_DAYS: (f64, f64) = (12.0, 18.0);
const PERIOD_MAX_DAYS: f64 = 5.0;

/// Minimum symptom entries before learning is attempted
const MIN_SYMPTOM_ENTRIES: usize = 3;

/// Mean pattern frequency for a high-confidence learned signal
const HIGH_CONFIDENCE_FREQUENCY: f64 = 0.7;

/// Mean pattern frequency for a medium-confidence learned signal
const MEDIUM_CONFIDENCE_FREQUENCY: f64 = 0.5;

/// Cycles of history required for a high-confidence learned signal
const HIGH_CONFIDENCE_CYCLES: usize = 3;

/// How one symptom behaves across a user's cycles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnedSymptomPattern {
    /// The symptom
    pub symptom_type: SymptomType,
    /// Mean days between the symptom and the following period start
    pub average_days_before_period: f64,
    /// Share of completed cycles in which the symptom appeared, in [0, 1]
    pub frequency: f64,
    /// Mean logged severity
    pub average_severity: f64,
    /// Number of recorded occurrences
    pub occurrences: usize,
}

/// Personalized symptom-timing profile, recomputed on every prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalSymptomProfile {
    /// Patterns typical of the days before a period
    pub pms_symptoms: Vec<LearnedSymptomPattern>,
    /// Patterns typical of ovulation
    pub ovulation_symptoms: Vec<LearnedSymptomPattern>,
    /// Patterns typical of period onset
    pub period_symptoms: Vec<LearnedSymptomPattern>,
    /// Completed cycles the profile was learned from
    pub cycles_analyzed: usize,
}

impl PersonalSymptomProfile {
    /// Whether no pattern was learned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pms_symptoms.is_empty()
            && self.ovulation_symptoms.is_empty()
            && self.period_symptoms.is_empty()
    }

    /// Buckets in the order learned signals are evaluated
    fn buckets(&self) -> [(SignalType, &[LearnedSymptomPattern]); 3] {
        [
            (SignalType::PeriodImminent, self.period_symptoms.as_slice()),
            (SignalType::PmsPatternMatch, self.pms_symptoms.as_slice()),
            (
                SignalType::OvulationPatternMatch,
                self.ovulation_symptoms.as_slice(),
            ),
        ]
    }
}

#[derive(Default)]
struct Occurrences {
    days_before: Vec<i64>,
    severities: Vec<u8>,
}

/// Learns a personal symptom profile and detects matches against it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomProfileLearner {
    lookback_days: i64,
}

impl Default for SymptomProfileLearner {
    fn default() -> Self {
        Self {
            lookback_days: LEARNED_LOOKBACK_DAYS,
        }
    }
}

impl SymptomProfileLearner {
    /// Create a learner whose signal detection considers symptoms up to `lookback_days` old
    #[must_use]
    pub const fn new(lookback_days: i64) -> Self {
        Self { lookback_days }
    }

    /// Days of recent symptoms considered for learned signals
    #[must_use]
    pub const fn lookback_days(&self) -> i64 {
        self.lookback_days
    }

    /// Build the profile from historical cycles and symptoms
    #[must_use]
    pub fn learn_profile(
        symptoms: &[SymptomRecord],
        cycles: &[CycleRecord],
    ) -> PersonalSymptomProfile {
        if cycles.len() < 2 || symptoms.len() < MIN_SYMPTOM_ENTRIES {
            return PersonalSymptomProfile::default();
        }

        let mut chronological: Vec<&CycleRecord> = cycles.iter().collect();
        chronological.sort_by_key(|cycle| cycle.start_date);

        let mut completed_cycles = 0_usize;
        let mut by_symptom: BTreeMap<SymptomType, Occurrences> = BTreeMap::new();

        for pair in chronological.windows(2) {
            let (start, next_start) = (pair[0].start_date, pair[1].start_date);
            let gap = (next_start - start).num_days();
            if !(MIN_COMPLETED_CYCLE_DAYS..=MAX_COMPLETED_CYCLE_DAYS).contains(&gap) {
                continue;
            }
            completed_cycles += 1;

            let window_start = start
                .checked_sub_signed(Duration::days(PRE_CYCLE_LOOKBACK_DAYS))
                .unwrap_or(NaiveDate::MIN);
            for symptom in symptoms
                .iter()
                .filter(|s| s.date >= window_start && s.date < next_start)
            {
                let entry = by_symptom.entry(symptom.symptom_type).or_default();
                entry.days_before.push((next_start - symptom.date).num_days());
                entry.severities.push(symptom.severity);
            }
        }

        let mut profile = PersonalSymptomProfile {
            cycles_analyzed: completed_cycles,
            ..PersonalSymptomProfile::default()
        };
        if completed_cycles == 0 {
            return profile;
        }

        for (symptom_type, occurrences) in by_symptom {
            let count = occurrences.days_before.len();
            if count < MIN_PATTERN_OCCURRENCES {
                continue;
            }
            let pattern = LearnedSymptomPattern {
                symptom_type,
                average_days_before_period: occurrences.days_before.iter().sum::<i64>() as f64
                    / count as f64,
                frequency: (count as f64 / completed_cycles as f64).min(1.0),
                average_severity: occurrences
                    .severities
                    .iter()
                    .map(|&s| f64::from(s))
                    .sum::<f64>()
                    / count as f64,
                occurrences: count,
            };
            Self::classify(pattern, &mut profile);
        }

        for bucket in [
            &mut profile.pms_symptoms,
            &mut profile.ovulation_symptoms,
            &mut profile.period_symptoms,
        ] {
            bucket.sort_by(|a, b| {
                b.frequency
                    .total_cmp(&a.frequency)
                    .then(a.symptom_type.cmp(&b.symptom_type))
            });
        }

        debug!(
            profile.cycles = profile.cycles_analyzed,
            profile.pms = profile.pms_symptoms.len(),
            profile.ovulation = profile.ovulation_symptoms.len(),
            profile.period = profile.period_symptoms.len(),
            "Learned personal symptom profile"
        );
        profile
    }

    fn classify(pattern: LearnedSymptomPattern, profile: &mut PersonalSymptomProfile) {
        let days = pattern.average_days_before_period;
        let tags = pattern.symptom_type.tags();

        if (PMS_DAYS.0..=PMS_DAYS.1).contains(&days) && tags.contains(SymptomTags::PMS) {
            profile.pms_symptoms.push(pattern);
        } else if (OVULATION_DAYS.0..=OVULATION_DAYS.1).contains(&days)
            && tags.contains(SymptomTags::OVULATION)
        {
            profile.ovulation_symptoms.push(pattern);
        } else if days <= PERIOD_MAX_DAYS && tags.contains(SymptomTags::PERIOD) {
            profile.period_symptoms.push(pattern);
        }
    }

    /// Match recently logged symptoms against the profile
    ///
    /// Buckets are tried in order period, pms, ovulation; the first bucket
    /// with a match produces the signal. Each matched symptom projects a
    /// period onset at `logged date + average days before period`, and the
    /// mean offset of those projections from the predicted start becomes the
    /// day adjustment.
    #[must_use]
    pub fn detect_signal(
        &self,
        profile: &PersonalSymptomProfile,
        symptoms: &[SymptomRecord],
        context: &CycleContext,
    ) -> Option<SymptomSignal> {
        let recent = self.latest_recent_dates(symptoms, context);
        if recent.is_empty() {
            return None;
        }

        profile.buckets().into_iter().find_map(|(signal_type, patterns)| {
            let matches: Vec<(&LearnedSymptomPattern, NaiveDate)> = patterns
                .iter()
                .filter(|pattern| pattern.frequency >= MIN_MATCH_FREQUENCY)
                .filter_map(|pattern| {
                    recent
                        .get(&pattern.symptom_type)
                        .map(|&date| (pattern, date))
                })
                .collect();
            if matches.is_empty() {
                return None;
            }
            Some(Self::build_signal(
                signal_type,
                &matches,
                profile.cycles_analyzed,
                context,
            ))
        })
    }

    /// Most recent logged date per symptom within the lookback window
    fn latest_recent_dates(
        &self,
        symptoms: &[SymptomRecord],
        context: &CycleContext,
    ) -> BTreeMap<SymptomType, NaiveDate> {
        let mut recent = BTreeMap::new();
        for symptom in symptoms {
            let days_ago = (context.today - symptom.date).num_days();
            if (0..=self.lookback_days).contains(&days_ago) {
                let latest = recent.entry(symptom.symptom_type).or_insert(symptom.date);
                *latest = (*latest).max(symptom.date);
            }
        }
        recent
    }

    fn build_signal(
        signal_type: SignalType,
        matches: &[(&LearnedSymptomPattern, NaiveDate)],
        cycles_analyzed: usize,
        context: &CycleContext,
    ) -> SymptomSignal {
        let count = matches.len() as f64;
        let mean_offset = matches
            .iter()
            .map(|(pattern, date)| {
                (*date - context.predicted_period_start).num_days() as f64
                    + pattern.average_days_before_period
            })
            .sum::<f64>()
            / count;
        let mean_frequency = matches.iter().map(|(p, _)| p.frequency).sum::<f64>() / count;
        let mean_days_before = matches
            .iter()
            .map(|(p, _)| p.average_days_before_period)
            .sum::<f64>()
            / count;

        let confidence = if matches.len() >= 2
            && mean_frequency >= HIGH_CONFIDENCE_FREQUENCY
            && cycles_analyzed >= HIGH_CONFIDENCE_CYCLES
        {
            ConfidenceLevel::High
        } else if mean_frequency >= MEDIUM_CONFIDENCE_FREQUENCY {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        };

        let labels: Vec<&str> = matches.iter().map(|(p, _)| p.symptom_type.label()).collect();
        let message = format!(
            "Based on your last {cycles_analyzed} cycles, {} usually appears about {} days before your period ({}% of cycles).",
            labels.join(" and "),
            round_half_up(mean_days_before),
            round_half_up(mean_frequency * 100.0)
        );

        SymptomSignal::new(
            signal_type,
            confidence,
            round_half_up(mean_offset),
            matches.iter().map(|(p, _)| p.symptom_type),
            message,
            cycles_analyzed,
        )
    }
}
