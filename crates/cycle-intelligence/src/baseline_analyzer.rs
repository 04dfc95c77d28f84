// ABOUTME: Rule-based symptom analysis that needs no personal history
// ABOUTME: Detects fertility signs, imminent period onset, and common PMS clusters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: at most five PMS symptoms are averaged

//! Baseline Symptom Analyzer
//!
//! Encodes well-established biological patterns so a brand-new user still
//! gets symptom feedback. Rules run in strict priority order and the first
//! match wins: fertility signs, then imminent period, then PMS.

use cycle_core::constants::symptoms::{BASELINE_LOOKBACK_DAYS, SEVERE_THRESHOLD};
use cycle_core::models::{ConfidenceLevel, SymptomRecord, SymptomType};
use std::collections::BTreeMap;
use tracing::debug;

use crate::signals::{CycleContext, SignalType, SymptomSignal};

/// Cycle days on which fertility signs are meaningful (inclusive)
const FERTILITY_CHECK_DAYS: (i64, i64) = (8, 22);

/// Spotting counts as a period sign within this many days of the expected end of cycle
const PERIOD_IMMINENT_WINDOW_DAYS: i64 = 5;

/// PMS symptoms count within this many days of the expected end of cycle
const PMS_WINDOW_DAYS: i64 = 10;

/// Days before onset at which spotting typically appears
const SPOTTING_LEAD_DAYS: i64 = 2;

/// Symptoms that make up the classic PMS cluster
const PMS_CLUSTER: [SymptomType; 5] = [
    SymptomType::Cramps,
    SymptomType::BreastTenderness,
    SymptomType::Bloating,
    SymptomType::Irritability,
    SymptomType::Cravings,
];

/// Average severity at which three PMS symptoms are considered strong
const PMS_HIGH_AVERAGE_SEVERITY: f64 = 3.5;

/// Symptom analyzer built on general physiological knowledge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineSymptomAnalyzer {
    lookback_days: i64,
}

impl Default for BaselineSymptomAnalyzer {
    fn default() -> Self {
        Self {
            lookback_days: BASELINE_LOOKBACK_DAYS,
        }
    }
}

impl BaselineSymptomAnalyzer {
    /// Create an analyzer considering symptoms up to `lookback_days` old
    #[must_use]
    pub const fn new(lookback_days: i64) -> Self {
        Self { lookback_days }
    }

    /// Analyze recent symptoms, returning the highest-priority matching signal
    #[must_use]
    pub fn analyze(
        &self,
        symptoms: &[SymptomRecord],
        context: &CycleContext,
    ) -> Option<SymptomSignal> {
        let recent = self.recent_severities(symptoms, context);
        if recent.is_empty() {
            return None;
        }

        let signal = Self::check_fertility(&recent, context)
            .or_else(|| Self::check_period_imminent(&recent, context))
            .or_else(|| Self::check_pms(&recent, context));

        if let Some(signal) = &signal {
            debug!(
                signal.kind = ?signal.signal_type,
                signal.confidence = ?signal.confidence,
                cycle.day = context.current_cycle_day,
                "Baseline symptom signal"
            );
        }
        signal
    }

    /// Highest severity per symptom type logged within the lookback window
    fn recent_severities(
        &self,
        symptoms: &[SymptomRecord],
        context: &CycleContext,
    ) -> BTreeMap<SymptomType, u8> {
        let mut recent = BTreeMap::new();
        for symptom in symptoms {
            let days_ago = (context.today - symptom.date).num_days();
            if (0..=self.lookback_days).contains(&days_ago) {
                let severity = recent.entry(symptom.symptom_type).or_insert(0);
                *severity = (*severity).max(symptom.severity);
            }
        }
        recent
    }

    fn check_fertility(
        recent: &BTreeMap<SymptomType, u8>,
        context: &CycleContext,
    ) -> Option<SymptomSignal> {
        let (first_day, last_day) = FERTILITY_CHECK_DAYS;
        if !(first_day..=last_day).contains(&context.current_cycle_day) {
            return None;
        }

        let eggwhite = recent.contains_key(&SymptomType::CmEggwhite);
        let watery = recent.contains_key(&SymptomType::CmWatery);
        let ovulation_pain = recent.contains_key(&SymptomType::OvulationPain);
        let high_libido = recent.contains_key(&SymptomType::LibidoHigh);

        let (confidence, message) = if eggwhite {
            (
                ConfidenceLevel::High,
                "Egg-white cervical mucus is one of the strongest signs of peak fertility",
            )
        } else if watery && ovulation_pain {
            (
                ConfidenceLevel::High,
                "Watery cervical mucus with ovulation pain suggests ovulation is happening now",
            )
        } else if ovulation_pain && high_libido {
            (
                ConfidenceLevel::High,
                "Ovulation pain together with increased libido suggests you are in your fertile window",
            )
        } else if ovulation_pain {
            (
                ConfidenceLevel::Medium,
                "One-sided pelvic pain mid-cycle often accompanies ovulation",
            )
        } else if watery {
            (
                ConfidenceLevel::Medium,
                "Watery cervical mucus suggests fertility is rising",
            )
        } else if high_libido {
            (
                ConfidenceLevel::Low,
                "Increased libido can be a sign of approaching ovulation",
            )
        } else {
            return None;
        };

        let relevant = [
            SymptomType::CmEggwhite,
            SymptomType::CmWatery,
            SymptomType::OvulationPain,
            SymptomType::LibidoHigh,
        ]
        .into_iter()
        .filter(|symptom| recent.contains_key(symptom));

        Some(SymptomSignal::new(
            SignalType::FertileWindow,
            confidence,
            0,
            relevant,
            message,
            0,
        ))
    }

    fn check_period_imminent(
        recent: &BTreeMap<SymptomType, u8>,
        context: &CycleContext,
    ) -> Option<SymptomSignal> {
        if !recent.contains_key(&SymptomType::Spotting)
            || context.current_cycle_day
                <= context.average_cycle_length - PERIOD_IMMINENT_WINDOW_DAYS
        {
            return None;
        }

        let adjustment = (SPOTTING_LEAD_DAYS - context.days_until_period).min(0);
        Some(SymptomSignal::new(
            SignalType::PeriodImminent,
            ConfidenceLevel::Medium,
            adjustment,
            [SymptomType::Spotting],
            "Spotting late in your cycle often means your period will start within a couple of days",
            0,
        ))
    }

    fn check_pms(
        recent: &BTreeMap<SymptomType, u8>,
        context: &CycleContext,
    ) -> Option<SymptomSignal> {
        let matched: Vec<(SymptomType, u8)> = PMS_CLUSTER
            .iter()
            .filter_map(|symptom| recent.get(symptom).map(|&severity| (*symptom, severity)))
            .collect();

        if matched.len() < 2
            || context.current_cycle_day <= context.average_cycle_length - PMS_WINDOW_DAYS
        {
            return None;
        }

        let severe = matched
            .iter()
            .filter(|(_, severity)| *severity >= SEVERE_THRESHOLD)
            .count();
        let average_severity = matched
            .iter()
            .map(|(_, severity)| f64::from(*severity))
            .sum::<f64>()
            / matched.len() as f64;

        let confidence = if severe >= 3
            || (matched.len() >= 3 && average_severity >= PMS_HIGH_AVERAGE_SEVERITY)
        {
            ConfidenceLevel::High
        } else if severe >= 2 || matched.len() >= 3 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        };

        let labels: Vec<&str> = matched.iter().map(|(symptom, _)| symptom.label()).collect();
        Some(SymptomSignal::new(
            SignalType::PmsPatternMatch,
            confidence,
            0,
            matched.iter().map(|(symptom, _)| *symptom),
            format!(
                "{} are common pre-menstrual symptoms; your period is likely approaching",
                capitalize_first(&labels.join(", "))
            ),
            0,
        ))
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
