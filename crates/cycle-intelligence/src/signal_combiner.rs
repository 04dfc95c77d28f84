// ABOUTME: Merges baseline and learned symptom signals into one signal
// ABOUTME: Agreement boosts confidence; disagreement resolves by fixed signal priority
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cycle_core::models::ConfidenceLevel;

use crate::signals::SymptomSignal;

/// Reconciles general-knowledge and personalized symptom signals
pub struct SignalCombiner;

impl SignalCombiner {
    /// Combine the two optional signals
    ///
    /// When both agree on the signal type the learned signal supplies the
    /// adjustment and message (personal history takes precedence) and the
    /// confidence is boosted. When they disagree the higher-priority type
    /// wins, with ties going to the baseline signal.
    #[must_use]
    pub fn combine(
        baseline: Option<SymptomSignal>,
        learned: Option<SymptomSignal>,
    ) -> Option<SymptomSignal> {
        match (baseline, learned) {
            (None, None) => None,
            (Some(signal), None) | (None, Some(signal)) => Some(signal),
            (Some(baseline), Some(learned)) if baseline.signal_type == learned.signal_type => {
                Some(Self::merge_agreeing(baseline, learned))
            }
            (Some(baseline), Some(learned)) => {
                if learned.signal_type.priority() > baseline.signal_type.priority() {
                    Some(learned)
                } else {
                    Some(baseline)
                }
            }
        }
    }

    fn merge_agreeing(baseline: SymptomSignal, learned: SymptomSignal) -> SymptomSignal {
        let confidence = Self::boosted_confidence(baseline.confidence, learned.confidence);

        let message = if learned.based_on_cycles > 0 {
            format!(
                "{} This matches general patterns for these symptoms.",
                learned.message
            )
        } else {
            learned.message
        };

        let mut relevant_symptoms = learned.relevant_symptoms;
        relevant_symptoms.extend(baseline.relevant_symptoms);

        SymptomSignal {
            signal_type: learned.signal_type,
            confidence,
            days_adjustment: learned.days_adjustment,
            relevant_symptoms,
            message,
            based_on_cycles: learned.based_on_cycles,
        }
    }

    /// High if either input is high or both are medium, otherwise medium
    fn boosted_confidence(a: ConfidenceLevel, b: ConfidenceLevel) -> ConfidenceLevel {
        match (a, b) {
            (ConfidenceLevel::High, _)
            | (_, ConfidenceLevel::High)
            | (ConfidenceLevel::Medium, ConfidenceLevel::Medium) => ConfidenceLevel::High,
            _ => ConfidenceLevel::Medium,
        }
    }
}
