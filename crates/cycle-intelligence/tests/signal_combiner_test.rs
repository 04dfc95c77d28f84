// ABOUTME: Integration tests for baseline/learned signal reconciliation
// ABOUTME: Verifies agreement boosting, learned precedence, and priority resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cycle_core::models::{ConfidenceLevel, SymptomType};
use cycle_intelligence::{SignalCombiner, SignalType, SymptomSignal};

fn signal(
    signal_type: SignalType,
    confidence: ConfidenceLevel,
    days_adjustment: i64,
    symptoms: &[SymptomType],
    based_on_cycles: usize,
) -> SymptomSignal {
    SymptomSignal::new(
        signal_type,
        confidence,
        days_adjustment,
        symptoms.iter().copied(),
        format!("{signal_type:?}"),
        based_on_cycles,
    )
}

#[test]
fn test_no_signals() {
    assert!(SignalCombiner::combine(None, None).is_none());
}

#[test]
fn test_single_signal_passes_through() {
    let baseline = signal(
        SignalType::PmsPatternMatch,
        ConfidenceLevel::Low,
        0,
        &[SymptomType::Bloating],
        0,
    );
    let learned = signal(
        SignalType::OvulationPatternMatch,
        ConfidenceLevel::Medium,
        2,
        &[SymptomType::OvulationPain],
        4,
    );

    assert_eq!(
        SignalCombiner::combine(Some(baseline.clone()), None),
        Some(baseline)
    );
    assert_eq!(
        SignalCombiner::combine(None, Some(learned.clone())),
        Some(learned)
    );
}

#[test]
fn test_agreeing_medium_signals_boost_to_high() {
    let baseline = signal(
        SignalType::PeriodImminent,
        ConfidenceLevel::Medium,
        -2,
        &[SymptomType::Spotting],
        0,
    );
    let learned = signal(
        SignalType::PeriodImminent,
        ConfidenceLevel::Medium,
        -1,
        &[SymptomType::Cramps],
        5,
    );

    let combined = SignalCombiner::combine(Some(baseline), Some(learned)).unwrap();

    assert_eq!(combined.signal_type, SignalType::PeriodImminent);
    assert_eq!(combined.confidence, ConfidenceLevel::High);
    assert_eq!(combined.days_adjustment, -1);
    assert_eq!(combined.based_on_cycles, 5);
    assert!(combined.relevant_symptoms.contains(&SymptomType::Spotting));
    assert!(combined.relevant_symptoms.contains(&SymptomType::Cramps));
    assert!(combined
        .message
        .ends_with("This matches general patterns for these symptoms."));
}

#[test]
fn test_agreeing_confidence_table() {
    use ConfidenceLevel::{High, Low, Medium};
    let cases = [
        (Low, Low, Medium),
        (Low, Medium, Medium),
        (Medium, Low, Medium),
        (Medium, Medium, High),
        (Low, High, High),
        (High, Low, High),
    ];

    for (baseline_level, learned_level, expected) in cases {
        let combined = SignalCombiner::combine(
            Some(signal(SignalType::PmsPatternMatch, baseline_level, 0, &[], 0)),
            Some(signal(SignalType::PmsPatternMatch, learned_level, 0, &[], 3)),
        )
        .unwrap();
        assert_eq!(
            combined.confidence, expected,
            "baseline {baseline_level:?}, learned {learned_level:?}"
        );
    }
}

#[test]
fn test_agreement_note_requires_personal_history() {
    let combined = SignalCombiner::combine(
        Some(signal(SignalType::FertileWindow, ConfidenceLevel::High, 0, &[], 0)),
        Some(signal(SignalType::FertileWindow, ConfidenceLevel::Low, 0, &[], 0)),
    )
    .unwrap();

    assert_eq!(combined.message, "FertileWindow");
}

#[test]
fn test_disagreement_resolved_by_priority() {
    let fertile = signal(SignalType::FertileWindow, ConfidenceLevel::Low, 0, &[], 0);
    let pms = signal(SignalType::PmsPatternMatch, ConfidenceLevel::High, 3, &[], 6);
    let imminent = signal(SignalType::PeriodImminent, ConfidenceLevel::Low, -2, &[], 4);
    let ovulation = signal(SignalType::OvulationPatternMatch, ConfidenceLevel::High, 1, &[], 4);

    // Baseline fertility outranks a learned PMS match regardless of confidence
    assert_eq!(
        SignalCombiner::combine(Some(fertile.clone()), Some(pms.clone())),
        Some(fertile)
    );
    // Learned period-imminent outranks baseline PMS
    assert_eq!(
        SignalCombiner::combine(Some(pms), Some(imminent.clone())),
        Some(imminent.clone())
    );
    assert_eq!(
        SignalCombiner::combine(Some(imminent.clone()), Some(ovulation)),
        Some(imminent)
    );
}

#[test]
fn test_signal_adjustment_is_clamped() {
    let early = signal(SignalType::PeriodImminent, ConfidenceLevel::Low, -9, &[], 0);
    let late = signal(SignalType::PeriodImminent, ConfidenceLevel::Low, 12, &[], 0);

    assert_eq!(early.days_adjustment, -5);
    assert_eq!(late.days_adjustment, 5);
}
