// ABOUTME: Integration tests for personal symptom profile learning and matching
// ABOUTME: Covers completed-cycle detection, bucket classification, and learned signal confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod common;

use chrono::{Duration, NaiveDate};
use common::{cycles_from_deltas, date, symptom};
use cycle_core::models::{ConfidenceLevel, CycleRecord, SymptomRecord, SymptomType};
use cycle_intelligence::{
    CycleContext, LearnedSymptomPattern, PersonalSymptomProfile, SignalType,
    SymptomProfileLearner,
};

/// Four 28-day cycles starting 2024-01-01 with ovulation pain 14 days before each later start
fn ovulation_history(extra: &[SymptomType]) -> (Vec<CycleRecord>, Vec<SymptomRecord>) {
    let cycles = cycles_from_deltas("2024-01-01", &[28, 28, 28]);
    let mut symptoms = Vec::new();
    for day in ["2024-01-15", "2024-02-12", "2024-03-11"] {
        symptoms.push(symptom(date(day), SymptomType::OvulationPain, 3));
        for symptom_type in extra {
            symptoms.push(symptom(date(day), *symptom_type, 2));
        }
    }
    (cycles, symptoms)
}

fn context(today: &str, cycle_day: i64, predicted_start: &str) -> CycleContext {
    let today = date(today);
    let predicted_period_start = date(predicted_start);
    CycleContext {
        today,
        current_cycle_day: cycle_day,
        average_cycle_length: 28,
        days_until_period: (predicted_period_start - today).num_days(),
        predicted_period_start,
    }
}

fn pattern(symptom_type: SymptomType, days_before: f64, frequency: f64) -> LearnedSymptomPattern {
    LearnedSymptomPattern {
        symptom_type,
        average_days_before_period: days_before,
        frequency,
        average_severity: 3.0,
        occurrences: 3,
    }
}

#[test]
fn test_profile_needs_two_cycles_and_three_symptoms() {
    let (cycles, symptoms) = ovulation_history(&[]);

    let too_few_cycles = SymptomProfileLearner::learn_profile(&symptoms, &cycles[..1]);
    assert_eq!(too_few_cycles, PersonalSymptomProfile::default());

    let too_few_symptoms = SymptomProfileLearner::learn_profile(&symptoms[..2], &cycles);
    assert_eq!(too_few_symptoms.cycles_analyzed, 0);
    assert!(too_few_symptoms.is_empty());
}

#[test]
fn test_ovulation_pattern_is_learned() {
    let (cycles, symptoms) = ovulation_history(&[]);
    let profile = SymptomProfileLearner::learn_profile(&symptoms, &cycles);

    assert_eq!(profile.cycles_analyzed, 3);
    assert!(profile.pms_symptoms.is_empty());
    assert!(profile.period_symptoms.is_empty());
    assert_eq!(profile.ovulation_symptoms.len(), 1);

    let learned = &profile.ovulation_symptoms[0];
    assert_eq!(learned.symptom_type, SymptomType::OvulationPain);
    assert_eq!(learned.occurrences, 3);
    assert!((learned.average_days_before_period - 14.0).abs() < 0.001);
    assert!((learned.frequency - 1.0).abs() < 0.001);
    assert!((learned.average_severity - 3.0).abs() < 0.001);
}

#[test]
fn test_learning_ignores_record_order() {
    let (mut cycles, mut symptoms) = ovulation_history(&[]);
    let expected = SymptomProfileLearner::learn_profile(&symptoms, &cycles);

    cycles.reverse();
    symptoms.reverse();
    assert_eq!(SymptomProfileLearner::learn_profile(&symptoms, &cycles), expected);
}

#[test]
fn test_implausible_gaps_are_not_completed_cycles() {
    // 9-day gap is skipped, 28-day gap counts
    let cycles = cycles_from_deltas("2024-01-01", &[9, 28]);
    let symptoms = vec![
        symptom(date("2024-01-24"), SymptomType::OvulationPain, 2),
        symptom(date("2024-01-25"), SymptomType::OvulationPain, 2),
        symptom(date("2024-01-26"), SymptomType::OvulationPain, 2),
    ];

    let profile = SymptomProfileLearner::learn_profile(&symptoms, &cycles);
    assert_eq!(profile.cycles_analyzed, 1);
    assert_eq!(profile.ovulation_symptoms.len(), 1);
}

#[test]
fn test_cycle_at_calendar_start_is_learned() {
    let first = NaiveDate::MIN;
    let second = first + Duration::days(28);
    let cycles = vec![CycleRecord::new("c-0", first), CycleRecord::new("c-1", second)];
    let symptoms: Vec<SymptomRecord> = (0..3)
        .map(|offset| symptom(first + Duration::days(offset), SymptomType::Cramps, 2))
        .collect();

    let profile = SymptomProfileLearner::learn_profile(&symptoms, &cycles);
    assert_eq!(profile.cycles_analyzed, 1);
}

#[test]
fn test_frequency_is_capped_at_one() {
    // Three ovulation-pain entries inside a single completed cycle out of two
    let cycles = cycles_from_deltas("2024-01-01", &[28, 28]);
    let symptoms = vec![
        symptom(date("2024-02-10"), SymptomType::OvulationPain, 2),
        symptom(date("2024-02-11"), SymptomType::OvulationPain, 2),
        symptom(date("2024-02-12"), SymptomType::OvulationPain, 2),
    ];

    let profile = SymptomProfileLearner::learn_profile(&symptoms, &cycles);
    assert_eq!(profile.cycles_analyzed, 2);
    assert!((profile.ovulation_symptoms[0].frequency - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_pms_pattern_from_pre_period_days() {
    let cycles = cycles_from_deltas("2024-01-01", &[28, 28]);
    let symptoms = vec![
        symptom(date("2024-02-01"), SymptomType::Headache, 1),
        symptom(date("2024-02-22"), SymptomType::Bloating, 3),
        symptom(date("2024-02-24"), SymptomType::Bloating, 4),
    ];

    let profile = SymptomProfileLearner::learn_profile(&symptoms, &cycles);
    assert_eq!(profile.pms_symptoms.len(), 1);

    let learned = &profile.pms_symptoms[0];
    assert_eq!(learned.symptom_type, SymptomType::Bloating);
    assert!((learned.average_days_before_period - 3.0).abs() < 0.001);
    assert!((learned.average_severity - 3.5).abs() < 0.001);
}

#[test]
fn test_untagged_symptoms_are_discarded() {
    let cycles = cycles_from_deltas("2024-01-01", &[28, 28, 28]);
    let symptoms: Vec<SymptomRecord> = ["2024-01-15", "2024-02-12", "2024-03-11"]
        .into_iter()
        .map(|day| symptom(date(day), SymptomType::Migraine, 3))
        .collect();

    let profile = SymptomProfileLearner::learn_profile(&symptoms, &cycles);
    assert_eq!(profile.cycles_analyzed, 3);
    assert!(profile.is_empty());
}

#[test]
fn test_buckets_sorted_by_frequency() {
    let cycles = cycles_from_deltas("2024-01-01", &[28, 28, 28]);
    let mut symptoms: Vec<SymptomRecord> = ["2024-01-15", "2024-02-12", "2024-03-11"]
        .into_iter()
        .map(|day| symptom(date(day), SymptomType::CmWatery, 2))
        .collect();
    symptoms.push(symptom(date("2024-02-12"), SymptomType::LibidoHigh, 2));
    symptoms.push(symptom(date("2024-03-11"), SymptomType::LibidoHigh, 2));

    let profile = SymptomProfileLearner::learn_profile(&symptoms, &cycles);
    let order: Vec<SymptomType> = profile
        .ovulation_symptoms
        .iter()
        .map(|p| p.symptom_type)
        .collect();
    assert_eq!(order, vec![SymptomType::CmWatery, SymptomType::LibidoHigh]);
}

#[test]
fn test_detects_learned_ovulation_signal() {
    let (cycles, mut symptoms) = ovulation_history(&[]);
    let profile = SymptomProfileLearner::learn_profile(&symptoms, &cycles);
    symptoms.push(symptom(date("2024-04-07"), SymptomType::OvulationPain, 3));

    let signal = SymptomProfileLearner::default()
        .detect_signal(&profile, &symptoms, &context("2024-04-08", 15, "2024-04-22"))
        .unwrap();

    assert_eq!(signal.signal_type, SignalType::OvulationPatternMatch);
    // Single match cannot be high confidence
    assert_eq!(signal.confidence, ConfidenceLevel::Medium);
    // 2024-04-07 + 14 days = 2024-04-21, one day before the prediction
    assert_eq!(signal.days_adjustment, -1);
    assert_eq!(signal.based_on_cycles, 3);
    assert!(signal.relevant_symptoms.contains(&SymptomType::OvulationPain));
    assert!(signal.message.contains("ovulation pain"));
    assert!(signal.message.contains("last 3 cycles"));
}

#[test]
fn test_two_frequent_matches_give_high_confidence() {
    let (cycles, mut symptoms) = ovulation_history(&[SymptomType::CmEggwhite]);
    let profile = SymptomProfileLearner::learn_profile(&symptoms, &cycles);
    assert_eq!(profile.ovulation_symptoms.len(), 2);

    symptoms.push(symptom(date("2024-04-06"), SymptomType::OvulationPain, 3));
    symptoms.push(symptom(date("2024-04-07"), SymptomType::CmEggwhite, 2));

    let signal = SymptomProfileLearner::default()
        .detect_signal(&profile, &symptoms, &context("2024-04-08", 15, "2024-04-22"))
        .unwrap();

    assert_eq!(signal.confidence, ConfidenceLevel::High);
    assert_eq!(signal.relevant_symptoms.len(), 2);
    // offsets -2 and -1, mean -1.5 rounds half up to -1
    assert_eq!(signal.days_adjustment, -1);
}

#[test]
fn test_old_symptoms_do_not_match() {
    let (cycles, mut symptoms) = ovulation_history(&[]);
    let profile = SymptomProfileLearner::learn_profile(&symptoms, &cycles);
    symptoms.push(symptom(date("2024-03-31"), SymptomType::OvulationPain, 3));

    let signal = SymptomProfileLearner::default().detect_signal(
        &profile,
        &symptoms,
        &context("2024-04-08", 15, "2024-04-22"),
    );
    assert!(signal.is_none());
}

#[test]
fn test_rare_patterns_do_not_match() {
    let profile = PersonalSymptomProfile {
        pms_symptoms: vec![pattern(SymptomType::Bloating, 3.0, 0.2)],
        cycles_analyzed: 5,
        ..PersonalSymptomProfile::default()
    };
    let symptoms = vec![symptom(date("2024-04-18"), SymptomType::Bloating, 3)];

    let signal = SymptomProfileLearner::default().detect_signal(
        &profile,
        &symptoms,
        &context("2024-04-18", 25, "2024-04-22"),
    );
    assert!(signal.is_none());
}

#[test]
fn test_period_bucket_is_checked_before_pms() {
    let profile = PersonalSymptomProfile {
        pms_symptoms: vec![pattern(SymptomType::Bloating, 4.0, 0.8)],
        period_symptoms: vec![pattern(SymptomType::Spotting, 2.0, 0.6)],
        cycles_analyzed: 4,
        ..PersonalSymptomProfile::default()
    };
    let symptoms = vec![
        symptom(date("2024-04-18"), SymptomType::Bloating, 3),
        symptom(date("2024-04-18"), SymptomType::Spotting, 1),
    ];

    let signal = SymptomProfileLearner::default()
        .detect_signal(&profile, &symptoms, &context("2024-04-18", 25, "2024-04-22"))
        .unwrap();

    assert_eq!(signal.signal_type, SignalType::PeriodImminent);
    assert_eq!(signal.confidence, ConfidenceLevel::Medium);
    // 2024-04-18 + 2 days is two days early
    assert_eq!(signal.days_adjustment, -2);
}

#[test]
fn test_learned_adjustment_is_clamped() {
    let profile = PersonalSymptomProfile {
        ovulation_symptoms: vec![pattern(SymptomType::OvulationPain, 18.0, 0.9)],
        cycles_analyzed: 4,
        ..PersonalSymptomProfile::default()
    };
    let symptoms = vec![symptom(date("2024-04-08"), SymptomType::OvulationPain, 2)];

    // Projected onset 2024-04-26 is 12 days after the predicted 2024-04-14
    let signal = SymptomProfileLearner::default()
        .detect_signal(&profile, &symptoms, &context("2024-04-08", 23, "2024-04-14"))
        .unwrap();
    assert_eq!(signal.days_adjustment, 5);
}
