// ABOUTME: Tests for record parsing and the symptom catalog
// ABOUTME: Checks the JSON shape delivered by the storage collaborator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use cycle_core::models::{RecordSnapshot, SymptomCategory, SymptomTags, SymptomType};
use cycle_core::{AppError, ErrorCode};

#[test]
fn test_snapshot_parses_storage_json() {
    let json = r#"{
        "cycles": [
            {"id": "a1", "startDate": "2024-03-01", "endDate": "2024-03-05"},
            {"id": "a2", "startDate": "2024-03-29", "notes": "late"}
        ],
        "symptoms": [
            {"id": "s1", "date": "2024-03-20", "type": "cm_eggwhite", "severity": 3}
        ]
    }"#;

    let snapshot: RecordSnapshot = serde_json::from_str(json).unwrap();

    assert_eq!(snapshot.cycles.len(), 2);
    assert_eq!(snapshot.cycles[0].period_length(), Some(5));
    assert_eq!(snapshot.cycles[1].end_date, None);
    assert_eq!(snapshot.cycles[1].notes.as_deref(), Some("late"));
    assert_eq!(snapshot.symptoms[0].symptom_type, SymptomType::CmEggwhite);
    assert_eq!(
        snapshot.symptoms[0].date,
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    );
}

#[test]
fn test_missing_lists_default_to_empty() {
    let snapshot: RecordSnapshot = serde_json::from_str("{}").unwrap();
    assert!(snapshot.cycles.is_empty());
    assert!(snapshot.symptoms.is_empty());
}

#[test]
fn test_unknown_symptom_type_is_rejected() {
    let json = r#"{"symptoms": [{"id": "s", "date": "2024-01-01", "type": "hiccups", "severity": 1}]}"#;
    let error: AppError = serde_json::from_str::<RecordSnapshot>(json).unwrap_err().into();
    assert_eq!(error.code, ErrorCode::SerializationError);
}

#[test]
fn test_end_before_start_is_detected() {
    let json = r#"{"cycles": [{"id": "x", "startDate": "2024-03-10", "endDate": "2024-03-08"}]}"#;
    let snapshot: RecordSnapshot = serde_json::from_str(json).unwrap();
    assert!(snapshot.cycles[0].ends_before_start());
}

#[test]
fn test_catalog_tags_and_categories() {
    assert_eq!(SymptomType::all().count(), SymptomType::COUNT);
    assert!(SymptomType::Cramps.tags().contains(SymptomTags::PMS | SymptomTags::PERIOD));
    assert!(SymptomType::CmEggwhite.tags().contains(SymptomTags::OVULATION));
    assert!(SymptomType::Migraine.tags().is_empty());
    assert_eq!(SymptomType::LibidoHigh.category(), SymptomCategory::Libido);
    assert_eq!(SymptomType::BreastTenderness.to_string(), "breast_tenderness");
}
