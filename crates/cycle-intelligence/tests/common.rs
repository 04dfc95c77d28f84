// ABOUTME: Shared fixtures for cycle-intelligence integration tests
// ABOUTME: Builds cycle histories, symptom logs, and small network artifacts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_possible_wrap
)]

use chrono::{Duration, NaiveDate};
use cycle_core::models::{CycleRecord, SymptomRecord, SymptomType};
use cycle_intelligence::{ModelArchitecture, ModelArtifact, ScalerParams};

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

/// Cycles starting at `first_start`, separated by `deltas` (oldest first)
pub fn cycles_from_deltas(first_start: &str, deltas: &[i64]) -> Vec<CycleRecord> {
    let mut start = date(first_start);
    let mut cycles = vec![CycleRecord::new("c-0", start)];
    for (index, delta) in deltas.iter().enumerate() {
        start += Duration::days(*delta);
        cycles.push(CycleRecord::new(format!("c-{}", index + 1), start));
    }
    cycles
}

/// Cycles with every record's period lasting `period_days`
pub fn cycles_with_periods(first_start: &str, deltas: &[i64], period_days: i64) -> Vec<CycleRecord> {
    cycles_from_deltas(first_start, deltas)
        .into_iter()
        .map(|cycle| {
            let end = cycle.start_date + Duration::days(period_days - 1);
            cycle.with_end_date(end)
        })
        .collect()
}

pub fn symptom(day: NaiveDate, symptom_type: SymptomType, severity: u8) -> SymptomRecord {
    SymptomRecord::new(format!("s-{day}-{symptom_type}"), day, symptom_type, severity)
}

/// Scaler that leaves features untouched
pub fn identity_scaler(width: usize) -> ScalerParams {
    ScalerParams {
        mean: vec![0.0; width],
        scale: vec![1.0; width],
        feature_names: Vec::new(),
    }
}

/// 13 -> 2 -> 1 relu network computing `|x0| + bias`
pub fn absolute_value_artifact(output_bias: f64) -> ModelArtifact {
    let mut first_layer = vec![vec![0.0, 0.0]; 13];
    first_layer[0] = vec![1.0, -1.0];
    ModelArtifact {
        architecture: ModelArchitecture {
            input_size: 13,
            hidden_layers: vec![2],
            output_size: 1,
            activation: "relu".to_owned(),
        },
        weights: vec![first_layer, vec![vec![1.0], vec![1.0]]],
        biases: vec![vec![0.0, 0.0], vec![output_bias]],
    }
}
