// ABOUTME: Cycle record model as supplied by the storage collaborator
// ABOUTME: Start date, optional end date, and helpers for period length
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SymptomRecord;

/// A single logged menstruation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleRecord {
    /// Storage identifier
    pub id: String,
    /// First day of bleeding
    pub start_date: NaiveDate,
    /// Last day of bleeding, if logged
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Free-form note
    #[serde(default)]
    pub notes: Option<String>,
}

impl CycleRecord {
    /// Create a record with only a start date
    pub fn new(id: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            start_date,
            end_date: None,
            notes: None,
        }
    }

    /// Attach an end date
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Inclusive period length in days, when an end date is logged
    #[must_use]
    pub fn period_length(&self) -> Option<i64> {
        self.end_date
            .map(|end| (end - self.start_date).num_days() + 1)
    }

    /// Whether the end date, if present, precedes the start date
    #[must_use]
    pub fn ends_before_start(&self) -> bool {
        self.end_date.is_some_and(|end| end < self.start_date)
    }
}

/// Read-only snapshot of everything the storage collaborator holds for one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSnapshot {
    /// Logged cycles, in any order
    #[serde(default)]
    pub cycles: Vec<CycleRecord>,
    /// Logged symptoms, in any order
    #[serde(default)]
    pub symptoms: Vec<SymptomRecord>,
}
