// ABOUTME: Core data models for cycle forecasting
// ABOUTME: Re-exports cycle records, symptom records, and the symptom taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Records arrive from the storage collaborator as an unordered snapshot and
//! are read-only to the engine.
//!
//! - `CycleRecord`: one logged menstruation (start, optional end)
//! - `SymptomRecord`: one logged symptom with severity 1-5
//! - `SymptomType`: the symptom taxonomy with category and timing tags
//! - `ConfidenceLevel`: low / medium / high scale shared by every output

mod confidence;
mod cycle;
mod symptom;

pub use confidence::ConfidenceLevel;
pub use cycle::{CycleRecord, RecordSnapshot};
pub use symptom::{SymptomCategory, SymptomInfo, SymptomRecord, SymptomTags, SymptomType};
