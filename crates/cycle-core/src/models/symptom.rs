// ABOUTME: Symptom records and the symptom taxonomy used by the symptom analyzers
// ABOUTME: A static catalog maps each symptom to its category, label, and timing tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use bitflags::bitflags;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::bounds::{MAX_SEVERITY, MIN_SEVERITY};

/// A single logged symptom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomRecord {
    /// Storage identifier
    pub id: String,
    /// Day the symptom was observed
    pub date: NaiveDate,
    /// What was observed
    #[serde(rename = "type")]
    pub symptom_type: SymptomType,
    /// Severity from 1 (barely noticeable) to 5 (severe)
    pub severity: u8,
    /// Free-form note
    #[serde(default)]
    pub notes: Option<String>,
}

impl SymptomRecord {
    /// Create a record without notes
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        symptom_type: SymptomType,
        severity: u8,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            symptom_type,
            severity,
            notes: None,
        }
    }

    /// Whether the severity lies in the accepted 1-5 range
    #[must_use]
    pub const fn has_valid_severity(&self) -> bool {
        self.severity >= MIN_SEVERITY && self.severity <= MAX_SEVERITY
    }
}

/// Broad grouping shown to users when logging symptoms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomCategory {
    /// Flow and spotting
    Bleeding,
    /// Cramps, aches, and pains
    Pain,
    /// Bodily changes
    Physical,
    /// Emotional state
    Mood,
    /// Energy level
    Energy,
    /// Sleep quality
    Sleep,
    /// Appetite changes
    Appetite,
    /// Cervical mucus observations
    CervicalMucus,
    /// Sex drive
    Libido,
}

bitflags! {
    /// Cycle phases a symptom is characteristic of
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SymptomTags: u8 {
        /// Typical in the days before a period
        const PMS = 1;
        /// Typical around ovulation
        const OVULATION = 1 << 1;
        /// Typical at period onset
        const PERIOD = 1 << 2;
    }
}

/// Every symptom a user can log
///
/// Discriminants index into the static symptom catalog, so variants must stay
/// in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomType {
    // Bleeding
    /// Light spotting outside a period
    Spotting,
    /// Light flow
    LightFlow,
    /// Medium flow
    MediumFlow,
    /// Heavy flow
    HeavyFlow,

    // Pain
    /// Menstrual cramps
    Cramps,
    /// Headache
    Headache,
    /// Migraine
    Migraine,
    /// Lower back pain
    BackPain,
    /// One-sided pelvic pain around ovulation (mittelschmerz)
    OvulationPain,
    /// Joint pain
    JointPain,

    // Physical
    /// Bloating
    Bloating,
    /// Breast tenderness
    BreastTenderness,
    /// Acne breakout
    Acne,
    /// Nausea
    Nausea,
    /// Hot flashes
    HotFlashes,
    /// Dizziness
    Dizziness,

    // Mood
    /// Irritability
    Irritability,
    /// Anxiety
    Anxiety,
    /// Mood swings
    MoodSwings,
    /// Sadness
    Sadness,
    /// Calm
    Calm,
    /// Happy
    Happy,

    // Energy
    /// Fatigue
    Fatigue,
    /// Low energy
    LowEnergy,
    /// High energy
    HighEnergy,

    // Sleep
    /// Trouble falling or staying asleep
    Insomnia,
    /// Poor sleep quality
    PoorSleep,
    /// Good sleep quality
    GoodSleep,

    // Appetite
    /// Food cravings
    Cravings,
    /// Increased appetite
    IncreasedAppetite,
    /// Decreased appetite
    DecreasedAppetite,

    // Cervical mucus
    /// Dry or absent mucus
    CmDry,
    /// Sticky mucus
    CmSticky,
    /// Creamy mucus
    CmCreamy,
    /// Watery mucus
    CmWatery,
    /// Clear, stretchy egg-white mucus
    CmEggwhite,

    // Libido
    /// Low libido
    LibidoLow,
    /// High libido
    LibidoHigh,
}

/// Static description of one symptom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomInfo {
    /// The symptom described
    pub symptom: SymptomType,
    /// Stable wire key (`cm_eggwhite`)
    pub key: &'static str,
    /// Human-readable label used in messages
    pub label: &'static str,
    /// Logging category
    pub category: SymptomCategory,
    /// Phases the symptom is characteristic of
    pub tags: SymptomTags,
}

const fn entry(
    symptom: SymptomType,
    key: &'static str,
    label: &'static str,
    category: SymptomCategory,
    tags: SymptomTags,
) -> SymptomInfo {
    SymptomInfo {
        symptom,
        key,
        label,
        category,
        tags,
    }
}

const NONE: SymptomTags = SymptomTags::empty();
const PMS: SymptomTags = SymptomTags::PMS;
const OVULATION: SymptomTags = SymptomTags::OVULATION;
const PERIOD: SymptomTags = SymptomTags::PERIOD;

/// Symptom catalog, indexed by `SymptomType` discriminant
static SYMPTOM_CATALOG: [SymptomInfo; SymptomType::COUNT] = {
    use SymptomCategory as C;
    use SymptomType as S;
    [
        entry(S::Spotting, "spotting", "spotting", C::Bleeding, PERIOD),
        entry(S::LightFlow, "light_flow", "light flow", C::Bleeding, PERIOD),
        entry(S::MediumFlow, "medium_flow", "medium flow", C::Bleeding, PERIOD),
        entry(S::HeavyFlow, "heavy_flow", "heavy flow", C::Bleeding, PERIOD),
        entry(S::Cramps, "cramps", "cramps", C::Pain, PMS.union(PERIOD)),
        entry(S::Headache, "headache", "headache", C::Pain, PMS),
        entry(S::Migraine, "migraine", "migraine", C::Pain, NONE),
        entry(S::BackPain, "back_pain", "back pain", C::Pain, PMS.union(PERIOD)),
        entry(S::OvulationPain, "ovulation_pain", "ovulation pain", C::Pain, OVULATION),
        entry(S::JointPain, "joint_pain", "joint pain", C::Pain, NONE),
        entry(S::Bloating, "bloating", "bloating", C::Physical, PMS),
        entry(S::BreastTenderness, "breast_tenderness", "breast tenderness", C::Physical, PMS),
        entry(S::Acne, "acne", "acne", C::Physical, PMS),
        entry(S::Nausea, "nausea", "nausea", C::Physical, NONE),
        entry(S::HotFlashes, "hot_flashes", "hot flashes", C::Physical, NONE),
        entry(S::Dizziness, "dizziness", "dizziness", C::Physical, NONE),
        entry(S::Irritability, "irritability", "irritability", C::Mood, PMS),
        entry(S::Anxiety, "anxiety", "anxiety", C::Mood, PMS),
        entry(S::MoodSwings, "mood_swings", "mood swings", C::Mood, PMS),
        entry(S::Sadness, "sadness", "sadness", C::Mood, PMS),
        entry(S::Calm, "calm", "calm", C::Mood, NONE),
        entry(S::Happy, "happy", "happy", C::Mood, NONE),
        entry(S::Fatigue, "fatigue", "fatigue", C::Energy, PMS),
        entry(S::LowEnergy, "low_energy", "low energy", C::Energy, PMS),
        entry(S::HighEnergy, "high_energy", "high energy", C::Energy, OVULATION),
        entry(S::Insomnia, "insomnia", "insomnia", C::Sleep, PMS),
        entry(S::PoorSleep, "poor_sleep", "poor sleep", C::Sleep, NONE),
        entry(S::GoodSleep, "good_sleep", "good sleep", C::Sleep, NONE),
        entry(S::Cravings, "cravings", "cravings", C::Appetite, PMS),
        entry(S::IncreasedAppetite, "increased_appetite", "increased appetite", C::Appetite, PMS),
        entry(S::DecreasedAppetite, "decreased_appetite", "decreased appetite", C::Appetite, NONE),
        entry(S::CmDry, "cm_dry", "dry cervical mucus", C::CervicalMucus, NONE),
        entry(S::CmSticky, "cm_sticky", "sticky cervical mucus", C::CervicalMucus, NONE),
        entry(S::CmCreamy, "cm_creamy", "creamy cervical mucus", C::CervicalMucus, NONE),
        entry(S::CmWatery, "cm_watery", "watery cervical mucus", C::CervicalMucus, OVULATION),
        entry(S::CmEggwhite, "cm_eggwhite", "egg-white cervical mucus", C::CervicalMucus, OVULATION),
        entry(S::LibidoLow, "libido_low", "low libido", C::Libido, NONE),
        entry(S::LibidoHigh, "libido_high", "high libido", C::Libido, OVULATION),
    ]
};

impl SymptomType {
    /// Number of symptom types
    pub const COUNT: usize = 38;

    /// Catalog entry for this symptom
    #[must_use]
    pub fn info(self) -> &'static SymptomInfo {
        &SYMPTOM_CATALOG[self as usize]
    }

    /// Stable wire key
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.info().key
    }

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// Logging category
    #[must_use]
    pub fn category(self) -> SymptomCategory {
        self.info().category
    }

    /// Phases this symptom is characteristic of
    #[must_use]
    pub fn tags(self) -> SymptomTags {
        self.info().tags
    }

    /// Iterate every symptom type in catalog order
    pub fn all() -> impl Iterator<Item = Self> {
        SYMPTOM_CATALOG.iter().map(|info| info.symptom)
    }
}

impl fmt::Display for SymptomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_indexed_by_discriminant() {
        for (index, info) in SYMPTOM_CATALOG.iter().enumerate() {
            assert_eq!(info.symptom as usize, index, "{} out of order", info.key);
        }
    }

    #[test]
    fn test_catalog_keys_match_serde_names() {
        for symptom in SymptomType::all() {
            let json = serde_json::to_string(&symptom).unwrap();
            assert_eq!(json, format!("\"{}\"", symptom.as_str()));
        }
    }

    #[test]
    fn test_every_category_is_used() {
        let categories: std::collections::HashSet<_> =
            SymptomType::all().map(SymptomType::category).collect();
        assert_eq!(categories.len(), 9);
    }
}
