// ABOUTME: Prediction configuration with defaults and environment variable overrides
// ABOUTME: Covers statistics windowing, symptom lookbacks, window anchoring, and the model source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prediction Configuration
//!
//! Environment-only configuration: every field has a default and may be
//! overridden by a `CYCLE_*` environment variable. The loaded configuration is
//! validated before use.
//!
//! | Variable | Default |
//! |---|---|
//! | `CYCLE_STATS_WINDOW` | 6 |
//! | `CYCLE_WEIGHT_DECAY` | 0.8 |
//! | `CYCLE_BASELINE_LOOKBACK_DAYS` | 3 |
//! | `CYCLE_LEARNED_LOOKBACK_DAYS` | 7 |
//! | `CYCLE_ANCHOR_FERTILE_WINDOW` | true |
//! | `CYCLE_MODEL_URL` | unset |
//! | `CYCLE_MODEL_DIR` | unset |
//! | `CYCLE_MODEL_TIMEOUT_SECS` | 30 |
//! | `CYCLE_MODEL_CONNECT_TIMEOUT_SECS` | 10 |

use cycle_core::constants::{defaults, symptoms};
use cycle_intelligence::{BaselineSymptomAnalyzer, StatisticalEstimator, SymptomProfileLearner};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Largest accepted statistics window
const MAX_STATS_WINDOW: usize = 24;

/// Largest accepted symptom lookback
const MAX_LOOKBACK_DAYS: i64 = 30;

/// Largest accepted HTTP timeout
const MAX_TIMEOUT_SECS: u64 = 300;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),
}

/// Statistical estimator tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Number of recent cycle-length deltas considered
    pub window: usize,
    /// Per-step weight decay for the weighted average
    pub weight_decay: f64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            window: defaults::STATS_WINDOW,
            weight_decay: defaults::WEIGHT_DECAY,
        }
    }
}

/// Symptom analysis lookback windows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomConfig {
    /// Days of symptoms the baseline analyzer reads (inclusive of today)
    pub baseline_lookback_days: i64,
    /// Days of symptoms matched against the learned profile (inclusive of today)
    pub learned_lookback_days: i64,
}

impl Default for SymptomConfig {
    fn default() -> Self {
        Self {
            baseline_lookback_days: symptoms::BASELINE_LOOKBACK_DAYS,
            learned_lookback_days: symptoms::LEARNED_LOOKBACK_DAYS,
        }
    }
}

/// Where the model and scaler artifacts are fetched from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSourceConfig {
    /// Base URL serving `model.json` and `scaler.json`
    pub url: Option<String>,
    /// Local directory holding `model.json` and `scaler.json` (takes precedence over `url`)
    pub dir: Option<PathBuf>,
    /// HTTP request timeout
    pub timeout_secs: u64,
    /// HTTP connect timeout
    pub connect_timeout_secs: u64,
}

impl Default for ModelSourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            dir: None,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Main prediction configuration container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Statistical estimator tuning
    pub statistics: StatisticsConfig,
    /// Symptom lookback windows
    pub symptoms: SymptomConfig,
    /// Keep ovulation and the fertile window on the pre-adjustment period start
    ///
    /// When `false`, a symptom-driven shift of the next period start moves
    /// ovulation and the fertile window by the same amount.
    pub anchor_fertile_window_to_unadjusted_start: bool,
    /// Model artifact location
    pub model: ModelSourceConfig,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            statistics: StatisticsConfig::default(),
            symptoms: SymptomConfig::default(),
            anchor_fertile_window_to_unadjusted_start: true,
            model: ModelSourceConfig::default(),
        }
    }
}

impl PredictionConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for the first field outside its accepted range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.statistics.window == 0 || self.statistics.window > MAX_STATS_WINDOW {
            return Err(ConfigError::ValueOutOfRange(
                "Statistics window must be between 1 and 24 cycles",
            ));
        }
        let decay = self.statistics.weight_decay;
        if !decay.is_finite() || decay <= 0.0 || decay > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Weight decay must be in (0, 1]",
            ));
        }
        for lookback in [
            self.symptoms.baseline_lookback_days,
            self.symptoms.learned_lookback_days,
        ] {
            if !(0..=MAX_LOOKBACK_DAYS).contains(&lookback) {
                return Err(ConfigError::ValueOutOfRange(
                    "Symptom lookback must be between 0 and 30 days",
                ));
            }
        }
        if self.model.timeout_secs == 0
            || self.model.timeout_secs > MAX_TIMEOUT_SECS
            || self.model.connect_timeout_secs == 0
            || self.model.connect_timeout_secs > self.model.timeout_secs
        {
            return Err(ConfigError::ValueOutOfRange(
                "Model timeouts must be positive, at most 300s, with connect <= request",
            ));
        }
        Ok(())
    }

    /// Statistical estimator built from this configuration
    #[must_use]
    pub fn estimator(&self) -> StatisticalEstimator {
        StatisticalEstimator::new(self.statistics.window, self.statistics.weight_decay)
    }

    /// Baseline symptom analyzer built from this configuration
    #[must_use]
    pub fn baseline_analyzer(&self) -> BaselineSymptomAnalyzer {
        BaselineSymptomAnalyzer::new(self.symptoms.baseline_lookback_days)
    }

    /// Symptom profile learner built from this configuration
    #[must_use]
    pub fn symptom_learner(&self) -> SymptomProfileLearner {
        SymptomProfileLearner::new(self.symptoms.learned_lookback_days)
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Non-empty string value of an environment variable
    fn optional_env_var(env_var_name: &str) -> Option<String> {
        env::var(env_var_name)
            .ok()
            .map(|val| val.trim().to_owned())
            .filter(|val| !val.is_empty())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("CYCLE_STATS_WINDOW", &mut self.statistics.window)?;
        Self::apply_env_var("CYCLE_WEIGHT_DECAY", &mut self.statistics.weight_decay)?;

        Self::apply_env_var(
            "CYCLE_BASELINE_LOOKBACK_DAYS",
            &mut self.symptoms.baseline_lookback_days,
        )?;
        Self::apply_env_var(
            "CYCLE_LEARNED_LOOKBACK_DAYS",
            &mut self.symptoms.learned_lookback_days,
        )?;

        Self::apply_env_var(
            "CYCLE_ANCHOR_FERTILE_WINDOW",
            &mut self.anchor_fertile_window_to_unadjusted_start,
        )?;

        if let Some(url) = Self::optional_env_var("CYCLE_MODEL_URL") {
            self.model.url = Some(url);
        }
        if let Some(dir) = Self::optional_env_var("CYCLE_MODEL_DIR") {
            self.model.dir = Some(PathBuf::from(dir));
        }
        Self::apply_env_var("CYCLE_MODEL_TIMEOUT_SECS", &mut self.model.timeout_secs)?;
        Self::apply_env_var(
            "CYCLE_MODEL_CONNECT_TIMEOUT_SECS",
            &mut self.model.connect_timeout_secs,
        )?;

        Ok(self)
    }
}
