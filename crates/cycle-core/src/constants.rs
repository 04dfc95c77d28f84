// ABOUTME: Physiological bounds and statistical defaults for cycle forecasting
// ABOUTME: Groups validity ranges, fallback values, and signal thresholds by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Validity bounds applied to every statistic computed from records
pub mod bounds {
    /// Cycle-length deltas must be strictly greater than this (days)
    pub const MIN_CYCLE_DELTA_EXCLUSIVE: i64 = 0;

    /// Cycle-length deltas must be strictly less than this (days)
    pub const MAX_CYCLE_DELTA_EXCLUSIVE: i64 = 60;

    /// Period lengths must be strictly greater than this (days)
    pub const MIN_PERIOD_LENGTH_EXCLUSIVE: i64 = 0;

    /// Period lengths must be strictly less than this (days)
    pub const MAX_PERIOD_LENGTH_EXCLUSIVE: i64 = 15;

    /// Lowest accepted symptom severity
    pub const MIN_SEVERITY: u8 = 1;

    /// Highest accepted symptom severity
    pub const MAX_SEVERITY: u8 = 5;

    /// Symptom-driven adjustments are clamped to +/- this many days
    pub const MAX_DAYS_ADJUSTMENT: i64 = 5;

    /// Shortest cycle the network may predict (inclusive)
    pub const MIN_NEURAL_CYCLE_LENGTH: i64 = 18;

    /// Longest cycle the network may predict (inclusive)
    pub const MAX_NEURAL_CYCLE_LENGTH: i64 = 45;
}

/// Fallback values used when history is too thin
pub mod defaults {
    /// Cycle length assumed without history (days)
    pub const CYCLE_LENGTH: i64 = 28;

    /// Period length assumed without history (days)
    pub const PERIOD_LENGTH: i64 = 5;

    /// Cycle day assumed when no cycle has been logged
    pub const CYCLE_DAY: i64 = 14;

    /// Number of recent cycles the estimator looks at
    pub const STATS_WINDOW: usize = 6;

    /// Exponential decay applied to older cycle deltas
    pub const WEIGHT_DECAY: f64 = 0.8;

    /// Half-width of the confidence interval when variance is unknown (days)
    pub const CONFIDENCE_MARGIN: i64 = 5;
}

/// Luteal phase estimation
pub mod luteal {
    /// Typical luteal phase length (days)
    pub const DEFAULT_DAYS: i64 = 14;

    /// Luteal phase assumed for short cycles (days)
    pub const SHORT_CYCLE_DAYS: i64 = 12;

    /// Average cycle lengths below this are treated as short
    pub const SHORT_CYCLE_THRESHOLD: i64 = 26;

    /// Days before ovulation included in the fertile window
    pub const FERTILE_DAYS_BEFORE_OVULATION: i64 = 5;

    /// Days after ovulation included in the fertile window
    pub const FERTILE_DAYS_AFTER_OVULATION: i64 = 1;
}

/// Statistical confidence and trend thresholds
pub mod confidence {
    /// Multiplier applied to the standard deviation for the interval margin
    pub const MARGIN_STDDEV_MULTIPLIER: f64 = 1.5;

    /// Coefficient of variation below which confidence is high
    pub const HIGH_CV: f64 = 0.05;

    /// Deltas required for high confidence
    pub const HIGH_MIN_SAMPLES: usize = 4;

    /// Coefficient of variation below which confidence is medium
    pub const MEDIUM_CV: f64 = 0.1;

    /// Deltas required for medium confidence
    pub const MEDIUM_MIN_SAMPLES: usize = 3;

    /// Regression slope (days per cycle) separating a trend from noise
    pub const TREND_SLOPE_THRESHOLD: f64 = 0.5;
}

/// Neural network feature layout
pub mod neural {
    /// Number of recent cycle deltas fed to the network
    pub const SEQUENCE_LENGTH: usize = 6;

    /// Total feature vector width
    pub const FEATURE_COUNT: usize = 13;

    /// Age placeholder used in place of an unavailable personal attribute
    pub const PLACEHOLDER_AGE: f64 = 30.0;

    /// BMI placeholder used in place of an unavailable personal attribute
    pub const PLACEHOLDER_BMI: f64 = 22.0;

    /// Cycles needed before the network is consulted (six deltas plus the anchor)
    pub const MIN_CYCLES_REQUIRED: usize = SEQUENCE_LENGTH + 1;
}

/// Symptom analysis windows
pub mod symptoms {
    /// Days of symptom logs the baseline analyzer considers
    pub const BASELINE_LOOKBACK_DAYS: i64 = 3;

    /// Days of symptom logs that can trigger a learned signal
    pub const LEARNED_LOOKBACK_DAYS: i64 = 7;

    /// Days before a cycle start still attributed to that cycle
    pub const PRE_CYCLE_LOOKBACK_DAYS: i64 = 7;

    /// Shortest start-to-start gap counted as a completed cycle (inclusive)
    pub const MIN_COMPLETED_CYCLE_DAYS: i64 = 15;

    /// Longest start-to-start gap counted as a completed cycle (inclusive)
    pub const MAX_COMPLETED_CYCLE_DAYS: i64 = 60;

    /// Occurrences needed before a symptom becomes a learned pattern
    pub const MIN_PATTERN_OCCURRENCES: usize = 2;

    /// Severity at or above which a symptom counts as severe
    pub const SEVERE_THRESHOLD: u8 = 3;

    /// Pattern frequency below which a learned pattern is ignored for matching
    pub const MIN_MATCH_FREQUENCY: f64 = 0.3;
}
