// ABOUTME: Statistical cycle-length estimation with weighted averages, variance, and trend
// ABOUTME: Implements bounded delta extraction, least-squares regression, and luteal estimation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: day counts and window sizes are tiny

//! Statistical Estimator
//!
//! Every statistic here works on the deltas between consecutive cycle starts,
//! taken most-recent-first from a start-date-descending ordering of the
//! records. Deltas outside the physiological band (0, 60) are discarded before
//! any aggregation, so a missed log (a 70-day gap) or a duplicate entry (a
//! 0-day gap) never skews the estimate.

use cycle_core::constants::{bounds, confidence, defaults, luteal};
use cycle_core::models::{ConfidenceLevel, CycleRecord};
use cycle_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Round to the nearest integer with halves going up (`2.5 -> 3`, `-2.5 -> -2`)
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Symmetric uncertainty around a predicted start date, in days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceInterval {
    /// Days before the predicted date the period may start (non-positive)
    pub low: i64,
    /// Days after the predicted date the period may start (non-negative)
    pub high: i64,
    /// Qualitative confidence
    pub level: ConfidenceLevel,
}

impl ConfidenceInterval {
    /// Interval used when there is too little history to measure variance
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            low: -defaults::CONFIDENCE_MARGIN,
            high: defaults::CONFIDENCE_MARGIN,
            level: ConfidenceLevel::Low,
        }
    }
}

/// Direction cycle lengths are drifting in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleTrend {
    /// Cycles are getting longer
    Increasing,
    /// Cycles are getting shorter
    Decreasing,
    /// No meaningful drift
    Stable,
}

/// Least-squares fit of a value series against its index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Slope of the regression line (change per step)
    pub slope: f64,
    /// Y-intercept of the regression line
    pub intercept: f64,
    /// Coefficient of determination (goodness of fit, 0-1)
    pub r_squared: f64,
    /// Pearson correlation coefficient (-1 to 1)
    pub correlation: f64,
}

/// Summary figures for display alongside a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleStats {
    /// Rounded mean of recent cycle lengths
    pub average_cycle_length: i64,
    /// Rounded mean of recent period lengths
    pub average_period_length: i64,
    /// Number of logged cycles
    pub total_cycles: usize,
    /// Shortest valid cycle length on record
    pub shortest_cycle: Option<i64>,
    /// Longest valid cycle length on record
    pub longest_cycle: Option<i64>,
}

/// Cycle-length estimator over a sliding window of recent cycles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticalEstimator {
    window: usize,
    decay: f64,
}

impl Default for StatisticalEstimator {
    fn default() -> Self {
        Self {
            window: defaults::STATS_WINDOW,
            decay: defaults::WEIGHT_DECAY,
        }
    }
}

impl StatisticalEstimator {
    /// Create an estimator looking at `window` deltas with the given decay
    #[must_use]
    pub const fn new(window: usize, decay: f64) -> Self {
        Self { window, decay }
    }

    /// Number of deltas considered
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// All valid cycle-length deltas on record, most recent first
    #[must_use]
    pub fn valid_deltas(cycles: &[CycleRecord]) -> Vec<i64> {
        bounded_deltas(&sorted_descending(cycles))
    }

    /// Valid deltas among the `window + 1` most recent cycles, most recent first
    #[must_use]
    pub fn recent_deltas(&self, cycles: &[CycleRecord]) -> Vec<i64> {
        let mut recent = sorted_descending(cycles);
        recent.truncate(self.window + 1);
        bounded_deltas(&recent)
    }

    /// Rounded arithmetic mean of recent cycle lengths
    #[must_use]
    pub fn average_cycle_length(&self, cycles: &[CycleRecord]) -> i64 {
        if cycles.len() < 2 {
            return defaults::CYCLE_LENGTH;
        }
        let deltas = self.recent_deltas(cycles);
        mean(&deltas).map_or(defaults::CYCLE_LENGTH, round_half_up)
    }

    /// Rounded exponentially weighted mean of recent cycle lengths
    ///
    /// The most recent delta has weight 1, the one before it `decay`, then
    /// `decay^2`, and so on.
    #[must_use]
    pub fn weighted_average_cycle_length(&self, cycles: &[CycleRecord]) -> i64 {
        if cycles.len() < 2 {
            return defaults::CYCLE_LENGTH;
        }
        let deltas = self.recent_deltas(cycles);
        if deltas.is_empty() {
            return defaults::CYCLE_LENGTH;
        }

        let mut weight = 1.0;
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for &delta in &deltas {
            weighted_sum += delta as f64 * weight;
            weight_total += weight;
            weight *= self.decay;
        }

        round_half_up(weighted_sum / weight_total)
    }

    /// Rounded mean of recent period lengths (end - start + 1)
    #[must_use]
    pub fn average_period_length(&self, cycles: &[CycleRecord]) -> i64 {
        let lengths: Vec<i64> = sorted_descending(cycles)
            .into_iter()
            .filter_map(CycleRecord::period_length)
            .filter(|&length| {
                length > bounds::MIN_PERIOD_LENGTH_EXCLUSIVE
                    && length < bounds::MAX_PERIOD_LENGTH_EXCLUSIVE
            })
            .take(self.window)
            .collect();

        mean(&lengths).map_or(defaults::PERIOD_LENGTH, round_half_up)
    }

    /// Confidence interval and level derived from cycle-length variability
    #[must_use]
    pub fn prediction_confidence(&self, cycles: &[CycleRecord]) -> ConfidenceInterval {
        let deltas = self.recent_deltas(cycles);
        if cycles.len() < 3 || deltas.len() < 2 {
            return ConfidenceInterval::unknown();
        }

        let Some(average) = mean(&deltas) else {
            return ConfidenceInterval::unknown();
        };
        let stddev = population_stddev(&deltas, average);
        let margin = (confidence::MARGIN_STDDEV_MULTIPLIER * stddev).ceil() as i64;
        let coefficient_of_variation = stddev / average;

        let level = if coefficient_of_variation < confidence::HIGH_CV
            && deltas.len() >= confidence::HIGH_MIN_SAMPLES
        {
            ConfidenceLevel::High
        } else if coefficient_of_variation < confidence::MEDIUM_CV
            && deltas.len() >= confidence::MEDIUM_MIN_SAMPLES
        {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        };

        ConfidenceInterval {
            low: -margin,
            high: margin,
            level,
        }
    }

    /// Direction of cycle-length drift over the window
    #[must_use]
    pub fn cycle_trend(&self, cycles: &[CycleRecord]) -> CycleTrend {
        let mut deltas = self.recent_deltas(cycles);
        if cycles.len() < 4 || deltas.len() < 3 {
            return CycleTrend::Stable;
        }
        deltas.reverse();

        let values: Vec<f64> = deltas.iter().map(|&delta| delta as f64).collect();
        match linear_regression(&values) {
            Ok(fit) if fit.slope > confidence::TREND_SLOPE_THRESHOLD => CycleTrend::Increasing,
            Ok(fit) if fit.slope < -confidence::TREND_SLOPE_THRESHOLD => CycleTrend::Decreasing,
            _ => CycleTrend::Stable,
        }
    }

    /// Luteal phase length: shorter for short average cycles
    #[must_use]
    pub fn estimate_luteal_phase(&self, cycles: &[CycleRecord]) -> i64 {
        if cycles.len() < 2 {
            return luteal::DEFAULT_DAYS;
        }
        if self.average_cycle_length(cycles) < luteal::SHORT_CYCLE_THRESHOLD {
            luteal::SHORT_CYCLE_DAYS
        } else {
            luteal::DEFAULT_DAYS
        }
    }

    /// Summary statistics over the full history
    #[must_use]
    pub fn cycle_stats(&self, cycles: &[CycleRecord]) -> CycleStats {
        let all_deltas = Self::valid_deltas(cycles);
        CycleStats {
            average_cycle_length: self.average_cycle_length(cycles),
            average_period_length: self.average_period_length(cycles),
            total_cycles: cycles.len(),
            shortest_cycle: all_deltas.iter().copied().min(),
            longest_cycle: all_deltas.iter().copied().max(),
        }
    }
}

/// Ordinary least-squares regression of `values` against their index
///
/// # Errors
///
/// Returns an error if fewer than two values are supplied
pub fn linear_regression(values: &[f64]) -> AppResult<RegressionResult> {
    if values.len() < 2 {
        return Err(AppError::insufficient_data(format!(
            "Insufficient data points for regression: need at least 2, got {}",
            values.len()
        )));
    }

    let n = values.len() as f64;
    let x_values: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();

    let sum_x = x_values.iter().sum::<f64>();
    let sum_y = values.iter().sum::<f64>();
    let sum_xx = x_values.iter().map(|x| x * x).sum::<f64>();
    let sum_xy = x_values.iter().zip(values).map(|(x, y)| x * y).sum::<f64>();
    let sum_yy = values.iter().map(|y| y * y).sum::<f64>();

    let mean_x = sum_x / n;
    let mean_y = sum_y / n;

    let denominator = (n * mean_x).mul_add(-mean_x, sum_xx);
    if denominator.abs() < f64::EPSILON {
        return Err(AppError::insufficient_data(
            "Cannot calculate regression: zero variance in x",
        ));
    }

    let numerator = (n * mean_x).mul_add(-mean_y, sum_xy);
    let slope = numerator / denominator;
    let intercept = slope.mul_add(-mean_x, mean_y);

    let denominator_corr = (denominator * (n * mean_y).mul_add(-mean_y, sum_yy)).sqrt();
    let correlation = if denominator_corr == 0.0 {
        0.0
    } else {
        numerator / denominator_corr
    };

    Ok(RegressionResult {
        slope,
        intercept,
        r_squared: correlation * correlation,
        correlation,
    })
}

fn sorted_descending(cycles: &[CycleRecord]) -> Vec<&CycleRecord> {
    let mut sorted: Vec<&CycleRecord> = cycles.iter().collect();
    sorted.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    sorted
}

fn bounded_deltas(sorted_desc: &[&CycleRecord]) -> Vec<i64> {
    sorted_desc
        .windows(2)
        .map(|pair| (pair[0].start_date - pair[1].start_date).num_days())
        .filter(|&delta| {
            delta > bounds::MIN_CYCLE_DELTA_EXCLUSIVE && delta < bounds::MAX_CYCLE_DELTA_EXCLUSIVE
        })
        .collect()
}

fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
}

fn population_stddev(values: &[i64], average: f64) -> f64 {
    let variance = values
        .iter()
        .map(|&value| {
            let diff = value as f64 - average;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}
