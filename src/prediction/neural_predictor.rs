// ABOUTME: Async wrapper that runs the cached network over a cycle history
// ABOUTME: Any load, feature, or range failure yields no prediction so callers fall back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cycle_core::constants::{bounds, neural};
use cycle_core::models::CycleRecord;
use cycle_intelligence::{prepare_features, round_half_up, FeedForwardModel, StatisticalEstimator};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::model::{ModelLoadError, ModelStore};

/// Cycle-length predictor backed by the pretrained network
#[derive(Debug, Clone)]
pub struct NeuralPredictor {
    store: Arc<ModelStore>,
    estimator: StatisticalEstimator,
}

impl NeuralPredictor {
    /// Create a predictor reading the model from `store`
    ///
    /// `estimator` supplies the average period length feature.
    #[must_use]
    pub const fn new(store: Arc<ModelStore>, estimator: StatisticalEstimator) -> Self {
        Self { store, estimator }
    }

    /// Load the model if it is not cached yet
    ///
    /// # Errors
    ///
    /// Returns the cached or fresh load failure
    pub async fn load_model(&self) -> Result<Arc<FeedForwardModel>, ModelLoadError> {
        self.store.load().await
    }

    /// Predicted next cycle length in days, or `None` when the network cannot answer
    ///
    /// Outputs outside [18, 45] after rounding are rejected.
    pub async fn predict(&self, cycles: &[CycleRecord]) -> Option<i64> {
        let model = match self.load_model().await {
            Ok(model) => model,
            Err(e) => {
                debug!(error = %e, "Neural prediction unavailable: model not loaded");
                return None;
            }
        };

        let features = prepare_features(cycles, &self.estimator)?;
        let raw = match model.infer(&features) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Neural inference failed");
                return None;
            }
        };
        if !raw.is_finite() {
            warn!("Neural inference produced a non-finite output");
            return None;
        }

        let length = round_half_up(raw);
        if (bounds::MIN_NEURAL_CYCLE_LENGTH..=bounds::MAX_NEURAL_CYCLE_LENGTH).contains(&length) {
            Some(length)
        } else {
            debug!(
                predicted = length,
                "Neural prediction outside accepted range, discarding"
            );
            None
        }
    }

    /// Logged cycles needed before the network is consulted
    #[must_use]
    pub const fn min_cycles_required() -> usize {
        neural::MIN_CYCLES_REQUIRED
    }
}
