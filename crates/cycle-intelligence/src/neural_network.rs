// ABOUTME: Feed-forward network inference over a pretrained cycle-length regressor
// ABOUTME: Feature extraction, scaler normalization, shape validation, and the forward pass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: deltas are bounded to (0, 60)

//! Neural Network Inference
//!
//! The network is a small multi-layer perceptron trained offline on
//! historical cycle data. Its architecture is read from the artifact rather
//! than hardcoded, and the artifact is validated against its own declared
//! shape before use: a transposed or truncated weight matrix would otherwise
//! produce plausible numbers with no runtime failure.
//!
//! Weight matrices are stored `[input][output]`, so a layer computes
//! `out[j] = bias[j] + sum_i(input[i] * weights[i][j])`.

use cycle_core::constants::neural::{
    FEATURE_COUNT, PLACEHOLDER_AGE, PLACEHOLDER_BMI, SEQUENCE_LENGTH,
};
use cycle_core::models::CycleRecord;
use cycle_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::statistics::StatisticalEstimator;

/// Declared network shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelArchitecture {
    /// Width of the feature vector
    pub input_size: usize,
    /// Width of each hidden layer, input side first
    pub hidden_layers: Vec<usize>,
    /// Width of the output layer
    pub output_size: usize,
    /// Hidden-layer activation name (`relu`, `identity`, `tanh`, `logistic`)
    pub activation: String,
}

/// Serialized network as produced by the training pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Declared shape
    pub architecture: ModelArchitecture,
    /// Per-layer weight matrices, `[layer][input][output]`
    pub weights: Vec<Vec<Vec<f64>>>,
    /// Per-layer bias vectors, `[layer][output]`
    pub biases: Vec<Vec<f64>>,
}

/// Standard-scaler parameters aligned by index with the feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    /// Per-feature training mean
    pub mean: Vec<f64>,
    /// Per-feature training standard deviation
    pub scale: Vec<f64>,
    /// Feature names, informational only
    #[serde(default)]
    pub feature_names: Vec<String>,
}

/// Element-wise activation function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// `max(0, x)`
    Relu,
    /// `x`
    Identity,
    /// `tanh(x)`
    Tanh,
    /// `1 / (1 + e^-x)`
    Logistic,
}

impl Activation {
    /// Parse an activation name as written by the training pipeline
    ///
    /// # Errors
    ///
    /// Returns `MalformedArtifact` for unknown names
    pub fn parse(name: &str) -> AppResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "relu" => Ok(Self::Relu),
            "identity" | "linear" => Ok(Self::Identity),
            "tanh" => Ok(Self::Tanh),
            "logistic" | "sigmoid" => Ok(Self::Logistic),
            other => Err(AppError::malformed_artifact(format!(
                "Unsupported activation '{other}'"
            ))),
        }
    }

    fn apply(self, value: f64) -> f64 {
        match self {
            Self::Relu => value.max(0.0),
            Self::Identity => value,
            Self::Tanh => value.tanh(),
            Self::Logistic => 1.0 / (1.0 + (-value).exp()),
        }
    }
}

/// One fully connected layer
#[derive(Debug, Clone, PartialEq)]
struct DenseLayer {
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    activation: Activation,
}

impl DenseLayer {
    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut output = self.biases.clone();
        for (value, row) in input.iter().zip(&self.weights) {
            for (out, weight) in output.iter_mut().zip(row) {
                *out = value.mul_add(*weight, *out);
            }
        }
        for out in &mut output {
            *out = self.activation.apply(*out);
        }
        output
    }
}

/// Validated, ready-to-run network plus its input scaler
#[derive(Debug, Clone, PartialEq)]
pub struct FeedForwardModel {
    layers: Vec<DenseLayer>,
    scaler: ScalerParams,
}

impl FeedForwardModel {
    /// Validate an artifact against its declared architecture and build the model
    ///
    /// The declared activation applies to hidden layers only; the final layer
    /// is always linear.
    ///
    /// # Errors
    ///
    /// Returns `MalformedArtifact` when any array disagrees with the declared
    /// shape, the scaler does not match the input width, or values are not finite
    pub fn from_artifact(artifact: ModelArtifact, scaler: ScalerParams) -> AppResult<Self> {
        let ModelArtifact {
            architecture,
            weights,
            biases,
        } = artifact;

        if architecture.input_size != FEATURE_COUNT {
            return Err(AppError::malformed_artifact(format!(
                "Model expects {} inputs but the feature vector has {FEATURE_COUNT}",
                architecture.input_size
            )));
        }
        if architecture.output_size != 1 {
            return Err(AppError::malformed_artifact(format!(
                "Model must have a single output, declared {}",
                architecture.output_size
            )));
        }

        let layer_count = architecture.hidden_layers.len() + 1;
        if weights.len() != layer_count || biases.len() != layer_count {
            return Err(AppError::malformed_artifact(format!(
                "Expected {layer_count} layers, found {} weight matrices and {} bias vectors",
                weights.len(),
                biases.len()
            )));
        }

        let hidden_activation = Activation::parse(&architecture.activation)?;

        let mut sizes = Vec::with_capacity(layer_count + 1);
        sizes.push(architecture.input_size);
        sizes.extend(&architecture.hidden_layers);
        sizes.push(architecture.output_size);

        let mut layers = Vec::with_capacity(layer_count);
        for (index, (layer_weights, layer_biases)) in weights.into_iter().zip(biases).enumerate() {
            let (fan_in, fan_out) = (sizes[index], sizes[index + 1]);
            validate_layer(index, &layer_weights, &layer_biases, fan_in, fan_out)?;
            let activation = if index + 1 == layer_count {
                Activation::Identity
            } else {
                hidden_activation
            };
            layers.push(DenseLayer {
                weights: layer_weights,
                biases: layer_biases,
                activation,
            });
        }

        validate_scaler(&scaler, architecture.input_size)?;

        Ok(Self { layers, scaler })
    }

    /// Number of input features
    #[must_use]
    pub fn input_size(&self) -> usize {
        self.scaler.mean.len()
    }

    /// Standardize a raw feature vector with the training scaler
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the vector width differs from the scaler's
    pub fn normalize(&self, features: &[f64]) -> AppResult<Vec<f64>> {
        if features.len() != self.scaler.mean.len() {
            return Err(AppError::invalid_input(format!(
                "Feature vector has {} values, scaler expects {}",
                features.len(),
                self.scaler.mean.len()
            )));
        }
        Ok(features
            .iter()
            .zip(self.scaler.mean.iter().zip(&self.scaler.scale))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect())
    }

    /// Run the network on an already normalized vector and return its scalar output
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the vector width differs from the input layer
    pub fn forward_pass(&self, input: &[f64]) -> AppResult<f64> {
        if input.len() != self.input_size() {
            return Err(AppError::invalid_input(format!(
                "Input vector has {} values, network expects {}",
                input.len(),
                self.input_size()
            )));
        }

        let mut activations = input.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }

        activations
            .first()
            .copied()
            .ok_or_else(|| AppError::internal("Network produced no output"))
    }

    /// Normalize then run the network
    ///
    /// # Errors
    ///
    /// Propagates width mismatches from `normalize` and `forward_pass`
    pub fn infer(&self, features: &[f64]) -> AppResult<f64> {
        let normalized = self.normalize(features)?;
        self.forward_pass(&normalized)
    }
}

/// Build the 13-value feature vector, or `None` with fewer than six valid deltas
///
/// Layout: six most recent deltas (most recent first), their mean, population
/// standard deviation, minimum, maximum, the average period length, and the
/// age and BMI placeholders. The period length is averaged over the
/// `estimator` window.
#[must_use]
pub fn prepare_features(
    cycles: &[CycleRecord],
    estimator: &StatisticalEstimator,
) -> Option<Vec<f64>> {
    let deltas = StatisticalEstimator::valid_deltas(cycles);
    if deltas.len() < SEQUENCE_LENGTH {
        return None;
    }

    let recent: Vec<f64> = deltas[..SEQUENCE_LENGTH]
        .iter()
        .map(|&delta| delta as f64)
        .collect();
    let count = recent.len() as f64;
    let mean = recent.iter().sum::<f64>() / count;
    let variance = recent.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count;
    let min = recent.iter().copied().fold(f64::INFINITY, f64::min);
    let max = recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let period_length = estimator.average_period_length(cycles) as f64;

    let mut features = Vec::with_capacity(FEATURE_COUNT);
    features.extend(&recent);
    features.extend([
        mean,
        variance.sqrt(),
        min,
        max,
        period_length,
        PLACEHOLDER_AGE,
        PLACEHOLDER_BMI,
    ]);
    Some(features)
}

fn validate_layer(
    index: usize,
    weights: &[Vec<f64>],
    biases: &[f64],
    fan_in: usize,
    fan_out: usize,
) -> AppResult<()> {
    if weights.len() != fan_in {
        return Err(AppError::malformed_artifact(format!(
            "Layer {index}: expected {fan_in} weight rows, found {}",
            weights.len()
        )));
    }
    if let Some((row, values)) = weights
        .iter()
        .enumerate()
        .find(|(_, values)| values.len() != fan_out)
    {
        return Err(AppError::malformed_artifact(format!(
            "Layer {index}: weight row {row} has {} columns, expected {fan_out}",
            values.len()
        )));
    }
    if biases.len() != fan_out {
        return Err(AppError::malformed_artifact(format!(
            "Layer {index}: expected {fan_out} biases, found {}",
            biases.len()
        )));
    }
    let all_finite = weights.iter().flatten().chain(biases).all(|v| v.is_finite());
    if !all_finite {
        return Err(AppError::malformed_artifact(format!(
            "Layer {index}: non-finite weight or bias"
        )));
    }
    Ok(())
}

fn validate_scaler(scaler: &ScalerParams, input_size: usize) -> AppResult<()> {
    if scaler.mean.len() != input_size || scaler.scale.len() != input_size {
        return Err(AppError::malformed_artifact(format!(
            "Scaler has {} means and {} scales, model expects {input_size}",
            scaler.mean.len(),
            scaler.scale.len()
        )));
    }
    if scaler.mean.iter().any(|m| !m.is_finite())
        || scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0)
    {
        return Err(AppError::malformed_artifact(
            "Scaler contains non-finite values or a zero scale",
        ));
    }
    Ok(())
}
