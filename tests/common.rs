// ABOUTME: Shared fixtures for cycle_forecast integration tests
// ABOUTME: Provides quiet test logging, an in-memory artifact source, and record builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use cycle_forecast::intelligence::{ModelArchitecture, ModelArtifact, ScalerParams};
use cycle_forecast::model::{ArtifactSource, ModelLoadError};
use cycle_forecast::models::{CycleRecord, SymptomRecord, SymptomType};
use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;
use std::time::Duration as StdDuration;
use tokio::time::sleep;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls verbosity; default to WARN for quiet tests
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

/// Cycles starting at `first_start`, separated by `deltas` (oldest first), each with a 5-day period
pub fn cycles_from_deltas(first_start: &str, deltas: &[i64]) -> Vec<CycleRecord> {
    let mut start = date(first_start);
    let mut starts = vec![start];
    for delta in deltas {
        start += Duration::days(*delta);
        starts.push(start);
    }
    starts
        .into_iter()
        .enumerate()
        .map(|(index, start)| {
            CycleRecord::new(format!("c-{index}"), start).with_end_date(start + Duration::days(4))
        })
        .collect()
}

pub fn symptom(day: NaiveDate, symptom_type: SymptomType, severity: u8) -> SymptomRecord {
    SymptomRecord::new(format!("s-{day}-{symptom_type}"), day, symptom_type, severity)
}

/// Scaler that leaves features untouched
pub fn identity_scaler() -> ScalerParams {
    ScalerParams {
        mean: vec![0.0; 13],
        scale: vec![1.0; 13],
        feature_names: Vec::new(),
    }
}

/// 13 -> 2 -> 1 relu network returning the most recent delta plus `output_bias`
pub fn recent_delta_artifact(output_bias: f64) -> ModelArtifact {
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

/// In-memory artifact source that counts fetches
pub struct CountingSource {
    artifact: ModelArtifact,
    scaler: ScalerParams,
    failure: Option<ModelLoadError>,
    delay: Option<StdDuration>,
    model_fetches: AtomicUsize,
    scaler_fetches: AtomicUsize,
}

impl CountingSource {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self {
            artifact,
            scaler: identity_scaler(),
            failure: None,
            delay: None,
            model_fetches: AtomicUsize::new(0),
            scaler_fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing(failure: ModelLoadError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(recent_delta_artifact(0.0))
        }
    }

    pub fn with_scaler(mut self, scaler: ScalerParams) -> Self {
        self.scaler = scaler;
        self
    }

    pub fn with_delay_ms(mut self, millis: u64) -> Self {
        self.delay = Some(StdDuration::from_millis(millis));
        self
    }

    pub fn model_fetches(&self) -> usize {
        self.model_fetches.load(Ordering::SeqCst)
    }

    pub fn scaler_fetches(&self) -> usize {
        self.scaler_fetches.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
    }
}

#[async_trait]
impl ArtifactSource for CountingSource {
    async fn fetch_model(&self) -> Result<ModelArtifact, ModelLoadError> {
        self.model_fetches.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(self.artifact.clone()),
        }
    }

    async fn fetch_scaler(&self) -> Result<ScalerParams, ModelLoadError> {
        self.scaler_fetches.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        Ok(self.scaler.clone())
    }

    fn describe(&self) -> String {
        "memory".to_owned()
    }
}
