// ABOUTME: Artifact sources that deliver the model and scaler documents
// ABOUTME: HTTP source with configured timeouts and a filesystem source for local artifacts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use cycle_intelligence::{ModelArtifact, ScalerParams};
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tracing::debug;

use super::{ModelLoadError, MODEL_FILE, SCALER_FILE};
use crate::config::ModelSourceConfig;

/// Delivers the two model artifact documents
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Fetch and parse the network document
    async fn fetch_model(&self) -> Result<ModelArtifact, ModelLoadError>;

    /// Fetch and parse the scaler document
    async fn fetch_scaler(&self) -> Result<ScalerParams, ModelLoadError>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}

/// Artifacts served over HTTP from a base URL
#[derive(Debug, Clone)]
pub struct HttpArtifactSource {
    client: Client,
    base_url: String,
}

impl HttpArtifactSource {
    /// Create a source with its own client using the given timeouts
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout_secs: u64, connect_timeout_secs: u64) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self::with_client(client, base_url)
    }

    /// Create a source that reuses an existing client
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, file: &str) -> String {
        format!("{}/{file}", self.base_url.trim_end_matches('/'))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, ModelLoadError> {
        let url = self.url_for(file);
        debug!(url = %url, "Fetching model artifact");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ModelLoadError::Fetch(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelLoadError::ExternalService {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ModelLoadError::Fetch(format!("{url}: {e}")))?;
        serde_json::from_slice(&body).map_err(|e| ModelLoadError::Parse(format!("{url}: {e}")))
    }
}

#[async_trait]
impl ArtifactSource for HttpArtifactSource {
    async fn fetch_model(&self) -> Result<ModelArtifact, ModelLoadError> {
        self.fetch_json(MODEL_FILE).await
    }

    async fn fetch_scaler(&self) -> Result<ScalerParams, ModelLoadError> {
        self.fetch_json(SCALER_FILE).await
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Artifacts read from a local directory
#[derive(Debug, Clone)]
pub struct FileArtifactSource {
    dir: PathBuf,
}

impl FileArtifactSource {
    /// Create a source reading `model.json` and `scaler.json` from `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, ModelLoadError> {
        let path = self.dir.join(file);
        let bytes = fs::read(&path)
            .await
            .map_err(|e| ModelLoadError::Fetch(format!("{}: {e}", path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ModelLoadError::Parse(format!("{}: {e}", path.display())))
    }
}

#[async_trait]
impl ArtifactSource for FileArtifactSource {
    async fn fetch_model(&self) -> Result<ModelArtifact, ModelLoadError> {
        self.read_json(MODEL_FILE).await
    }

    async fn fetch_scaler(&self) -> Result<ScalerParams, ModelLoadError> {
        self.read_json(SCALER_FILE).await
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Build the configured artifact source, preferring a local directory over a URL
///
/// Returns `None` when neither location is configured.
#[must_use]
pub fn source_from_config(config: &ModelSourceConfig) -> Option<Arc<dyn ArtifactSource>> {
    if let Some(dir) = &config.dir {
        return Some(Arc::new(FileArtifactSource::new(dir.clone())));
    }
    config.url.as_ref().map(|url| {
        Arc::new(HttpArtifactSource::new(
            url.clone(),
            config.timeout_secs,
            config.connect_timeout_secs,
        )) as Arc<dyn ArtifactSource>
    })
}
