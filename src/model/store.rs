// ABOUTME: Lazily loaded model cache with a single in-flight fetch shared by concurrent callers
// ABOUTME: Caches the validated model or the load failure until reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use cycle_intelligence::FeedForwardModel;
use futures_util::future::{try_join, BoxFuture, Shared};
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::{ArtifactSource, ModelLoadError};

type LoadResult = Result<Arc<FeedForwardModel>, ModelLoadError>;
type SharedLoad = Shared<BoxFuture<'static, LoadResult>>;

/// Observable lifecycle of the cached model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelState {
    /// Nothing fetched yet
    Unloaded,
    /// A fetch is in flight
    Loading,
    /// Model validated and cached
    Ready,
    /// Last fetch failed; the failure is cached until reset
    Failed,
}

enum State {
    Unloaded,
    Loading(SharedLoad),
    Ready(Arc<FeedForwardModel>),
    Failed(ModelLoadError),
}

/// Owns the network and scaler for the lifetime of the service
///
/// The first call to [`ModelStore::load`] starts the fetch; callers arriving
/// while it is in flight await the same future rather than starting another.
/// Once settled the outcome is returned to every later caller without
/// touching the source again.
pub struct ModelStore {
    source: Arc<dyn ArtifactSource>,
    state: Mutex<State>,
}

impl fmt::Debug for ModelStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelStore")
            .field("source", &self.source.describe())
            .finish_non_exhaustive()
    }
}

impl ModelStore {
    /// Create an unloaded store reading from `source`
    #[must_use]
    pub fn new(source: Arc<dyn ArtifactSource>) -> Self {
        Self {
            source,
            state: Mutex::new(State::Unloaded),
        }
    }

    /// Return the cached model, fetching it on first use
    ///
    /// # Errors
    ///
    /// Returns the fetch, parse, or validation failure. A failure is cached and
    /// returned to later callers until [`ModelStore::reset`] is called.
    pub async fn load(&self) -> LoadResult {
        let pending = {
            let mut state = self.state.lock().await;
            match &*state {
                State::Ready(model) => return Ok(Arc::clone(model)),
                State::Failed(error) => return Err(error.clone()),
                State::Loading(pending) => pending.clone(),
                State::Unloaded => {
                    let pending = Self::fetch(Arc::clone(&self.source)).boxed().shared();
                    *state = State::Loading(pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;
        self.settle(&pending, &result).await;
        result
    }

    /// Current lifecycle state
    pub async fn state(&self) -> ModelState {
        match &*self.state.lock().await {
            State::Unloaded => ModelState::Unloaded,
            State::Loading(_) => ModelState::Loading,
            State::Ready(_) => ModelState::Ready,
            State::Failed(_) => ModelState::Failed,
        }
    }

    /// Drop the cached model or failure so the next load fetches again
    ///
    /// An in-flight fetch is awaited first, so callers already waiting on it
    /// still receive its result.
    pub async fn reset(&self) {
        loop {
            let pending = {
                let mut state = self.state.lock().await;
                if let State::Loading(pending) = &*state {
                    pending.clone()
                } else {
                    *state = State::Unloaded;
                    return;
                }
            };
            let result = pending.clone().await;
            self.settle(&pending, &result).await;
        }
    }

    /// Record the outcome of `pending` if it is still the current fetch
    async fn settle(&self, pending: &SharedLoad, result: &LoadResult) {
        let mut state = self.state.lock().await;
        if let State::Loading(current) = &*state {
            if current.ptr_eq(pending) {
                *state = match result {
                    Ok(model) => State::Ready(Arc::clone(model)),
                    Err(error) => State::Failed(error.clone()),
                };
            }
        }
    }

    async fn fetch(source: Arc<dyn ArtifactSource>) -> LoadResult {
        let location = source.describe();
        let outcome = match try_join(source.fetch_model(), source.fetch_scaler()).await {
            Ok((artifact, scaler)) => FeedForwardModel::from_artifact(artifact, scaler)
                .map_err(|e| ModelLoadError::MalformedArtifact(e.message)),
            Err(error) => Err(error),
        };

        match outcome {
            Ok(model) => {
                info!(source = %location, inputs = model.input_size(), "Cycle model loaded");
                Ok(Arc::new(model))
            }
            Err(error) => {
                warn!(source = %location, error = %error, "Cycle model failed to load");
                Err(error)
            }
        }
    }
}
