//! Single-model store.
//!
//! The store starts `Unloaded` and moves to `Loaded` or `Failed` on the first
//! call to [`ModelStore::initialize`]. There is no way back: later calls
//! report the recorded outcome without touching the disk again, and a loaded
//! model is shared read-only for the rest of the process.

use crate::classifier::{BinaryClassifier, ModelMetadata};
use crate::model_loader::ModelConfig;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};
use weatherfit_core::{Error, FeatureVector, Label, Result};

/// Lifecycle of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// `initialize` has not run yet
    Unloaded,
    /// A model is ready to predict
    Loaded,
    /// Loading failed; no predictions are possible
    Failed,
}

enum LoadOutcome {
    Loaded {
        model: Arc<dyn BinaryClassifier>,
        metadata: Option<ModelMetadata>,
    },
    Failed(String),
}

/// Owns the one classifier the server predicts with
pub struct ModelStore {
    config: ModelConfig,
    slot: OnceLock<LoadOutcome>,
}

impl ModelStore {
    /// Create an unloaded store for the given artifact
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            slot: OnceLock::new(),
        }
    }

    /// Create a store that already holds `model`
    pub fn with_model(model: Arc<dyn BinaryClassifier>) -> Self {
        let store = Self::new(ModelConfig::default());
        let _ = store.slot.set(LoadOutcome::Loaded {
            model,
            metadata: None,
        });
        store
    }

    /// Load the artifact if this has not been attempted yet.
    ///
    /// Returns whether a model is loaded. Failures are logged and recorded,
    /// never returned.
    pub fn initialize(&self) -> bool {
        let outcome = self.slot.get_or_init(|| match self.config.load() {
            Ok(tree) => {
                let metadata = tree.metadata().clone();
                info!(
                    "Model '{}' loaded from {:?} ({} nodes, depth {})",
                    metadata.name, self.config.path, metadata.n_nodes, metadata.depth
                );
                LoadOutcome::Loaded {
                    model: Arc::new(tree),
                    metadata: Some(metadata),
                }
            }
            Err(e) => {
                warn!("Failed to load model from {:?}: {}", self.config.path, e);
                LoadOutcome::Failed(e.to_string())
            }
        });

        matches!(outcome, LoadOutcome::Loaded { .. })
    }

    /// True iff a model is loaded
    pub fn is_ready(&self) -> bool {
        self.model().is_some()
    }

    pub fn state(&self) -> ModelState {
        match self.slot.get() {
            None => ModelState::Unloaded,
            Some(LoadOutcome::Loaded { .. }) => ModelState::Loaded,
            Some(LoadOutcome::Failed(_)) => ModelState::Failed,
        }
    }

    /// Why loading failed, if it did
    pub fn failure(&self) -> Option<&str> {
        match self.slot.get() {
            Some(LoadOutcome::Failed(reason)) => Some(reason),
            _ => None,
        }
    }

    /// Metadata of the loaded artifact
    pub fn metadata(&self) -> Option<&ModelMetadata> {
        match self.slot.get() {
            Some(LoadOutcome::Loaded { metadata, .. }) => metadata.as_ref(),
            _ => None,
        }
    }

    /// Where the artifact is read from
    pub fn model_path(&self) -> &Path {
        &self.config.path
    }

    fn model(&self) -> Option<&Arc<dyn BinaryClassifier>> {
        match self.slot.get() {
            Some(LoadOutcome::Loaded { model, .. }) => Some(model),
            _ => None,
        }
    }

    /// Predict with the loaded model
    pub fn predict(&self, features: &FeatureVector) -> Result<Label> {
        let model = self.model().ok_or(Error::ModelNotLoaded)?;
        model.predict(features)
    }
}
