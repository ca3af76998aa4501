//! Application state

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::{info, warn};
use weatherfit_model::{ModelConfig, ModelStore};

use crate::config::ServerConfig;
use crate::service::PredictionService;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Prediction service over the model store
    pub service: PredictionService,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Initialize application state, loading the model once.
    ///
    /// A model that fails to load is not fatal; the server starts anyway and
    /// answers predictions with `Model not loaded`.
    pub fn new(config: ServerConfig, metrics_handle: Option<PrometheusHandle>) -> Self {
        info!("Loading model from {:?}", config.model_path);

        let store = ModelStore::new(ModelConfig::from_local(&config.model_path));
        if store.initialize() {
            info!("Server ready to accept predictions");
        } else {
            warn!("Server starting without model - predictions will fail");
        }

        Self::with_store(config, Arc::new(store), metrics_handle)
    }

    /// Build state around an existing store
    pub fn with_store(
        config: ServerConfig,
        store: Arc<ModelStore>,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            service: PredictionService::new(store),
            metrics_handle,
        }
    }
}
