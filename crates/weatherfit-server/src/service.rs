//! Prediction service
//!
//! Stateless request handling on top of the model store: readiness check,
//! payload validation, inference, and response shaping. Nothing here is
//! HTTP-specific; the routes layer maps the returned errors to status codes.

use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use weatherfit_core::{
    validate_payload, Error, HealthStatus, PredictionResult, Result, ValidatedFeatures,
};
use weatherfit_model::ModelStore;

/// Validates requests and orchestrates predictions against the model store
#[derive(Clone)]
pub struct PredictionService {
    store: Arc<ModelStore>,
}

impl PredictionService {
    /// Create a service over an already-initialized store
    pub fn new(store: Arc<ModelStore>) -> Self {
        Self { store }
    }

    /// Get the underlying store
    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    /// Validate `payload` and predict.
    ///
    /// Readiness is checked before the payload is looked at, so a server
    /// without a model answers `ModelNotLoaded` to every request.
    pub fn handle_predict(&self, payload: &Value) -> Result<PredictionResult> {
        if !self.store.is_ready() {
            return Err(Error::ModelNotLoaded);
        }

        let ValidatedFeatures { vector, input } = validate_payload(payload)?;
        debug!("Predicting for features {:?}", vector.values());

        let start = Instant::now();
        let label = self.store.predict(&vector).map_err(|e| match e {
            Error::ModelNotLoaded | Error::PredictionFailed(_) => e,
            other => Error::prediction_failed(other.to_string()),
        })?;
        metrics::histogram!("weatherfit_inference_latency_us")
            .record(start.elapsed().as_micros() as f64);
        metrics::counter!("weatherfit_predictions_total", "label" => label.as_u8().to_string())
            .increment(1);

        Ok(PredictionResult::with_input(label, input))
    }

    /// Report liveness and model readiness. Never fails.
    pub fn handle_health(&self) -> HealthStatus {
        HealthStatus::healthy(self.store.is_ready())
    }
}
