//! HTTP routes and handlers

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error, info, warn};
use weatherfit_core::{Error, HealthStatus, PredictionResult};

use crate::config::ServerConfig;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/predict", post(predict));

    if state.metrics_handle.is_some() {
        router = router.route("/metrics", get(render_metrics));
    }

    let router = router.fallback(fallback).with_state(state);
    with_middleware(router, &config)
}

fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    let router = router
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic));

    if config.cors.enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    metrics::counter!("weatherfit_requests_total", "endpoint" => "health").increment(1);
    Json(state.service.handle_health())
}

async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics_handle {
        Some(handle) => handle.render().into_response(),
        None => not_found().into_response(),
    }
}

/// Main prediction handler.
///
/// The body is read as raw bytes rather than with the `Json` extractor, so a
/// missing content type is accepted and every failure, including an
/// oversized body, is reported in the API's own error shape. Readiness is
/// checked before the body is looked at.
async fn predict(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    metrics::counter!("weatherfit_requests_total", "endpoint" => "predict").increment(1);

    if !state.service.store().is_ready() {
        return Err(Error::ModelNotLoaded.into());
    }

    let body = body.map_err(ApiError::Body)?;
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        Error::prediction_failed(format!("Failed to decode JSON object: {}", e))
    })?;
    let result = state.service.handle_predict(&payload)?;

    info!(
        "Prediction {} ({})",
        result.prediction.as_u8(),
        result.message
    );
    Ok(Json(result))
}

async fn fallback() -> (StatusCode, Json<ErrorBody>) {
    not_found()
}

fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new(
            "Endpoint not found",
            "Available endpoints: /health (GET), /predict (POST)",
        )),
    )
}

/// Turn a handler panic into the generic 500 body
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!("Request handler panicked: {}", detail);
    metrics::counter!("weatherfit_errors_total", "kind" => "panic").increment(1);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(
            "Internal server error",
            "Something went wrong on the server",
        )),
    )
        .into_response()
}

/// Error body shared by every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Error handling
#[derive(Debug)]
pub enum ApiError {
    /// Validation or inference failure from the prediction service
    Service(Error),
    /// The request body could not be read
    Body(BytesRejection),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Service(err)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, ErrorBody) {
        match self {
            ApiError::Service(err) => {
                let (status, body) = match err {
                    Error::ModelNotLoaded => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody::new(
                            "Model not loaded",
                            "Please ensure the model file is available",
                        ),
                    ),
                    Error::MissingField(_) => (
                        StatusCode::BAD_REQUEST,
                        ErrorBody::new(
                            "Invalid request",
                            "Request must contain \"features\" array",
                        ),
                    ),
                    Error::WrongArity { .. } => (
                        StatusCode::BAD_REQUEST,
                        ErrorBody::new(
                            "Invalid features",
                            "Features must be an array of exactly 5 values",
                        ),
                    ),
                    Error::OutOfDomain { .. } => (
                        StatusCode::BAD_REQUEST,
                        ErrorBody::new(
                            "Invalid feature values",
                            "All features must be binary (0 or 1)",
                        ),
                    ),
                    Error::PredictionFailed(msg) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody::new("Prediction failed", msg.clone()),
                    ),
                    other => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorBody::new("Prediction failed", other.to_string()),
                    ),
                };
                (status, err.kind(), body)
            }
            ApiError::Body(rejection) => (
                rejection.status(),
                "body",
                ErrorBody::new("Invalid request", rejection.body_text()),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, body) = self.parts();

        if status.is_server_error() {
            warn!("Prediction request failed ({}): {}", kind, body.message);
        } else {
            debug!("Rejected prediction request ({}): {}", kind, body.message);
        }
        metrics::counter!("weatherfit_errors_total", "kind" => kind).increment(1);

        (status, Json(body)).into_response()
    }
}
