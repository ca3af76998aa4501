//! weatherfit server
//!
//! HTTP surface for the exercise-suitability classifier.
//!
//! The model is loaded once at startup into a [`weatherfit_model::ModelStore`]
//! that request handlers share read-only. A missing or broken artifact does
//! not stop the server: `/health` keeps answering and `/predict` reports
//! `Model not loaded`.

pub mod cli;
pub mod config;
pub mod routes;
pub mod service;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use routes::{create_router, ApiError, ErrorBody};
pub use service::PredictionService;
pub use state::AppState;
