//! weatherfit core
//!
//! Types, validation, and errors shared by the model store and the HTTP server.
//!
//! This crate provides:
//! - The fixed-shape `FeatureVector` and the binary `Label`
//! - Response views (`PredictionResult`, `HealthStatus`)
//! - Payload validation for the `/predict` contract
//! - The error taxonomy used across the workspace

pub mod error;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use types::{
    FeatureVector, HealthStatus, InputFeatures, Label, PredictionResult, FEATURE_COUNT,
    FEATURE_NAMES,
};
pub use validation::{is_binary, parse_features, validate_payload, ValidatedFeatures};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{FeatureVector, Label, PredictionResult};
    pub use crate::validation::{is_binary, parse_features, validate_payload};
}
