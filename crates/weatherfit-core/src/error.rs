//! Error types for weatherfit

/// Result type alias using weatherfit's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for weatherfit operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No model is loaded in the store
    #[error("model not loaded")]
    ModelNotLoaded,

    /// The payload has no `features` field
    #[error("missing field: {0}")]
    MissingField(String),

    /// `features` is not an array of the expected length
    #[error("expected {expected} features, got {actual}")]
    WrongArity { expected: usize, actual: usize },

    /// A feature value is not 0 or 1
    #[error("feature {index} is not binary: {value}")]
    OutOfDomain { index: usize, value: String },

    /// Inference failed after validation passed
    #[error("prediction failed: {0}")]
    PredictionFailed(String),

    /// The model artifact is malformed or incompatible
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new missing-field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a new prediction failure
    pub fn prediction_failed(msg: impl Into<String>) -> Self {
        Self::PredictionFailed(msg.into())
    }

    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the caller can fix this by correcting the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::WrongArity { .. } | Self::OutOfDomain { .. }
        )
    }

    /// Short stable name for logs and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelNotLoaded => "model_not_loaded",
            Self::MissingField(_) => "missing_field",
            Self::WrongArity { .. } => "wrong_arity",
            Self::OutOfDomain { .. } => "out_of_domain",
            Self::PredictionFailed(_) => "prediction_failed",
            Self::Artifact(_) => "artifact",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}
