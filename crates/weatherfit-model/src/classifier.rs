//! Classifier trait and common types

use weatherfit_core::{FeatureVector, Label, Result};

/// Trait for binary classifiers the store can serve
pub trait BinaryClassifier: Send + Sync {
    /// Predict the label for a single feature row
    fn predict(&self, features: &FeatureVector) -> Result<Label>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Metadata describing a loaded model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMetadata {
    /// Model name/identifier
    pub name: String,

    /// Artifact format version
    pub format_version: u32,

    /// Number of input features
    pub n_features: usize,

    /// Number of nodes in the tree
    pub n_nodes: usize,

    /// Longest root-to-leaf path
    pub depth: usize,
}
