//! weatherfit model
//!
//! Loading and serving of the binary classifier behind the prediction API.
//!
//! The server owns exactly one [`ModelStore`]. It is initialized once before
//! traffic is accepted and is read-only afterwards, so request handlers share
//! it through an `Arc` without locking.

pub mod classifier;
pub mod model_loader;
pub mod store;
pub mod tree;

pub use classifier::{BinaryClassifier, ModelMetadata};
pub use model_loader::{ModelConfig, ModelFormat, DEFAULT_MODEL_PATH};
pub use store::{ModelState, ModelStore};
pub use tree::{DecisionTree, TreeArtifact, TreeNode};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::BinaryClassifier;
    pub use crate::model_loader::ModelConfig;
    pub use crate::store::{ModelState, ModelStore};
    pub use crate::tree::DecisionTree;
}
