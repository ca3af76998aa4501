//! Decision tree classifier and its on-disk artifact.
//!
//! Nodes are stored flat with node 0 as the root. Every child index must be
//! strictly greater than its parent's, so traversal always terminates and a
//! tree that passes validation can be evaluated without further checks.

use crate::classifier::{BinaryClassifier, ModelMetadata};
use serde::{Deserialize, Serialize};
use std::io::Read;
use weatherfit_core::{Error, FeatureVector, Label, Result, FEATURE_COUNT, FEATURE_NAMES};

/// Artifact format versions this build can read
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// Serialized form of a decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub format_version: u32,

    #[serde(default = "default_name")]
    pub name: String,

    pub n_features: usize,

    pub nodes: Vec<TreeNode>,
}

fn default_name() -> String {
    "decision-tree".to_string()
}

/// A node in the serialized tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeNode {
    /// Internal split node
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    /// Leaf node with a label
    Leaf { label: u8 },
}

/// Split condition for a decision node
#[derive(Debug, Clone, Copy, PartialEq)]
struct SplitCondition {
    feature: usize,
    threshold: f32,
}

impl SplitCondition {
    /// Go left if the feature value is below the threshold
    #[inline]
    fn go_left(&self, row: &[f32; FEATURE_COUNT]) -> bool {
        row[self.feature] < self.threshold
    }
}

#[derive(Debug, Clone, Copy)]
enum Node {
    Split {
        condition: SplitCondition,
        left: usize,
        right: usize,
    },
    Leaf(Label),
}

/// Validated, immutable decision tree
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    metadata: ModelMetadata,
}

impl DecisionTree {
    /// Parse and validate a tree from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let artifact: TreeArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    /// Parse and validate a tree from a reader
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let artifact: TreeArtifact = serde_json::from_reader(reader)?;
        Self::from_artifact(artifact)
    }

    /// Validate an artifact and build the tree
    pub fn from_artifact(artifact: TreeArtifact) -> Result<Self> {
        if artifact.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(Error::artifact(format!(
                "unsupported format version {} (expected {})",
                artifact.format_version, SUPPORTED_FORMAT_VERSION
            )));
        }

        if artifact.n_features != FEATURE_COUNT {
            return Err(Error::artifact(format!(
                "model expects {} features, server provides {}",
                artifact.n_features, FEATURE_COUNT
            )));
        }

        if artifact.nodes.is_empty() {
            return Err(Error::artifact("tree has no nodes"));
        }

        let count = artifact.nodes.len();
        let mut nodes = Vec::with_capacity(count);

        for (index, node) in artifact.nodes.iter().enumerate() {
            let node = match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= artifact.n_features {
                        return Err(Error::artifact(format!(
                            "node {} splits on feature {} of {}",
                            index, feature, artifact.n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(Error::artifact(format!(
                            "node {} has non-finite threshold",
                            index
                        )));
                    }
                    for child in [left, right] {
                        if child <= index || child >= count {
                            return Err(Error::artifact(format!(
                                "node {} has invalid child index {}",
                                index, child
                            )));
                        }
                    }
                    Node::Split {
                        condition: SplitCondition { feature, threshold },
                        left,
                        right,
                    }
                }
                TreeNode::Leaf { label } => {
                    let label = Label::try_from(label).map_err(|e| {
                        Error::artifact(format!("node {}: {}", index, e))
                    })?;
                    Node::Leaf(label)
                }
            };
            nodes.push(node);
        }

        let metadata = ModelMetadata {
            name: artifact.name,
            format_version: artifact.format_version,
            n_features: artifact.n_features,
            n_nodes: count,
            depth: depth(&nodes),
        };

        Ok(Self { nodes, metadata })
    }

    /// Get model metadata
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Walk from the root to a leaf
    fn evaluate(&self, row: &[f32; FEATURE_COUNT]) -> Label {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf(label) => return label,
                Node::Split {
                    condition,
                    left,
                    right,
                } => {
                    index = if condition.go_left(row) { left } else { right };
                }
            }
        }
    }

    /// Features the tree actually splits on, by name
    pub fn used_features(&self) -> Vec<&'static str> {
        let mut used = [false; FEATURE_COUNT];
        for node in &self.nodes {
            if let Node::Split { condition, .. } = node {
                used[condition.feature] = true;
            }
        }
        FEATURE_NAMES
            .iter()
            .zip(used)
            .filter_map(|(name, used)| used.then_some(*name))
            .collect()
    }
}

/// Children always sit after their parent, so a reverse sweep sees them first
fn depth(nodes: &[Node]) -> usize {
    let mut depths = vec![0usize; nodes.len()];
    for index in (0..nodes.len()).rev() {
        depths[index] = match nodes[index] {
            Node::Leaf(_) => 1,
            Node::Split { left, right, .. } => 1 + depths[left].max(depths[right]),
        };
    }
    depths[0]
}

impl BinaryClassifier for DecisionTree {
    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        Ok(self.evaluate(&features.as_row()))
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }
}
