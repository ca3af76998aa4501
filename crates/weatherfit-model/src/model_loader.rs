//! Model artifact loading

use crate::tree::DecisionTree;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;
use weatherfit_core::{Error, Result};

/// Default artifact location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Configuration for loading the model artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Path to the artifact on the local file system
    pub path: PathBuf,

    /// Model file format
    pub format: ModelFormat,
}

/// Model file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelFormat {
    /// JSON-serialized decision tree
    #[default]
    DecisionTreeJson,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::from_local(DEFAULT_MODEL_PATH)
    }
}

impl ModelConfig {
    /// Create a new model configuration from local path
    pub fn from_local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: ModelFormat::default(),
        }
    }

    /// Set model format
    pub fn with_format(mut self, format: ModelFormat) -> Self {
        self.format = format;
        self
    }

    /// Load and validate the artifact this configuration points at
    pub fn load(&self) -> Result<DecisionTree> {
        let path = resolve_model_path(&self.path)?;
        debug!("Reading model artifact from {:?}", path);

        match self.format {
            ModelFormat::DecisionTreeJson => {
                let file = File::open(path)?;
                DecisionTree::from_reader(BufReader::new(file))
            }
        }
    }
}

/// Check the artifact exists and is a regular file
fn resolve_model_path(path: &Path) -> Result<&Path> {
    if !path.exists() {
        return Err(Error::artifact(format!("Model file not found: {:?}", path)));
    }
    if !path.is_file() {
        return Err(Error::artifact(format!("Model path is not a file: {:?}", path)));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_model_config_local() {
        let config = ModelConfig::from_local("/path/to/model.json")
            .with_format(ModelFormat::DecisionTreeJson);

        assert_eq!(config.path, PathBuf::from("/path/to/model.json"));
        assert_eq!(config.format, ModelFormat::DecisionTreeJson);
    }

    #[test]
    fn test_default_path() {
        assert_eq!(ModelConfig::default().path, PathBuf::from("model.json"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelConfig::from_local(dir.path().join("absent.json"));
        assert!(matches!(config.load(), Err(Error::Artifact(_))));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = ModelConfig::from_local(dir.path());
        assert!(matches!(config.load(), Err(Error::Artifact(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"format_version": 1, "name": "constant", "n_features": 5, "nodes": [{{"leaf": {{"label": 0}}}}]}}"#
        )
        .unwrap();

        let tree = ModelConfig::from_local(file.path()).load().unwrap();
        assert_eq!(tree.metadata().name, "constant");
    }
}
