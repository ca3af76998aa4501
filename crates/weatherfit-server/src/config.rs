//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use weatherfit_model::DEFAULT_MODEL_PATH;

use crate::cli::Cli;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Model artifact path, relative to the working directory
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_yaml_str(&content)?
        } else {
            Self::default()
        };

        config.apply_overrides(cli);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        // An empty file parses as YAML null, which means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply CLI overrides
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(listen) = &cli.listen {
            self.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            self.port = port;
        }

        if let Some(model) = &cli.model {
            self.model_path = model.clone();
        }
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> weatherfit_core::Result<()> {
        if self.listen.trim().is_empty() {
            return Err(weatherfit_core::Error::config("listen address is empty"));
        }
        if self.model_path.as_os_str().is_empty() {
            return Err(weatherfit_core::Error::config("model_path is empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(weatherfit_core::Error::config(
                "max_body_bytes must be greater than zero",
            ));
        }
        Ok(())
    }

    /// `listen:port` as a string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            model_path: default_model_path(),
            max_body_bytes: default_max_body_bytes(),
            cors: CorsConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allow cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder and serve `/metrics`
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_listen() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["weatherfit-server"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.model_path, PathBuf::from("model.json"));
        assert!(config.cors.enabled);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_partial_yaml() {
        let config = ServerConfig::from_yaml_str(
            r#"
port: 8080
model_path: models/model.json
metrics:
  enabled: false
"#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.listen, "127.0.0.1");
        assert_eq!(config.model_path, PathBuf::from("models/model.json"));
        assert!(!config.metrics.enabled);
        assert!(config.cors.enabled);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = ServerConfig::from_yaml_str("\n").unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(ServerConfig::from_yaml_str("port: not-a-number").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let config = ServerConfig::load(
            path.to_str().unwrap(),
            &cli(&["-l", "0.0.0.0", "-P", "9000", "-m", "/srv/model.json"]),
        )
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.model_path, PathBuf::from("/srv/model.json"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weatherfit.yaml");
        std::fs::write(&path, "port: 7000\ncors:\n  enabled: false\n").unwrap();

        let config = ServerConfig::load(path.to_str().unwrap(), &cli(&[])).unwrap();
        assert_eq!(config.port, 7000);
        assert!(!config.cors.enabled);
    }

    #[test]
    fn test_validate_rejects_zero_body_limit() {
        let config = ServerConfig {
            max_body_bytes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
