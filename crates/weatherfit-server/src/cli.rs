use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "weatherfit-server")]
#[command(author, version, about = "Serve the exercise-suitability classifier over HTTP", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "weatherfit.yaml", env = "WEATHERFIT_CONFIG")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long, env = "WEATHERFIT_LISTEN")]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "WEATHERFIT_PORT")]
    pub port: Option<u16>,

    /// Model artifact path
    #[arg(short, long, env = "WEATHERFIT_MODEL")]
    pub model: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "WEATHERFIT_LOG_FORMAT")]
    pub log_format: LogFormat,
}

/// How log lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["weatherfit-server"]).unwrap();
        assert_eq!(cli.config, "weatherfit.yaml");
        assert!(!cli.verbose);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "weatherfit-server",
            "-c",
            "custom.yaml",
            "-P",
            "8081",
            "--model",
            "models/model.json",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.config, "custom.yaml");
        assert_eq!(cli.port, Some(8081));
        assert_eq!(cli.model, Some(PathBuf::from("models/model.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_log_format() {
        let cli = Cli::try_parse_from(["weatherfit-server", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);

        assert!(Cli::try_parse_from(["weatherfit-server", "--log-format", "xml"]).is_err());
    }
}
