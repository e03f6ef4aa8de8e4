use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain the benchmark records
#[derive(Error, Debug)]
pub enum LoadFailure {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },

    #[error("failed to parse benchmark records: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Main error type for the dashboard pipeline
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Load failure: {0}")]
    Load(#[from] LoadFailure),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
