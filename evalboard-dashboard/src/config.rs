//! Configuration management for the dashboard generator

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable naming an explicit configuration file
pub const CONFIG_FILE_ENV: &str = "EVALBOARD_CONFIG";
/// Configuration file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "evalboard.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Dark => "theme-dark",
            Theme::Light => "theme-light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{}', expected dark or light", other)),
        }
    }
}

/// Dashboard generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// File path or http(s) URL of the results JSON
    pub source: String,
    /// Directory the static site is written to
    pub output_dir: PathBuf,
    /// Page title
    pub title: String,
    pub theme: Theme,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: "results.json".to_string(),
            output_dir: PathBuf::from("dashboard"),
            title: "Model Benchmark Dashboard".to_string(),
            theme: Theme::Dark,
        }
    }
}

impl DashboardConfig {
    /// Prefix of environment overrides (`EVALBOARD_SOURCE`, `EVALBOARD_OUTPUT_DIR`, ...)
    pub const ENV_PREFIX: &'static str = "EVALBOARD";

    /// Load configuration from defaults, a config file and the environment.
    ///
    /// An explicit `path` must exist. Without one, `$EVALBOARD_CONFIG` is used if set, then
    /// `./evalboard.toml` if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("source", defaults.source.clone())?
            .set_default("output_dir", defaults.output_dir.to_string_lossy().to_string())?
            .set_default("title", defaults.title.clone())?
            .set_default("theme", defaults.theme.to_string())?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        } else if let Ok(config_file) = std::env::var(CONFIG_FILE_ENV) {
            builder = builder.add_source(config::File::with_name(&config_file));
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            builder = builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE));
        }

        // Override with environment variables
        builder = builder.add_source(config::Environment::with_prefix(Self::ENV_PREFIX));

        let config: DashboardConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "source must not be empty".to_string(),
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "output_dir must not be empty".to_string(),
            ));
        }

        if self.title.trim().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "title must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Builder pattern for dashboard configuration
pub struct DashboardConfigBuilder {
    config: DashboardConfig,
}

impl DashboardConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: DashboardConfig::default(),
        }
    }

    /// Start from an existing configuration, e.g. one loaded from file.
    pub fn from_config(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn source<S: Into<String>>(mut self, source: S) -> Self {
        self.config.source = source.into();
        self
    }

    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn build(self) -> DashboardConfig {
        self.config
    }
}

impl Default for DashboardConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.source, "results.json");
        assert_eq!(config.theme, Theme::Dark);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = DashboardConfigBuilder::new()
            .source("https://example.com/results.json")
            .output_dir("site")
            .title("Nightly")
            .theme(Theme::Light)
            .build();

        assert_eq!(config.source, "https://example.com/results.json");
        assert_eq!(config.output_dir, PathBuf::from("site"));
        assert_eq!(config.title, "Nightly");
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn test_validation_rejects_blank_fields() {
        let config = DashboardConfigBuilder::new().source("  ").build();
        assert!(matches!(
            config.validate(),
            Err(DashboardError::InvalidConfig(_))
        ));

        let config = DashboardConfigBuilder::new().title("").build();
        assert!(config.validate().is_err());

        let config = DashboardConfigBuilder::new().output_dir("").build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("LIGHT".parse::<Theme>(), Ok(Theme::Light));
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.css_class(), "theme-light");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
source = "runs/latest.json"
title = "Weekly RAG Benchmark"
theme = "light"
"#
        )
        .unwrap();

        let config = DashboardConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.source, "runs/latest.json");
        assert_eq!(config.title, "Weekly RAG Benchmark");
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.output_dir, PathBuf::from("dashboard"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            DashboardConfig::load(Some(&missing)),
            Err(DashboardError::Config(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DashboardConfigBuilder::new().title("Round Trip").build();
        let text = config.to_toml().unwrap();
        assert!(text.contains("title = \"Round Trip\""));
        assert!(text.contains("theme = \"dark\""));
    }
}
