//! Configuration for spamcheck-rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SpamCheckError};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address for the HTTP API (e.g., "0.0.0.0:8000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Maximum number of texts per batch request
    #[serde(default = "default_batch_limit")]
    pub batch_limit: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelsConfig {
    /// Directory containing model artifacts (vectorizer.json + one file per model)
    #[serde(default = "default_models_dir")]
    pub dir: String,
    /// Name of the model used for the primary verdict
    #[serde(default = "default_primary_model")]
    pub primary: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Database URL for the scan history log
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Strip digits during text normalization
    #[serde(default = "default_true")]
    pub strip_digits: bool,
    /// Remove stopwords during text normalization
    #[serde(default = "default_true")]
    pub remove_stopwords: bool,
    /// Apply English stemming during text normalization
    #[serde(default = "default_true")]
    pub stem_tokens: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_batch_limit() -> usize {
    100
}

fn default_models_dir() -> String {
    "models".to_string()
}

fn default_primary_model() -> String {
    "linear_svm".to_string()
}

fn default_database_url() -> String {
    "sqlite://spamcheck.db?mode=rwc".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            batch_limit: default_batch_limit(),
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: default_models_dir(),
            primary: default_primary_model(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strip_digits: true,
            remove_stopwords: true,
            stem_tokens: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            models: ModelsConfig::default(),
            storage: StorageConfig::default(),
            analysis: AnalysisConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpamCheckError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| SpamCheckError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.batch_limit == 0 {
            return Err(SpamCheckError::Config(
                "server.batch_limit must be at least 1".to_string(),
            ));
        }

        if self.models.primary.is_empty() {
            return Err(SpamCheckError::Config(
                "models.primary must not be empty".to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(SpamCheckError::Config(format!(
                    "Unknown logging level '{}'",
                    other
                )));
            }
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(SpamCheckError::Config(format!(
                    "Unknown logging format '{}'",
                    other
                )));
            }
        }

        Ok(())
    }
}
