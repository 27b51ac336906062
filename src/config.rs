//! Configuration management for the pool risk pipeline

use crate::feature_extractor::DEFAULT_EARLY_WINDOW;
use anyhow::{Context, Result};
use config::{Config, File, Source};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// How the scorer treats a model handle that holds no trained model
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UntrainedPolicy {
    /// Score with the neutral score (current stub behavior)
    #[default]
    Neutral,
    /// Refuse to score with an `InvalidModel` error
    Reject,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub features: FeaturesConfig,
    pub models: ModelsConfig,
    pub retrain: RetrainConfig,
    pub logging: LoggingConfig,
}

/// Feature extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Seconds after pool init within which trades count as early
    pub early_window: f64,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            early_window: DEFAULT_EARLY_WINDOW,
        }
    }
}

/// Scoring model configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Behaviour when scoring without a trained model
    pub untrained: UntrainedPolicy,
    /// Score returned when no model is available
    pub neutral_score: f64,
    /// Reject training input whose row and label counts differ
    pub validate_training_input: bool,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            untrained: UntrainedPolicy::Neutral,
            neutral_score: 0.5,
            validate_training_input: false,
        }
    }
}

/// Retrain trigger configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrainConfig {
    /// Newline-delimited JSON log of collected datapoints
    pub log_path: PathBuf,
    /// Trained model artifact; only its modification time is read
    pub model_path: PathBuf,
    /// New datapoints required before a retrain is recommended
    pub min_new_points: usize,
}

impl Default for RetrainConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("ml/data/snipes.jsonl"),
            model_path: PathBuf::from("ml/models/latest.pkl"),
            min_new_points: 200,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, compact, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file, falling back to defaults
    /// when it does not exist.
    pub fn load() -> Result<Self> {
        Self::build(File::with_name(DEFAULT_CONFIG_PATH).required(false))
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::build(File::from(path.as_ref()))
    }

    fn build<S: Source + Send + Sync + 'static>(source: S) -> Result<Self> {
        let config = Config::builder()
            .add_source(source)
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
