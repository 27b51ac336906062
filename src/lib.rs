//! Pool Risk Pipeline Library
//!
//! Feature extraction and risk scoring for liquidity-pool launch events,
//! plus a retrain check over the collected datapoint log.

pub mod cli;
pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod logging;
pub mod models;
pub mod retrain;
pub mod types;

pub use config::AppConfig;
pub use error::{PipelineError, Result};
pub use feature_extractor::FeatureExtractor;
pub use models::inference::InferenceEngine;
pub use retrain::{should_retrain, RetrainDecision, RetrainTrigger};
pub use types::{event::PoolEvent, features::FeatureVector};
