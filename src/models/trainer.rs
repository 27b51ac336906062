//! Model training interface

use crate::config::ModelsConfig;
use crate::error::{PipelineError, Result};
use crate::models::inference::ModelHandle;
use crate::types::features::FeatureVector;
use tracing::info;

/// Something that can train a risk model from labeled feature rows
pub trait ModelTrainer {
    fn train(&self, rows: &[FeatureVector], labels: &[f64]) -> Result<ModelHandle>;
}

/// Trainer placeholder: produces an empty handle without fitting anything.
#[derive(Debug, Clone, Default)]
pub struct StubTrainer {
    validate_input: bool,
}

impl StubTrainer {
    pub fn new(config: &ModelsConfig) -> Self {
        Self {
            validate_input: config.validate_training_input,
        }
    }
}

impl ModelTrainer for StubTrainer {
    fn train(&self, rows: &[FeatureVector], labels: &[f64]) -> Result<ModelHandle> {
        if self.validate_input {
            check_dimensions(rows, labels)?;
        }

        info!(
            rows = rows.len(),
            labels = labels.len(),
            "Training not implemented, returning empty model handle"
        );
        Ok(ModelHandle::empty())
    }
}

/// Ensure every training row has a label
pub fn check_dimensions(rows: &[FeatureVector], labels: &[f64]) -> Result<()> {
    if rows.len() != labels.len() {
        return Err(PipelineError::DimensionMismatch {
            rows: rows.len(),
            labels: labels.len(),
        });
    }
    Ok(())
}

/// Train with the default stub trainer; accepts any input lengths.
pub fn train(rows: &[FeatureVector], labels: &[f64]) -> Result<ModelHandle> {
    StubTrainer::default().train(rows, labels)
}
