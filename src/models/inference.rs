//! Risk scoring over extracted pool features

use crate::config::{ModelsConfig, UntrainedPolicy};
use crate::error::{PipelineError, Result};
use crate::types::features::FeatureVector;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Score used when no trained model is available
pub const NEUTRAL_SCORE: f64 = 0.5;

/// A model that scores pool features.
///
/// Implementations return a probability-like score; the engine clamps it to [0, 1].
pub trait RiskModel: Send + Sync {
    /// Get model name
    fn name(&self) -> &str;

    /// Score a single feature vector
    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

/// Placeholder model that ignores its input and returns a fixed score.
#[derive(Debug, Clone)]
pub struct ConstantModel {
    score: f64,
}

impl ConstantModel {
    pub fn new(score: f64) -> Self {
        Self { score }
    }
}

impl Default for ConstantModel {
    fn default() -> Self {
        Self::new(NEUTRAL_SCORE)
    }
}

impl RiskModel for ConstantModel {
    fn name(&self) -> &str {
        "constant"
    }

    fn predict(&self, _features: &FeatureVector) -> Result<f64> {
        Ok(self.score)
    }
}

/// Handle to a trained model; empty until a real trainer produces one.
#[derive(Clone, Default)]
pub struct ModelHandle {
    model: Option<Arc<dyn RiskModel>>,
}

impl ModelHandle {
    /// A handle with no model behind it
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(model: impl RiskModel + 'static) -> Self {
        Self {
            model: Some(Arc::new(model)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_none()
    }

    pub fn model(&self) -> Option<&dyn RiskModel> {
        self.model.as_deref()
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model() {
            Some(model) => write!(f, "ModelHandle({})", model.name()),
            None => write!(f, "ModelHandle(empty)"),
        }
    }
}

/// Result of scoring one feature vector
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Risk score (0.0 - 1.0)
    pub risk_score: f64,
    /// Name of the model that produced the score, `None` for the neutral fallback
    pub model_name: Option<String>,
}

/// Scoring engine wrapping a model handle
pub struct InferenceEngine {
    handle: ModelHandle,
    untrained: UntrainedPolicy,
    neutral_score: f64,
}

impl InferenceEngine {
    /// Create an inference engine from configuration
    pub fn new(handle: ModelHandle, config: &ModelsConfig) -> Self {
        Self {
            handle,
            untrained: config.untrained,
            neutral_score: config.neutral_score.clamp(0.0, 1.0),
        }
    }

    /// Create an engine with default settings: empty handles score neutral
    pub fn with_handle(handle: ModelHandle) -> Self {
        Self::new(handle, &ModelsConfig::default())
    }

    pub fn handle(&self) -> &ModelHandle {
        &self.handle
    }

    /// Score a feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult> {
        let Some(model) = self.handle.model() else {
            return match self.untrained {
                UntrainedPolicy::Neutral => {
                    debug!(risk_score = self.neutral_score, "No trained model, using neutral score");
                    Ok(PredictionResult {
                        risk_score: self.neutral_score,
                        model_name: None,
                    })
                }
                UntrainedPolicy::Reject => Err(PipelineError::InvalidModel(
                    "no trained model loaded".to_string(),
                )),
            };
        };

        let raw = model.predict(features)?;
        if !raw.is_finite() {
            return Err(PipelineError::InvalidModel(format!(
                "model {} returned non-finite score {}",
                model.name(),
                raw
            )));
        }

        let risk_score = raw.clamp(0.0, 1.0);
        if risk_score != raw {
            warn!(model = %model.name(), raw_score = raw, "Model score outside [0, 1], clamped");
        }

        debug!(model = %model.name(), risk_score = risk_score, "Inference complete");

        Ok(PredictionResult {
            risk_score,
            model_name: Some(model.name().to_string()),
        })
    }

    /// Score a batch of feature vectors
    pub fn predict_batch(&self, batch: &[FeatureVector]) -> Vec<Result<PredictionResult>> {
        batch.iter().map(|f| self.predict(f)).collect()
    }
}

/// Score features with the given handle using default settings.
pub fn score(handle: &ModelHandle, features: &FeatureVector) -> Result<f64> {
    InferenceEngine::with_handle(handle.clone())
        .predict(features)
        .map(|result| result.risk_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedModel(f64);

    impl RiskModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _features: &FeatureVector) -> Result<f64> {
            Ok(self.0)
        }
    }

    fn sample_features() -> FeatureVector {
        FeatureVector {
            lp_size: 100.0,
            initial_burn: 5.0,
            mint_authority_burned: 1,
            time_since_init: 1.0,
            early_buy_count: 2,
            early_sell_count: 1,
            early_buy_sell_ratio: 2.0 / 3.0,
        }
    }

    #[test]
    fn test_empty_handle_scores_neutral() {
        let neutral = score(&ModelHandle::empty(), &sample_features()).unwrap();
        assert_eq!(neutral, 0.5);

        let zeros = score(&ModelHandle::empty(), &FeatureVector::default()).unwrap();
        assert!((0.0..=1.0).contains(&zeros));
    }

    #[test]
    fn test_constant_model() {
        let handle = ModelHandle::new(ConstantModel::default());
        let result = InferenceEngine::with_handle(handle)
            .predict(&sample_features())
            .unwrap();

        assert_eq!(result.risk_score, 0.5);
        assert_eq!(result.model_name.as_deref(), Some("constant"));
    }

    #[test]
    fn test_reject_policy() {
        let config = ModelsConfig {
            untrained: UntrainedPolicy::Reject,
            ..ModelsConfig::default()
        };
        let engine = InferenceEngine::new(ModelHandle::empty(), &config);

        assert!(matches!(
            engine.predict(&sample_features()),
            Err(PipelineError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_out_of_range_scores_clamped() {
        let engine = InferenceEngine::with_handle(ModelHandle::new(FixedModel(1.7)));
        assert_eq!(engine.predict(&sample_features()).unwrap().risk_score, 1.0);

        let engine = InferenceEngine::with_handle(ModelHandle::new(FixedModel(-0.2)));
        assert_eq!(engine.predict(&sample_features()).unwrap().risk_score, 0.0);

        let engine = InferenceEngine::with_handle(ModelHandle::new(FixedModel(f64::NAN)));
        assert!(engine.predict(&sample_features()).is_err());
    }

    #[test]
    fn test_predict_batch() {
        let engine = InferenceEngine::with_handle(ModelHandle::new(ConstantModel::new(0.25)));
        let results = engine.predict_batch(&[sample_features(), FeatureVector::default()]);

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.as_ref().unwrap().risk_score == 0.25));
    }

    #[test]
    fn test_handle_debug() {
        assert_eq!(format!("{:?}", ModelHandle::empty()), "ModelHandle(empty)");
        assert_eq!(
            format!("{:?}", ModelHandle::new(ConstantModel::default())),
            "ModelHandle(constant)"
        );
    }
}
