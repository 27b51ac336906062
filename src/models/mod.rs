//! Risk model scoring and training components

pub mod inference;
pub mod trainer;

pub use inference::{score, ConstantModel, InferenceEngine, ModelHandle, PredictionResult, RiskModel};
pub use trainer::{train, ModelTrainer, StubTrainer};
