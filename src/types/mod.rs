//! Type definitions for the pool risk pipeline

pub mod event;
pub mod features;

pub use event::{Action, ActionKind, PoolEvent};
pub use features::{FeatureVector, FEATURE_NAMES};
