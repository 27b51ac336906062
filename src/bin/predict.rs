//! Pool risk scorer
//!
//! Reads a JSON feature vector from a file or stdin and prints the score.

use anyhow::Result;
use clap::Parser;
use pool_risk_pipeline::models::{InferenceEngine, ModelHandle};
use pool_risk_pipeline::{cli, FeatureVector};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "predict", version, about = "Score a JSON feature vector")]
struct Args {
    /// Feature vector JSON file; reads stdin when omitted
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = cli::bootstrap()?;

    let input = cli::read_input(args.input.as_deref())?;
    let features: FeatureVector = serde_json::from_str(&input)?;

    // No trained model is shipped yet; the engine applies the configured
    // untrained-model policy.
    let engine = InferenceEngine::new(ModelHandle::empty(), &config.models);
    let prediction = engine.predict(&features)?;

    info!(
        risk_score = prediction.risk_score,
        model = prediction.model_name.as_deref().unwrap_or("none"),
        "Features scored"
    );

    cli::write_score(std::io::stdout().lock(), prediction.risk_score)
}
