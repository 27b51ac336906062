//! Pool event feature extractor
//!
//! Reads one JSON pool event from stdin and writes its feature vector as JSON
//! to stdout.

use anyhow::Result;
use clap::Parser;
use pool_risk_pipeline::{cli, FeatureExtractor};
use tracing::info;

#[derive(Parser)]
#[command(name = "extract", version, about = "Extract pool features from a JSON event on stdin")]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();
    let config = cli::bootstrap()?;

    let extractor = FeatureExtractor::with_early_window(config.features.early_window);
    let input = cli::read_input(None)?;
    let features = extractor.extract_json(&input)?;

    info!(
        early_window = extractor.early_window(),
        early_buy_count = features.early_buy_count,
        early_sell_count = features.early_sell_count,
        "Feature vector written"
    );

    cli::write_json(std::io::stdout().lock(), &features)
}
