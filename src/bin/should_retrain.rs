//! Retrain check
//!
//! Exits 0 when enough new datapoints were logged since the model artifact was
//! last written, 1 otherwise, so it can be used as a shell conditional.

use anyhow::Result;
use clap::Parser;
use pool_risk_pipeline::{cli, RetrainTrigger};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "should-retrain", version, about = "Check whether the risk model should be retrained")]
struct Args {}

fn main() -> Result<ExitCode> {
    let _args = Args::parse();
    let config = cli::bootstrap()?;

    let decision = RetrainTrigger::new(&config.retrain).evaluate()?;
    println!("{}", decision.status_line());

    if decision.is_recommended() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
