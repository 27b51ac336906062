//! Input/output plumbing shared by the command-line tools

use crate::config::AppConfig;
use crate::logging;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Load configuration and install logging; every tool starts here.
pub fn bootstrap() -> Result<AppConfig> {
    let config = AppConfig::load()?;
    logging::init(&config.logging)?;
    Ok(config)
}

/// Read a whole input document from `path`, or from stdin when `None`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => read_from(io::stdin().lock()),
    }
}

/// Read everything from a reader into a string
pub fn read_from<R: Read>(mut reader: R) -> Result<String> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .context("Failed to read input")?;
    Ok(input)
}

/// Write a value as a single JSON document, without trailing newline
pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut writer, value).context("Failed to serialize output")?;
    writer.flush()?;
    Ok(())
}

/// Write a bare score
pub fn write_score<W: Write>(mut writer: W, score: f64) -> Result<()> {
    write!(writer, "{}", score)?;
    writer.flush()?;
    Ok(())
}
