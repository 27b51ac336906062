//! Tracing subscriber setup shared by the command-line tools

use crate::config::{LogFormat, LoggingConfig};
use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Build the event filter: the configured level applies to every target,
/// including the binaries, unless `RUST_LOG` says otherwise.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let level: LevelFilter = config.level.parse()?;

    Ok(EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy())
}

/// Install a global fmt subscriber writing to stderr.
///
/// stdout is reserved for tool output. Colours are only used on a terminal.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config)?)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
