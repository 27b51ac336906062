//! Retrain trigger: decides whether enough new datapoints have been logged
//! since the model artifact was last written.

use crate::config::RetrainConfig;
use crate::error::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// When the model was last trained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastRetrain {
    /// No model artifact exists; every datapoint is new
    Never,
    At(DateTime<Utc>),
}

impl LastRetrain {
    /// Whether a datapoint logged at `timestamp` arrived after the last retrain
    pub fn is_before(&self, timestamp: &DateTime<Utc>) -> bool {
        match self {
            LastRetrain::Never => true,
            LastRetrain::At(since) => timestamp > since,
        }
    }
}

impl fmt::Display for LastRetrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastRetrain::Never => write!(f, "the beginning of time"),
            LastRetrain::At(since) => write!(f, "{}", since.to_rfc3339()),
        }
    }
}

/// Outcome of a retrain check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrainDecision {
    pub new_points: usize,
    pub min_new_points: usize,
    pub since: LastRetrain,
}

impl RetrainDecision {
    pub fn is_recommended(&self) -> bool {
        self.new_points >= self.min_new_points
    }

    /// Human-readable status line
    pub fn status_line(&self) -> String {
        if self.is_recommended() {
            format!(
                "✅ Retrain recommended: {} new points since {}",
                self.new_points, self.since
            )
        } else {
            format!(
                "ℹ️ Skipping retrain: only {} new points since {}",
                self.new_points, self.since
            )
        }
    }
}

/// Retrain trigger over a datapoint log and a model artifact
#[derive(Debug, Clone)]
pub struct RetrainTrigger {
    log_path: PathBuf,
    model_path: PathBuf,
    min_new_points: usize,
}

impl RetrainTrigger {
    /// Create a retrain trigger from configuration
    pub fn new(config: &RetrainConfig) -> Self {
        Self::with_paths(&config.log_path, &config.model_path, config.min_new_points)
    }

    pub fn with_paths<L: AsRef<Path>, M: AsRef<Path>>(
        log_path: L,
        model_path: M,
        min_new_points: usize,
    ) -> Self {
        Self {
            log_path: log_path.as_ref().to_path_buf(),
            model_path: model_path.as_ref().to_path_buf(),
            min_new_points,
        }
    }

    /// Count new datapoints and compare against the threshold
    pub fn evaluate(&self) -> Result<RetrainDecision> {
        let since = last_retrain_time(&self.model_path)?;
        let new_points = count_new_datapoints(&self.log_path, &since)?;

        let decision = RetrainDecision {
            new_points,
            min_new_points: self.min_new_points,
            since,
        };

        info!(
            log = %self.log_path.display(),
            model = %self.model_path.display(),
            new_points = decision.new_points,
            min_new_points = decision.min_new_points,
            recommended = decision.is_recommended(),
            "Retrain check complete"
        );

        Ok(decision)
    }
}

/// Returns true when at least `min_new_points` records in the log are newer
/// than the model artifact.
pub fn should_retrain<L: AsRef<Path>, M: AsRef<Path>>(
    log_path: L,
    model_path: M,
    min_new_points: usize,
) -> Result<bool> {
    RetrainTrigger::with_paths(log_path, model_path, min_new_points)
        .evaluate()
        .map(|decision| decision.is_recommended())
}

/// Last-modified time of the model artifact, or `Never` if it does not exist
pub fn last_retrain_time<P: AsRef<Path>>(model_path: P) -> Result<LastRetrain> {
    match std::fs::metadata(model_path.as_ref()) {
        Ok(metadata) => Ok(LastRetrain::At(DateTime::<Utc>::from(metadata.modified()?))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %model_path.as_ref().display(), "Model artifact not found");
            Ok(LastRetrain::Never)
        }
        Err(e) => Err(e.into()),
    }
}

/// Count log records stamped after `since`.
///
/// Lines that are not UTF-8, not JSON, or lack a parseable `timestamp` are
/// skipped. A missing log counts as zero.
pub fn count_new_datapoints<P: AsRef<Path>>(log_path: P, since: &LastRetrain) -> Result<usize> {
    let log_path = log_path.as_ref();
    let file = match File::open(log_path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %log_path.display(), "Datapoint log not found");
            return Ok(0);
        }
        Err(e) => return Err(e.into()),
    };

    let mut count = 0;
    let mut skipped = 0;
    for (index, line) in BufReader::new(file).split(b'\n').enumerate() {
        let line = line?;
        match record_timestamp(&line) {
            Some(timestamp) => {
                if since.is_before(&timestamp) {
                    count += 1;
                }
            }
            None => {
                skipped += 1;
                debug!(line = index + 1, "Skipping malformed log record");
            }
        }
    }

    debug!(count = count, skipped = skipped, "Datapoint log scanned");
    Ok(count)
}

#[derive(Deserialize)]
struct LogRecord {
    timestamp: String,
}

fn record_timestamp(line: &[u8]) -> Option<DateTime<Utc>> {
    let line = std::str::from_utf8(line).ok()?;
    let record: LogRecord = serde_json::from_str(line).ok()?;
    parse_timestamp(&record.timestamp)
}

/// Parse an ISO-8601 timestamp. A trailing `Z` is read as `+00:00`;
/// timestamps without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let normalized = match raw.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => raw.to_string(),
    };

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f%:z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
        "%Y-%m-%dT%H:%M%:z",
        "%Y-%m-%d %H:%M%:z",
        "%Y%m%dT%H%M%S%.f%:z",
    ] {
        if let Ok(timestamp) = DateTime::parse_from_str(&normalized, format) {
            return Some(timestamp.with_timezone(&Utc));
        }
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y%m%dT%H%M%S%.f",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
