//! Hourly metrics reader.
//!
//! Reads the line-delimited JSON sensor log from scratch on every call and
//! reduces it to the latest hour's per-field averages. There is no cache and
//! no incremental state; two calls on an unchanged file give the same result.

use crate::core::aggregate::{compute_hourly_average, HourlyAverage};
use crate::core::bucketing::latest_bucket;
use crate::core::types::{SensorLogEntry, SensorReading};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// How the reader treats a line it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRecovery {
    /// Any bad line fails the whole read.
    #[default]
    Strict,
    /// An unterminated final line that fails to parse is ignored, so a read
    /// racing the sensor logger mid-write still succeeds. Bad lines anywhere
    /// else fail the read.
    SkipTrailing,
}

impl LineRecovery {
    /// Parse a recovery policy name (`strict` or `skip_trailing`).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "strict" => Some(Self::Strict),
            "skip_trailing" => Some(Self::SkipTrailing),
            _ => None,
        }
    }
}

/// Reasons a log could not be reduced to an hourly average.
#[derive(Debug)]
pub enum ReaderError {
    /// No file at the log path (no sensing session yet)
    Missing(PathBuf),
    /// The file exists but could not be read
    Io(String),
    /// A line is not valid JSON
    Parse { line: usize, message: String },
    /// A line is JSON but not a `{"payload": [...]}` batch of readings
    Schema { line: usize, message: String },
    /// The log holds no readings at all
    Empty,
}

impl std::fmt::Display for ReaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReaderError::Missing(path) => write!(f, "Sensor log not found: {}", path.display()),
            ReaderError::Io(e) => write!(f, "IO error: {e}"),
            ReaderError::Parse { line, message } => {
                write!(f, "Parse error on line {line}: {message}")
            }
            ReaderError::Schema { line, message } => {
                write!(f, "Schema error on line {line}: {message}")
            }
            ReaderError::Empty => write!(f, "Sensor log contains no readings"),
        }
    }
}

impl std::error::Error for ReaderError {}

/// Latest hourly averages from the log at `log_path`.
///
/// Returns `None` when the log is missing, empty, or malformed in any way.
/// Uses [`LineRecovery::Strict`].
pub fn latest_hourly_metrics(log_path: impl AsRef<Path>) -> Option<HourlyAverage> {
    try_latest_hourly_metrics(log_path, LineRecovery::Strict).ok()
}

/// Latest hourly averages, keeping the reason for failure.
pub fn try_latest_hourly_metrics(
    log_path: impl AsRef<Path>,
    recovery: LineRecovery,
) -> Result<HourlyAverage, ReaderError> {
    let readings = read_log(log_path, recovery)?;
    let bucket = latest_bucket(readings).ok_or(ReaderError::Empty)?;
    Ok(compute_hourly_average(&bucket))
}

/// Read and flatten every reading in the log, in file order.
pub fn read_log(
    log_path: impl AsRef<Path>,
    recovery: LineRecovery,
) -> Result<Vec<SensorReading>, ReaderError> {
    let path = log_path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ReaderError::Missing(path.to_path_buf()),
        _ => ReaderError::Io(e.to_string()),
    })?;

    parse_log(&content, recovery)
}

/// Parse log content into a flat list of readings, in file order.
pub fn parse_log(content: &str, recovery: LineRecovery) -> Result<Vec<SensorReading>, ReaderError> {
    let unterminated = !content.is_empty() && !content.ends_with('\n');
    let line_count = content.lines().count();
    let mut readings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(_)
                if recovery == LineRecovery::SkipTrailing
                    && unterminated
                    && line_no == line_count =>
            {
                break;
            }
            Err(e) => {
                return Err(ReaderError::Parse {
                    line: line_no,
                    message: e.to_string(),
                })
            }
        };

        let entry: SensorLogEntry =
            serde_json::from_value(value).map_err(|e| ReaderError::Schema {
                line: line_no,
                message: e.to_string(),
            })?;
        readings.extend(entry.payload);
    }

    if readings.is_empty() {
        return Err(ReaderError::Empty);
    }

    Ok(readings)
}
