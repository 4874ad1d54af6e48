//! Core functionality for RelapsePredNet.
//!
//! This module contains:
//! - Sensor log record types
//! - Hourly bucketing of readings
//! - Per-field averaging of the latest bucket
//! - The hourly metrics reader tying them together

pub mod aggregate;
pub mod bucketing;
pub mod reader;
pub mod types;

// Re-export commonly used types
pub use aggregate::{compute_hourly_average, HourlyAverage};
pub use bucketing::{bucket_index, bucket_start, latest_bucket, HourlyBucket, BUCKET_NANOS};
pub use reader::{
    latest_hourly_metrics, parse_log, read_log, try_latest_hourly_metrics, LineRecovery,
    ReaderError,
};
pub use types::{SensorLogEntry, SensorReading};
