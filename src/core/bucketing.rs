//! Hourly bucketing of sensor readings.
//!
//! Buckets are fixed one-hour intervals anchored at epoch-aligned hour
//! boundaries (00:00-01:00, 01:00-02:00, ...), independent of where any
//! reading falls inside the hour.

use crate::core::types::SensorReading;
use chrono::{DateTime, Duration, Utc};

/// Width of a bucket in nanoseconds.
pub const BUCKET_NANOS: i64 = 3_600 * 1_000_000_000;

/// Width of a bucket in seconds.
const BUCKET_SECS: i64 = 3_600;

/// Index of the bucket holding a nanosecond timestamp.
///
/// Floor division, so readings before the epoch land in negative buckets
/// instead of collapsing into bucket zero.
pub fn bucket_index(time_nanos: i64) -> i64 {
    time_nanos.div_euclid(BUCKET_NANOS)
}

/// Start of the hour containing `timestamp`.
pub fn bucket_start(timestamp: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let index = timestamp.timestamp().div_euclid(BUCKET_SECS);
    DateTime::from_timestamp(index * BUCKET_SECS, 0)
}

/// One hour of readings.
#[derive(Debug, Clone)]
pub struct HourlyBucket {
    /// Bucket index (hours since the epoch)
    pub index: i64,
    /// Inclusive start of the hour
    pub start: DateTime<Utc>,
    /// Exclusive end of the hour
    pub end: DateTime<Utc>,
    /// Readings in this hour, in log order
    pub readings: Vec<SensorReading>,
}

impl HourlyBucket {
    /// Create an empty bucket for the given hour index.
    pub fn from_index(index: i64) -> Option<Self> {
        let start = DateTime::from_timestamp(index.checked_mul(BUCKET_SECS)?, 0)?;
        Some(Self {
            index,
            start,
            end: start + Duration::hours(1),
            readings: Vec::new(),
        })
    }

    /// Check if a timestamp falls within this bucket.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp < self.end
    }

    /// Add a reading to this bucket.
    pub fn add_reading(&mut self, reading: SensorReading) {
        self.readings.push(reading);
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn reading_count(&self) -> usize {
        self.readings.len()
    }
}

/// Select the chronologically latest bucket among all readings.
///
/// Earlier hours are dropped outright; gaps between hours are not filled.
/// Returns `None` when there are no readings.
pub fn latest_bucket(readings: Vec<SensorReading>) -> Option<HourlyBucket> {
    let latest = readings.iter().map(|r| bucket_index(r.time)).max()?;
    let mut bucket = HourlyBucket::from_index(latest)?;

    for reading in readings {
        if bucket_index(reading.time) == latest {
            bucket.add_reading(reading);
        }
    }

    Some(bucket)
}
