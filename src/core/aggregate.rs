//! Per-field averaging of an hourly bucket.
//!
//! Every numeric field is averaged independently over the readings that
//! carry it. A reading missing one field never affects another field's mean.

use crate::core::bucketing::HourlyBucket;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Averaged sensor values for the latest hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyAverage {
    /// Start of the averaged hour
    pub bucket_start: DateTime<Utc>,
    /// End of the averaged hour (exclusive)
    pub bucket_end: DateTime<Utc>,
    /// Number of readings that fell into the hour
    pub reading_count: usize,
    /// Mean of each numeric field seen in the hour
    pub fields: BTreeMap<String, f64>,
}

impl HourlyAverage {
    /// Mean of `field`, or `None` if no reading in the hour carried it.
    pub fn get(&self, field: &str) -> Option<f64> {
        self.fields.get(field).copied()
    }

    /// Mean of `field`, falling back to `default` when absent.
    pub fn get_or(&self, field: &str, default: f64) -> f64 {
        self.get(field).unwrap_or(default)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Compute the per-field mean of every numeric field in the bucket.
pub fn compute_hourly_average(bucket: &HourlyBucket) -> HourlyAverage {
    let mut samples: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for reading in &bucket.readings {
        for (name, value) in reading.numeric_fields() {
            samples.entry(name).or_default().push(value);
        }
    }

    let fields = samples
        .into_iter()
        .map(|(name, mut values)| {
            // Sorted so the result does not depend on log order.
            values.sort_by(f64::total_cmp);
            (name.to_string(), values.iter().mean())
        })
        .collect();

    HourlyAverage {
        bucket_start: bucket.start,
        bucket_end: bucket.end,
        reading_count: bucket.reading_count(),
        fields,
    }
}
