//! Sensor log record types.
//!
//! These mirror the line-delimited JSON written by the phone-side sensor
//! logger: every line is a batch whose `payload` holds individual readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One line of the sensor log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorLogEntry {
    /// Readings batched into this line, in the order the logger wrote them
    pub payload: Vec<SensorReading>,
}

/// A single timestamped reading.
///
/// Field sets are sparse: an accelerometer reading carries `average`, a light
/// reading carries `lux`, a location fix carries `latitude`/`longitude`, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Nanoseconds since the Unix epoch
    pub time: i64,
    /// Every other field of the reading, numeric or not
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl SensorReading {
    /// Create a reading with no sensor fields.
    pub fn new(time: i64) -> Self {
        Self {
            time,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style helper for attaching a numeric field.
    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), Value::from(value));
        self
    }

    /// Absolute timestamp of the reading.
    pub fn timestamp(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.time)
    }

    /// Numeric value of `name`, if present and a JSON number.
    pub fn numeric(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(numeric_value)
    }

    /// Iterate over the fields holding JSON numbers.
    ///
    /// Booleans, strings, nulls, arrays and objects are skipped.
    pub fn numeric_fields(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.fields
            .iter()
            .filter_map(|(name, value)| numeric_value(value).map(|v| (name.as_str(), v)))
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_deserializes_sparse_fields() {
        let reading: SensorReading =
            serde_json::from_str(r#"{"time": 1700000000000000000, "lux": 12.5, "sensor": "light"}"#)
                .unwrap();

        assert_eq!(reading.time, 1_700_000_000_000_000_000);
        assert_eq!(reading.numeric("lux"), Some(12.5));
        assert_eq!(reading.numeric("sensor"), None);
        assert!(!reading.fields.contains_key("time"));
    }

    #[test]
    fn test_numeric_fields_skip_non_numbers() {
        let reading: SensorReading = serde_json::from_str(
            r#"{"time": 0, "a": 1, "b": true, "c": null, "d": "x", "e": [1], "f": 2.5}"#,
        )
        .unwrap();

        let numeric: Vec<(&str, f64)> = reading.numeric_fields().collect();
        assert_eq!(numeric, vec![("a", 1.0), ("f", 2.5)]);
    }

    #[test]
    fn test_reading_requires_integer_time() {
        assert!(serde_json::from_str::<SensorReading>(r#"{"lux": 1}"#).is_err());
        assert!(serde_json::from_str::<SensorReading>(r#"{"time": "soon"}"#).is_err());
    }

    #[test]
    fn test_timestamp_conversion() {
        let reading = SensorReading::new(1_500_000_000);
        assert_eq!(reading.timestamp().timestamp(), 1);
        assert_eq!(reading.timestamp().timestamp_subsec_nanos(), 500_000_000);
    }
}
