//! Dashboard presentation layer.
//!
//! Each render cycle queries the metrics reader once, then renders the
//! result together with the intake state. Reader failures of any kind are
//! shown to the user as "no live data".

pub mod intake;
pub mod view;

use crate::core::{try_latest_hourly_metrics, HourlyAverage, LineRecovery, ReaderError};
use std::path::Path;

// Re-export commonly used types
pub use intake::{IntakeError, IntakeState, AGE_RANGE, SFS_RANGE};
pub use view::{
    render, DashboardState, DashboardView, MetricTile, PredictionOutcome, SensingSection,
};

/// Query the reader for one render cycle.
///
/// The failure kind is logged; callers only ever see `None`.
pub fn query_metrics(log_path: &Path, recovery: LineRecovery) -> Option<HourlyAverage> {
    match try_latest_hourly_metrics(log_path, recovery) {
        Ok(metrics) => {
            tracing::debug!(
                fields = metrics.len(),
                readings = metrics.reading_count,
                bucket_start = %metrics.bucket_start,
                "Loaded latest hourly metrics"
            );
            Some(metrics)
        }
        Err(ReaderError::Missing(path)) => {
            tracing::debug!("No sensor log at {}", path.display());
            None
        }
        Err(e) => {
            tracing::debug!("Sensor log unusable: {e}");
            None
        }
    }
}
