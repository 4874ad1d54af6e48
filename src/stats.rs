//! Render cycle statistics.
//!
//! Counts how often the dashboard rendered and how often live data was
//! available, for the summary printed when a watch session ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for the current session.
#[derive(Debug)]
pub struct RenderStats {
    /// Number of render cycles
    renders: AtomicU64,
    /// Cycles where the reader returned metrics
    renders_with_data: AtomicU64,
    /// Cycles rendered in the "no live data" state
    renders_without_data: AtomicU64,
    /// Cycles where a prediction was requested
    predictions_requested: AtomicU64,
    /// Session start time
    session_start: DateTime<Utc>,
}

impl RenderStats {
    pub fn new() -> Self {
        Self {
            renders: AtomicU64::new(0),
            renders_with_data: AtomicU64::new(0),
            renders_without_data: AtomicU64::new(0),
            predictions_requested: AtomicU64::new(0),
            session_start: Utc::now(),
        }
    }

    /// Record one render cycle.
    pub fn record_render(&self, had_data: bool, predicted: bool) {
        self.renders.fetch_add(1, Ordering::Relaxed);
        if had_data {
            self.renders_with_data.fetch_add(1, Ordering::Relaxed);
        } else {
            self.renders_without_data.fetch_add(1, Ordering::Relaxed);
        }
        if predicted {
            self.predictions_requested.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn stats(&self) -> RenderStatsSnapshot {
        RenderStatsSnapshot {
            renders: self.renders.load(Ordering::Relaxed),
            renders_with_data: self.renders_with_data.load(Ordering::Relaxed),
            renders_without_data: self.renders_without_data.load(Ordering::Relaxed),
            predictions_requested: self.predictions_requested.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n\
             - Render cycles: {}\n\
             - With live data: {}\n\
             - Without live data: {}\n\
             - Predictions requested: {}\n\
             - Session duration: {} seconds",
            stats.renders,
            stats.renders_with_data,
            stats.renders_without_data,
            stats.predictions_requested,
            stats.session_duration_secs
        )
    }

    pub fn reset(&self) {
        self.renders.store(0, Ordering::Relaxed);
        self.renders_with_data.store(0, Ordering::Relaxed);
        self.renders_without_data.store(0, Ordering::Relaxed);
        self.predictions_requested.store(0, Ordering::Relaxed);
    }
}

impl Default for RenderStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderStatsSnapshot {
    pub renders: u64,
    pub renders_with_data: u64,
    pub renders_without_data: u64,
    pub predictions_requested: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// Thread-safe shared statistics.
pub type SharedRenderStats = Arc<RenderStats>;

pub fn create_shared_stats() -> SharedRenderStats {
    Arc::new(RenderStats::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_counting() {
        let stats = RenderStats::new();

        stats.record_render(true, false);
        stats.record_render(false, true);
        stats.record_render(true, true);

        let snapshot = stats.stats();
        assert_eq!(snapshot.renders, 3);
        assert_eq!(snapshot.renders_with_data, 2);
        assert_eq!(snapshot.renders_without_data, 1);
        assert_eq!(snapshot.predictions_requested, 2);
    }

    #[test]
    fn test_reset() {
        let stats = RenderStats::new();
        stats.record_render(true, true);
        stats.reset();

        let snapshot = stats.stats();
        assert_eq!(snapshot.renders, 0);
        assert_eq!(snapshot.predictions_requested, 0);
    }

    #[test]
    fn test_summary_format() {
        let stats = RenderStats::new();
        let summary = stats.summary();

        assert!(summary.contains("Render cycles"));
        assert!(summary.contains("Without live data"));
    }
}
