//! Dashboard view description and terminal rendering.
//!
//! [`render`] is a pure function of the dashboard state and the reader's
//! result. It builds a [`DashboardView`]; printing that view is a separate
//! step via its `Display` impl.

use crate::core::HourlyAverage;
use crate::dashboard::intake::IntakeState;
use crate::prediction::{RiskAssessment, RiskPredictor};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

pub const TITLE: &str = "RelapsePredNet";
pub const CAPTION: &str = "Personalized Mobile Sensing-Based Relapse Prediction";
pub const NO_DATA_WARNING: &str = "No live data found. Start 'Sensor Logger' on your phone!";
pub const PREDICTION_COMPLETE: &str = "Analysis Complete: Patient is STABLE.";
pub const PREDICTION_UNAVAILABLE: &str = "Cannot predict without active sensing data.";

/// Value shown for a sensor field missing from the latest hour.
const MISSING_FIELD_DEFAULT: f64 = 0.0;

/// Inputs to a render cycle besides the metrics themselves.
#[derive(Debug, Clone, Copy)]
pub struct DashboardState {
    pub intake: IntakeState,
    /// Whether the user asked for a prediction this cycle
    pub predict_requested: bool,
    /// Timezone used to label the averaged hour
    pub timezone: Tz,
}

impl DashboardState {
    pub fn new(intake: IntakeState) -> Self {
        Self {
            intake,
            predict_requested: false,
            timezone: Tz::UTC,
        }
    }

    pub fn with_prediction(mut self, requested: bool) -> Self {
        self.predict_requested = requested;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }
}

/// A single labelled metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub label: &'static str,
    /// Formatted value including unit
    pub value: String,
}

/// Intake section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeSection {
    pub sfs_score: u8,
    pub age: u8,
    pub info: String,
}

/// Live sensing section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SensingSection {
    Live {
        /// Averaged hour, e.g. "14:00-15:00 UTC"
        window: String,
        reading_count: usize,
        columns: [Vec<MetricTile>; 2],
    },
    NoData {
        warning: &'static str,
    },
}

/// Prediction section, present only when a prediction was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Complete {
        message: &'static str,
        assessment: RiskAssessment,
    },
    Unavailable {
        message: &'static str,
    },
}

/// Everything one render cycle shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: &'static str,
    pub caption: &'static str,
    pub intake: IntakeSection,
    pub sensing: SensingSection,
    pub prediction: Option<PredictionOutcome>,
}

impl DashboardView {
    pub fn has_live_data(&self) -> bool {
        matches!(self.sensing, SensingSection::Live { .. })
    }
}

/// Build the view for one render cycle.
pub fn render(
    state: &DashboardState,
    metrics: Option<&HourlyAverage>,
    predictor: &dyn RiskPredictor,
) -> DashboardView {
    let intake = IntakeSection {
        sfs_score: state.intake.sfs_score(),
        age: state.intake.age(),
        info: format!("Model personalized for SFS: {}", state.intake.sfs_score()),
    };

    let sensing = match metrics {
        Some(m) => SensingSection::Live {
            window: window_label(m.bucket_start, m.bucket_end, state.timezone),
            reading_count: m.reading_count,
            columns: metric_columns(m),
        },
        None => SensingSection::NoData {
            warning: NO_DATA_WARNING,
        },
    };

    let prediction = state.predict_requested.then(|| match metrics {
        Some(m) => PredictionOutcome::Complete {
            message: PREDICTION_COMPLETE,
            assessment: predictor.predict(m, &state.intake),
        },
        None => PredictionOutcome::Unavailable {
            message: PREDICTION_UNAVAILABLE,
        },
    });

    DashboardView {
        title: TITLE,
        caption: CAPTION,
        intake,
        sensing,
        prediction,
    }
}

/// Movement and light in the first column, location in the second.
fn metric_columns(metrics: &HourlyAverage) -> [Vec<MetricTile>; 2] {
    let field = |name: &str| metrics.get_or(name, MISSING_FIELD_DEFAULT);

    [
        vec![
            MetricTile {
                label: "Movement (Accel)",
                value: format!("{:.2} m/s²", field("average")),
            },
            MetricTile {
                label: "Light Level",
                value: format!("{:.1} lux", field("lux")),
            },
        ],
        vec![
            MetricTile {
                label: "Latitude",
                value: format!("{:.4}", field("latitude")),
            },
            MetricTile {
                label: "Longitude",
                value: format!("{:.4}", field("longitude")),
            },
        ],
    ]
}

fn window_label(start: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> String {
    let start = start.with_timezone(&tz);
    let end = end.with_timezone(&tz);
    format!(
        "{} {}-{} {}",
        start.format("%Y-%m-%d"),
        start.format("%H:%M"),
        end.format("%H:%M"),
        tz.name()
    )
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.caption)?;
        writeln!(f)?;

        writeln!(f, "1. Patient Intake")?;
        writeln!(f, "  Social Functioning Scale (SFS) Score: {}", self.intake.sfs_score)?;
        writeln!(f, "  Age: {}", self.intake.age)?;
        writeln!(f, "  {}", self.intake.info)?;
        writeln!(f)?;

        writeln!(f, "2. Real-Time Sensing (Live from Phone)")?;
        match &self.sensing {
            SensingSection::Live {
                window,
                reading_count,
                columns,
            } => {
                writeln!(f, "  Latest hour: {window} ({reading_count} readings)")?;
                let rows = columns[0].len().max(columns[1].len());
                for row in 0..rows {
                    let left = columns[0].get(row).map(tile_text).unwrap_or_default();
                    let right = columns[1].get(row).map(tile_text).unwrap_or_default();
                    writeln!(f, "  {left:<36}{right}")?;
                }
            }
            SensingSection::NoData { warning } => {
                writeln!(f, "  ! {warning}")?;
            }
        }

        if let Some(prediction) = &self.prediction {
            writeln!(f)?;
            writeln!(f, "{}", "-".repeat(60))?;
            match prediction {
                PredictionOutcome::Complete {
                    message,
                    assessment,
                } => {
                    writeln!(f, "  {message}")?;
                    write!(
                        f,
                        "  Risk score: {:.2} ({})",
                        assessment.risk_score, assessment.label
                    )?;
                    if assessment.simulated {
                        write!(f, " [simulated]")?;
                    }
                    writeln!(f)?;
                }
                PredictionOutcome::Unavailable { message } => {
                    writeln!(f, "  ! {message}")?;
                }
            }
        }

        Ok(())
    }
}

fn tile_text(tile: &MetricTile) -> String {
    format!("{}: {}", tile.label, tile.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{compute_hourly_average, HourlyBucket, SensorReading};
    use crate::prediction::{SimulatedPredictor, SIMULATED_RISK_SCORE};

    fn sample_metrics() -> HourlyAverage {
        let mut bucket = HourlyBucket::from_index(480_000).unwrap();
        let t = bucket.start.timestamp_nanos_opt().unwrap();
        bucket.add_reading(SensorReading::new(t).with_field("average", 0.25));
        bucket.add_reading(SensorReading::new(t + 1).with_field("lux", 120.0));
        bucket.add_reading(SensorReading::new(t + 2).with_field("latitude", 51.50735));
        compute_hourly_average(&bucket)
    }

    #[test]
    fn test_render_live_metrics() {
        let metrics = sample_metrics();
        let state = DashboardState::new(IntakeState::default());
        let view = render(&state, Some(&metrics), &SimulatedPredictor);

        assert!(view.has_live_data());
        assert!(view.prediction.is_none());
        match &view.sensing {
            SensingSection::Live {
                columns,
                reading_count,
                ..
            } => {
                assert_eq!(*reading_count, 3);
                assert_eq!(columns[0][0].value, "0.25 m/s²");
                assert_eq!(columns[0][1].value, "120.0 lux");
                assert_eq!(columns[1][0].value, "51.5074");
                // Longitude never reported, shown as the default.
                assert_eq!(columns[1][1].value, "0.0000");
            }
            other => panic!("expected live section, got {other:?}"),
        }
    }

    #[test]
    fn test_render_no_data() {
        let state = DashboardState::new(IntakeState::default());
        let view = render(&state, None, &SimulatedPredictor);

        assert!(!view.has_live_data());
        assert_eq!(
            view.sensing,
            SensingSection::NoData {
                warning: NO_DATA_WARNING
            }
        );
        assert!(view.to_string().contains(NO_DATA_WARNING));
    }

    #[test]
    fn test_predict_with_data() {
        let metrics = sample_metrics();
        let state = DashboardState::new(IntakeState::default()).with_prediction(true);
        let view = render(&state, Some(&metrics), &SimulatedPredictor);

        match view.prediction {
            Some(PredictionOutcome::Complete { assessment, .. }) => {
                assert_eq!(assessment.risk_score, SIMULATED_RISK_SCORE);
            }
            other => panic!("expected completed prediction, got {other:?}"),
        }
    }

    #[test]
    fn test_predict_without_data() {
        let state = DashboardState::new(IntakeState::default()).with_prediction(true);
        let view = render(&state, None, &SimulatedPredictor);

        assert_eq!(
            view.prediction,
            Some(PredictionOutcome::Unavailable {
                message: PREDICTION_UNAVAILABLE
            })
        );
    }

    #[test]
    fn test_intake_info() {
        let intake = IntakeState::new(42, 55).unwrap();
        let view = render(&DashboardState::new(intake), None, &SimulatedPredictor);

        assert_eq!(view.intake.info, "Model personalized for SFS: 42");
        assert!(view.to_string().contains("Age: 55"));
    }

    #[test]
    fn test_window_label_in_timezone() {
        let metrics = sample_metrics();
        let state = DashboardState::new(IntakeState::default())
            .with_timezone("Asia/Kolkata".parse().unwrap());
        let view = render(&state, Some(&metrics), &SimulatedPredictor);

        // Hour 480000 since the epoch is 2024-10-04 00:00 UTC.
        match view.sensing {
            SensingSection::Live { window, .. } => {
                assert_eq!(window, "2024-10-04 05:30-06:30 Asia/Kolkata");
            }
            other => panic!("expected live section, got {other:?}"),
        }
    }
}
