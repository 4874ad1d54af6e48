//! Relapse risk prediction.
//!
//! No model ships with this crate. [`SimulatedPredictor`] stands in for the
//! forecasting model and always reports the same assessment; a real model
//! plugs in behind [`RiskPredictor`].

use crate::core::HourlyAverage;
use crate::dashboard::IntakeState;
use serde::{Deserialize, Serialize};

/// Risk score reported by the simulated predictor.
pub const SIMULATED_RISK_SCORE: f64 = 0.72;

/// Coarse patient status shown alongside the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLabel {
    Stable,
    AtRisk,
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLabel::Stable => write!(f, "STABLE"),
            RiskLabel::AtRisk => write!(f, "AT RISK"),
        }
    }
}

/// Output of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Relapse risk (0-1)
    pub risk_score: f64,
    pub label: RiskLabel,
    /// True when no model inference produced this assessment
    pub simulated: bool,
}

/// Something that turns an hourly snapshot into a risk assessment.
pub trait RiskPredictor {
    fn predict(&self, metrics: &HourlyAverage, intake: &IntakeState) -> RiskAssessment;
}

/// Placeholder predictor with a fixed output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedPredictor;

impl RiskPredictor for SimulatedPredictor {
    fn predict(&self, _metrics: &HourlyAverage, _intake: &IntakeState) -> RiskAssessment {
        RiskAssessment {
            risk_score: SIMULATED_RISK_SCORE,
            label: RiskLabel::Stable,
            simulated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HourlyBucket;

    #[test]
    fn test_simulated_predictor_is_fixed() {
        let metrics = crate::core::compute_hourly_average(&HourlyBucket::from_index(0).unwrap());
        let intake = IntakeState::default();

        let assessment = SimulatedPredictor.predict(&metrics, &intake);
        assert_eq!(assessment.risk_score, SIMULATED_RISK_SCORE);
        assert_eq!(assessment.label, RiskLabel::Stable);
        assert!(assessment.simulated);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(RiskLabel::Stable.to_string(), "STABLE");
        assert_eq!(RiskLabel::AtRisk.to_string(), "AT RISK");
    }
}
