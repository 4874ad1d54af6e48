//! RelapsePredNet - mobile sensing dashboard for relapse prediction research.
//!
//! This library reads the line-delimited JSON log written by a phone-side
//! sensor logger, reduces it to the latest hour's per-field averages, and
//! renders a dashboard around that snapshot.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       RelapsePredNet                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐         │
//! │  │ Sensor log  │──▶│  Bucketing  │──▶│  Averaging  │         │
//! │  │  (JSONL)    │   │ (1h, epoch) │   │ (per field) │         │
//! │  └─────────────┘   └─────────────┘   └─────────────┘         │
//! │                                             │                │
//! │                                             ▼                │
//! │  ┌─────────────┐                     ┌─────────────┐         │
//! │  │   Intake    │────────────────────▶│  Dashboard  │         │
//! │  │ (SFS, age)  │                     │   render    │         │
//! │  └─────────────┘                     └─────────────┘         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use relapse_prednet::{core, dashboard, prediction::SimulatedPredictor};
//!
//! let metrics = core::latest_hourly_metrics("raw_sensor_data.json");
//! let state = dashboard::DashboardState::new(dashboard::IntakeState::default());
//! let view = dashboard::render(&state, metrics.as_ref(), &SimulatedPredictor);
//! println!("{view}");
//! ```

pub mod config;
pub mod core;
pub mod dashboard;
pub mod prediction;
pub mod stats;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use self::core::{
    latest_hourly_metrics, try_latest_hourly_metrics, HourlyAverage, LineRecovery, ReaderError,
    SensorReading,
};
pub use dashboard::{render, DashboardState, DashboardView, IntakeState};
pub use prediction::{RiskAssessment, RiskPredictor, SimulatedPredictor};
pub use stats::{RenderStats, SharedRenderStats};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Notice shown by the `disclaimer` command.
pub const DISCLAIMER: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║             RELAPSEPREDNET - DEMONSTRATION DISCLAIMER            ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  This dashboard is a research demonstration.                     ║
║                                                                  ║
║  ✓ WHAT IT SHOWS:                                                ║
║    • Hourly averages of phone sensor readings                    ║
║      (movement, light level, location)                           ║
║    • Patient intake values you enter                             ║
║                                                                  ║
║  ✗ WHAT IT DOES NOT DO:                                          ║
║    • Run any forecasting model                                   ║
║    • Provide clinical advice or diagnosis                        ║
║    • Store or transmit sensor data                               ║
║                                                                  ║
║  Risk scores are SIMULATED placeholders until a trained model    ║
║  is integrated.                                                  ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;
