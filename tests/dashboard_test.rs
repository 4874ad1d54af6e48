//! Integration tests for the dashboard render cycle

use relapse_prednet::core::{LineRecovery, BUCKET_NANOS};
use relapse_prednet::dashboard::{
    query_metrics, render, DashboardState, IntakeState, PredictionOutcome, SensingSection,
};
use relapse_prednet::prediction::SimulatedPredictor;
use relapse_prednet::stats::RenderStats;
use std::path::PathBuf;

fn test_log(name: &str, content: &str) -> PathBuf {
    let dir =
        std::env::temp_dir().join(format!("relapse-prednet-dashboard-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("Failed to create test dir");
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write log");
    path
}

#[test]
fn test_render_cycle_with_live_log() {
    let t = 480_000 * BUCKET_NANOS;
    let path = test_log(
        "live.json",
        &format!(
            "{{\"payload\": [{{\"time\": {t}, \"average\": 0.5, \"lux\": 80}}, \
             {{\"time\": {}, \"average\": 1.5, \"latitude\": 48.8566, \"longitude\": 2.3522}}]}}\n",
            t + 1_000_000_000
        ),
    );

    let metrics = query_metrics(&path, LineRecovery::Strict);
    let state = DashboardState::new(IntakeState::new(90, 40).unwrap()).with_prediction(true);
    let view = render(&state, metrics.as_ref(), &SimulatedPredictor);

    let text = view.to_string();
    assert!(text.contains("Movement (Accel): 1.00 m/s²"));
    assert!(text.contains("Light Level: 80.0 lux"));
    assert!(text.contains("Latitude: 48.8566"));
    assert!(text.contains("Longitude: 2.3522"));
    assert!(text.contains("Analysis Complete: Patient is STABLE."));
    assert!(text.contains("Risk score: 0.72"));
}

#[test]
fn test_render_cycle_without_log() {
    let path = std::env::temp_dir().join("relapse-prednet-missing-log.json");

    let metrics = query_metrics(&path, LineRecovery::Strict);
    let state = DashboardState::new(IntakeState::default()).with_prediction(true);
    let view = render(&state, metrics.as_ref(), &SimulatedPredictor);

    assert!(matches!(view.sensing, SensingSection::NoData { .. }));
    assert!(matches!(
        view.prediction,
        Some(PredictionOutcome::Unavailable { .. })
    ));
    assert!(view
        .to_string()
        .contains("Cannot predict without active sensing data."));
}

#[test]
fn test_malformed_log_renders_as_no_data() {
    let path = test_log("broken.json", "{\"payload\": [\n");

    let metrics = query_metrics(&path, LineRecovery::Strict);
    let view = render(
        &DashboardState::new(IntakeState::default()),
        metrics.as_ref(),
        &SimulatedPredictor,
    );

    assert!(!view.has_live_data());
}

#[test]
fn test_stats_follow_render_outcomes() {
    let stats = RenderStats::new();
    let live = test_log(
        "stats.json",
        "{\"payload\": [{\"time\": 0, \"lux\": 1}]}\n",
    );
    let missing = std::env::temp_dir().join("relapse-prednet-missing-stats.json");
    let state = DashboardState::new(IntakeState::default());

    for path in [&live, &missing, &live] {
        let metrics = query_metrics(path, LineRecovery::Strict);
        let view = render(&state, metrics.as_ref(), &SimulatedPredictor);
        stats.record_render(view.has_live_data(), state.predict_requested);
    }

    let snapshot = stats.stats();
    assert_eq!(snapshot.renders, 3);
    assert_eq!(snapshot.renders_with_data, 2);
    assert_eq!(snapshot.renders_without_data, 1);
    assert_eq!(snapshot.predictions_requested, 0);
}
