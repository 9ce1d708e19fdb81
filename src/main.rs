// src/main.rs
//
// Requirement validation demo: runs the canned scenarios against one engine
// and logs which safety requirements hold.

use anyhow::Result;
use tracing::{info, warn};

use aeb_guard::{scenarios, AebEngine, SafetyLimits, WeatherCondition};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("aeb_guard=info")
        .init();

    info!("AEB decision pipeline - requirement validation");

    let limits = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "loading safety limits");
            SafetyLimits::load(&path)?
        }
        None => SafetyLimits::default(),
    };
    let mut engine = AebEngine::with_limits(30.0, limits);

    // Req 1: 50 m detection range.
    let result = engine.evaluate(&scenarios::beyond_range())?;
    check(
        "Req 1: objects beyond 50m are never detected",
        result.detections.is_empty(),
    );

    // Req 4: emergency braking below the TTC threshold.
    let result = engine.evaluate(&scenarios::imminent_pedestrian())?;
    info!(
        ttc = result.trigger_ttc,
        action = ?result.decision.action,
        "imminent pedestrian cycle"
    );
    check(
        "Req 4: braking when TTC is under threshold",
        result.decision.braking && result.trigger_ttc < engine.limits().min_ttc_threshold,
    );

    // Req 6: decision latency under 100 ms.
    let result = engine.evaluate(&scenarios::pedestrian_crossing())?;
    check(
        "Req 6: response time under budget",
        result.decision.response_time < engine.limits().max_response_time,
    );

    // Req 7: reliability floor in light rain.
    engine.set_weather(WeatherCondition::LightRain);
    engine.evaluate(&scenarios::pedestrian_crossing())?;
    let reliability = engine.sensor_reliability();
    info!(reliability, "light rain reliability");
    check(
        "Req 7: adverse weather reliability floor",
        reliability >= engine.limits().weather_accuracy_threshold,
    );

    // Req 10: fail-safe on sensor failure.
    engine.inject_sensor_failure("camera");
    engine.inject_sensor_failure("radar");
    let result = engine.evaluate(&scenarios::pedestrian_crossing())?;
    check(
        "Req 10: fail-safe when reliability collapses",
        result.decision.action == aeb_guard::DecisionAction::FailSafe,
    );

    if let Some(report) = engine.report() {
        info!(
            total_decisions = report.total_decisions,
            emergency_events = report.emergency_events,
            avg_response_time = report.avg_response_time,
            max_response_time = report.max_response_time,
            avg_detection_accuracy = report.avg_detection_accuracy,
            response_time_compliant = report.response_time_compliant,
            detection_accuracy_compliant = report.detection_accuracy_compliant,
            "performance summary"
        );
    }
    info!(events = engine.event_log().len(), "safety event log size");

    Ok(())
}

fn check(requirement: &str, passed: bool) {
    if passed {
        info!("PASSED - {requirement}");
    } else {
        warn!("FAILED - {requirement}");
    }
}
