// src/pipeline/engine.rs
//
// Orchestrator: runs sensing -> risk -> decision for one scenario, keeps
// the running metrics, and is the sole entry point for outer layers.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::SafetyLimits;
use crate::decision::DecisionEngine;
use crate::error::AebResult;
use crate::pipeline::metrics::{PerformanceMetrics, PerformanceReport};
use crate::risk;
use crate::sensors::SensorSuite;
use crate::types::{CycleResult, EventLogEntry, ObjectClass, ScenarioObject, WeatherCondition};

/// One logical vehicle's AEB engine. Owns all mutable pipeline state; run one
/// instance per vehicle, nothing is shared.
pub struct AebEngine {
    sensors: SensorSuite,
    decision: DecisionEngine,
    metrics: PerformanceMetrics,
    limits: SafetyLimits,
    ego_speed_kmh: f64,
    rng: StdRng,
}

impl AebEngine {
    /// Engine with an entropy-seeded generator, default limits.
    pub fn new(ego_speed_kmh: f64) -> Self {
        Self::with_rng(ego_speed_kmh, SafetyLimits::default(), StdRng::from_entropy())
    }

    /// Engine with caller-supplied limits, entropy-seeded generator.
    pub fn with_limits(ego_speed_kmh: f64, limits: SafetyLimits) -> Self {
        Self::with_rng(ego_speed_kmh, limits, StdRng::from_entropy())
    }

    /// Deterministic engine for replayable runs and tests.
    pub fn with_seed(ego_speed_kmh: f64, seed: u64) -> Self {
        Self::with_rng(
            ego_speed_kmh,
            SafetyLimits::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    pub fn with_rng(ego_speed_kmh: f64, limits: SafetyLimits, rng: StdRng) -> Self {
        Self {
            sensors: SensorSuite::new(),
            decision: DecisionEngine::new(),
            metrics: PerformanceMetrics::new(),
            limits,
            ego_speed_kmh,
            rng,
        }
    }

    pub fn limits(&self) -> &SafetyLimits {
        &self.limits
    }

    pub fn ego_speed_kmh(&self) -> f64 {
        self.ego_speed_kmh
    }

    pub fn sensor_reliability(&self) -> f64 {
        self.sensors.reliability()
    }

    pub fn set_weather(&mut self, weather: WeatherCondition) {
        info!(?weather, "weather condition set");
        self.sensors.set_weather(weather);
    }

    pub fn set_degradation(&mut self, active: bool, probability: f64) {
        self.sensors.set_degradation(active, probability);
    }

    pub fn inject_sensor_failure(&mut self, sensor_kind: &str) {
        info!(sensor_kind, "sensor failure injected");
        self.sensors.simulate_failure(sensor_kind);
    }

    /// Runs one full decision cycle. Class tags are validated up front; an
    /// unrecognized tag aborts the cycle before any state or metrics change.
    pub fn evaluate(&mut self, scenario: &[ScenarioObject]) -> AebResult<CycleResult> {
        let classes = scenario
            .iter()
            .map(|obj| obj.kind.parse::<ObjectClass>())
            .collect::<AebResult<Vec<_>>>()?;

        let detections = self
            .sensors
            .detect(scenario, &classes, &self.limits, &mut self.rng);
        let verdict = risk::assess(&detections, self.ego_speed_kmh, &self.limits);
        let reliability = self.sensors.reliability();
        let decision = self.decision.decide(
            verdict.threat_detected,
            verdict.threat_object.as_ref(),
            verdict.trigger_ttc,
            reliability,
            &self.limits,
        );

        let accuracy = self.detection_accuracy(scenario, detections.len());
        self.metrics
            .record_cycle(decision.action, decision.response_time, accuracy);
        debug!(
            detections = detections.len(),
            threat = verdict.threat_detected,
            action = ?decision.action,
            "cycle complete"
        );

        Ok(CycleResult {
            detections,
            threat_detected: verdict.threat_detected,
            threat_object: verdict.threat_object,
            trigger_ttc: verdict.trigger_ttc,
            min_ttc_all: verdict.min_ttc_all,
            decision,
            sensor_reliability: reliability,
            system_state: self.decision.state(),
        })
    }

    /// Ratio of surfaced detections to scenario objects truly within range.
    /// Uses TRUE positions so noise-driven range jitter counts against (or
    /// for) the sensing stage.
    fn detection_accuracy(&self, scenario: &[ScenarioObject], detected: usize) -> f64 {
        let in_range = scenario
            .iter()
            .filter(|obj| obj.true_distance() <= self.limits.max_detection_range)
            .count();
        (detected as f64 / in_range.max(1) as f64).min(1.0)
    }

    /// Aggregate statistics, or None before the first cycle.
    pub fn report(&self) -> Option<PerformanceReport> {
        self.metrics.summary(&self.limits)
    }

    /// Accumulated safety events, oldest first.
    pub fn event_log(&self) -> &[EventLogEntry] {
        self.decision.event_log()
    }
}
