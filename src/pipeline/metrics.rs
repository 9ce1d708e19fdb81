// src/pipeline/metrics.rs
//
// Running performance counters for the decision pipeline. Aggregated into a
// report on demand; serializable so outer layers can export it.

use serde::Serialize;

use crate::config::SafetyLimits;
use crate::types::DecisionAction;

/// Per-engine running statistics. Single-threaded by design: one engine, one
/// metrics instance, mutated only by that engine's own cycles.
#[derive(Debug, Clone, Default)]
pub struct PerformanceMetrics {
    total_decisions: u64,
    emergency_events: u64,
    response_times: Vec<f64>,
    detection_accuracy: Vec<f64>,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cycle(&mut self, action: DecisionAction, response_time: f64, accuracy: f64) {
        self.total_decisions += 1;
        if action == DecisionAction::EmergencyBrake {
            self.emergency_events += 1;
        }
        self.response_times.push(response_time);
        self.detection_accuracy.push(accuracy);
    }

    pub fn total_decisions(&self) -> u64 {
        self.total_decisions
    }

    /// Aggregate snapshot, or None before the first recorded cycle.
    pub fn summary(&self, limits: &SafetyLimits) -> Option<PerformanceReport> {
        if self.response_times.is_empty() {
            return None;
        }
        let avg_response_time =
            self.response_times.iter().sum::<f64>() / self.response_times.len() as f64;
        let max_response_time = self
            .response_times
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let avg_detection_accuracy =
            self.detection_accuracy.iter().sum::<f64>() / self.detection_accuracy.len() as f64;

        Some(PerformanceReport {
            total_decisions: self.total_decisions,
            emergency_events: self.emergency_events,
            avg_response_time,
            max_response_time,
            avg_detection_accuracy,
            response_time_compliant: avg_response_time <= limits.max_response_time,
            detection_accuracy_compliant: avg_detection_accuracy >= limits.min_detection_accuracy,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub total_decisions: u64,
    pub emergency_events: u64,
    pub avg_response_time: f64,
    pub max_response_time: f64,
    pub avg_detection_accuracy: f64,
    pub response_time_compliant: bool,
    pub detection_accuracy_compliant: bool,
}
