// src/config.rs
//
// Safety limits for the decision pipeline. Defaults encode the system
// requirements; a YAML file can override them for what-if studies.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::AebResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyLimits {
    /// Objects farther than this are never surfaced as detections (m).
    pub max_detection_range: f64,
    /// Generic emergency-braking TTC threshold (s).
    pub min_ttc_threshold: f64,
    /// Tighter TTC threshold applied to vehicle-class objects (s).
    pub vehicle_ttc_threshold: f64,
    /// Decision latency budget (s).
    pub max_response_time: f64,
    /// Extra TTC margin beyond the braking threshold during which a
    /// warning (but not braking) is issued (s).
    pub warning_advance_time: f64,
    /// Detection-accuracy compliance floor for the aggregate report.
    pub min_detection_accuracy: f64,
    /// Reliability floor expected under adverse weather.
    pub weather_accuracy_threshold: f64,
    /// Half-width of the simulated ego lane (m); objects outside are ignored.
    pub lane_half_width: f64,
    /// Documented limit, not enforced by the core: <1 false positive / 10,000 km.
    pub max_false_positive_rate: f64,
    /// Documented limit, not enforced by the core: required availability.
    pub required_availability: f64,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            max_detection_range: 50.0,
            min_ttc_threshold: 1.5,
            vehicle_ttc_threshold: 1.0,
            max_response_time: 0.1,
            warning_advance_time: 0.5,
            min_detection_accuracy: 0.95,
            weather_accuracy_threshold: 0.90,
            lane_half_width: 2.0,
            max_false_positive_rate: 0.0001,
            required_availability: 0.9999,
        }
    }
}

impl SafetyLimits {
    pub fn load(path: &str) -> AebResult<Self> {
        let contents = fs::read_to_string(path)?;
        let limits: SafetyLimits = serde_yaml::from_str(&contents)?;
        Ok(limits)
    }
}
