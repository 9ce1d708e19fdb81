// src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use crate::error::AebError;

/// Object classification used to pick the TTC threshold policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectClass {
    Pedestrian,
    Cyclist,
    Vehicle,
    #[serde(rename = "static")]
    StaticObstacle,
    Unknown,
}

impl ObjectClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectClass::Pedestrian => "pedestrian",
            ObjectClass::Cyclist => "cyclist",
            ObjectClass::Vehicle => "vehicle",
            ObjectClass::StaticObstacle => "static",
            ObjectClass::Unknown => "unknown",
        }
    }
}

impl FromStr for ObjectClass {
    type Err = AebError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pedestrian" => Ok(ObjectClass::Pedestrian),
            "cyclist" => Ok(ObjectClass::Cyclist),
            "vehicle" => Ok(ObjectClass::Vehicle),
            "static" | "static_obstacle" => Ok(ObjectClass::StaticObstacle),
            "unknown" => Ok(ObjectClass::Unknown),
            other => Err(AebError::InvalidObjectClass(other.to_string())),
        }
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ambient weather, each condition carrying a fixed reliability multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    LightRain,
    Fog,
    Night,
}

impl WeatherCondition {
    /// Multiplier applied to the operational-sensor ratio. Always in (0, 1].
    pub fn multiplier(&self) -> f64 {
        match self {
            WeatherCondition::Clear => 1.00,
            WeatherCondition::LightRain => 0.90,
            WeatherCondition::Fog => 0.75,
            WeatherCondition::Night => 0.92,
        }
    }
}

/// Overall system state owned by the decision engine. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemState {
    Operational,
    Warning,
    EmergencyBraking,
    SensorFailure,
    FailSafe,
}

/// Raw scenario input, one per perceived object. The class tag is validated
/// against `ObjectClass` at the start of each evaluation cycle.
///
/// Positions are (longitudinal, lateral) meters, velocities m/s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub position: (f64, f64),
    pub velocity: (f64, f64),
    pub size: (f64, f64),
}

impl ScenarioObject {
    pub fn new(kind: &str, position: (f64, f64), velocity: (f64, f64), size: (f64, f64)) -> Self {
        Self {
            kind: kind.to_string(),
            position,
            velocity,
            size,
        }
    }

    /// True Euclidean distance from the ego origin, before any sensor noise.
    pub fn true_distance(&self) -> f64 {
        (self.position.0.powi(2) + self.position.1.powi(2)).sqrt()
    }
}

/// One perceived object for the current cycle. Position carries injected
/// sensor noise; distance is the norm of that noisy position.
#[derive(Debug, Clone, Serialize)]
pub struct DetectedObject {
    pub id: usize,
    pub class: ObjectClass,
    pub position: (f64, f64),
    pub velocity: (f64, f64),
    pub confidence: f64,
    pub distance: f64,
    pub size: (f64, f64),
}

/// Graded safety action, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionAction {
    Monitor,
    Warning,
    EmergencyBrake,
    FailSafe,
}

/// Outcome of one decision cycle. Produced fresh each cycle, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRecord {
    pub action: DecisionAction,
    pub warning: bool,
    pub braking: bool,
    pub message: String,
    /// Wall-clock duration of the decision step, seconds.
    pub response_time: f64,
    pub threat_object: Option<DetectedObject>,
}

/// Safety events appended to the engine's event log.
#[derive(Debug, Clone, Serialize)]
pub enum SafetyEvent {
    EmergencyBraking {
        ttc: f64,
        object_class: ObjectClass,
        object_distance: f64,
        system_state: SystemState,
    },
    ResponseTimeViolation {
        actual_time: f64,
        required_time: f64,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct EventLogEntry {
    pub timestamp: SystemTime,
    pub event: SafetyEvent,
}

/// Everything one `evaluate` call produces, bundled for outer layers.
#[derive(Debug, Clone, Serialize)]
pub struct CycleResult {
    pub detections: Vec<DetectedObject>,
    pub threat_detected: bool,
    pub threat_object: Option<DetectedObject>,
    /// TTC of the object that flagged the threat; +inf when none qualified.
    pub trigger_ttc: f64,
    /// Minimum TTC across all in-lane objects, threshold-independent.
    pub min_ttc_all: f64,
    pub decision: DecisionRecord,
    pub sensor_reliability: f64,
    pub system_state: SystemState,
}
