// src/lib.rs
//
// Deterministic AEB decision pipeline. One `AebEngine` per logical vehicle:
// sensing simulation -> collision risk -> graded safety decision, with
// running performance metrics and a safety event log.

pub mod config;
pub mod decision;
pub mod error;
pub mod pipeline;
pub mod risk;
pub mod scenarios;
pub mod sensors;
pub mod types;

pub use config::SafetyLimits;
pub use error::{AebError, AebResult};
pub use pipeline::{AebEngine, PerformanceReport};
pub use types::{
    CycleResult, DecisionAction, DecisionRecord, DetectedObject, EventLogEntry, ObjectClass,
    SafetyEvent, ScenarioObject, SystemState, WeatherCondition,
};
