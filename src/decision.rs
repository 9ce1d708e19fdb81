// src/decision.rs
//
// Safety decision state machine. Maps (threat, TTC, reliability) to a graded
// action, with warning hysteresis and an append-only safety event log.

use std::time::{Instant, SystemTime};
use tracing::{debug, warn};

use crate::config::SafetyLimits;
use crate::types::{
    DecisionAction, DecisionRecord, DetectedObject, EventLogEntry, ObjectClass, SafetyEvent,
    SystemState,
};

pub struct DecisionEngine {
    state: SystemState,
    warning_issued: bool,
    emergency_active: bool,
    event_log: Vec<EventLogEntry>,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionEngine {
    pub fn new() -> Self {
        Self {
            state: SystemState::Operational,
            warning_issued: false,
            emergency_active: false,
            event_log: Vec::new(),
        }
    }

    pub fn state(&self) -> SystemState {
        self.state
    }

    pub fn warning_issued(&self) -> bool {
        self.warning_issued
    }

    pub fn emergency_active(&self) -> bool {
        self.emergency_active
    }

    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.event_log
    }

    /// One decision pass. Total: every input combination yields a record.
    /// The reliability gate short-circuits everything else and leaves the
    /// warning/emergency flags untouched for the next healthy cycle.
    pub fn decide(
        &mut self,
        threat_detected: bool,
        threat_object: Option<&DetectedObject>,
        ttc: f64,
        reliability: f64,
        limits: &SafetyLimits,
    ) -> DecisionRecord {
        let started = Instant::now();

        if reliability < 0.5 {
            self.state = SystemState::SensorFailure;
            warn!(reliability, "sensor reliability below fail-safe floor");
            return DecisionRecord {
                action: DecisionAction::FailSafe,
                warning: true,
                braking: false,
                message: "SENSOR FAILURE - DRIVER TAKEOVER REQUIRED".to_string(),
                response_time: started.elapsed().as_secs_f64(),
                threat_object: None,
            };
        }

        if !threat_detected {
            self.warning_issued = false;
            self.emergency_active = false;
            self.state = SystemState::Operational;
        }

        if threat_detected
            && ttc <= limits.min_ttc_threshold + limits.warning_advance_time
            && !self.warning_issued
        {
            self.warning_issued = true;
            self.state = SystemState::Warning;
        }

        // Braking gate deliberately re-checks the generic threshold, not the
        // class-specific one the assessor used. See DESIGN.md.
        if threat_detected && ttc <= limits.min_ttc_threshold {
            self.emergency_active = true;
            self.state = SystemState::EmergencyBraking;
            self.log_emergency(threat_object, ttc);
            let response_time = started.elapsed().as_secs_f64();
            if response_time > limits.max_response_time {
                warn!(response_time, "decision exceeded response-time budget");
                self.event_log.push(EventLogEntry {
                    timestamp: SystemTime::now(),
                    event: SafetyEvent::ResponseTimeViolation {
                        actual_time: response_time,
                        required_time: limits.max_response_time,
                    },
                });
            }
            return DecisionRecord {
                action: DecisionAction::EmergencyBrake,
                warning: true,
                braking: true,
                message: format!("EMERGENCY BRAKING - TTC: {:.2}s", ttc),
                response_time,
                threat_object: threat_object.cloned(),
            };
        }

        if self.warning_issued {
            return DecisionRecord {
                action: DecisionAction::Warning,
                warning: true,
                braking: false,
                message: format!("COLLISION WARNING - TTC: {:.2}s", ttc),
                response_time: started.elapsed().as_secs_f64(),
                threat_object: threat_object.cloned(),
            };
        }

        debug!("no threat, monitoring");
        DecisionRecord {
            action: DecisionAction::Monitor,
            warning: false,
            braking: false,
            message: "MONITORING - ALL CLEAR".to_string(),
            response_time: started.elapsed().as_secs_f64(),
            threat_object: None,
        }
    }

    fn log_emergency(&mut self, threat_object: Option<&DetectedObject>, ttc: f64) {
        let (object_class, object_distance) = match threat_object {
            Some(obj) => (obj.class, obj.distance),
            None => (ObjectClass::Unknown, 0.0),
        };
        self.event_log.push(EventLogEntry {
            timestamp: SystemTime::now(),
            event: SafetyEvent::EmergencyBraking {
                ttc,
                object_class,
                object_distance,
                system_state: self.state,
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threat_at(distance: f64) -> DetectedObject {
        DetectedObject {
            id: 0,
            class: ObjectClass::Pedestrian,
            position: (distance, 0.0),
            velocity: (0.0, 0.0),
            confidence: 0.95,
            distance,
            size: (0.6, 1.8),
        }
    }

    #[test]
    fn low_reliability_forces_fail_safe_regardless_of_threat() {
        let limits = SafetyLimits::default();
        let mut engine = DecisionEngine::new();
        let obj = threat_at(5.0);
        let record = engine.decide(true, Some(&obj), 0.4, 0.3, &limits);
        assert_eq!(record.action, DecisionAction::FailSafe);
        assert!(record.warning);
        assert!(!record.braking);
        assert_eq!(engine.state(), SystemState::SensorFailure);
        // Imminent-threat TTC did not produce braking or an event.
        assert!(engine.event_log().is_empty());
    }

    #[test]
    fn fail_safe_does_not_touch_episode_flags() {
        let limits = SafetyLimits::default();
        let mut engine = DecisionEngine::new();
        let obj = threat_at(15.0);
        // Warning episode starts.
        engine.decide(true, Some(&obj), 1.8, 1.0, &limits);
        assert!(engine.warning_issued());
        // Reliability drop short-circuits without clearing the flag.
        engine.decide(true, Some(&obj), 1.8, 0.2, &limits);
        assert!(engine.warning_issued());
        assert_eq!(engine.state(), SystemState::SensorFailure);
    }

    #[test]
    fn imminent_ttc_triggers_emergency_brake_and_logs_event() {
        let limits = SafetyLimits::default();
        let mut engine = DecisionEngine::new();
        let obj = threat_at(10.0);
        let record = engine.decide(true, Some(&obj), 1.2, 1.0, &limits);
        assert_eq!(record.action, DecisionAction::EmergencyBrake);
        assert!(record.warning && record.braking);
        assert!(record.message.contains("1.20"));
        assert_eq!(engine.state(), SystemState::EmergencyBraking);
        assert!(engine.emergency_active());
        match &engine.event_log()[0].event {
            SafetyEvent::EmergencyBraking {
                ttc, object_class, ..
            } => {
                assert!((*ttc - 1.2).abs() < 1e-9);
                assert_eq!(*object_class, ObjectClass::Pedestrian);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn no_threat_resets_state_even_after_braking() {
        let limits = SafetyLimits::default();
        let mut engine = DecisionEngine::new();
        let obj = threat_at(8.0);
        engine.decide(true, Some(&obj), 1.0, 1.0, &limits);
        assert_eq!(engine.state(), SystemState::EmergencyBraking);

        let record = engine.decide(false, None, f64::INFINITY, 1.0, &limits);
        assert_eq!(record.action, DecisionAction::Monitor);
        assert!(!engine.warning_issued());
        assert!(!engine.emergency_active());
        assert_eq!(engine.state(), SystemState::Operational);
    }

    #[test]
    fn warning_persists_across_cycles_until_threat_clears() {
        let limits = SafetyLimits::default();
        let mut engine = DecisionEngine::new();
        let obj = threat_at(15.0);
        // TTC inside the warning window but above the braking gate.
        let first = engine.decide(true, Some(&obj), 1.8, 1.0, &limits);
        assert_eq!(first.action, DecisionAction::Warning);
        assert_eq!(engine.state(), SystemState::Warning);

        // Same conditions next cycle: hysteresis keeps the warning active.
        let second = engine.decide(true, Some(&obj), 1.8, 1.0, &limits);
        assert_eq!(second.action, DecisionAction::Warning);
        assert!(second.message.contains("1.80"));
    }

    #[test]
    fn monitor_when_no_threat_and_no_warning() {
        let limits = SafetyLimits::default();
        let mut engine = DecisionEngine::new();
        let record = engine.decide(false, None, f64::INFINITY, 1.0, &limits);
        assert_eq!(record.action, DecisionAction::Monitor);
        assert!(!record.warning && !record.braking);
        assert_eq!(record.message, "MONITORING - ALL CLEAR");
        assert!(record.threat_object.is_none());
    }

    #[test]
    fn event_log_grows_monotonically() {
        let limits = SafetyLimits::default();
        let mut engine = DecisionEngine::new();
        let obj = threat_at(8.0);
        for _ in 0..3 {
            engine.decide(true, Some(&obj), 1.0, 1.0, &limits);
            engine.decide(false, None, f64::INFINITY, 1.0, &limits);
        }
        let braking_events = engine
            .event_log()
            .iter()
            .filter(|e| matches!(e.event, SafetyEvent::EmergencyBraking { .. }))
            .count();
        assert_eq!(braking_events, 3);
    }
}
