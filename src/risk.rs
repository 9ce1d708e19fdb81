// src/risk.rs
//
// Collision risk assessment. Pure function of the cycle's detections and
// the ego speed: no state, no randomness.

use crate::config::SafetyLimits;
use crate::types::{DetectedObject, ObjectClass};

/// Verdict of one risk pass.
#[derive(Debug, Clone)]
pub struct RiskVerdict {
    pub threat_detected: bool,
    /// The object whose TTC flagged the threat, if any.
    pub threat_object: Option<DetectedObject>,
    /// TTC of the trigger object; +inf when nothing crossed its threshold.
    pub trigger_ttc: f64,
    /// Minimum TTC across all in-lane objects, regardless of thresholds.
    pub min_ttc_all: f64,
}

/// Time to collision against a single object, assuming straight-line closing
/// along the longitudinal axis. Non-closing objects yield +inf.
pub fn time_to_collision(obj: &DetectedObject, ego_speed_kmh: f64) -> f64 {
    let ego_speed_ms = ego_speed_kmh / 3.6;
    let closing_speed = ego_speed_ms - obj.velocity.0;
    if closing_speed <= 0.0 {
        return f64::INFINITY;
    }
    (obj.distance / closing_speed).max(0.0)
}

/// TTC threshold for a class. Vehicles get a tighter gate on the assumption
/// of crash tolerance and driver reaction margin.
fn class_threshold(class: ObjectClass, limits: &SafetyLimits) -> f64 {
    match class {
        ObjectClass::Vehicle => limits.vehicle_ttc_threshold,
        ObjectClass::Pedestrian
        | ObjectClass::Cyclist
        | ObjectClass::StaticObstacle
        | ObjectClass::Unknown => limits.min_ttc_threshold,
    }
}

/// Reduces the cycle's detections to a threat verdict. Objects outside the
/// simulated lane (|lateral| > half width) are ignored entirely, including
/// for the situational-awareness minimum.
pub fn assess(
    detections: &[DetectedObject],
    ego_speed_kmh: f64,
    limits: &SafetyLimits,
) -> RiskVerdict {
    let mut threat_object: Option<DetectedObject> = None;
    let mut trigger_ttc = f64::INFINITY;
    let mut min_ttc_all = f64::INFINITY;
    let mut threat_detected = false;

    for obj in detections {
        if obj.position.1.abs() > limits.lane_half_width {
            continue;
        }
        let ttc = time_to_collision(obj, ego_speed_kmh);
        if ttc < min_ttc_all {
            min_ttc_all = ttc;
        }
        // Strict inequalities: ties keep the earlier-index object.
        if ttc < class_threshold(obj.class, limits) && ttc < trigger_ttc {
            trigger_ttc = ttc;
            threat_object = Some(obj.clone());
            threat_detected = true;
        }
    }

    RiskVerdict {
        threat_detected,
        threat_object,
        trigger_ttc,
        min_ttc_all,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detected(
        id: usize,
        class: ObjectClass,
        position: (f64, f64),
        velocity: (f64, f64),
    ) -> DetectedObject {
        DetectedObject {
            id,
            class,
            position,
            velocity,
            confidence: 0.95,
            distance: (position.0.powi(2) + position.1.powi(2)).sqrt(),
            size: (0.6, 1.8),
        }
    }

    #[test]
    fn ttc_decreases_with_distance_for_stationary_object() {
        let near = detected(0, ObjectClass::Pedestrian, (8.0, 0.0), (0.0, 0.0));
        let far = detected(1, ObjectClass::Pedestrian, (20.0, 0.0), (0.0, 0.0));
        assert!(time_to_collision(&near, 30.0) < time_to_collision(&far, 30.0));
    }

    #[test]
    fn ttc_infinite_when_object_not_closing() {
        // Object moving away at ego speed or faster.
        let fleeing = detected(0, ObjectClass::Vehicle, (15.0, 0.0), (10.0, 0.0));
        assert!(time_to_collision(&fleeing, 30.0).is_infinite());
        let matched = detected(1, ObjectClass::Vehicle, (15.0, 0.0), (30.0 / 3.6, 0.0));
        assert!(time_to_collision(&matched, 30.0).is_infinite());
    }

    #[test]
    fn scenario_literal_pedestrian_at_ten_meters() {
        // 30 km/h = 8.33 m/s, TTC = 10 / 8.33 = 1.20 s.
        let ped = detected(0, ObjectClass::Pedestrian, (10.0, 0.0), (0.0, 0.0));
        let ttc = time_to_collision(&ped, 30.0);
        assert!((ttc - 1.2).abs() < 0.01);
        let verdict = assess(&[ped], 30.0, &SafetyLimits::default());
        assert!(verdict.threat_detected);
        assert!((verdict.trigger_ttc - 1.2).abs() < 0.01);
    }

    #[test]
    fn out_of_lane_objects_ignored_entirely() {
        let offside = detected(0, ObjectClass::Pedestrian, (5.0, 3.0), (0.0, 0.0));
        let verdict = assess(&[offside], 30.0, &SafetyLimits::default());
        assert!(!verdict.threat_detected);
        assert!(verdict.trigger_ttc.is_infinite());
        assert!(verdict.min_ttc_all.is_infinite());
    }

    #[test]
    fn vehicle_threshold_tighter_than_default() {
        // TTC around 1.2 s: a threat for a pedestrian (1.5 s gate), not for a
        // vehicle (1.0 s gate).
        let limits = SafetyLimits::default();
        let ped = detected(0, ObjectClass::Pedestrian, (10.0, 0.0), (0.0, 0.0));
        assert!(assess(&[ped], 30.0, &limits).threat_detected);

        let car = detected(0, ObjectClass::Vehicle, (10.0, 0.0), (0.0, 0.0));
        let verdict = assess(&[car], 30.0, &limits);
        assert!(!verdict.threat_detected);
        // Still tracked for situational awareness.
        assert!((verdict.min_ttc_all - 1.2).abs() < 0.01);
    }

    #[test]
    fn trigger_keeps_lowest_ttc_object() {
        let nearer = detected(0, ObjectClass::Pedestrian, (6.0, 0.0), (0.0, 0.0));
        let farther = detected(1, ObjectClass::Pedestrian, (10.0, 0.0), (0.0, 0.0));
        let verdict = assess(&[farther.clone(), nearer.clone()], 30.0, &SafetyLimits::default());
        assert_eq!(verdict.threat_object.unwrap().id, 0);
        assert!((verdict.trigger_ttc - time_to_collision(&nearer, 30.0)).abs() < 1e-9);
    }

    #[test]
    fn tie_keeps_earlier_index() {
        let first = detected(0, ObjectClass::Pedestrian, (10.0, 0.0), (0.0, 0.0));
        let second = detected(1, ObjectClass::Pedestrian, (10.0, 0.0), (0.0, 0.0));
        let verdict = assess(&[first, second], 30.0, &SafetyLimits::default());
        assert_eq!(verdict.threat_object.unwrap().id, 0);
    }

    #[test]
    fn no_detections_yield_infinite_figures() {
        let verdict = assess(&[], 30.0, &SafetyLimits::default());
        assert!(!verdict.threat_detected);
        assert!(verdict.threat_object.is_none());
        assert!(verdict.trigger_ttc.is_infinite());
        assert!(verdict.min_ttc_all.is_infinite());
    }
}
