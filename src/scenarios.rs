// src/scenarios.rs
//
// Canned scenarios for requirement validation and demos.

use crate::types::ScenarioObject;

/// Pedestrian crossing in front of the vehicle.
pub fn pedestrian_crossing() -> Vec<ScenarioObject> {
    vec![ScenarioObject::new(
        "pedestrian",
        (25.0, 1.5),
        (-1.5, 0.0),
        (0.6, 1.8),
    )]
}

/// Cyclist ahead, riding away slower than the ego vehicle.
pub fn cyclist_ahead() -> Vec<ScenarioObject> {
    vec![ScenarioObject::new(
        "cyclist",
        (30.0, 0.5),
        (3.0, 0.0),
        (0.6, 1.8),
    )]
}

/// Pedestrian well outside the lane; must not trigger braking.
pub fn false_positive() -> Vec<ScenarioObject> {
    vec![ScenarioObject::new(
        "pedestrian",
        (20.0, 4.0),
        (1.0, 0.0),
        (0.6, 1.8),
    )]
}

/// Pedestrian beyond the detection range limit.
pub fn beyond_range() -> Vec<ScenarioObject> {
    vec![ScenarioObject::new(
        "pedestrian",
        (60.0, 1.0),
        (0.0, 0.0),
        (0.6, 1.8),
    )]
}

/// Stationary pedestrian close enough to demand emergency braking.
pub fn imminent_pedestrian() -> Vec<ScenarioObject> {
    vec![ScenarioObject::new(
        "pedestrian",
        (10.0, 1.0),
        (0.0, 0.0),
        (0.6, 1.8),
    )]
}
