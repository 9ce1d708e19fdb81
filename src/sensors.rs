// src/sensors.rs
//
// Sensing simulator. Turns raw scenario objects into probabilistically
// detected, noise-perturbed observations, modulated by weather and
// injected sensor faults.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, warn};

use crate::config::SafetyLimits;
use crate::types::{DetectedObject, ObjectClass, ScenarioObject, WeatherCondition};

/// Health state of the simulated sensor suite. Persists across cycles and is
/// mutated only through the explicit fault/configuration calls below.
#[derive(Debug, Clone)]
pub struct SensorSuite {
    camera_operational: bool,
    radar_operational: bool,
    lidar_operational: bool,
    weather: WeatherCondition,
    extra_dropout_prob: f64,
}

impl Default for SensorSuite {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSuite {
    pub fn new() -> Self {
        Self {
            camera_operational: true,
            radar_operational: true,
            lidar_operational: true,
            weather: WeatherCondition::Clear,
            extra_dropout_prob: 0.0,
        }
    }

    pub fn set_weather(&mut self, weather: WeatherCondition) {
        self.weather = weather;
    }

    pub fn weather(&self) -> WeatherCondition {
        self.weather
    }

    /// Enables or disables the extra per-object dropout used for degraded
    /// detection testing. Probability is clamped to [0, 1].
    pub fn set_degradation(&mut self, active: bool, probability: f64) {
        self.extra_dropout_prob = if active {
            probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Marks one sensor inoperable. Idempotent; unrecognized kinds are
    /// ignored with a log line.
    pub fn simulate_failure(&mut self, sensor_kind: &str) {
        match sensor_kind {
            "camera" => self.camera_operational = false,
            "radar" => self.radar_operational = false,
            "lidar" => self.lidar_operational = false,
            other => warn!("ignoring unrecognized sensor kind {:?}", other),
        }
    }

    /// Combined detection reliability: operational-sensor ratio scaled by the
    /// weather multiplier. Always in [0, 1].
    pub fn reliability(&self) -> f64 {
        let operational = [
            self.camera_operational,
            self.radar_operational,
            self.lidar_operational,
        ]
        .iter()
        .filter(|&&up| up)
        .count();
        (operational as f64 / 3.0) * self.weather.multiplier()
    }

    /// Runs one sensing pass. `classes` holds the pre-validated class of each
    /// scenario object, index-aligned with `objects`.
    ///
    /// Range limiting happens on the NOISY position, so an object just past
    /// the limit can jitter inward and one just inside can jitter out.
    pub fn detect<R: Rng>(
        &self,
        objects: &[ScenarioObject],
        classes: &[ObjectClass],
        limits: &SafetyLimits,
        rng: &mut R,
    ) -> Vec<DetectedObject> {
        let reliability = self.reliability();
        // Higher reliability means tighter noise. Sigma stays positive for
        // any reliability in [0, 1].
        let noise = Normal::new(0.0, 1.0 - reliability * 0.1)
            .unwrap_or_else(|_| Normal::new(0.0, 1.0).unwrap());

        let mut detections = Vec::new();
        for (i, (obj, class)) in objects.iter().zip(classes).enumerate() {
            if self.extra_dropout_prob > 0.0 && rng.gen::<f64>() < self.extra_dropout_prob {
                debug!(index = i, "object dropped by degradation");
                continue;
            }
            if rng.gen::<f64>() >= reliability {
                continue;
            }
            let position = (
                obj.position.0 + noise.sample(rng),
                obj.position.1 + noise.sample(rng),
            );
            let distance = (position.0.powi(2) + position.1.powi(2)).sqrt();
            if distance > limits.max_detection_range {
                continue;
            }
            detections.push(DetectedObject {
                id: i,
                class: *class,
                position,
                velocity: obj.velocity,
                confidence: reliability * rng.gen_range(0.9..1.0),
                distance,
                size: obj.size,
            });
        }
        detections
    }
}
