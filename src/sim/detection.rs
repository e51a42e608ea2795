//! Detection model
//!
//! Exposure is the single most dangerous source, not a sum: standing in two
//! half-lit pools is no worse than standing in the brighter one.

use glam::Vec2;

use super::state::{Actor, AlertSource, LightZone};
use crate::consts::{ALERT_SENSITIVITY, DETECTION_THRESHOLD};
use crate::unit_clamp;

/// Linear falloff from `peak` at the center to 0 at `reach`.
/// Zero or negative reach covers nothing.
#[inline]
fn falloff(distance: f32, reach: f32, peak: f32) -> f32 {
    if reach <= 0.0 || distance >= reach {
        return 0.0;
    }
    peak * (1.0 - distance / reach)
}

/// Contribution of one light to the exposure at `pos`
pub fn light_contribution(pos: Vec2, light: &LightZone) -> f32 {
    if !light.is_active {
        return 0.0;
    }
    falloff(pos.distance(light.pos), light.reach(), light.intensity)
}

/// Contribution of one alert source to the exposure at `pos`
pub fn alert_contribution(pos: Vec2, source: &AlertSource) -> f32 {
    falloff(pos.distance(source.pos), source.alert_radius, ALERT_SENSITIVITY)
}

/// Exposure at an arbitrary point, in [0, 1]
pub fn detection_at(pos: Vec2, lights: &[LightZone], sources: &[AlertSource]) -> f32 {
    let from_lights = lights.iter().map(|l| light_contribution(pos, l));
    let from_sources = sources.iter().map(|s| alert_contribution(pos, s));
    unit_clamp(from_lights.chain(from_sources).fold(0.0, f32::max))
}

/// Exposure of the actor at its current position, in [0, 1]
pub fn compute_detection(actor: &Actor, lights: &[LightZone], sources: &[AlertSource]) -> f32 {
    detection_at(actor.pos, lights, sources)
}

/// Fires once each time detection rises above the threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionAlarm {
    tripped: bool,
}

impl DetectionAlarm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest level; returns true only on an upward crossing
    pub fn observe(&mut self, level: f32) -> bool {
        let above = level > DETECTION_THRESHOLD;
        let crossed = above && !self.tripped;
        self.tripped = above;
        crossed
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn light_at(x: f32, y: f32, width: f32, intensity: f32) -> LightZone {
        LightZone::new("light", Vec2::new(x, y), width, intensity)
    }

    fn chicken_at(x: f32, y: f32, radius: f32) -> AlertSource {
        AlertSource::new("chicken", Vec2::new(x, y), radius)
    }

    #[test]
    fn test_no_sources_is_zero() {
        assert_eq!(detection_at(Vec2::new(10.0, 10.0), &[], &[]), 0.0);
    }

    #[test]
    fn test_light_peak_and_edge() {
        let light = light_at(100.0, 100.0, 120.0, 0.8);
        let center = detection_at(Vec2::new(100.0, 100.0), &[light.clone()], &[]);
        assert!((center - 0.8).abs() < 1e-6);

        // Exactly at width / 2 and beyond: nothing
        assert_eq!(detection_at(Vec2::new(160.0, 100.0), &[light.clone()], &[]), 0.0);
        assert_eq!(detection_at(Vec2::new(300.0, 100.0), &[light.clone()], &[]), 0.0);

        // Halfway to the edge: half intensity
        let half = detection_at(Vec2::new(130.0, 100.0), &[light], &[]);
        assert!((half - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_light_height_ignored() {
        let mut light = light_at(0.0, 0.0, 100.0, 1.0);
        light.height = 1000.0;
        // Inside the tall rectangle but outside width / 2
        assert_eq!(detection_at(Vec2::new(0.0, 60.0), &[light], &[]), 0.0);
    }

    #[test]
    fn test_inactive_light_contributes_nothing() {
        let mut light = light_at(0.0, 0.0, 100.0, 1.0);
        light.is_active = false;
        assert_eq!(detection_at(Vec2::ZERO, &[light], &[]), 0.0);
    }

    #[test]
    fn test_alert_source_peak() {
        let chicken = chicken_at(300.0, 180.0, 60.0);
        let level = detection_at(Vec2::new(300.0, 180.0), &[], &[chicken.clone()]);
        assert!((level - ALERT_SENSITIVITY).abs() < 1e-6);
        assert_eq!(detection_at(Vec2::new(360.0, 180.0), &[], &[chicken]), 0.0);
    }

    #[test]
    fn test_max_not_sum() {
        // Light yields 0.4 and chicken yields 0.5 at the origin
        let light = light_at(50.0, 0.0, 200.0, 0.8);
        let chicken = chicken_at(0.0, 10.0, 60.0);
        assert!((light_contribution(Vec2::ZERO, &light) - 0.4).abs() < 1e-6);
        assert!((alert_contribution(Vec2::ZERO, &chicken) - 0.5).abs() < 1e-6);

        let level = detection_at(Vec2::ZERO, &[light], &[chicken]);
        assert!((level - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_radius_sources_never_contribute() {
        let light = light_at(0.0, 0.0, 0.0, 1.0);
        let chicken = chicken_at(0.0, 0.0, 0.0);
        let level = detection_at(Vec2::ZERO, &[light], &[chicken]);
        assert_eq!(level, 0.0);
        assert!(!level.is_nan());
    }

    #[test]
    fn test_compute_detection_uses_actor_position() {
        let actor = Actor::new("mink", Vec2::new(250.0, 100.0));
        let lights = [light_at(250.0, 100.0, 120.0, 0.8)];
        let level = compute_detection(&actor, &lights, &[]);
        assert!((level - 0.8).abs() < 1e-6);
        // Inputs untouched
        assert_eq!(actor.detection_level(), 0.0);
    }

    #[test]
    fn test_alarm_fires_once_per_crossing() {
        let mut alarm = DetectionAlarm::new();
        assert!(!alarm.observe(0.5));
        assert!(!alarm.observe(0.8)); // not strictly above
        assert!(alarm.observe(0.85));
        assert!(!alarm.observe(0.9));
        assert!(!alarm.observe(1.0));
        assert!(!alarm.observe(0.3));
        assert!(alarm.observe(0.95));
    }

    proptest! {
        #[test]
        fn detection_always_in_unit_range(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            width in 0.0f32..400.0,
            intensity in 0.0f32..1.0,
            radius in 0.0f32..200.0,
        ) {
            let lights = [light_at(0.0, 0.0, width, intensity), light_at(100.0, 50.0, width, 1.0)];
            let sources = [chicken_at(20.0, -30.0, radius)];
            let level = detection_at(Vec2::new(x, y), &lights, &sources);
            prop_assert!((0.0..=1.0).contains(&level));
        }
    }
}
