//! Game state and core entity types
//!
//! Everything the rendering shell needs to draw the night scene lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::unit_clamp;

/// A position on the play surface (pixels)
pub type Point = Vec2;

/// Coarse game progress, changed only by scene transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// In the den, before leaving
    #[default]
    Intro,
    /// Out in the forest
    Emergence,
    /// Nearing the farm
    Approach,
    /// At the coop, interactive canvas shown
    Theft,
    /// Food in jaws, running
    Escape,
    /// Back at the den
    Return,
    /// Night is over
    Outro,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Intro => "intro",
            GamePhase::Emergence => "emergence",
            GamePhase::Approach => "approach",
            GamePhase::Theft => "theft",
            GamePhase::Escape => "escape",
            GamePhase::Return => "return",
            GamePhase::Outro => "outro",
        }
    }
}

/// The player-controlled mink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub pos: Point,
    pub width: f32,
    pub height: f32,
    pub is_hidden: bool,
    pub has_food: bool,
    /// Always within [0, 1]; use `set_noise`
    noise_level: f32,
    /// Always within [0, 1]; use `set_detection`
    detection_level: f32,
}

impl Actor {
    pub fn new(id: impl Into<String>, pos: Point) -> Self {
        Self {
            id: id.into(),
            pos,
            width: 30.0,
            height: 24.0,
            is_hidden: false,
            has_food: false,
            noise_level: 0.0,
            detection_level: 0.0,
        }
    }

    pub fn noise_level(&self) -> f32 {
        self.noise_level
    }

    pub fn detection_level(&self) -> f32 {
        self.detection_level
    }

    pub fn set_noise(&mut self, level: f32) {
        self.noise_level = unit_clamp(level);
    }

    pub fn set_detection(&mut self, level: f32) {
        self.detection_level = unit_clamp(level);
    }
}

/// A static pool of light. Only `width` defines its reach; `height` is for drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightZone {
    pub id: String,
    pub pos: Point,
    pub width: f32,
    pub height: f32,
    pub intensity: f32,
    pub is_active: bool,
}

impl LightZone {
    pub fn new(id: impl Into<String>, pos: Point, size: f32, intensity: f32) -> Self {
        Self {
            id: id.into(),
            pos,
            width: size,
            height: size,
            intensity: unit_clamp(intensity),
            is_active: true,
        }
    }

    /// Radius inside which the light exposes the actor
    #[inline]
    pub fn reach(&self) -> f32 {
        self.width / 2.0
    }

    pub fn toggle(&mut self) {
        self.is_active = !self.is_active;
    }
}

/// An entity that notices the actor within `alert_radius` (the chickens)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSource {
    pub id: String,
    pub pos: Point,
    pub width: f32,
    pub height: f32,
    pub alert_radius: f32,
    #[serde(default)]
    pub is_alerted: bool,
}

impl AlertSource {
    pub fn new(id: impl Into<String>, pos: Point, alert_radius: f32) -> Self {
        Self {
            id: id.into(),
            pos,
            width: 32.0,
            height: 32.0,
            alert_radius,
            is_alerted: false,
        }
    }
}

/// Complete game state for one night
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub actor: Actor,
    pub light_zones: Vec<LightZone>,
    pub alert_sources: Vec<AlertSource>,
    /// All objectives in display order
    pub objectives: Vec<String>,
    /// Append-only; may hold duplicates
    pub completed_objectives: Vec<String>,
    /// Session-level meter, tracked separately from `actor.detection_level`
    pub detection_meter: f32,
    pub elapsed_ms: f64,
    pub is_game_over: bool,
    pub has_won: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// The canonical state a night starts from
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Intro,
            actor: Actor::new("player-mink", Vec2::new(50.0, 350.0)),
            light_zones: vec![
                LightZone::new("farm-light-1", Vec2::new(250.0, 100.0), 120.0, 0.8),
                LightZone::new("house-light", Vec2::new(450.0, 50.0), 100.0, 0.6),
            ],
            alert_sources: vec![AlertSource::new("chicken-1", Vec2::new(300.0, 180.0), 60.0)],
            objectives: OBJECTIVES.iter().map(|o| o.to_string()).collect(),
            completed_objectives: Vec::new(),
            detection_meter: 0.0,
            elapsed_ms: 0.0,
            is_game_over: false,
            has_won: false,
        }
    }

    /// Mark an objective complete. Repeats are stored but change nothing observable.
    pub fn complete_objective(&mut self, label: &str) {
        if !self.objectives.iter().any(|o| o == label) {
            log::warn!("Completing objective outside the list: {label}");
        }
        self.completed_objectives.push(label.to_string());
    }

    pub fn is_completed(&self, label: &str) -> bool {
        self.completed_objectives.iter().any(|o| o == label)
    }

    /// Objectives not yet completed, in display order
    pub fn pending_objectives(&self) -> impl Iterator<Item = &str> {
        self.objectives
            .iter()
            .map(String::as_str)
            .filter(|o| !self.is_completed(o))
    }

    pub fn alert_source(&self, id: &str) -> Option<&AlertSource> {
        self.alert_sources.iter().find(|s| s.id == id)
    }

    pub fn alert_source_mut(&mut self, id: &str) -> Option<&mut AlertSource> {
        self.alert_sources.iter_mut().find(|s| s.id == id)
    }

    pub fn light_zone_mut(&mut self, id: &str) -> Option<&mut LightZone> {
        self.light_zones.iter_mut().find(|l| l.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.actor.pos, Vec2::new(50.0, 350.0));
        assert_eq!(state.light_zones.len(), 2);
        assert_eq!(state.alert_sources.len(), 1);
        assert_eq!(state.objectives.len(), 4);
        assert!(state.completed_objectives.is_empty());
        assert!(!state.is_game_over && !state.has_won);
    }

    #[test]
    fn test_actor_levels_clamped() {
        let mut actor = Actor::new("m", Vec2::ZERO);
        actor.set_detection(1.7);
        assert_eq!(actor.detection_level(), 1.0);
        actor.set_detection(-0.2);
        assert_eq!(actor.detection_level(), 0.0);
        actor.set_noise(f32::NAN);
        assert_eq!(actor.noise_level(), 0.0);
    }

    #[test]
    fn test_duplicate_completion_is_idempotent() {
        let mut state = GameState::new();
        state.complete_objective(OBJ_EXIT_DEN);
        let pending_once: Vec<String> = state.pending_objectives().map(String::from).collect();

        state.complete_objective(OBJ_EXIT_DEN);
        let pending_twice: Vec<String> = state.pending_objectives().map(String::from).collect();

        assert_eq!(pending_once, pending_twice);
        assert!(state.is_completed(OBJ_EXIT_DEN));
        assert_eq!(state.completed_objectives.len(), 2);
    }

    #[test]
    fn test_light_toggle() {
        let mut state = GameState::new();
        let light = state.light_zone_mut("house-light").unwrap();
        light.toggle();
        assert!(!light.is_active);
    }

    #[test]
    fn test_alerted_flag_round_trips() {
        let mut state = GameState::new();
        state.alert_source_mut("chicken-1").unwrap().is_alerted = true;
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
