//! Input commands from the rendering shell
//!
//! Each command is handled atomically by `Session::handle`.

use serde::{Deserialize, Serialize};

/// Kind of on-screen entity the player clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Actor,
    LightZone,
    AlertSource,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Actor => "actor",
            EntityKind::LightZone => "light_zone",
            EntityKind::AlertSource => "alert_source",
        }
    }

    /// Parse the shell's entity tag ("chicken" is accepted for alert sources)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "actor" | "mink" => Some(EntityKind::Actor),
            "light" | "light_zone" => Some(EntityKind::LightZone),
            "chicken" | "alert_source" => Some(EntityKind::AlertSource),
            _ => None,
        }
    }
}

/// A single discrete player action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Click on the play surface (raw pixel offsets)
    MoveTo { x: f32, y: f32 },
    /// Click on an entity
    Target { kind: EntityKind, id: String },
    /// Pick a story choice by index
    Choose { index: usize },
    /// Follow the scene's direct continuation
    Continue,
    /// Go straight to a scene (e.g. the conservation note)
    JumpTo { scene: String },
    /// Start the night over
    Restart,
}
