//! Player-facing notifications
//!
//! The session queues these; the rendering shell drains and displays them.

use serde::{Deserialize, Serialize};

/// How loudly the shell should present a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// Detection rose above the threshold
    pub fn detected() -> Self {
        Self::new(
            "Detected!",
            "The chickens are alerted. Stay in the shadows!",
            Severity::Warning,
        )
    }

    pub fn food_acquired() -> Self {
        Self::new(
            "Food Acquired!",
            "You've grabbed a chicken! Now escape back to the den.",
            Severity::Info,
        )
    }

    pub fn too_far() -> Self {
        Self::new(
            "Too Far",
            "Get closer to the chicken coop to steal food.",
            Severity::Warning,
        )
    }

    pub fn game_reset() -> Self {
        Self::new("Game Reset", "Starting a new night hunt...", Severity::Info)
    }
}
