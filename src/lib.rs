//! Mink: Night Thief - a stealth narrative night hunt
//!
//! Core modules:
//! - `sim`: Pure gameplay rules (entities, detection, capture, commands)
//! - `story`: Scene graph, phase transitions and the text reveal timer
//! - `session`: The aggregate a rendering shell drives
//! - `settings`: Player preferences (text speed, accessibility)
//! - `web`: wasm-bindgen facade for the browser shell

pub mod error;
pub mod notify;
pub mod session;
pub mod settings;
pub mod sim;
pub mod story;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::GameError;
pub use notify::{Notification, Severity};
pub use session::{Session, SessionSnapshot};
pub use settings::{Settings, TextSpeed};

/// Game configuration constants
pub mod consts {
    /// Detection above this level raises a warning (strictly greater than)
    pub const DETECTION_THRESHOLD: f32 = 0.8;
    /// Peak contribution of an alert source at zero distance
    pub const ALERT_SENSITIVITY: f32 = 0.6;
    /// Fixed grab distance for stealing from an alert source
    pub const CAPTURE_RADIUS: f32 = 50.0;
    /// Click positions are shifted by this much so the actor centers on the pointer
    pub const ACTOR_CLICK_OFFSET: f32 = 15.0;

    /// Text reveal pacing (milliseconds)
    pub const REVEAL_INITIAL_DELAY_MS: f64 = 500.0;
    pub const REVEAL_INTERVAL_MS: f64 = 30.0;

    /// Scene the story starts from (and restarts to)
    pub const ENTRY_SCENE: &str = "intro";
    /// Scene a successful theft leads to
    pub const ESCAPE_SCENE: &str = "escape";

    /// Objective labels, in display order
    pub const OBJ_EXIT_DEN: &str = "Exit the den safely";
    pub const OBJ_APPROACH_COOP: &str = "Approach the chicken coop";
    pub const OBJ_STEAL_FOOD: &str = "Steal food";
    pub const OBJ_RETURN_DEN: &str = "Escape back to the den";
    pub const OBJECTIVES: [&str; 4] = [OBJ_EXIT_DEN, OBJ_APPROACH_COOP, OBJ_STEAL_FOOD, OBJ_RETURN_DEN];
}

/// Clamp a scalar into the unit interval, mapping NaN to 0
#[inline]
pub fn unit_clamp(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
