//! Player preferences
//!
//! Persisted in LocalStorage on the web. Game progress is never saved.

use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::consts::{REVEAL_INITIAL_DELAY_MS, REVEAL_INTERVAL_MS};
use crate::story::RevealPacing;

/// How fast story text types out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl TextSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSpeed::Slow => "Slow",
            TextSpeed::Normal => "Normal",
            TextSpeed::Fast => "Fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(TextSpeed::Slow),
            "normal" | "default" => Some(TextSpeed::Normal),
            "fast" => Some(TextSpeed::Fast),
            _ => None,
        }
    }

    /// Milliseconds between revealed characters
    pub fn interval_ms(&self) -> f64 {
        match self {
            TextSpeed::Slow => REVEAL_INTERVAL_MS * 2.0,
            TextSpeed::Normal => REVEAL_INTERVAL_MS,
            TextSpeed::Fast => REVEAL_INTERVAL_MS / 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub text_speed: TextSpeed,

    // === Accessibility ===
    /// Show scene text at once instead of typing it out
    pub instant_text: bool,

    // === Notifications ===
    /// Raise "Detected!" when exposure crosses the threshold
    pub detection_warnings: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            text_speed: TextSpeed::Normal,
            instant_text: false,
            detection_warnings: true,
        }
    }
}

impl Settings {
    /// Reveal timing these preferences call for
    pub fn effective_pacing(&self) -> RevealPacing {
        RevealPacing {
            initial_delay_ms: REVEAL_INITIAL_DELAY_MS,
            interval_ms: self.text_speed.interval_ms(),
            instant: self.instant_text,
        }
    }

    /// Parse preferences; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "mink_night_thief_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
