//! Gameplay rules
//!
//! Everything here is pure over explicit inputs:
//! - No rendering or platform dependencies
//! - No global state
//! - Entity order is preserved as given

pub mod capture;
pub mod detection;
pub mod input;
pub mod state;

pub use capture::{CaptureOutcome, check_capture, take_food, within_capture_range};
pub use detection::{DetectionAlarm, compute_detection, detection_at};
pub use input::{Command, EntityKind};
pub use state::{Actor, AlertSource, GamePhase, GameState, LightZone, Point};
