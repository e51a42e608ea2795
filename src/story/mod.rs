//! Story module
//!
//! The scene graph is static data; the narrative state machine walks it and
//! decides which phase and objectives each scene change brings.

pub mod narrative;
pub mod reveal;
pub mod scene;
pub mod transitions;

pub use narrative::{Narrative, Transition};
pub use reveal::{RevealHandle, RevealPacing, TextReveal};
pub use scene::{Affordance, Choice, ChoiceAction, Scene, SceneGraph};
pub use transitions::{CanvasChange, TransitionEffect, effect_for};
