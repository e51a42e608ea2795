//! Scene transition effects
//!
//! A sparse table keyed by the scene being entered. Scenes not listed leave the
//! phase, objectives and canvas untouched.

use serde::Serialize;

use crate::consts::*;
use crate::sim::{GamePhase, GameState};

/// What entering a scene does to the interactive canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasChange {
    Unchanged,
    Show,
    Hide,
}

impl CanvasChange {
    pub fn apply(self, visible: bool) -> bool {
        match self {
            CanvasChange::Unchanged => visible,
            CanvasChange::Show => true,
            CanvasChange::Hide => false,
        }
    }
}

/// Side effects of entering a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionEffect {
    /// Replace the whole game state with a fresh one (applied first)
    pub reset: bool,
    pub phase: Option<GamePhase>,
    pub complete: &'static [&'static str],
    pub canvas: CanvasChange,
    /// The night is over; outcome decided by whether food came home
    pub ends_night: bool,
}

impl TransitionEffect {
    pub const NONE: Self = Self {
        reset: false,
        phase: None,
        complete: &[],
        canvas: CanvasChange::Unchanged,
        ends_night: false,
    };

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Apply to the game state; returns the new canvas visibility
    pub fn apply(&self, state: &mut GameState, canvas_visible: bool) -> bool {
        if self.reset {
            *state = GameState::new();
        }
        if let Some(phase) = self.phase {
            state.phase = phase;
        }
        for objective in self.complete {
            state.complete_objective(objective);
        }
        if self.ends_night {
            state.is_game_over = true;
            state.has_won = state.actor.has_food;
        }
        self.canvas.apply(canvas_visible)
    }
}

const TRANSITIONS: &[(&str, TransitionEffect)] = &[
    (
        "theft",
        TransitionEffect {
            phase: Some(GamePhase::Theft),
            complete: &[OBJ_EXIT_DEN, OBJ_APPROACH_COOP],
            canvas: CanvasChange::Show,
            ..TransitionEffect::NONE
        },
    ),
    (
        "escape",
        TransitionEffect {
            phase: Some(GamePhase::Escape),
            ..TransitionEffect::NONE
        },
    ),
    (
        "return",
        TransitionEffect {
            phase: Some(GamePhase::Return),
            complete: &[OBJ_RETURN_DEN],
            canvas: CanvasChange::Hide,
            ..TransitionEffect::NONE
        },
    ),
    (
        ENTRY_SCENE,
        TransitionEffect {
            reset: true,
            canvas: CanvasChange::Hide,
            ..TransitionEffect::NONE
        },
    ),
    (
        "outro",
        TransitionEffect {
            ends_night: true,
            ..TransitionEffect::NONE
        },
    ),
];

/// Effect of entering `scene_id`
pub fn effect_for(scene_id: &str) -> TransitionEffect {
    TRANSITIONS
        .iter()
        .find(|(id, _)| *id == scene_id)
        .map(|(_, effect)| *effect)
        .unwrap_or(TransitionEffect::NONE)
}
