//! Stealing from an alert source
//!
//! The grab distance is fixed and independent of the source's alert radius.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use crate::GameError;
use crate::consts::{CAPTURE_RADIUS, OBJ_STEAL_FOOD};

/// Result of targeting an alert source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureOutcome {
    /// Food taken; the caller moves the story to the escape scene
    Captured,
    /// Source out of reach; nothing changed
    TooFar { distance: f32 },
    /// Not the theft phase; targeting is ignored
    Ignored,
}

#[inline]
pub fn within_capture_range(actor: Vec2, source: Vec2) -> bool {
    actor.distance(source) < CAPTURE_RADIUS
}

/// Decide what targeting the alert source `source_id` does. Pure: the caller
/// applies a `Captured` outcome with [`take_food`] once the escape scene is
/// known to exist.
pub fn check_capture(state: &GameState, source_id: &str) -> Result<CaptureOutcome, GameError> {
    let source = state
        .alert_source(source_id)
        .ok_or_else(|| GameError::UnknownEntity {
            kind: "alert source",
            id: source_id.to_string(),
        })?;

    if state.phase != GamePhase::Theft {
        return Ok(CaptureOutcome::Ignored);
    }

    let distance = state.actor.pos.distance(source.pos);
    if !within_capture_range(state.actor.pos, source.pos) {
        log::debug!("Capture of {source_id} failed at distance {distance:.1}");
        return Ok(CaptureOutcome::TooFar { distance });
    }
    log::info!("Captured {source_id} at distance {distance:.1}");
    Ok(CaptureOutcome::Captured)
}

/// The actor carries food and "Steal food" is completed. The phase itself is
/// left to the escape transition.
pub fn take_food(state: &mut GameState) {
    state.actor.has_food = true;
    state.complete_objective(OBJ_STEAL_FOOD);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theft_state(actor: Vec2) -> GameState {
        let mut state = GameState::new();
        state.phase = GamePhase::Theft;
        state.actor.pos = actor;
        state
    }

    #[test]
    fn test_capture_on_top_of_source() {
        let mut state = theft_state(Vec2::new(300.0, 180.0));
        let outcome = check_capture(&state, "chicken-1").unwrap();
        assert_eq!(outcome, CaptureOutcome::Captured);
        assert!(!state.actor.has_food);

        take_food(&mut state);
        assert!(state.actor.has_food);
        assert!(state.is_completed(OBJ_STEAL_FOOD));
    }

    #[test]
    fn test_capture_too_far_changes_nothing() {
        let state = theft_state(Vec2::ZERO);
        let outcome = check_capture(&state, "chicken-1").unwrap();
        match outcome {
            CaptureOutcome::TooFar { distance } => assert!((distance - 349.857).abs() < 0.01),
            other => panic!("expected TooFar, got {other:?}"),
        }
    }

    #[test]
    fn test_capture_radius_boundary() {
        let source = Vec2::new(300.0, 180.0);
        assert!(within_capture_range(Vec2::new(300.0, 131.0), source));
        assert!(!within_capture_range(Vec2::new(300.0, 130.0), source));
    }

    #[test]
    fn test_capture_ignored_outside_theft() {
        let mut state = GameState::new();
        state.actor.pos = Vec2::new(300.0, 180.0);
        let outcome = check_capture(&state, "chicken-1").unwrap();
        assert_eq!(outcome, CaptureOutcome::Ignored);
    }

    #[test]
    fn test_capture_unknown_source() {
        let state = theft_state(Vec2::ZERO);
        assert!(matches!(
            check_capture(&state, "fox"),
            Err(GameError::UnknownEntity { .. })
        ));
    }
}
