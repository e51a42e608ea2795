//! Narrative state machine
//!
//! Tracks the current scene and its text reveal. Planning a transition is pure;
//! the session applies the resulting effect to the game state and then calls
//! `enter`, which cancels the old reveal before starting the new one.

use serde::Serialize;

use super::reveal::{RevealHandle, RevealPacing, TextReveal};
use super::scene::{ChoiceAction, Scene, SceneGraph};
use super::transitions::{TransitionEffect, effect_for};
use crate::GameError;
use crate::consts::ENTRY_SCENE;

/// A validated move from one scene to another, with its side effects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub effect: TransitionEffect,
}

#[derive(Debug)]
pub struct Narrative {
    graph: SceneGraph,
    current: String,
    reveal: TextReveal,
    pacing: RevealPacing,
}

impl Narrative {
    pub fn new(graph: SceneGraph, pacing: RevealPacing) -> Self {
        let entry = graph.entry();
        let current = entry.id.clone();
        let reveal = TextReveal::start(RevealHandle::default(), &entry.text, pacing);
        Self {
            graph,
            current,
            reveal,
            pacing,
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn current_id(&self) -> &str {
        &self.current
    }

    pub fn current_scene(&self) -> &Scene {
        // `current` only ever holds ids that passed `plan`
        self.graph
            .get(&self.current)
            .unwrap_or_else(|| self.graph.entry())
    }

    pub fn reveal(&self) -> &TextReveal {
        &self.reveal
    }

    /// Pacing for reveals started from now on
    pub fn set_pacing(&mut self, pacing: RevealPacing) {
        self.pacing = pacing;
    }

    /// Validate `target` and look up what entering it does
    pub fn plan(&self, target: &str) -> Result<Transition, GameError> {
        if !self.graph.contains(target) {
            return Err(GameError::InvalidSceneReference {
                from: self.current.clone(),
                target: target.to_string(),
            });
        }
        // Returning to the entry scene always resets, whatever it is called
        let key = if target == self.graph.entry().id {
            ENTRY_SCENE
        } else {
            target
        };
        Ok(Transition {
            from: self.current.clone(),
            to: target.to_string(),
            effect: effect_for(key),
        })
    }

    /// Move to the planned scene and restart the reveal
    pub fn enter(&mut self, transition: &Transition) {
        self.reveal.cancel();
        self.current = transition.to.clone();
        let handle = self.reveal.handle().next();
        let text = self.current_scene().text.clone();
        self.reveal = TextReveal::start(handle, &text, self.pacing);
        log::debug!("Entered scene '{}' (reveal {:?})", self.current, handle);
    }

    fn ensure_revealed(&self) -> Result<(), GameError> {
        if self.reveal.is_complete() {
            Ok(())
        } else {
            Err(GameError::RevealInProgress(self.current.clone()))
        }
    }

    /// Target and action of choice `index`, once the text is fully shown
    pub fn choice(&self, index: usize) -> Result<(String, Option<ChoiceAction>), GameError> {
        self.ensure_revealed()?;
        let choice = self
            .current_scene()
            .choices
            .get(index)
            .ok_or_else(|| GameError::InvalidChoice {
                scene: self.current.clone(),
                index,
            })?;
        Ok((choice.next_scene.clone(), choice.action.clone()))
    }

    /// Target of the "Continue" affordance, once the text is fully shown
    pub fn continuation(&self) -> Result<String, GameError> {
        self.ensure_revealed()?;
        let scene = self.current_scene();
        match (&scene.next_scene, scene.choices.is_empty()) {
            (Some(next), true) => Ok(next.clone()),
            _ => Err(GameError::NoContinuation(self.current.clone())),
        }
    }

    /// Advance the current reveal
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        self.reveal.advance(dt_ms)
    }

    /// Advance the reveal only if `handle` is still the live one
    pub fn tick_reveal(&mut self, handle: RevealHandle, dt_ms: f64) -> bool {
        if handle != self.reveal.handle() {
            log::trace!("Ignoring stale reveal tick {:?}", handle);
            return false;
        }
        self.reveal.advance(dt_ms)
    }

    /// Show the whole text immediately
    pub fn skip_reveal(&mut self) {
        self.reveal.finish();
    }
}
