//! One night of play
//!
//! The session is what a rendering shell talks to. It owns the game state, the
//! narrative and the pending notifications, and handles every command to
//! completion before the next one.

use glam::Vec2;
use serde::Serialize;

use crate::GameError;
use crate::consts::{ACTOR_CLICK_OFFSET, ESCAPE_SCENE};
use crate::notify::Notification;
use crate::settings::Settings;
use crate::sim::{
    CaptureOutcome, Command, DetectionAlarm, EntityKind, GameState, check_capture,
    compute_detection, take_food,
};
use crate::story::{Affordance, Narrative, RevealHandle, SceneGraph, Transition};

/// Everything the shell needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot<'a> {
    pub state: &'a GameState,
    pub scene_id: &'a str,
    pub title: &'a str,
    pub text: &'a str,
    pub reveal_complete: bool,
    /// Empty until the scene text is fully shown
    pub affordances: Vec<Affordance>,
    pub canvas_visible: bool,
}

#[derive(Debug)]
pub struct Session {
    state: GameState,
    narrative: Narrative,
    canvas_visible: bool,
    alarm: DetectionAlarm,
    notifications: Vec<Notification>,
    settings: Settings,
}

impl Session {
    /// Start a night with the bundled story
    pub fn new(settings: Settings) -> Result<Self, GameError> {
        Ok(Self::with_graph(SceneGraph::builtin()?, settings))
    }

    /// Start a night with a caller-supplied story
    pub fn with_graph(graph: SceneGraph, settings: Settings) -> Self {
        log::info!("New night: {} scenes, entry '{}'", graph.len(), graph.entry().id);
        Self {
            state: GameState::new(),
            narrative: Narrative::new(graph, settings.effective_pacing()),
            canvas_visible: false,
            alarm: DetectionAlarm::new(),
            notifications: Vec::new(),
            settings,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn narrative(&self) -> &Narrative {
        &self.narrative
    }

    pub fn scene_id(&self) -> &str {
        self.narrative.current_id()
    }

    pub fn canvas_visible(&self) -> bool {
        self.canvas_visible
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// New preferences take effect from the next scene
    pub fn apply_settings(&mut self, settings: Settings) {
        self.narrative.set_pacing(settings.effective_pacing());
        self.settings = settings;
    }

    pub fn handle(&mut self, command: Command) -> Result<(), GameError> {
        match command {
            Command::MoveTo { x, y } => {
                self.move_to(x, y);
                Ok(())
            }
            Command::Target { kind, id } => self.target(kind, &id),
            Command::Choose { index } => self.choose(index),
            Command::Continue => self.continue_story(),
            Command::JumpTo { scene } => self.jump_to(&scene).map(|_| ()),
            Command::Restart => {
                self.restart();
                Ok(())
            }
        }
    }

    /// Advance story time; returns true if the visible text changed
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.state.elapsed_ms += dt_ms;
        }
        self.narrative.tick(dt_ms)
    }

    /// Timer callback for a specific reveal; stale handles are ignored
    pub fn tick_reveal(&mut self, handle: RevealHandle, dt_ms: f64) -> bool {
        self.narrative.tick_reveal(handle, dt_ms)
    }

    /// Show the current scene text at once
    pub fn skip_reveal(&mut self) {
        self.narrative.skip_reveal();
    }

    /// Click on the play surface. Ignored while the canvas is hidden.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if !self.canvas_visible {
            log::warn!("Ignoring move to ({x}, {y}): canvas hidden");
            return;
        }

        let pos = Vec2::new(x - ACTOR_CLICK_OFFSET, y - ACTOR_CLICK_OFFSET);
        self.state.actor.pos = pos;
        for source in &mut self.state.alert_sources {
            source.is_alerted = pos.distance(source.pos) < source.alert_radius;
        }

        let level = compute_detection(
            &self.state.actor,
            &self.state.light_zones,
            &self.state.alert_sources,
        );
        self.state.actor.set_detection(level);
        log::debug!("Mink at ({:.0}, {:.0}), detection {level:.2}", pos.x, pos.y);

        if self.alarm.observe(level) {
            log::info!("Detection crossed threshold ({level:.2})");
            if self.settings.detection_warnings {
                self.notify(Notification::detected());
            }
        }
    }

    /// Click on an entity
    pub fn target(&mut self, kind: EntityKind, id: &str) -> Result<(), GameError> {
        if kind != EntityKind::AlertSource {
            log::debug!("Nothing happens when targeting {} '{id}'", kind.as_str());
            return Ok(());
        }

        match check_capture(&self.state, id)? {
            CaptureOutcome::Captured => {
                // A story without an escape scene leaves the theft untouched
                let transition = self.narrative.plan(ESCAPE_SCENE)?;
                take_food(&mut self.state);
                self.notify(Notification::food_acquired());
                self.enter(transition);
            }
            CaptureOutcome::TooFar { .. } => self.notify(Notification::too_far()),
            CaptureOutcome::Ignored => {
                log::debug!("Targeted '{id}' outside the theft phase");
            }
        }
        Ok(())
    }

    /// Pick choice `index` of the current scene
    pub fn choose(&mut self, index: usize) -> Result<(), GameError> {
        let (target, action) = self.narrative.choice(index)?;
        if let Some(action) = action {
            action.run();
        }
        self.go_to(&target)?;
        Ok(())
    }

    /// Follow the current scene's "Continue"
    pub fn continue_story(&mut self) -> Result<(), GameError> {
        let target = self.narrative.continuation()?;
        self.go_to(&target)?;
        Ok(())
    }

    /// Go straight to a scene, bypassing the current choices
    pub fn jump_to(&mut self, scene: &str) -> Result<Transition, GameError> {
        self.go_to(scene)
    }

    /// Start the night over from the entry scene
    pub fn restart(&mut self) {
        let entry = self.narrative.graph().entry().id.clone();
        match self.go_to(&entry) {
            Ok(_) => self.notify(Notification::game_reset()),
            Err(e) => log::error!("Restart failed: {e}"),
        }
    }

    /// Enter `target`, applying its transition effect
    fn go_to(&mut self, target: &str) -> Result<Transition, GameError> {
        let transition = self.narrative.plan(target)?;
        Ok(self.enter(transition))
    }

    /// Apply a planned transition; cannot fail
    fn enter(&mut self, transition: Transition) -> Transition {
        let phase_before = self.state.phase;

        self.canvas_visible = transition.effect.apply(&mut self.state, self.canvas_visible);
        if transition.effect.reset {
            self.alarm = DetectionAlarm::new();
        }
        self.narrative.enter(&transition);

        log::info!("Scene '{}' -> '{}'", transition.from, transition.to);
        if self.state.phase != phase_before {
            log::info!(
                "Phase {} -> {}",
                phase_before.as_str(),
                self.state.phase.as_str()
            );
        }
        if self.state.is_game_over {
            log::info!("Night over (won: {})", self.state.has_won);
        }
        transition
    }

    fn notify(&mut self, notification: Notification) {
        log::debug!("Notify: {}", notification.title);
        self.notifications.push(notification);
    }

    /// Take all notifications raised since the last call
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        let scene = self.narrative.current_scene();
        let reveal = self.narrative.reveal();
        let affordances = if reveal.is_complete() {
            scene.affordances()
        } else {
            Vec::new()
        };
        SessionSnapshot {
            state: &self.state,
            scene_id: &scene.id,
            title: &scene.title,
            text: reveal.visible_text(),
            reveal_complete: reveal.is_complete(),
            affordances,
            canvas_visible: self.canvas_visible,
        }
    }
}
