//! Browser facade
//!
//! The page's own markup and styling draw the scene; this wrapper feeds it
//! JSON snapshots and takes its clicks. Call `frame` from `requestAnimationFrame`.

use wasm_bindgen::prelude::*;

use crate::GameError;
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::{Command, EntityKind};
use crate::story::RevealHandle;

fn to_js(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("Logger init failed: {e}")));
    }
    log::info!("Mink: Night Thief starting...");
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    last_time: f64,
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebSession, JsValue> {
        let session = Session::new(Settings::load()).map_err(to_js)?;
        Ok(Self {
            session,
            last_time: 0.0,
        })
    }

    /// Animation frame callback; `time` is the rAF timestamp in ms
    pub fn frame(&mut self, time: f64) -> bool {
        let dt = if self.last_time > 0.0 {
            time - self.last_time
        } else {
            0.0
        };
        self.last_time = time;
        self.session.tick(dt)
    }

    /// Handle of the live reveal, for shells that run their own text timer
    #[wasm_bindgen(js_name = revealHandle)]
    pub fn reveal_handle(&self) -> u64 {
        self.session.narrative().reveal().handle().into()
    }

    /// Timer callback from a shell-side reveal timer; stale handles do nothing
    #[wasm_bindgen(js_name = tickReveal)]
    pub fn tick_reveal(&mut self, handle: u64, dt: f64) -> bool {
        self.session.tick_reveal(RevealHandle::from(handle), dt)
    }

    /// Click on the play surface, relative to its top-left corner
    pub fn click(&mut self, x: f32, y: f32) {
        self.session.move_to(x, y);
    }

    /// Click on an entity, e.g. `("chicken", "chicken-1")`
    pub fn target(&mut self, kind: &str, id: &str) -> Result<(), JsValue> {
        let Some(kind) = EntityKind::from_str(kind) else {
            log::warn!("Unknown entity kind '{kind}'");
            return Ok(());
        };
        self.session.target(kind, id).map_err(to_js)
    }

    pub fn choose(&mut self, index: usize) -> Result<(), JsValue> {
        self.session.choose(index).map_err(to_js)
    }

    #[wasm_bindgen(js_name = continueStory)]
    pub fn continue_story(&mut self) -> Result<(), JsValue> {
        self.session.continue_story().map_err(to_js)
    }

    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&mut self, scene: &str) -> Result<(), JsValue> {
        self.session.jump_to(scene).map(|_| ()).map_err(to_js)
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    /// Apply a command given as JSON, e.g. `{"type":"choose","index":0}`
    pub fn command(&mut self, json: &str) -> Result<(), JsValue> {
        let command: Command =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.handle(command).map_err(to_js)
    }

    #[wasm_bindgen(js_name = skipReveal)]
    pub fn skip_reveal(&mut self) {
        self.session.skip_reveal();
    }

    /// Current state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Pending notifications as a JSON array
    #[wasm_bindgen(js_name = drainNotifications)]
    pub fn drain_notifications(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.drain_notifications())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace preferences from JSON and store them
    #[wasm_bindgen(js_name = setSettings)]
    pub fn set_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json).map_err(to_js)?;
        settings.save();
        self.session.apply_settings(settings);
        Ok(())
    }
}
