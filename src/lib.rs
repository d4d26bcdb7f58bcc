use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

pub mod board;
pub mod catalog;
pub mod controller;
pub mod generator;
pub mod input;
pub mod piece;
pub mod session;
pub mod settings;
pub mod view;

pub use board::{line_clear_points, Board};
pub use catalog::{PieceDef, PieceKind};
pub use controller::{Controller, DropResult, LockOutcome};
pub use generator::{PieceGenerator, Randomizer, RandomizerKind};
pub use input::{ControlBindings, Input};
pub use piece::{Matrix, Piece, Point};
pub use session::{FrameHandle, FrameQueue, GameEvent, Scheduler, Session};
pub use settings::GameSettings;
pub use view::{FrameView, PieceView};

#[wasm_bindgen(start)]
pub fn bootstrap() {
    console_error_panic_hook::set_once();
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn log(msg: &str) {
    eprintln!("[blockfall] {msg}");
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Browser-facing handle. The page's animation loop calls `tick` and keeps
/// looping while `wantsFrame` is true.
#[wasm_bindgen]
pub struct GameClient {
    session: Session,
}

#[wasm_bindgen]
impl GameClient {
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<GameClient, JsValue> {
        let settings: GameSettings = if settings.is_undefined() || settings.is_null() {
            GameSettings::default()
        } else {
            from_value(settings).unwrap_or_default()
        };
        settings.validate().map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            session: Session::with_settings(settings),
        })
    }

    pub fn start(&mut self, now: f64) {
        self.session.start(now);
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    pub fn tick(&mut self, now: f64) -> bool {
        self.session.tick(now)
    }

    #[wasm_bindgen(js_name = tickNow)]
    pub fn tick_now(&mut self) -> bool {
        self.session.tick(now_ms())
    }

    #[wasm_bindgen(js_name = wantsFrame)]
    pub fn wants_frame(&self) -> bool {
        self.session.scheduler().is_pending()
    }

    #[wasm_bindgen(js_name = handleInput)]
    pub fn handle_input(&mut self, input: JsValue) -> Result<bool, JsValue> {
        let parsed: Input = from_value(input)?;
        Ok(self.session.handle_input(parsed))
    }

    /// Maps a `KeyboardEvent.code` through the configured bindings. Unbound
    /// keys are ignored.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, code: &str) -> bool {
        match self.session.settings().controls.resolve(code) {
            Some(input) => self.session.handle_input(input),
            None => false,
        }
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_value(&self.session.snapshot()).map_err(|e| e.into())
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    #[wasm_bindgen(getter)]
    pub fn playing(&self) -> bool {
        self.session.is_active()
    }

    /// Final score once, right after the game ends; `undefined` otherwise.
    /// Lock events stay queued.
    #[wasm_bindgen(js_name = takeGameOver)]
    pub fn take_game_over(&mut self) -> Option<u32> {
        self.session.take_game_over()
    }
}
