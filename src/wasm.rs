//! Browser boundary. The renderer drives one [`WasmGame`] per session and polls
//! [`WasmGame::state`] after every call.

use wasm_bindgen::prelude::*;

use crate::game::{Game, MoveOutcome};
use crate::settings::UiSettings;
use crate::types::Cell;

#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct WasmGame {
    game: Game,
    settings: UiSettings,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the pick was played. Off-board coordinates throw.
    #[wasm_bindgen(js_name = selectCell)]
    pub fn select_cell(&mut self, x: i32, y: i32) -> Result<bool, JsError> {
        let outcome = self.game.select_cell(x, y)?;
        Ok(matches!(outcome, MoveOutcome::Applied(_)))
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.snapshot(&self.settings))
    }

    /// `undefined` until the game is finished.
    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.game.result())
    }

    /// Legal targets of the turn holder, whatever the hint setting.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        let targets: Vec<Cell> = match self.game.turn() {
            Some(turn) => self.game.legal_moves(turn).targets().collect(),
            None => Vec::new(),
        };
        to_js(&targets)
    }

    #[wasm_bindgen(js_name = toggleHint)]
    pub fn toggle_hint(&mut self) -> bool {
        self.settings.toggle_hints()
    }

    #[wasm_bindgen(js_name = toggleMusic)]
    pub fn toggle_music(&mut self) -> bool {
        self.settings.toggle_music()
    }

    #[wasm_bindgen(js_name = setSettings)]
    pub fn set_settings(&mut self, settings: JsValue) -> Result<(), JsError> {
        self.settings = serde_wasm_bindgen::from_value(settings)
            .map_err(|err| JsError::new(&err.to_string()))?;
        Ok(())
    }

    /// Starts a new session. Settings survive.
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        self.game.reset();
    }
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsError::new(&err.to_string()))
}
