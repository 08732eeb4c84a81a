use std::fmt::Display;

use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::config::SessionConfig;
use crate::game::GameInstance;
use crate::snapshot::SnapshotField;
use crate::types::{Cell, Mode};

/// Session handle exported to the JavaScript front end.
#[wasm_bindgen]
pub struct ReversiSession {
    game: GameInstance,
}

#[wasm_bindgen]
impl ReversiSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            game: GameInstance::new_with_default_selector(SessionConfig::default()),
        }
    }

    /// Starts a game; `mode` is `"pvp"` or `"pvc"`.
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = mode.parse::<Mode>().map_err(to_js_error)?;
        self.game.new_game(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = placeToken)]
    pub fn place_token(&mut self, row: i32, col: i32) -> Result<bool, JsValue> {
        self.game.place_token(row, col).map_err(to_js_error)
    }

    pub fn play(&mut self, row: i32, col: i32) -> Result<bool, JsValue> {
        self.game.play(row, col).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = computerMove)]
    pub fn computer_move(&mut self) -> Result<bool, JsValue> {
        self.game.computer_move().map_err(to_js_error)
    }

    /// Cell code at `(row, col)`: 0=empty, 1=white, 2=black.
    pub fn cell(&self, row: i32, col: i32) -> Result<u8, JsValue> {
        self.game
            .cell(row, col)
            .map(Cell::code)
            .map_err(to_js_error)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.game.to_game_state())?)
    }

    /// Final result, or `undefined` while the game is running.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.game.result())?)
    }

    /// The seven-field snapshot sequence.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(
            &self.game.snapshot().into_fields(),
        )?)
    }

    pub fn restore(&mut self, fields: JsValue) -> Result<(), JsValue> {
        let fields: Vec<SnapshotField> = serde_wasm_bindgen::from_value(fields)?;
        self.game.restore_fields(&fields).map_err(to_js_error)
    }

    /// Binary save data for the host to write to a file.
    pub fn save(&self) -> Vec<u8> {
        self.game.snapshot().to_bytes()
    }

    pub fn load(&mut self, data: &[u8]) -> Result<(), JsValue> {
        self.game.restore_bytes(data).map_err(to_js_error)
    }

    /// Calls `callback(state)` after every state change, where `state` is
    /// the same object [`ReversiSession::state`] returns.
    ///
    /// The callback runs while the session is still borrowed by the mutating
    /// call, so it must read from `state` rather than call back into the session.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: js_sys::Function) {
        self.game.subscribe(move |game: &GameInstance| {
            let state = match serde_wasm_bindgen::to_value(&game.to_game_state()) {
                Ok(state) => state,
                Err(err) => {
                    warn!(?err, "could not convert state for change callback");
                    return;
                }
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &state) {
                warn!(?err, "change callback threw");
            }
        });
    }
}

impl Default for ReversiSession {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen_test::*;

    use super::*;

    fn number_field(state: &JsValue, name: &str) -> Option<f64> {
        js_sys::Reflect::get(state, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.as_f64())
    }

    #[wasm_bindgen_test]
    fn change_callback_receives_updated_scores() {
        let scores = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&scores);
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |state: JsValue| {
            seen.borrow_mut().push((
                number_field(&state, "white_score"),
                number_field(&state, "black_score"),
            ));
        });

        let mut session = ReversiSession::new();
        session.on_change(callback.as_ref().unchecked_ref::<js_sys::Function>().clone());
        session.new_game("pvp").unwrap();
        session.place_token(2, 4).unwrap();

        assert_eq!(
            *scores.borrow(),
            vec![(Some(2.0), Some(2.0)), (Some(4.0), Some(1.0))]
        );
    }

    #[wasm_bindgen_test]
    fn new_game_rejects_unknown_mode() {
        let mut session = ReversiSession::new();

        assert!(session.new_game("exit").is_err());
        assert!(session.new_game("pvc").is_ok());
    }

    #[wasm_bindgen_test]
    fn play_and_save_round_trip() {
        let mut session = ReversiSession::new();
        session.new_game("pvc").unwrap();

        assert!(session.play(2, 4).unwrap());
        assert_eq!(session.cell(4, 5).unwrap(), Cell::Black.code());

        let saved = session.save();
        let mut other = ReversiSession::new();
        other.load(&saved).unwrap();
        assert_eq!(other.save(), saved);
    }

    #[wasm_bindgen_test]
    fn snapshot_value_restores() {
        let mut session = ReversiSession::new();
        session.new_game("pvp").unwrap();
        session.place_token(2, 4).unwrap();

        let value = session.snapshot().unwrap();
        let mut other = ReversiSession::new();
        other.restore(value).unwrap();

        assert_eq!(other.save(), session.save());
    }
}
