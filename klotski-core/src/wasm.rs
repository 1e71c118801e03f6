//! WASM bindings for klotski-core
//!
//! Provides a JavaScript-friendly API for the game logic.

use crate::{GameSession, MoveOutcome, Pos};
use wasm_bindgen::prelude::*;

/// WASM-friendly wrapper around GameSession
#[wasm_bindgen]
pub struct WasmSession {
    inner: GameSession,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a new session at the canonical starting layout
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSession {
        WasmSession {
            inner: GameSession::new(),
        }
    }

    /// Request a move of piece `id` to grid cell (x, y).
    /// Returns true if the move was accepted.
    #[wasm_bindgen(js_name = tryMove)]
    pub fn try_move(&mut self, id: &str, x: i32, y: i32) -> bool {
        self.inner.try_move(id, Pos::new(x, y)).is_accepted()
    }

    /// Request a move and return the full outcome as a JS object
    /// ({result: "accepted"|"rejected", ...})
    #[wasm_bindgen(js_name = tryMoveDetailed)]
    pub fn try_move_detailed(&mut self, id: &str, x: i32, y: i32) -> Result<JsValue, JsValue> {
        let outcome: MoveOutcome = self.inner.try_move(id, Pos::new(x, y));
        serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current piece list as an array of {id, kind, label, width, height, pos}
    pub fn pieces(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.pieces())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Accepted moves so far this session
    #[wasm_bindgen(js_name = moveCount)]
    pub fn move_count(&self) -> u32 {
        self.inner.move_count()
    }

    /// Whether the general has reached the exit
    #[wasm_bindgen(js_name = isWon)]
    pub fn is_won(&self) -> bool {
        self.inner.is_won()
    }

    /// Discard all state and start over at the canonical layout
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

impl Default for WasmSession {
    fn default() -> Self {
        Self::new()
    }
}
