//! Rules engine for 8x8 Reversi.
//!
//! [`Game`] is the whole engine: it generates legal moves for both sides,
//! applies placements, passes the turn when the mover is stuck and ends the game
//! when nobody can move. Renderers read [`GameState`] snapshots and feed back
//! cell selections, either directly or through the [`wasm`] boundary.

use wasm_bindgen::prelude::*;

pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod rules;
pub mod settings;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use error::EngineError;
pub use game::{AppliedMove, Game, IgnoreReason, MoveOutcome};
pub use movegen::{FlipSet, LegalMoves, legal_moves};
pub use rules::Transition;
pub use settings::UiSettings;
pub use types::{Cell, Disk, GameResult, GameState, Phase, Player, Winner};

/// Cells along one edge of the board.
pub const BOARD_SIZE: usize = 8;

pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
