//! Pass and termination rules.
//!
//! Pure functions over a board: they never mutate it. The turn manager in
//! [`crate::game`] applies what they decide.

use std::cmp::Ordering;

use crate::board::Board;
use crate::movegen::has_legal_move;
use crate::types::{GameResult, Player, Winner};

/// What the state machine does at the end of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The turn holder has a legal target and waits for a selection.
    Continue(Player),
    /// The turn holder has no target but the opponent does. Board unchanged.
    Pass { from: Player, to: Player },
    /// Neither side can move.
    Finish(Winner),
}

/// Strictly greater count wins; equal counts tie.
pub fn decide_winner(black_count: u8, white_count: u8) -> Winner {
    match black_count.cmp(&white_count) {
        Ordering::Greater => Winner::Black,
        Ordering::Less => Winner::White,
        Ordering::Equal => Winner::Tie,
    }
}

pub fn result_of(board: &Board) -> GameResult {
    let (black_count, white_count) = board.counts();
    GameResult {
        winner: decide_winner(black_count, white_count),
        black_count,
        white_count,
    }
}

/// Decides the transition for `turn` by generating moves for both sides.
pub fn next_transition(board: &Board, turn: Player) -> Transition {
    resolve(
        board,
        turn,
        has_legal_move(board, turn),
        has_legal_move(board, !turn),
    )
}

/// Same decision from already-known move availability.
pub(crate) fn resolve(
    board: &Board,
    turn: Player,
    mover_can_move: bool,
    opponent_can_move: bool,
) -> Transition {
    match (mover_can_move, opponent_can_move) {
        (true, _) => Transition::Continue(turn),
        (false, true) => Transition::Pass {
            from: turn,
            to: !turn,
        },
        (false, false) => Transition::Finish(result_of(board).winner),
    }
}
