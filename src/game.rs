//! Turn management and the interaction cycle.
//!
//! [`Game`] owns the board, the turn holder, the phase and the legal-move
//! records of both players. Every mutation is followed by a fresh evaluation, so
//! the records always describe the current board and the forced-pass and
//! game-over rules have already been applied when a call returns.

use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::error::EngineError;
use crate::movegen::{FlipSet, LegalMoves, legal_moves};
use crate::rules::{self, Transition};
use crate::settings::UiSettings;
use crate::types::{Cell, GameResult, GameState, Phase, Player, Winner};

/// A placement that went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub player: Player,
    pub cell: Cell,
    pub flipped: FlipSet,
    /// Evaluation run right after the placement.
    pub transition: Transition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    GameOver,
    NotLegal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(AppliedMove),
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    phase: Phase,
    black_moves: LegalMoves,
    white_moves: LegalMoves,
    last_flipped: FlipSet,
    passed: bool,
}

impl Game {
    /// Starts a session from the standard layout with Black to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::Black)
    }

    /// Starts from a constructed position. The position is evaluated at once, so
    /// the game may come back already passed or finished.
    #[instrument(skip(board))]
    pub fn from_board(board: Board, turn: Player) -> Self {
        let mut game = Self {
            board,
            phase: Phase::InProgress { turn },
            black_moves: LegalMoves::default(),
            white_moves: LegalMoves::default(),
            last_flipped: FlipSet::default(),
            passed: false,
        };
        game.evaluate(false);
        game
    }

    /// Throws the session away and starts over.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("new game");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The turn holder, or `None` once finished.
    pub fn turn(&self) -> Option<Player> {
        match self.phase {
            Phase::InProgress { turn } => Some(turn),
            Phase::Finished { .. } => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            Phase::InProgress { .. } => None,
        }
    }

    /// Legal-move record of `player` from the latest evaluation.
    pub fn legal_moves(&self, player: Player) -> &LegalMoves {
        match player {
            Player::Black => &self.black_moves,
            Player::White => &self.white_moves,
        }
    }

    /// Disks captured by the last applied move, including one that forced a
    /// pass. Empty after a pass found at the start of a cycle.
    pub fn last_flipped(&self) -> FlipSet {
        self.last_flipped
    }

    /// Whether the last transition was a forced pass.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Places `player` at `cell`.
    ///
    /// Once the game is finished this is a no-op reported as
    /// [`IgnoreReason::GameOver`].
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidMove`] when `player` is not the turn holder or `cell`
    /// is not one of its legal targets. The board is left untouched.
    #[instrument(skip(self), fields(player = %player, cell = %cell))]
    pub fn apply_move(&mut self, player: Player, cell: Cell) -> Result<MoveOutcome, EngineError> {
        let Phase::InProgress { turn } = self.phase else {
            debug!("game already finished, move ignored");
            return Ok(MoveOutcome::Ignored(IgnoreReason::GameOver));
        };

        let flips = self
            .legal_moves(player)
            .flips_for(cell)
            .filter(|_| player == turn);
        let Some(flips) = flips else {
            warn!(turn = %turn, "refusing illegal move");
            return Err(EngineError::InvalidMove { player, cell });
        };

        Ok(MoveOutcome::Applied(self.play(player, cell, flips)))
    }

    /// Reports a pick of `(x, y)` by the turn holder. Picks that are not legal
    /// targets, and every pick after the game ends, are ignored.
    ///
    /// # Errors
    ///
    /// [`EngineError::OutOfRangeCell`] for coordinates off the board.
    #[instrument(skip(self))]
    pub fn select_cell(&mut self, x: i32, y: i32) -> Result<MoveOutcome, EngineError> {
        let cell = Cell::new(x, y)?;
        Ok(self.select(cell))
    }

    /// Same as [`Game::select_cell`] for an already validated cell.
    pub fn select(&mut self, cell: Cell) -> MoveOutcome {
        let Phase::InProgress { turn } = self.phase else {
            return MoveOutcome::Ignored(IgnoreReason::GameOver);
        };
        match self.legal_moves(turn).flips_for(cell) {
            Some(flips) => MoveOutcome::Applied(self.play(turn, cell, flips)),
            None => {
                debug!(cell = %cell, turn = %turn, "selection is not a legal target");
                MoveOutcome::Ignored(IgnoreReason::NotLegal)
            }
        }
    }

    /// Runs one interaction cycle: regenerate moves for both sides, accept at
    /// most one selection, apply it and regenerate again.
    ///
    /// A selection only counts when the cycle finds the turn holder able to move.
    /// When the cycle passes or finishes the game, the selection is dropped.
    #[instrument(skip(self))]
    pub fn step(&mut self, selection: Option<Cell>) -> Transition {
        let transition = self.evaluate(false);
        match (transition, selection) {
            (Transition::Continue(_), Some(cell)) => match self.select(cell) {
                MoveOutcome::Applied(applied) => applied.transition,
                MoveOutcome::Ignored(_) => transition,
            },
            _ => transition,
        }
    }

    /// Read-only view for the renderer.
    pub fn snapshot(&self, settings: &UiSettings) -> GameState {
        let (black_count, white_count) = self.board.counts();
        let hints = match self.turn() {
            Some(turn) if settings.show_hints => self.legal_moves(turn).targets().collect(),
            _ => Vec::new(),
        };

        GameState {
            board: self.board.to_array().to_vec(),
            turn: self.turn(),
            black_count,
            white_count,
            empty_count: self.board.empty_count(),
            hints,
            last_flipped: self.last_flipped.iter().collect(),
            passed: self.passed,
            finished: self.is_finished(),
            winner: self.winner(),
            music: settings.music,
        }
    }

    /// Final result, available once the game is finished.
    pub fn result(&self) -> Option<GameResult> {
        self.is_finished().then(|| rules::result_of(&self.board))
    }

    /// Mutation shared by every placement path. `flips` must come from the
    /// current legal-move record of `player`, who must hold the turn.
    fn play(&mut self, player: Player, cell: Cell, flips: FlipSet) -> AppliedMove {
        self.board.place(cell, player, flips);
        self.phase = Phase::InProgress { turn: !player };
        self.last_flipped = flips;
        self.passed = false;
        debug!(player = %player, cell = %cell, flipped = flips.len(), "move applied");

        let transition = self.evaluate(true);
        AppliedMove {
            player,
            cell,
            flipped: flips,
            transition,
        }
    }

    /// Regenerates both legal-move records and applies the pass or game-over rule.
    /// `after_move` keeps the captures of the move that forced a pass.
    fn evaluate(&mut self, after_move: bool) -> Transition {
        let turn = match self.phase {
            Phase::Finished { winner } => return Transition::Finish(winner),
            Phase::InProgress { turn } => turn,
        };

        self.black_moves = legal_moves(&self.board, Player::Black);
        self.white_moves = legal_moves(&self.board, Player::White);

        let transition = rules::resolve(
            &self.board,
            turn,
            !self.legal_moves(turn).is_empty(),
            !self.legal_moves(!turn).is_empty(),
        );

        match transition {
            Transition::Continue(_) => {}
            Transition::Pass { from, to } => {
                debug!(from = %from, to = %to, "no legal move, passing");
                self.phase = Phase::InProgress { turn: to };
                if !after_move {
                    self.last_flipped = FlipSet::default();
                }
                self.passed = true;
            }
            Transition::Finish(winner) => {
                let (black, white) = self.board.counts();
                info!(black, white, winner = %winner, "game finished");
                self.phase = Phase::Finished { winner };
            }
        }

        transition
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
