//! Engine error types.
//!
//! Both variants of [`EngineError`] are logic faults of the caller. Nothing in the
//! engine performs I/O, so there is no retryable class.

use derive_more::{Display, Error};

use crate::types::{Cell, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// A coordinate outside `[0,7] x [0,7]` reached the engine boundary.
    #[display("cell ({x}, {y}) is off the board")]
    OutOfRangeCell { x: i32, y: i32 },

    /// A placement that is not in the mover's legal-move record.
    #[display("{cell} is not a legal move for {player}")]
    InvalidMove { player: Player, cell: Cell },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("invalid cell notation")]
pub struct ParseCellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("invalid board row {row}: {reason}")]
pub struct ParseBoardError {
    pub row: usize,
    pub reason: &'static str,
}
