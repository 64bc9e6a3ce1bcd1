use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ParseCellError};
use crate::{BOARD_SIZE, NUM_CELLS};

/// A board coordinate: `x` is the column, `y` the row, both in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCell")]
pub struct Cell {
    x: u8,
    y: u8,
}

/// Unchecked wire form of a [`Cell`]; only reaches the engine through [`Cell::new`].
#[derive(Deserialize)]
struct RawCell {
    x: i32,
    y: i32,
}

impl TryFrom<RawCell> for Cell {
    type Error = EngineError;

    fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
        Cell::new(raw.x, raw.y)
    }
}

impl Cell {
    /// Validates a coordinate pair coming from outside the engine.
    pub fn new(x: i32, y: i32) -> Result<Self, EngineError> {
        if !in_bounds(x, y) {
            return Err(EngineError::OutOfRangeCell { x, y });
        }
        Ok(Self {
            x: x as u8,
            y: y as u8,
        })
    }

    /// Converts from a row-major index.
    /// Panics if `index >= 64`; callers hold an index produced by the board itself.
    pub fn from_index(index: usize) -> Self {
        assert!(index < NUM_CELLS, "cell index {index} out of range");
        Self {
            x: (index % BOARD_SIZE) as u8,
            y: (index / BOARD_SIZE) as u8,
        }
    }

    pub fn x(self) -> u8 {
        self.x
    }

    pub fn y(self) -> u8 {
        self.y
    }

    /// Row-major index `y * 8 + x`.
    pub fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    pub(crate) fn bit(self) -> u64 {
        1u64 << self.index()
    }

    /// The neighbouring cell one step along `(dx, dy)`, if it is still on the board.
    pub(crate) fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        let (x, y) = (self.x as i32 + dx, self.y as i32 + dy);
        in_bounds(x, y).then(|| Self {
            x: x as u8,
            y: y as u8,
        })
    }

    /// Every cell on the board in index order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..NUM_CELLS).map(Cell::from_index)
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Algebraic notation: column letter then row digit ("D3").
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'A' + self.x) as char;
        write!(f, "{col}{}", self.y + 1)
    }
}

impl FromStr for Cell {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let col = chars.next().ok_or(ParseCellError)?.to_ascii_uppercase();
        let x = "ABCDEFGH".find(col).ok_or(ParseCellError)?;
        let row = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or(ParseCellError)?;

        if !(1..=8).contains(&row) || chars.next().is_some() {
            return Err(ParseCellError);
        }

        Ok(Self {
            x: x as u8,
            y: (row - 1) as u8,
        })
    }
}

fn in_bounds(x: i32, y: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&x) && (0..BOARD_SIZE as i32).contains(&y)
}

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    fn not(self) -> Self {
        self.opponent()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

/// Occupancy of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disk {
    Empty,
    Black,
    White,
}

impl Disk {
    /// Wire value used in snapshots: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Disk::Empty => 0,
            Disk::Black => 1,
            Disk::White => 2,
        }
    }
}

impl From<Player> for Disk {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Disk::Black,
            Player::White => Disk::White,
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Black,
    White,
    Tie,
}

impl From<Player> for Winner {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Winner::Black,
            Player::White => Winner::White,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Black => f.write_str("Black wins"),
            Winner::White => f.write_str("White wins"),
            Winner::Tie => f.write_str("Tie"),
        }
    }
}

/// Game phase. `InProgress -> Finished` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    InProgress { turn: Player },
    Finished { winner: Winner },
}

/// Read-only snapshot handed to the renderer once per cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// 64 row-major cells: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    /// `None` once the game is finished.
    pub turn: Option<Player>,
    pub black_count: u8,
    pub white_count: u8,
    pub empty_count: u8,
    /// Legal targets of the turn holder. Empty unless hints are switched on.
    pub hints: Vec<Cell>,
    /// Contract:
    /// - Normal move: cells captured by the last move, also when that move
    ///   forced the opponent to pass.
    /// - Pass found at the start of a cycle, or fresh game: empty.
    pub last_flipped: Vec<Cell>,
    /// `true` when the last transition was a forced pass.
    pub passed: bool,
    pub finished: bool,
    pub winner: Option<Winner>,
    pub music: bool,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub winner: Winner,
    pub black_count: u8,
    pub white_count: u8,
}
