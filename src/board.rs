use std::fmt;

use crate::error::ParseBoardError;
use crate::movegen::FlipSet;
use crate::types::{Cell, Disk, Player};
use crate::{BOARD_SIZE, NUM_CELLS};

/// Compass steps `(dx, dy)`: N, S, W, E, NW, NE, SW, SE.
pub(crate) const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Reversi board state represented by two bitboards.
///
/// Bit `y * 8 + x` is set in `black` or `white` when that colour occupies `(x, y)`.
/// The masks never overlap, so the three counts always sum to 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// (3,3)=white, (4,4)=white, (4,3)=black, (3,4)=black.
    pub fn new() -> Self {
        Self {
            black: bit(3, 4) | bit(4, 3),
            white: bit(3, 3) | bit(4, 4),
        }
    }

    pub fn empty() -> Self {
        Self { black: 0, white: 0 }
    }

    /// Builds a board from raw occupancy masks.
    /// Panics if a cell is claimed by both colours.
    pub fn from_masks(black: u64, white: u64) -> Self {
        assert_eq!(black & white, 0, "black and white masks overlap");
        Self { black, white }
    }

    /// Builds a board from eight text rows, top row first.
    /// `X` is black, `O` is white, `.` is empty.
    pub fn from_rows(rows: &[&str; BOARD_SIZE]) -> Result<Self, ParseBoardError> {
        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != BOARD_SIZE {
                return Err(ParseBoardError {
                    row: y,
                    reason: "expected 8 cells",
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let disk = match ch {
                    'X' => Disk::Black,
                    'O' => Disk::White,
                    '.' => Disk::Empty,
                    _ => {
                        return Err(ParseBoardError {
                            row: y,
                            reason: "unknown cell symbol",
                        });
                    }
                };
                board.set(Cell::from_index(y * BOARD_SIZE + x), disk);
            }
        }
        Ok(board)
    }

    pub fn get(&self, cell: Cell) -> Disk {
        let square = cell.bit();
        if self.black & square != 0 {
            Disk::Black
        } else if self.white & square != 0 {
            Disk::White
        } else {
            Disk::Empty
        }
    }

    /// Overwrites one cell. The counts follow the masks, so they stay consistent.
    pub fn set(&mut self, cell: Cell, disk: Disk) {
        let square = cell.bit();
        self.black &= !square;
        self.white &= !square;
        match disk {
            Disk::Black => self.black |= square,
            Disk::White => self.white |= square,
            Disk::Empty => {}
        }
    }

    pub fn count_of(&self, disk: Disk) -> u8 {
        match disk {
            Disk::Black => self.black.count_ones() as u8,
            Disk::White => self.white.count_ones() as u8,
            Disk::Empty => self.empty_count(),
        }
    }

    /// Returns `(black_count, white_count)`.
    pub fn counts(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        (!(self.black | self.white)).count_ones() as u8
    }

    pub fn mask_of(&self, player: Player) -> u64 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Captures that placing `player` at `cell` would make, found by walking
    /// outward from `cell`. Empty when the cell is occupied or flanks nothing.
    pub fn flips_at(&self, cell: Cell, player: Player) -> FlipSet {
        if self.get(cell) != Disk::Empty {
            return FlipSet::default();
        }

        let me = self.mask_of(player);
        let opp = self.mask_of(!player);
        let mut flips = FlipSet::default();

        for (dx, dy) in DIRECTIONS {
            let mut line = FlipSet::default();
            let mut next = cell.offset(dx, dy);

            while let Some(square) = next {
                if opp & square.bit() != 0 {
                    line.insert(square);
                } else if me & square.bit() != 0 {
                    flips.extend(line);
                    break;
                } else {
                    break;
                }
                next = square.offset(dx, dy);
            }
        }

        flips
    }

    /// Places `player` at `cell` and turns every disk in `flips` to `player`.
    /// Both masks are rewritten in one step, so no half-applied state exists.
    pub(crate) fn place(&mut self, cell: Cell, player: Player, flips: FlipSet) {
        let me = self.mask_of(player) | cell.bit() | flips.mask();
        let opp = self.mask_of(!player) & !flips.mask();

        match player {
            Player::Black => {
                self.black = me;
                self.white = opp;
            }
            Player::White => {
                self.white = me;
                self.black = opp;
            }
        }
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_CELLS] {
        let mut board = [0u8; NUM_CELLS];
        for (cell, code) in Cell::all().zip(board.iter_mut()) {
            *code = self.get(cell).code();
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   A B C D E F G H")?;
        for cell in Cell::all() {
            if cell.x() == 0 {
                write!(f, "\n {} ", cell.y() + 1)?;
            }
            let symbol = match self.get(cell) {
                Disk::Black => 'X',
                Disk::White => 'O',
                Disk::Empty => '.',
            };
            write!(f, "{symbol} ")?;
        }
        writeln!(f)
    }
}

fn bit(x: usize, y: usize) -> u64 {
    1u64 << (y * BOARD_SIZE + x)
}
