//! Legal-move generation.
//!
//! Moves are found by scanning outward from every disk of the mover: a run of
//! opponent disks that ends on an empty cell makes that cell a target and the run
//! its bridge. Bridges reaching the same target from different origins or
//! directions are merged into one [`FlipSet`].

use std::collections::BTreeMap;

use crate::board::{Board, DIRECTIONS};
use crate::types::{Cell, Disk, Player};

/// A set of cells stored as a one-bit-per-cell mask. Iterates in index order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FlipSet(u64);

impl FlipSet {
    pub fn from_mask(mask: u64) -> Self {
        Self(mask)
    }

    pub fn mask(self) -> u64 {
        self.0
    }

    pub fn insert(&mut self, cell: Cell) {
        self.0 |= cell.bit();
    }

    /// Union with `other`. A cell reached twice is still held once.
    pub fn extend(&mut self, other: FlipSet) {
        self.0 |= other.0;
    }

    pub fn contains(self, cell: Cell) -> bool {
        self.0 & cell.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> FlipSetIter {
        FlipSetIter(self.0)
    }
}

impl IntoIterator for FlipSet {
    type Item = Cell;
    type IntoIter = FlipSetIter;

    fn into_iter(self) -> FlipSetIter {
        self.iter()
    }
}

impl FromIterator<Cell> for FlipSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = Self::default();
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

pub struct FlipSetIter(u64);

impl Iterator for FlipSetIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Cell::from_index(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for FlipSetIter {}

/// Legal targets of one player, each with the disks it would capture.
/// Rebuilt from scratch every cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoves {
    moves: BTreeMap<Cell, FlipSet>,
}

impl LegalMoves {
    fn merge(&mut self, target: Cell, bridge: FlipSet) {
        self.moves.entry(target).or_default().extend(bridge);
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.moves.contains_key(&cell)
    }

    pub fn flips_for(&self, cell: Cell) -> Option<FlipSet> {
        self.moves.get(&cell).copied()
    }

    /// Target cells in index order.
    pub fn targets(&self) -> impl Iterator<Item = Cell> + '_ {
        self.moves.keys().copied()
    }

    pub fn target_mask(&self) -> u64 {
        self.moves.keys().fold(0, |mask, cell| mask | cell.bit())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, FlipSet)> + '_ {
        self.moves.iter().map(|(&cell, &flips)| (cell, flips))
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Generates every legal placement for `player` with its merged flip set.
pub fn legal_moves(board: &Board, player: Player) -> LegalMoves {
    let own = Disk::from(player);
    let mut moves = LegalMoves::default();

    for origin in Cell::all().filter(|&cell| board.get(cell) == own) {
        for (dx, dy) in DIRECTIONS {
            if let Some((target, bridge)) = scan_direction(board, origin, player, dx, dy) {
                moves.merge(target, bridge);
            }
        }
    }

    moves
}

pub fn has_legal_move(board: &Board, player: Player) -> bool {
    !legal_moves(board, player).is_empty()
}

/// Walks from `origin` along `(dx, dy)`. Returns the empty cell that closes a
/// non-empty run of opponent disks, together with that run.
fn scan_direction(
    board: &Board,
    origin: Cell,
    player: Player,
    dx: i32,
    dy: i32,
) -> Option<(Cell, FlipSet)> {
    let opponent = Disk::from(!player);
    let mut bridge = FlipSet::default();
    let mut next = origin.offset(dx, dy);

    while let Some(cell) = next {
        match board.get(cell) {
            Disk::Empty => return (!bridge.is_empty()).then_some((cell, bridge)),
            disk if disk == opponent => bridge.insert(cell),
            _ => return None,
        }
        next = cell.offset(dx, dy);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: i32, y: i32) -> Cell {
        Cell::new(x, y).unwrap()
    }

    fn cells(coords: &[(i32, i32)]) -> FlipSet {
        coords.iter().map(|&(x, y)| cell(x, y)).collect()
    }

    /// True when `flip` sits strictly between `target` and a disk of `player`
    /// on one straight line, with only opponent disks in between.
    fn is_flanked(board: &Board, target: Cell, flip: Cell, player: Player) -> bool {
        DIRECTIONS.iter().any(|&(dx, dy)| {
            let mut seen = false;
            let mut next = target.offset(dx, dy);
            while let Some(square) = next {
                match board.get(square) {
                    d if d == Disk::from(!player) => seen |= square == flip,
                    d if d == Disk::from(player) => return seen,
                    _ => return false,
                }
                next = square.offset(dx, dy);
            }
            false
        })
    }

    fn assert_sound_and_complete(board: &Board, player: Player) {
        let moves = legal_moves(board, player);

        for (target, flips) in moves.iter() {
            assert_eq!(board.get(target), Disk::Empty, "{target} is occupied");
            assert!(!flips.is_empty());
            for flip in flips {
                assert_eq!(board.get(flip), Disk::from(!player));
                assert!(is_flanked(board, target, flip, player), "{flip} not flanked");
            }
        }

        for target in Cell::all() {
            let expected = board.flips_at(target, player);
            assert_eq!(
                moves.flips_for(target).unwrap_or_default(),
                expected,
                "mismatch at {target} for {player}\n{board}"
            );
        }
    }

    #[test]
    fn initial_black_moves_are_four_single_flips() {
        let moves = legal_moves(&Board::new(), Player::Black);

        let targets: Vec<Cell> = moves.targets().collect();
        assert_eq!(
            targets,
            vec![cell(3, 2), cell(2, 3), cell(5, 4), cell(4, 5)]
        );
        assert_eq!(moves.flips_for(cell(2, 3)), Some(cells(&[(3, 3)])));
        assert_eq!(moves.flips_for(cell(3, 2)), Some(cells(&[(3, 3)])));
        assert_eq!(moves.flips_for(cell(4, 5)), Some(cells(&[(4, 4)])));
        assert_eq!(moves.flips_for(cell(5, 4)), Some(cells(&[(4, 4)])));
    }

    #[test]
    fn initial_white_moves_mirror_black() {
        let moves = legal_moves(&Board::new(), Player::White);

        let targets: Vec<Cell> = moves.targets().collect();
        assert_eq!(
            targets,
            vec![cell(4, 2), cell(5, 3), cell(2, 4), cell(3, 5)]
        );
        assert!(moves.iter().all(|(_, flips)| flips.len() == 1));
    }

    #[test]
    fn bridges_from_several_origins_merge_into_one_target() {
        let board = Board::from_rows(&[
            ".OX.....", "OO......", "X.X.....", "........", "........", "........",
            "........", "........",
        ])
        .unwrap();

        let moves = legal_moves(&board, Player::Black);

        assert_eq!(
            moves.flips_for(cell(0, 0)),
            Some(cells(&[(1, 0), (0, 1), (1, 1)]))
        );
        assert_sound_and_complete(&board, Player::Black);
    }

    #[test]
    fn long_bridge_captures_whole_run() {
        let board = Board::from_rows(&[
            "XOOOOOO.", "........", "........", "........", "........", "........",
            "........", "........",
        ])
        .unwrap();

        let moves = legal_moves(&board, Player::Black);

        assert_eq!(moves.len(), 1);
        assert_eq!(
            moves.flips_for(cell(7, 0)),
            Some(cells(&[(1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)]))
        );
    }

    #[test]
    fn run_closed_by_own_disk_or_edge_gives_nothing() {
        let board = Board::from_rows(&[
            "XOOX....", "........", "........", "........", "........", "........",
            "........", "......XO",
        ])
        .unwrap();

        let moves = legal_moves(&board, Player::Black);

        assert!(!moves.contains(cell(4, 0)));
        assert!(moves.is_empty());
        assert!(!has_legal_move(&board, Player::Black));
    }

    #[test]
    fn flip_set_deduplicates_by_cell() {
        let mut set = FlipSet::default();
        set.insert(cell(2, 2));
        set.extend(cells(&[(2, 2), (3, 3)]));

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![cell(2, 2), cell(3, 3)]
        );
        assert_eq!(set.iter().len(), 2);
    }

    #[test]
    fn target_mask_matches_targets() {
        let moves = legal_moves(&Board::new(), Player::Black);
        let mask = moves.target_mask();

        assert_eq!(mask.count_ones() as usize, moves.len());
        assert!(moves.targets().all(|c| mask & c.bit() != 0));
    }

    #[test]
    fn generator_agrees_with_target_scan_over_scripted_games() {
        for seed in 0..8usize {
            let mut board = Board::new();
            let mut player = Player::Black;

            for ply in 0..80usize {
                assert_sound_and_complete(&board, Player::Black);
                assert_sound_and_complete(&board, Player::White);

                let moves = legal_moves(&board, player);
                if moves.is_empty() {
                    if !has_legal_move(&board, !player) {
                        break;
                    }
                    player = !player;
                    continue;
                }

                let pick = (seed * 7 + ply * 3) % moves.len();
                let (target, flips) = moves.iter().nth(pick).unwrap();
                let total_before = 64 - board.empty_count();
                board.place(target, player, flips);

                assert_eq!(64 - board.empty_count(), total_before + 1);
                player = !player;
            }
        }
    }
}
