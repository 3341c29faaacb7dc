//! Fixed-size 8×8 board.
//!
//! Cells live in a flat row-major array so cloning a board is a single copy
//! of 64 small values, which keeps per-node state duplication cheap in search.

use crate::game_state::reversi_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Cell>; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
        }
    }
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard four-piece center seed, all fixed (type 100, observed).
    pub fn starting_position() -> Self {
        let mut board = Self::new_empty();
        board.set(3, 3, Some(Cell::fixed(Player::White)));
        board.set(3, 4, Some(Cell::fixed(Player::Black)));
        board.set(4, 3, Some(Cell::fixed(Player::Black)));
        board.set(4, 4, Some(Cell::fixed(Player::White)));
        board
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells[row * BOARD_SIZE + col]
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells[row * BOARD_SIZE + col].as_mut()
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Option<Cell>) {
        self.cells[row * BOARD_SIZE + col] = cell;
    }

    #[inline]
    pub fn at(&self, sq: Square) -> Option<Cell> {
        self.cells[sq as usize]
    }

    #[inline]
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_none()
    }

    /// Iterate occupied cells as `(square, cell)`.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|c| (idx as Square, c)))
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut().flatten()
    }

    #[inline]
    pub fn occupied_count(&self) -> u32 {
        self.cells.iter().filter(|c| c.is_some()).count() as u32
    }

    #[inline]
    pub fn empty_count(&self) -> u32 {
        NUM_SQUARES as u32 - self.occupied_count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    pub fn has_unobserved(&self) -> bool {
        self.cells.iter().flatten().any(|c| !c.observed)
    }

    /// Number of cells showing `player`'s color. Jokers count for nobody.
    pub fn disc_count(&self, player: Player) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.has_color(player))
            .count() as u32
    }

    /// Count `player`'s unobserved pieces of one tier.
    pub fn unobserved_count(&self, player: Player, piece_type: PieceType) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|c| !c.observed && c.has_color(player) && c.piece_type == piece_type)
            .count() as u32
    }
}
