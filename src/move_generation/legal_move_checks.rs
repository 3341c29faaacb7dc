//! Placement legality and flip detection.
//!
//! A capture run is a maximal line of opponent-colored cells that ends on an
//! anchor: a cell of the mover's color or any joker (jokers anchor for both
//! sides and are never part of the run themselves).

use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::*;

/// Jokers become available once this many turns have been played.
pub const JOKER_UNLOCK_TURN: u32 = 4;

#[inline]
fn is_anchor(cell: Cell, player: Player) -> bool {
    cell.has_color(player) || cell.is_joker()
}

/// Square mask of the opponent run captured in one direction, 0 if unanchored.
fn run_in_direction(board: &Board, row: usize, col: usize, player: Player, dr: i8, dc: i8) -> u64 {
    let opponent = player.opposite();
    let mut run = 0u64;
    let mut pos = step(row, col, dr, dc);

    while let Some((r, c)) = pos {
        match board.get(r, c) {
            Some(cell) if cell.has_color(opponent) => {
                run |= 1u64 << square(r, c);
            }
            Some(cell) if is_anchor(cell, player) => return run,
            _ => return 0,
        }
        pos = step(r, c, dr, dc);
    }

    0
}

/// All squares `player` would flip by placing at `(row, col)`.
///
/// Does not check that the target is empty.
pub fn flips_for_placement(board: &Board, row: usize, col: usize, player: Player) -> u64 {
    DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(dr, dc)| acc | run_in_direction(board, row, col, player, dr, dc))
}

pub fn is_legal_placement(board: &Board, row: usize, col: usize, player: Player) -> bool {
    if row >= BOARD_SIZE || col >= BOARD_SIZE || !board.is_empty(row, col) {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_in_direction(board, row, col, player, dr, dc) != 0)
}

/// Number of legal placements for `player`.
pub fn mobility(board: &Board, player: Player) -> u32 {
    let mut count = 0;
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if is_legal_placement(board, row, col, player) {
                count += 1;
            }
        }
    }
    count
}

pub fn has_legal_placement(board: &Board, player: Player) -> bool {
    (0..BOARD_SIZE)
        .any(|row| (0..BOARD_SIZE).any(|col| is_legal_placement(board, row, col, player)))
}

/// Whether `player` may drop their joker at `(row, col)`.
///
/// The joker is single use, unlocks after a few turns, and may go on any empty
/// cell that is a legal placement for either side.
pub fn is_legal_joker_placement(state: &GameState, row: usize, col: usize, player: Player) -> bool {
    if state.has_used_joker_for(player) || state.current_turn < JOKER_UNLOCK_TURN {
        return false;
    }
    is_legal_placement(&state.board, row, col, player)
        || is_legal_placement(&state.board, row, col, player.opposite())
}
