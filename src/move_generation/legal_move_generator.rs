//! Placement generation for the side to move.

use crate::game_state::decision::Decision;
use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::*;
use crate::move_generation::legal_move_checks::is_legal_placement;
use crate::move_generation::piece_type_rules::{legal_types_for, select_type_with};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementMove {
    pub row: u8,
    pub col: u8,
    pub piece_type: PieceType,
}

impl PlacementMove {
    #[inline]
    pub const fn new(row: usize, col: usize, piece_type: PieceType) -> Self {
        Self {
            row: row as u8,
            col: col as u8,
            piece_type,
        }
    }

    #[inline]
    pub const fn square(self) -> Square {
        square(self.row as usize, self.col as usize)
    }

    #[inline]
    pub const fn to_decision(self) -> Decision {
        Decision::Placement {
            row: self.row,
            col: self.col,
            piece_type: self.piece_type,
        }
    }
}

/// Legal placements for `player`, row-major, one heuristic tier per cell.
pub fn legal_placements(state: &GameState, player: Player) -> Vec<PlacementMove> {
    let allowance = legal_types_for(player, state);
    let mut moves = Vec::with_capacity(16);

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if is_legal_placement(&state.board, row, col, player) {
                moves.push(PlacementMove::new(row, col, select_type_with(allowance, row, col)));
            }
        }
    }

    moves
}

/// Every legal `(cell, tier)` pair for `player`, without the heuristic filter.
pub fn all_legal_placements(state: &GameState, player: Player) -> Vec<PlacementMove> {
    let allowance = legal_types_for(player, state);
    let mut moves = Vec::new();

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if is_legal_placement(&state.board, row, col, player) {
                moves.extend(allowance.types().map(|t| PlacementMove::new(row, col, t)));
            }
        }
    }

    moves
}
