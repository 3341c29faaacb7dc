//! Stability-tier hierarchy and the Hard tier's one-type-per-square choice.
//!
//! Among a player's unobserved pieces the rules keep
//! `count(100) <= count(90) <= count(70)`; a tier is offered only if placing
//! it cannot break that ordering. The hierarchy is checked here, at
//! generation time, and never repaired after flips.

use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::{PieceType, Player};
use crate::tables::position_weights::weight_at;

/// Squares weighted below this keep the player's strong pieces in reserve.
pub const BAD_SQUARE_THRESHOLD: i32 = -10;

/// Which tiers a player may place right now. 70 is always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeAllowance {
    pub ninety: bool,
    pub hundred: bool,
}

impl TypeAllowance {
    #[inline]
    pub fn allows(self, piece_type: PieceType) -> bool {
        match piece_type {
            PieceType::Seventy => true,
            PieceType::Ninety => self.ninety,
            PieceType::Hundred => self.hundred,
            PieceType::Joker => false,
        }
    }

    #[inline]
    pub fn strongest(self) -> PieceType {
        if self.hundred {
            PieceType::Hundred
        } else if self.ninety {
            PieceType::Ninety
        } else {
            PieceType::Seventy
        }
    }

    /// Allowed tiers, weakest first.
    pub fn types(self) -> impl Iterator<Item = PieceType> {
        [PieceType::Seventy, PieceType::Ninety, PieceType::Hundred]
            .into_iter()
            .filter(move |t| self.allows(*t))
    }
}

pub fn legal_types_for(player: Player, state: &GameState) -> TypeAllowance {
    allowance_from_board(&state.board, player, state.last_move_type_for(player))
}

fn allowance_from_board(board: &Board, player: Player, last: Option<PieceType>) -> TypeAllowance {
    let c70 = board.unobserved_count(player, PieceType::Seventy);
    let c90 = board.unobserved_count(player, PieceType::Ninety);
    let c100 = board.unobserved_count(player, PieceType::Hundred);

    TypeAllowance {
        ninety: c90 < c70,
        hundred: c100 < c90 && last == Some(PieceType::Seventy),
    }
}

/// Pick one tier for `(row, col)` given an already computed allowance.
///
/// Corners and ordinary squares take the strongest legal tier; bad squares
/// (X- and C-squares) always take 70. Offering a single tier per square keeps
/// the branching factor equal to the number of legal cells.
#[inline]
pub fn select_type_with(allowance: TypeAllowance, row: usize, col: usize) -> PieceType {
    if weight_at(row, col) < BAD_SQUARE_THRESHOLD {
        PieceType::Seventy
    } else {
        allowance.strongest()
    }
}

pub fn select_piece_type(state: &GameState, player: Player, row: usize, col: usize) -> PieceType {
    select_type_with(legal_types_for(player, state), row, col)
}

/// True when `player`'s unobserved pieces satisfy the tier ordering.
pub fn hierarchy_holds(board: &Board, player: Player) -> bool {
    let c70 = board.unobserved_count(player, PieceType::Seventy);
    let c90 = board.unobserved_count(player, PieceType::Ninety);
    let c100 = board.unobserved_count(player, PieceType::Hundred);
    c100 <= c90 && c90 <= c70
}
