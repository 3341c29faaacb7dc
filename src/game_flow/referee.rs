//! Authoritative application of decisions to a live game.
//!
//! Unlike the search, the referee validates every decision against the full
//! rules (tier hierarchy, joker unlock and single use, pass only when stuck),
//! resolves observations stochastically, and decides when the game ends.

use rand::Rng;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::decision::Decision;
use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::*;
use crate::move_generation::legal_move_apply::apply_placement_in_place;
use crate::move_generation::legal_move_checks::{
    has_legal_placement, is_legal_joker_placement, is_legal_placement,
};
use crate::move_generation::legal_move_generator::PlacementMove;
use crate::move_generation::piece_type_rules::legal_types_for;
use crate::observation::observe::{can_observe, resolve_observation, CollapseReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedDecision {
    pub state: GameState,
    /// Present when the decision was an observation.
    pub collapse: Option<CollapseReport>,
}

fn check_placement(state: &GameState, mv: PlacementMove) -> EngineResult<()> {
    let player = state.current_player;
    let (row, col) = (mv.row as usize, mv.col as usize);

    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return Err(EngineError::illegal(format!("({row},{col}) is off the board")));
    }

    if mv.piece_type == PieceType::Joker {
        if !is_legal_joker_placement(state, row, col, player) {
            return Err(EngineError::illegal(format!(
                "{player} may not place a joker at ({row},{col})"
            )));
        }
        return Ok(());
    }

    if !is_legal_placement(&state.board, row, col, player) {
        return Err(EngineError::illegal(format!(
            "({row},{col}) is not a legal placement for {player}"
        )));
    }
    if !legal_types_for(player, state).allows(mv.piece_type) {
        return Err(EngineError::illegal(format!(
            "{player} may not place type {} now",
            mv.piece_type.percent()
        )));
    }
    Ok(())
}

/// Validate and apply `decision` for the side to move.
pub fn apply_decision<R: Rng + ?Sized>(
    state: &GameState,
    decision: Decision,
    rng: &mut R,
) -> EngineResult<AppliedDecision> {
    if state.game_over {
        return Err(EngineError::illegal("the game is already over"));
    }

    match decision {
        Decision::Placement {
            row,
            col,
            piece_type,
        } => {
            let mv = PlacementMove {
                row,
                col,
                piece_type,
            };
            check_placement(state, mv)?;

            let mut next = state.clone();
            if piece_type == PieceType::Joker {
                // A real joker drop is placed gray and captures nothing.
                let player = next.current_player;
                next.board
                    .set(row as usize, col as usize, Some(Cell::joker(player)));
                next.has_used_joker[player.index()] = true;
                next.current_turn += 1;
                next.observed_this_turn = false;
            } else {
                apply_placement_in_place(&mut next, mv);
            }
            next.switch_player();
            next.passed_before = false;
            next.game_over = next.board.is_full();
            Ok(AppliedDecision {
                state: next,
                collapse: None,
            })
        }
        Decision::Observe => {
            if !can_observe(state) {
                return Err(EngineError::illegal(format!(
                    "{} cannot observe now",
                    state.current_player
                )));
            }
            let (next, report) = resolve_observation(state, rng);
            Ok(AppliedDecision {
                state: next,
                collapse: Some(report),
            })
        }
        Decision::Pass => {
            if has_legal_placement(&state.board, state.current_player) {
                return Err(EngineError::illegal(format!(
                    "{} has a legal placement and may not pass",
                    state.current_player
                )));
            }
            let mut next = state.clone();
            next.switch_player();
            next.current_turn += 1;
            next.observed_this_turn = false;
            if state.passed_before {
                next.game_over = true;
            } else {
                next.passed_before = true;
            }
            Ok(AppliedDecision {
                state: next,
                collapse: None,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub black: u32,
    pub white: u32,
}

impl FinalScore {
    pub fn winner(self) -> Option<Player> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Player::Black),
            std::cmp::Ordering::Less => Some(Player::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Disc count per color; gray jokers count for neither side.
pub fn final_score(state: &GameState) -> FinalScore {
    FinalScore {
        black: state.board.disc_count(Player::Black),
        white: state.board.disc_count(Player::White),
    }
}
