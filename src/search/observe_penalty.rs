//! Scalar cost charged against the observe branch.
//!
//! The search never branches on collapse outcomes. Instead, choosing to
//! observe costs the acting side a fixed amount that reflects how wasteful an
//! observation is at this moment. At Max nodes the cost is subtracted from the
//! child score, at Min nodes it is added.

use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::*;
use crate::search::board_scoring::POINT;
use crate::tables::position_weights::CORNERS;

#[derive(Debug, Clone, Copy)]
pub struct ObservePenalties {
    /// Empty-cell count at or above which observing counts as "early game".
    pub early_game_empties: u32,
    pub early_game: i32,
    /// Unobserved 70-tier pieces that make an early observe tolerable.
    pub early_exception_seventy_count: u32,
    pub early_exception: i32,
    /// Cost when the actor still holds two observations.
    pub spend_first: i32,
    /// Cost when the actor is spending their last observation.
    pub spend_last: i32,
    pub cooldown_turns: u32,
    pub cooldown_per_turn: i32,
}

impl Default for ObservePenalties {
    fn default() -> Self {
        Self {
            early_game_empties: 54,
            early_game: 500,
            early_exception_seventy_count: 6,
            early_exception: 100,
            spend_first: 30,
            spend_last: 50,
            cooldown_turns: 5,
            cooldown_per_turn: 125,
        }
    }
}

/// True if `player`'s opponent holds a corner that has not been observed yet.
pub fn opponent_has_unobserved_corner(state: &GameState, player: Player) -> bool {
    let opponent = player.opposite();
    CORNERS.iter().any(|&sq| {
        state
            .board
            .at(sq)
            .is_some_and(|cell| cell.has_color(opponent) && !cell.observed)
    })
}

impl ObservePenalties {
    /// Cost, in score units, of observing now for the side to move.
    pub fn penalty(&self, state: &GameState) -> i32 {
        let player = state.current_player;
        let mut penalty = 0;

        if state.empty_count() >= self.early_game_empties {
            penalty += if opponent_has_unobserved_corner(state, player) {
                // Collapsing may knock the opponent off a corner.
                0
            } else if state.board.unobserved_count(player, PieceType::Seventy)
                >= self.early_exception_seventy_count
            {
                self.early_exception
            } else {
                self.early_game
            };
        }

        penalty += match state.observations_left_for(player) {
            2 => self.spend_first,
            1 => self.spend_last,
            _ => 0,
        };

        if let Some(last) = state.last_observation_turn_for(player) {
            let since = state.current_turn.saturating_sub(last);
            if since < self.cooldown_turns {
                penalty += (self.cooldown_turns - since) as i32 * self.cooldown_per_turn;
            }
        }

        penalty * POINT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn early_position() -> GameState {
        let mut game = GameState::new_game();
        game.board
            .set(2, 3, Some(Cell::quantum(Player::Black, PieceType::Seventy)));
        game
    }

    #[test]
    fn early_game_prohibition_plus_first_spend() {
        let game = early_position();
        assert_eq!(ObservePenalties::default().penalty(&game), (500 + 30) * POINT);
    }

    #[test]
    fn sniper_exception_removes_early_penalty() {
        let mut game = early_position();
        game.board
            .set(7, 7, Some(Cell::quantum(Player::White, PieceType::Ninety)));
        assert!(opponent_has_unobserved_corner(&game, Player::Black));
        assert_eq!(ObservePenalties::default().penalty(&game), 30 * POINT);
    }

    #[test]
    fn many_unstable_pieces_reduce_early_penalty() {
        let mut game = GameState::new_game();
        for col in 0..6 {
            game.board
                .set(0, col + 1, Some(Cell::quantum(Player::Black, PieceType::Seventy)));
        }
        assert!(game.empty_count() >= 54);
        game.observations_left = [1, 2];
        assert_eq!(ObservePenalties::default().penalty(&game), (100 + 50) * POINT);
    }

    #[test]
    fn cooldown_scales_with_recency() {
        let mut game = GameState::new_game();
        // Past the early game: fill two rows.
        for row in 0..2 {
            for col in 0..8 {
                game.board.set(row, col, Some(Cell::fixed(Player::White)));
            }
        }
        game.observations_left = [1, 2];
        game.current_turn = 12;
        game.last_observation_turn = [Some(10), None];
        assert_eq!(
            ObservePenalties::default().penalty(&game),
            (50 + 3 * 125) * POINT
        );

        game.last_observation_turn = [Some(7), None];
        assert_eq!(ObservePenalties::default().penalty(&game), 50 * POINT);
    }

    #[test]
    fn penalty_is_for_the_side_to_move() {
        let mut game = early_position();
        game.current_player = Player::White;
        game.observations_left = [2, 1];
        game.board.set(0, 0, Some(Cell::quantum(Player::Black, PieceType::Seventy)));
        // Black owns an unobserved corner, so White's early penalty is waived.
        assert_eq!(ObservePenalties::default().penalty(&game), 50 * POINT);
    }
}
