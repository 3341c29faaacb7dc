//! Pluggable board evaluation interfaces and the phase-aware scorer.
//!
//! Search stays independent of the heuristic by calling through
//! `BoardScorer`. All scores are integers in hundredths of a point, so the
//! fractional terms (stability multipliers, half-weighted position) stay exact
//! and alpha-beta compares exact values.

use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::*;
use crate::move_generation::legal_move_checks::mobility;
use crate::tables::position_weights::{CORNER_CLASS_THRESHOLD, POSITION_WEIGHTS};

/// One evaluation point expressed in score units.
pub const POINT: i32 = 100;

/// Occupied-cell count at or below which the opening heuristic applies.
pub const OPENING_MAX_DISCS: u32 = 20;
/// Occupied-cell count from which only expected material matters.
pub const ENDGAME_MIN_DISCS: u32 = 58;

pub trait BoardScorer: Send + Sync {
    /// Score from `perspective`'s point of view; positive is good for it.
    fn score(&self, state: &GameState, perspective: Player) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Opening,
    Midgame,
    Endgame,
}

pub fn game_phase(state: &GameState) -> GamePhase {
    let discs = state.board.occupied_count();
    if discs >= ENDGAME_MIN_DISCS || state.game_over {
        GamePhase::Endgame
    } else if discs <= OPENING_MAX_DISCS {
        GamePhase::Opening
    } else {
        GamePhase::Midgame
    }
}

/// Expected final material of `player` in score units: a full point per
/// observed disc, `type/100` of a point per unobserved one.
pub fn expected_discs(state: &GameState, player: Player) -> i32 {
    state
        .board
        .occupied()
        .filter(|(_, cell)| cell.has_color(player))
        .map(|(_, cell)| cell.stability_percent())
        .sum()
}

/// Phase-dependent positional, mobility and stability heuristic.
#[derive(Debug, Clone, Copy)]
pub struct PhaseScorer {
    pub endgame_disc_factor: i32,
    pub opening_mobility: i32,
    pub opening_disc_penalty: i32,
    pub midgame_mobility: i32,
    pub corner_secured_bonus: i32,
    pub corner_at_risk_penalty: i32,
}

impl Default for PhaseScorer {
    fn default() -> Self {
        Self {
            endgame_disc_factor: 1000,
            opening_mobility: 50,
            opening_disc_penalty: 5,
            midgame_mobility: 20,
            corner_secured_bonus: 50,
            corner_at_risk_penalty: 30,
        }
    }
}

impl PhaseScorer {
    fn endgame(&self, state: &GameState, me: Player) -> i32 {
        let diff = expected_discs(state, me) - expected_discs(state, me.opposite());
        diff * self.endgame_disc_factor
    }

    fn opening(&self, state: &GameState, me: Player) -> i32 {
        let opp = me.opposite();
        let mobility_diff =
            mobility(&state.board, me) as i32 - mobility(&state.board, opp) as i32;

        let mut positional = 0;
        for (sq, cell) in state.board.occupied() {
            let w = POSITION_WEIGHTS[sq as usize];
            if cell.controller() == Some(me) {
                positional += w;
            } else {
                positional -= w;
            }
        }

        // Keeping few discs early keeps the board open.
        let disc_diff = expected_discs(state, me) - expected_discs(state, opp);

        mobility_diff * self.opening_mobility * POINT + positional * POINT / 2
            - disc_diff * self.opening_disc_penalty
    }

    fn midgame(&self, state: &GameState, me: Player) -> i32 {
        let opp = me.opposite();
        let mut score = 0;

        for (sq, cell) in state.board.occupied() {
            let w = POSITION_WEIGHTS[sq as usize];
            let sign = if cell.controller() == Some(me) { 1 } else { -1 };

            score += sign * w * cell.stability_percent();

            if w.abs() >= CORNER_CLASS_THRESHOLD {
                let secured = cell.piece_type == PieceType::Hundred || cell.observed;
                let term = if secured {
                    self.corner_secured_bonus
                } else {
                    -self.corner_at_risk_penalty
                };
                score += sign * term * POINT;
            }
        }

        let mobility_diff =
            mobility(&state.board, me) as i32 - mobility(&state.board, opp) as i32;
        score + mobility_diff * self.midgame_mobility * POINT
    }
}

impl BoardScorer for PhaseScorer {
    fn score(&self, state: &GameState, perspective: Player) -> i32 {
        match game_phase(state) {
            GamePhase::Endgame => self.endgame(state, perspective),
            GamePhase::Opening => self.opening(state, perspective),
            GamePhase::Midgame => self.midgame(state, perspective),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::Board;

    fn filled_board(fill: impl Fn(usize, usize) -> Option<Cell>) -> Board {
        let mut board = Board::new_empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                board.set(row, col, fill(row, col));
            }
        }
        board
    }

    #[test]
    fn phase_boundaries() {
        let mut game = GameState::new_game();
        assert_eq!(game_phase(&game), GamePhase::Opening);

        game.board = filled_board(|row, _| (row < 3).then(|| Cell::fixed(Player::Black)));
        assert_eq!(game_phase(&game), GamePhase::Midgame);

        game.game_over = true;
        assert_eq!(game_phase(&game), GamePhase::Endgame);

        game.game_over = false;
        game.board =
            filled_board(|row, col| (row * 8 + col < 58).then(|| Cell::fixed(Player::White)));
        assert_eq!(game_phase(&game), GamePhase::Endgame);
    }

    #[test]
    fn opening_position_is_balanced() {
        let game = GameState::new_game();
        let scorer = PhaseScorer::default();
        assert_eq!(scorer.score(&game, Player::Black), 0);
        assert_eq!(scorer.score(&game, Player::White), 0);
    }

    #[test]
    fn endgame_counts_expected_material() {
        // 60 fixed black discs, one unobserved white 70, three empties.
        let mut game = GameState::new_empty();
        game.board =
            filled_board(|row, col| (row * 8 + col < 60).then(|| Cell::fixed(Player::Black)));
        game.board
            .set(7, 4, Some(Cell::quantum(Player::White, PieceType::Seventy)));

        let scorer = PhaseScorer::default();
        let expected = (60 * POINT - 70) * 1000;
        assert_eq!(scorer.score(&game, Player::Black), expected);
        assert_eq!(scorer.score(&game, Player::White), -expected);
    }

    #[test]
    fn jokers_are_not_material() {
        let mut game = GameState::new_game();
        game.board.set(0, 3, Some(Cell::joker(Player::Black)));
        assert_eq!(expected_discs(&game, Player::Black), 2 * POINT);
    }

    #[test]
    fn opening_mixes_mobility_position_and_disc_penalty() {
        let mut game = GameState::new_game();
        game.board
            .set(2, 3, Some(Cell::quantum(Player::Black, PieceType::Seventy)));
        game.board.set(3, 3, Some(Cell::fixed(Player::Black)));

        let mob_diff = mobility(&game.board, Player::Black) as i32
            - mobility(&game.board, Player::White) as i32;
        // Black: 3 fixed + one 70 on weight-1 squares; White: one fixed.
        let positional = 4 - 1;
        let disc_diff = (3 * POINT + 70) - POINT;
        let expected = mob_diff * 50 * POINT + positional * POINT / 2 - disc_diff * 5;

        assert_eq!(PhaseScorer::default().score(&game, Player::Black), expected);
    }

    #[test]
    fn midgame_rewards_secured_corners() {
        let base = filled_board(|row, col| {
            (row >= 2 && row <= 5 && col >= 1 && col <= 6).then(|| Cell::fixed(Player::White))
        });
        let mut game = GameState::with_board(base, Player::Black);
        assert_eq!(game_phase(&game), GamePhase::Midgame);
        let scorer = PhaseScorer::default();
        let without = scorer.score(&game, Player::Black);

        game.board.set(0, 0, Some(Cell::fixed(Player::Black)));
        let secured = scorer.score(&game, Player::Black);

        game.board
            .set(0, 0, Some(Cell::quantum(Player::Black, PieceType::Seventy)));
        let at_risk = scorer.score(&game, Player::Black);

        // Mobility is unchanged by an isolated corner piece.
        assert_eq!(secured - without, 120 * 100 + 50 * POINT);
        assert_eq!(at_risk - without, 120 * 70 - 30 * POINT);
    }
}
