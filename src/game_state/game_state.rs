//! Complete game snapshot passed to every search node.
//!
//! `GameState` holds the board plus all per-player bookkeeping the rules and
//! the observation penalties depend on. It contains no heap data, so `clone`
//! is a flat copy and sibling search branches never share mutable state.

use crate::game_state::board::Board;
use crate::game_state::reversi_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub current_player: Player,

    // --- Per-player bookkeeping, indexed by `Player::index()` ---
    pub observations_left: [u8; 2],
    pub last_move_type: [Option<PieceType>; 2],
    pub last_observation_turn: [Option<u32>; 2],
    pub has_used_joker: [bool; 2],

    // --- Turn flags ---
    pub observed_this_turn: bool,
    pub current_turn: u32,
    pub passed_before: bool,
    pub game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: Board::new_empty(),
            current_player: Player::Black,
            observations_left: [MAX_OBSERVATIONS; 2],
            last_move_type: [None; 2],
            last_observation_turn: [None; 2],
            has_used_joker: [false; 2],
            observed_this_turn: false,
            current_turn: 0,
            passed_before: false,
            game_over: false,
        }
    }
}

impl GameState {
    /// Empty board, default bookkeeping. Mostly useful for hand-built positions.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard opening: center seed, Black to move, two observations each.
    #[inline]
    pub fn new_game() -> Self {
        Self {
            board: Board::starting_position(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_board(board: Board, current_player: Player) -> Self {
        Self {
            board,
            current_player,
            ..Self::default()
        }
    }

    #[inline]
    pub fn observations_left_for(&self, player: Player) -> u8 {
        self.observations_left[player.index()]
    }

    #[inline]
    pub fn last_move_type_for(&self, player: Player) -> Option<PieceType> {
        self.last_move_type[player.index()]
    }

    #[inline]
    pub fn last_observation_turn_for(&self, player: Player) -> Option<u32> {
        self.last_observation_turn[player.index()]
    }

    #[inline]
    pub fn has_used_joker_for(&self, player: Player) -> bool {
        self.has_used_joker[player.index()]
    }

    #[inline]
    pub fn empty_count(&self) -> u32 {
        self.board.empty_count()
    }

    /// Hand the turn to the other side (no turn counter change).
    #[inline]
    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.opposite();
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::reversi_types::{Player, MAX_OBSERVATIONS};

    #[test]
    fn new_game_defaults() {
        let game = GameState::new_game();
        assert_eq!(game.current_player, Player::Black);
        assert_eq!(game.observations_left, [MAX_OBSERVATIONS; 2]);
        assert_eq!(game.current_turn, 0);
        assert_eq!(game.empty_count(), 60);
        assert!(!game.passed_before && !game.game_over);
    }

    #[test]
    fn clone_without_moves_is_deep_equal() {
        let mut game = GameState::new_game();
        game.observations_left = [1, 0];
        game.last_observation_turn = [Some(3), None];
        let copy = game.clone();
        assert_eq!(copy, game);
    }
}
