//! Pure move application: placement plus flip propagation.
//!
//! Flips only change a cell's color; stability tier and observation state
//! travel with the physical piece. The side to move is left unchanged so the
//! search and the referee can decide how the turn passes on.

use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::*;
use crate::move_generation::legal_move_checks::flips_for_placement;
use crate::move_generation::legal_move_generator::PlacementMove;

/// Return the state after `mv` is played by the side to move.
pub fn simulate_move(state: &GameState, mv: PlacementMove) -> GameState {
    let mut next = state.clone();
    apply_placement_in_place(&mut next, mv);
    next
}

/// Play `mv` for `state.current_player` in place; returns the flipped squares.
///
/// Legality and joker single use are the caller's responsibility.
pub fn apply_placement_in_place(state: &mut GameState, mv: PlacementMove) -> u64 {
    let player = state.current_player;
    let (row, col) = (mv.row as usize, mv.col as usize);

    let flips = flips_for_placement(&state.board, row, col, player);

    if mv.piece_type == PieceType::Joker {
        state.board.set(row, col, Some(Cell::joker(player)));
        state.has_used_joker[player.index()] = true;
    } else {
        state
            .board
            .set(row, col, Some(Cell::quantum(player, mv.piece_type)));
        state.last_move_type[player.index()] = Some(mv.piece_type);
    }

    let mut remaining = flips;
    while remaining != 0 {
        let sq = remaining.trailing_zeros() as Square;
        remaining &= remaining - 1;
        let (r, c) = row_col(sq);
        if let Some(cell) = state.board.get_mut(r, c) {
            cell.color = CellColor::from(player);
        }
    }

    state.current_turn += 1;
    state.observed_this_turn = false;
    flips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::legal_placements;

    #[test]
    fn each_opening_move_flips_exactly_one() {
        let game = GameState::new_game();
        for mv in legal_placements(&game, Player::Black) {
            let next = simulate_move(&game, mv);
            assert_eq!(next.board.disc_count(Player::Black), 4, "{mv:?}");
            assert_eq!(next.board.disc_count(Player::White), 1, "{mv:?}");
            assert_eq!(next.current_turn, 1);
            assert_eq!(next.current_player, Player::Black);
            assert_eq!(next.last_move_type_for(Player::Black), Some(PieceType::Seventy));
        }
    }

    #[test]
    fn flips_keep_tier_and_observation() {
        let mut game = GameState::new_empty();
        game.board
            .set(0, 1, Some(Cell::quantum(Player::White, PieceType::Ninety)));
        game.board.set(0, 2, Some(Cell::fixed(Player::White)));
        game.board.set(0, 3, Some(Cell::fixed(Player::Black)));

        let next = simulate_move(&game, PlacementMove::new(0, 0, PieceType::Seventy));

        let flipped = next.board.get(0, 1).expect("occupied");
        assert_eq!(flipped.color, CellColor::Black);
        assert_eq!(flipped.piece_type, PieceType::Ninety);
        assert!(!flipped.observed);
        assert_eq!(next.board.get(0, 2), Some(Cell::fixed(Player::Black)));
    }

    #[test]
    fn joker_placement_marks_use_and_keeps_last_type() {
        let mut game = GameState::new_game();
        game.current_turn = 6;
        game.last_move_type = [Some(PieceType::Ninety), None];

        let next = simulate_move(&game, PlacementMove::new(2, 3, PieceType::Joker));

        assert_eq!(next.board.get(2, 3), Some(Cell::joker(Player::Black)));
        assert!(next.has_used_joker_for(Player::Black));
        assert_eq!(next.last_move_type_for(Player::Black), Some(PieceType::Ninety));
        // The joker still captures with its owner's color.
        assert_eq!(next.board.get(3, 3).map(|c| c.color), Some(CellColor::Black));
    }

    #[test]
    fn simulation_leaves_source_untouched_and_resets_observe_flag() {
        let mut game = GameState::new_game();
        game.observed_this_turn = true;
        let before = game.clone();

        let next = simulate_move(&game, PlacementMove::new(2, 3, PieceType::Seventy));

        assert_eq!(game, before);
        assert!(!next.observed_this_turn);
    }
}
