//! Random-move engine.
//!
//! Selects uniformly among every legal action, including each allowed tier,
//! observing and, when the caller allows it, the joker. Used for diagnostics,
//! as a match opponent, and to walk into random reachable positions for tests.
//! Seedable for reproducibility.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, SearchParams};
use crate::errors::EngineResult;
use crate::game_state::decision::Decision;
use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::{PieceType, BOARD_SIZE};
use crate::move_generation::legal_move_checks::is_legal_joker_placement;
use crate::move_generation::legal_move_generator::{all_legal_placements, PlacementMove};
use crate::observation::observe::can_observe;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Every action the rules allow the side to move; joker drops only when
/// `allow_jokers` is set.
pub fn legal_decisions(state: &GameState, allow_jokers: bool) -> Vec<Decision> {
    let player = state.current_player;
    let mut decisions: Vec<Decision> = all_legal_placements(state, player)
        .into_iter()
        .map(PlacementMove::to_decision)
        .collect();

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if allow_jokers && is_legal_joker_placement(state, row, col, player) {
                decisions.push(PlacementMove::new(row, col, PieceType::Joker).to_decision());
            }
        }
    }

    if can_observe(state) {
        decisions.push(Decision::Observe);
    }
    decisions
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "QuantumReversi Random"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &SearchParams,
    ) -> EngineResult<EngineOutput> {
        let decisions = legal_decisions(game_state, params.allow_jokers);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_decisions {}",
            decisions.len()
        ));
        if let Some(depth) = params.depth {
            out.info_lines.push(format!(
                "info string random_engine requested_depth {}",
                depth
            ));
        }

        // An empty list leaves the default `Pass`.
        if let Some(picked) = decisions.as_slice().choose(&mut self.rng) {
            out.decision = *picked;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::reversi_types::{Cell, Player};
    use crate::move_generation::legal_move_checks::JOKER_UNLOCK_TURN;

    #[test]
    fn same_seed_same_choices() {
        let game = GameState::new_game();
        let mut a = RandomEngine::seeded(42);
        let mut b = RandomEngine::seeded(42);
        for _ in 0..8 {
            let da = a.choose_move(&game, &SearchParams::default()).expect("ok");
            let db = b.choose_move(&game, &SearchParams::default()).expect("ok");
            assert_eq!(da.decision, db.decision);
        }
    }

    #[test]
    fn picks_only_legal_decisions() {
        let game = GameState::new_game();
        let legal = legal_decisions(&game, true);
        assert_eq!(legal.len(), 4);

        let mut engine = RandomEngine::seeded(7);
        for _ in 0..16 {
            let out = engine.choose_move(&game, &SearchParams::default()).expect("ok");
            assert!(legal.contains(&out.decision));
        }
    }

    #[test]
    fn joker_and_observe_are_offered_when_allowed() {
        let mut game = GameState::new_game();
        game.board
            .set(2, 3, Some(Cell::quantum(Player::Black, PieceType::Seventy)));
        game.current_turn = JOKER_UNLOCK_TURN;

        let is_joker = |d: &Decision| {
            matches!(
                d,
                Decision::Placement {
                    piece_type: PieceType::Joker,
                    ..
                }
            )
        };

        let legal = legal_decisions(&game, true);
        assert!(legal.contains(&Decision::Observe));
        assert!(legal.iter().any(is_joker));

        let without = legal_decisions(&game, false);
        assert!(without.contains(&Decision::Observe));
        assert!(!without.iter().any(is_joker));
    }

    #[test]
    fn default_params_never_drop_a_joker() {
        let mut game = GameState::new_game();
        game.current_turn = JOKER_UNLOCK_TURN;
        let mut engine = RandomEngine::seeded(11);
        for _ in 0..32 {
            let out = engine.choose_move(&game, &SearchParams::default()).expect("ok");
            assert!(!matches!(
                out.decision,
                Decision::Placement {
                    piece_type: PieceType::Joker,
                    ..
                }
            ));
        }
    }

    #[test]
    fn no_legal_action_passes() {
        let mut game = GameState::new_empty();
        game.board.set(0, 0, Some(Cell::fixed(Player::White)));
        let mut engine = RandomEngine::seeded(1);
        let out = engine.choose_move(&game, &SearchParams::default()).expect("ok");
        assert_eq!(out.decision, Decision::Pass);
    }
}
