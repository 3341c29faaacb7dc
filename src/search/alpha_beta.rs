//! Adaptive-depth alpha-beta minimax over placement and observe branches.
//!
//! Max nodes are positions where the searching side is to move, Min nodes
//! everything else. Scores are always from the searching side's perspective.
//! The observe branch is a pseudo-move: it is simulated with the deterministic
//! proxy, kept with the same side to move, and priced by `ObservePenalties`
//! (subtracted at Max nodes, added at Min nodes) before it competes with the
//! placements.

use std::time::Instant;

use tracing::{debug, info};

use crate::game_state::decision::Decision;
use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::Player;
use crate::move_generation::legal_move_apply::simulate_move;
use crate::move_generation::legal_move_generator::{legal_placements, PlacementMove};
use crate::observation::observe::{can_observe, simulate_observe};
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::order_moves;
use crate::search::observe_penalty::ObservePenalties;

pub const SCORE_INF: i32 = 1 << 30;

/// Default root depth and the endgame depths for few remaining empties.
pub const DEFAULT_DEPTH: u8 = 4;
pub const LATE_DEPTH: u8 = 10;
pub const LATE_EMPTIES: u32 = 12;
pub const FINAL_DEPTH: u8 = 14;
pub const FINAL_EMPTIES: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMove {
    Place(PlacementMove),
    Observe,
}

impl SearchMove {
    pub fn to_decision(self) -> Decision {
        match self {
            SearchMove::Place(mv) => mv.to_decision(),
            SearchMove::Observe => Decision::Observe,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Nodes visited before every remaining node is scored statically.
    pub max_nodes: u64,
    /// Observe branches per path that extend the depth by one ply.
    pub max_observe_extensions: u8,
    pub penalties: ObservePenalties,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_nodes: 20_000_000,
            max_observe_extensions: 4,
            penalties: ObservePenalties::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    /// `None` when the side to move has no candidate at all.
    pub best_move: Option<SearchMove>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub budget_exhausted: bool,
    pub elapsed_ms: u64,
}

impl SearchResult {
    pub fn decision(&self) -> Decision {
        self.best_move
            .map(SearchMove::to_decision)
            .unwrap_or(Decision::Pass)
    }
}

/// Root depth from the number of empty cells.
pub fn choose_depth(empties: u32) -> u8 {
    if empties <= FINAL_EMPTIES {
        FINAL_DEPTH
    } else if empties <= LATE_EMPTIES {
        LATE_DEPTH
    } else {
        DEFAULT_DEPTH
    }
}

/// Candidates for the side to move in generation order: placements row-major
/// (one tier each), then `Observe` if it may be offered.
pub fn candidate_moves(state: &GameState) -> Vec<SearchMove> {
    let mut moves: Vec<SearchMove> = legal_placements(state, state.current_player)
        .into_iter()
        .map(SearchMove::Place)
        .collect();
    if can_observe(state) {
        moves.push(SearchMove::Observe);
    }
    moves
}

/// Position after `mv`. Placements hand the move to the opponent; observing
/// keeps it.
pub fn child_after(state: &GameState, mv: SearchMove) -> GameState {
    match mv {
        SearchMove::Place(placement) => {
            let mut next = simulate_move(state, placement);
            next.switch_player();
            next.passed_before = false;
            next
        }
        SearchMove::Observe => simulate_observe(state),
    }
}

/// Position after the side to move passes, or `None` when this is the second
/// consecutive pass and the game is over.
pub fn pass_child(state: &GameState) -> Option<GameState> {
    if state.passed_before {
        return None;
    }
    let mut next = state.clone();
    next.switch_player();
    next.passed_before = true;
    next.observed_this_turn = false;
    Some(next)
}

/// Depth and extension count for the child of an observe branch.
pub fn observe_child_depth(depth: u8, extensions: u8, config: &SearchConfig) -> (u8, u8) {
    if extensions < config.max_observe_extensions {
        (depth + 1, extensions + 1)
    } else {
        (depth, extensions)
    }
}

struct Searcher<'a, S: BoardScorer + ?Sized> {
    scorer: &'a S,
    config: &'a SearchConfig,
    ai: Player,
    nodes: u64,
    budget_exhausted: bool,
}

impl<S: BoardScorer + ?Sized> Searcher<'_, S> {
    fn evaluate(&self, state: &GameState) -> i32 {
        self.scorer.score(state, self.ai)
    }

    fn node(
        &mut self,
        state: &GameState,
        depth: u8,
        extensions: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<SearchMove>) {
        self.nodes += 1;
        if self.nodes > self.config.max_nodes {
            self.budget_exhausted = true;
        }
        if depth == 0 || state.game_over || self.budget_exhausted {
            return (self.evaluate(state), None);
        }

        let maximizing = state.current_player == self.ai;
        let mut moves = candidate_moves(state);

        if moves.is_empty() {
            let score = match pass_child(state) {
                Some(child) => self.node(&child, depth, extensions, alpha, beta).0,
                None => {
                    let mut ended = state.clone();
                    ended.game_over = true;
                    self.evaluate(&ended)
                }
            };
            return (score, None);
        }

        if maximizing {
            order_moves(&mut moves);
        }

        let mut best_score = if maximizing { -SCORE_INF } else { SCORE_INF };
        let mut best_move = None;

        for mv in moves {
            let child = child_after(state, mv);
            let score = match mv {
                SearchMove::Place(_) => {
                    self.node(&child, depth - 1, extensions, alpha, beta).0
                }
                SearchMove::Observe => {
                    let (d, e) = observe_child_depth(depth, extensions, self.config);
                    // The window is shifted so cutoffs inside the child agree
                    // with comparisons on the adjusted score.
                    let shift = if maximizing {
                        self.config.penalties.penalty(state)
                    } else {
                        -self.config.penalties.penalty(state)
                    };
                    let raw = self.node(&child, d, e, alpha + shift, beta + shift).0;
                    raw - shift
                }
            };

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        (best_score, best_move)
    }
}

/// Search `state` for the side to move at a fixed root depth.
pub fn alpha_beta_search<S: BoardScorer + ?Sized>(
    state: &GameState,
    scorer: &S,
    depth: u8,
    config: &SearchConfig,
) -> SearchResult {
    let started_at = Instant::now();
    debug!(
        player = %state.current_player,
        empties = state.empty_count(),
        depth,
        "starting alpha-beta search"
    );

    let mut searcher = Searcher {
        scorer,
        config,
        ai: state.current_player,
        nodes: 0,
        budget_exhausted: false,
    };
    let (score, best_move) = searcher.node(state, depth, 0, -SCORE_INF, SCORE_INF);

    let result = SearchResult {
        best_move,
        score,
        depth,
        nodes: searcher.nodes,
        budget_exhausted: searcher.budget_exhausted,
        elapsed_ms: started_at.elapsed().as_millis() as u64,
    };
    info!(
        nodes = result.nodes,
        elapsed_ms = result.elapsed_ms,
        score = result.score,
        budget_exhausted = result.budget_exhausted,
        "search complete"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::Board;
    use crate::game_state::reversi_types::{Cell, PieceType, BOARD_SIZE};
    use crate::search::board_scoring::PhaseScorer;

    fn search(state: &GameState, depth: u8) -> SearchResult {
        alpha_beta_search(state, &PhaseScorer::default(), depth, &SearchConfig::default())
    }

    #[test]
    fn depth_schedule_by_empties() {
        assert_eq!(choose_depth(60), 4);
        assert_eq!(choose_depth(13), 4);
        assert_eq!(choose_depth(12), 10);
        assert_eq!(choose_depth(9), 10);
        assert_eq!(choose_depth(8), 14);
        assert_eq!(choose_depth(1), 14);
    }

    #[test]
    fn opening_picks_a_canonical_placement() {
        let game = GameState::new_game();
        let result = search(&game, 4);

        let Some(SearchMove::Place(mv)) = result.best_move else {
            panic!("expected a placement, got {:?}", result.best_move);
        };
        assert!([(2, 3), (3, 2), (4, 5), (5, 4)].contains(&(mv.row, mv.col)));
        assert_eq!(mv.piece_type, PieceType::Seventy);
        assert!(result.nodes > 1);
        assert!(!result.budget_exhausted);
    }

    #[test]
    fn no_observe_branch_without_observations_left() {
        let mut game = GameState::new_game();
        game.board
            .set(2, 3, Some(Cell::quantum(Player::Black, PieceType::Seventy)));
        game.board.set(3, 3, Some(Cell::quantum(Player::Black, PieceType::Seventy)));
        game.current_player = Player::White;
        assert!(candidate_moves(&game).contains(&SearchMove::Observe));

        game.observations_left = [2, 0];
        assert!(!candidate_moves(&game).contains(&SearchMove::Observe));
        let result = search(&game, 3);
        assert_ne!(result.best_move, Some(SearchMove::Observe));
    }

    #[test]
    fn nothing_to_do_is_a_pass() {
        // White only, all observed: Black can neither place nor observe.
        let mut board = Board::new_empty();
        board.set(0, 0, Some(Cell::fixed(Player::White)));
        board.set(0, 1, Some(Cell::fixed(Player::White)));
        let game = GameState::with_board(board, Player::Black);

        let result = search(&game, 4);
        assert_eq!(result.best_move, None);
        assert_eq!(result.decision(), Decision::Pass);
    }

    #[test]
    fn double_pass_is_terminal() {
        let mut board = Board::new_empty();
        board.set(0, 0, Some(Cell::fixed(Player::White)));
        let mut game = GameState::with_board(board, Player::Black);
        game.passed_before = true;

        assert!(pass_child(&game).is_none());
        let result = search(&game, 6);
        assert_eq!(result.nodes, 1);
        assert_eq!(result.decision(), Decision::Pass);
    }

    #[test]
    fn single_pass_hands_over_at_same_depth() {
        let mut board = Board::new_empty();
        board.set(0, 0, Some(Cell::fixed(Player::White)));
        let mut game = GameState::with_board(board, Player::Black);
        game.observed_this_turn = true;

        let child = pass_child(&game).expect("first pass continues");
        assert_eq!(child.current_player, Player::White);
        assert!(child.passed_before);
        assert!(!child.observed_this_turn);
    }

    #[test]
    fn placement_child_resets_pass_and_switches_side() {
        let mut game = GameState::new_game();
        game.passed_before = true;
        let mv = SearchMove::Place(PlacementMove::new(2, 3, PieceType::Seventy));
        let child = child_after(&game, mv);
        assert_eq!(child.current_player, Player::White);
        assert!(!child.passed_before);
        assert_eq!(child.current_turn, 1);
    }

    #[test]
    fn observe_extension_is_capped() {
        let config = SearchConfig {
            max_observe_extensions: 2,
            ..SearchConfig::default()
        };
        assert_eq!(observe_child_depth(3, 0, &config), (4, 1));
        assert_eq!(observe_child_depth(3, 1, &config), (4, 2));
        assert_eq!(observe_child_depth(3, 2, &config), (3, 2));
    }

    #[test]
    fn exhausted_budget_still_returns_a_move() {
        let game = GameState::new_game();
        let config = SearchConfig {
            max_nodes: 10,
            ..SearchConfig::default()
        };
        let result = alpha_beta_search(&game, &PhaseScorer::default(), 4, &config);
        assert!(result.budget_exhausted);
        assert!(matches!(result.best_move, Some(SearchMove::Place(_))));
    }

    #[test]
    fn endgame_takes_the_winning_corner() {
        // Row 0 is open at (0,0) only; everything else settled.
        let mut board = Board::new_empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = if row == 0 && col > 0 && col < 7 {
                    Cell::fixed(Player::White)
                } else {
                    Cell::fixed(Player::Black)
                };
                board.set(row, col, Some(cell));
            }
        }
        board.set(0, 0, None);
        let game = GameState::with_board(board, Player::Black);

        let result = search(&game, choose_depth(game.empty_count()));
        assert_eq!(
            result.best_move,
            Some(SearchMove::Place(PlacementMove::new(0, 0, PieceType::Seventy)))
        );
    }
}
