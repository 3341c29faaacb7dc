//! The "observe" action: spend one observation to collapse every unfixed piece.
//!
//! Two resolutions share the same bookkeeping:
//! - `simulate_observe` is the deterministic proxy used inside search. Every
//!   cell is marked observed with no color change (the most likely outcome);
//!   the search prices the risk through explicit penalty terms instead of
//!   branching on chance.
//! - `resolve_observation` is the real, seedable collapse applied by a referee.
//!
//! Observing is a resource spend, not a turn: the turn counter is unchanged and
//! the same side keeps the move.

use rand::Rng;

use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::*;

/// Probability that a joker draws Black when collapsed.
pub const JOKER_BLACK_PROBABILITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollapseReport {
    /// Cells that went from unobserved to observed.
    pub collapsed: u32,
    /// Quantum pieces whose color flipped.
    pub flipped: u32,
    /// Jokers that drew a color.
    pub jokers_resolved: u32,
}

/// Whether the side to move may observe now.
///
/// An observe that would touch nothing is never offered: it would burn the
/// resource without changing the position.
pub fn can_observe(state: &GameState) -> bool {
    state.observations_left_for(state.current_player) > 0
        && !state.observed_this_turn
        && state.board.has_unobserved()
}

fn spend_observation(state: &mut GameState) {
    let player = state.current_player;
    let left = &mut state.observations_left[player.index()];
    *left = left.saturating_sub(1);
    state.observed_this_turn = true;
    state.last_observation_turn[player.index()] = Some(state.current_turn);
}

/// Deterministic search proxy: spend the observation and fix every piece as it
/// currently stands.
pub fn simulate_observe(state: &GameState) -> GameState {
    let mut next = state.clone();
    spend_observation(&mut next);
    for cell in next.board.cells_mut() {
        cell.observed = true;
    }
    next
}

/// Collapse every unobserved cell in place using `rng`.
///
/// Already observed cells are left untouched, so repeated collapses are
/// idempotent on them.
pub fn collapse_board<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> CollapseReport {
    let mut report = CollapseReport::default();

    for cell in state.board.cells_mut() {
        if cell.observed {
            continue;
        }
        report.collapsed += 1;

        if cell.is_joker() {
            let drawn = if rng.random_bool(JOKER_BLACK_PROBABILITY) {
                Player::Black
            } else {
                Player::White
            };
            *cell = Cell::fixed(drawn);
            report.jokers_resolved += 1;
            continue;
        }

        cell.observed = true;
        let p = cell.piece_type.flip_probability();
        if p > 0.0 && rng.random_bool(p) {
            if let Some(side) = cell.controller() {
                cell.color = CellColor::from(side.opposite());
                report.flipped += 1;
            }
        }
    }

    report
}

/// Real observation for the side to move: bookkeeping plus stochastic collapse.
pub fn resolve_observation<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
) -> (GameState, CollapseReport) {
    let mut next = state.clone();
    spend_observation(&mut next);
    let report = collapse_board(&mut next, rng);
    (next, report)
}
