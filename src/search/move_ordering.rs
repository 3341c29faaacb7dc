//! Candidate ordering for Max nodes: best squares first, observe last.

use crate::search::alpha_beta::SearchMove;
use crate::tables::position_weights::POSITION_WEIGHTS;

#[inline]
fn order_key(mv: &SearchMove) -> i32 {
    match mv {
        SearchMove::Place(p) => POSITION_WEIGHTS[p.square() as usize],
        SearchMove::Observe => i32::MIN,
    }
}

/// Stable sort by descending positional weight; `Observe` always sorts last.
pub fn order_moves(moves: &mut [SearchMove]) {
    moves.sort_by_key(|mv| std::cmp::Reverse(order_key(mv)));
}
