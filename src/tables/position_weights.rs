//! Static positional weights shared by evaluation, move ordering and the
//! piece-type heuristic.

use crate::game_state::reversi_types::{square, Square, BOARD_SIZE, NUM_SQUARES};

pub const CORNER_WEIGHT: i32 = 120;
pub const X_SQUARE_WEIGHT: i32 = -120;
pub const C_SQUARE_WEIGHT: i32 = -60;
pub const EDGE_WEIGHT: i32 = 20;
pub const INTERIOR_WEIGHT: i32 = 1;

/// Weights at or above this magnitude mark corner-class squares.
pub const CORNER_CLASS_THRESHOLD: i32 = 100;

pub const CORNERS: [Square; 4] = [square(0, 0), square(0, 7), square(7, 0), square(7, 7)];

pub const POSITION_WEIGHTS: [i32; NUM_SQUARES] = build_weights();

const fn build_weights() -> [i32; NUM_SQUARES] {
    let mut w = [INTERIOR_WEIGHT; NUM_SQUARES];
    let last = BOARD_SIZE - 1;

    let mut i = 2;
    while i <= 5 {
        w[square(0, i) as usize] = EDGE_WEIGHT;
        w[square(last, i) as usize] = EDGE_WEIGHT;
        w[square(i, 0) as usize] = EDGE_WEIGHT;
        w[square(i, last) as usize] = EDGE_WEIGHT;
        i += 1;
    }

    let c_squares = [
        (0, 1),
        (1, 0),
        (0, 6),
        (1, 7),
        (6, 0),
        (7, 1),
        (6, 7),
        (7, 6),
    ];
    let mut k = 0;
    while k < c_squares.len() {
        w[square(c_squares[k].0, c_squares[k].1) as usize] = C_SQUARE_WEIGHT;
        k += 1;
    }

    let x_squares = [(1, 1), (1, 6), (6, 1), (6, 6)];
    k = 0;
    while k < x_squares.len() {
        w[square(x_squares[k].0, x_squares[k].1) as usize] = X_SQUARE_WEIGHT;
        k += 1;
    }

    k = 0;
    while k < CORNERS.len() {
        w[CORNERS[k] as usize] = CORNER_WEIGHT;
        k += 1;
    }

    w
}

#[inline]
pub fn weight_at(row: usize, col: usize) -> i32 {
    POSITION_WEIGHTS[row * BOARD_SIZE + col]
}
