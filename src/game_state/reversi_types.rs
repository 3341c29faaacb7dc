//! Core value types for the quantum Reversi board.
//!
//! Everything here is `Copy` so a full board can be duplicated with a plain
//! memcpy at every search node.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Observations each player starts the game with.
pub const MAX_OBSERVATIONS: u8 = 2;

/// Row-major board square index (`0..=63`, `row * 8 + col`).
pub type Square = u8;

/// The eight compass directions as `(row_delta, col_delta)`.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[inline]
pub const fn square(row: usize, col: usize) -> Square {
    (row * BOARD_SIZE + col) as Square
}

#[inline]
pub const fn row_col(sq: Square) -> (usize, usize) {
    (sq as usize / BOARD_SIZE, sq as usize % BOARD_SIZE)
}

/// Step one cell from `(row, col)` in direction `(dr, dc)`, `None` off the board.
#[inline]
pub fn step(row: usize, col: usize, dr: i8, dc: i8) -> Option<(usize, usize)> {
    let r = row as i8 + dr;
    let c = col as i8 + dc;
    if (0..BOARD_SIZE as i8).contains(&r) && (0..BOARD_SIZE as i8).contains(&c) {
        Some((r as usize, c as usize))
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

/// Declared stability tier of a piece. `Joker` is the single-use 50% piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PieceType {
    Joker,
    Seventy,
    Ninety,
    Hundred,
}

impl PieceType {
    /// Stability in percent; also the wire value.
    #[inline]
    pub const fn percent(self) -> i32 {
        match self {
            PieceType::Joker => 50,
            PieceType::Seventy => 70,
            PieceType::Ninety => 90,
            PieceType::Hundred => 100,
        }
    }

    /// Probability that an observation flips a piece of this tier.
    /// Jokers are not flipped; they draw a color instead.
    #[inline]
    pub const fn flip_probability(self) -> f64 {
        match self {
            PieceType::Seventy => 0.3,
            PieceType::Ninety => 0.1,
            PieceType::Hundred | PieceType::Joker => 0.0,
        }
    }
}

impl TryFrom<u8> for PieceType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            50 => Ok(PieceType::Joker),
            70 => Ok(PieceType::Seventy),
            90 => Ok(PieceType::Ninety),
            100 => Ok(PieceType::Hundred),
            other => Err(format!("unknown piece type {other}")),
        }
    }
}

impl From<PieceType> for u8 {
    fn from(value: PieceType) -> Self {
        value.percent() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellColor {
    Black,
    White,
    Gray,
}

impl From<Player> for CellColor {
    #[inline]
    fn from(player: Player) -> Self {
        match player {
            Player::Black => CellColor::Black,
            Player::White => CellColor::White,
        }
    }
}

/// One occupied board cell.
///
/// Gray cells are jokers: `piece_type == Joker` and `owner` is set. For every
/// other cell `owner` is `None` and `color` is the current side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub color: CellColor,
    pub piece_type: PieceType,
    pub observed: bool,
    pub owner: Option<Player>,
}

impl Cell {
    /// A freshly placed, unobserved piece.
    #[inline]
    pub const fn quantum(player: Player, piece_type: PieceType) -> Self {
        let color = match player {
            Player::Black => CellColor::Black,
            Player::White => CellColor::White,
        };
        Self {
            color,
            piece_type,
            observed: false,
            owner: None,
        }
    }

    /// A collapsed piece whose color can no longer change.
    #[inline]
    pub const fn fixed(player: Player) -> Self {
        let mut cell = Self::quantum(player, PieceType::Hundred);
        cell.observed = true;
        cell
    }

    #[inline]
    pub const fn joker(owner: Player) -> Self {
        Self {
            color: CellColor::Gray,
            piece_type: PieceType::Joker,
            observed: false,
            owner: Some(owner),
        }
    }

    #[inline]
    pub fn is_joker(&self) -> bool {
        self.color == CellColor::Gray
    }

    /// True when the cell currently shows `player`'s color.
    #[inline]
    pub fn has_color(&self, player: Player) -> bool {
        self.color == CellColor::from(player)
    }

    /// Side the cell counts for: its color, or the owner of a joker.
    #[inline]
    pub fn controller(&self) -> Option<Player> {
        match self.color {
            CellColor::Black => Some(Player::Black),
            CellColor::White => Some(Player::White),
            CellColor::Gray => self.owner,
        }
    }

    /// Stability in percent used for weighting: 100 once observed.
    #[inline]
    pub fn stability_percent(&self) -> i32 {
        if self.observed {
            100
        } else {
            self.piece_type.percent()
        }
    }
}
