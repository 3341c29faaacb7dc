//! Wire format for handing a position to the engine.
//!
//! `GameStateSnapshot` mirrors what a UI or lobby server keeps (nested rows,
//! per-player maps keyed by color) and converts into the compact `GameState`
//! only after structural validation, so malformed input fails before search.

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::*;

/// A pair of per-player values keyed by color name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerPlayer<T> {
    pub black: T,
    pub white: T,
}

impl<T: Copy> PerPlayer<T> {
    #[inline]
    pub fn from_array(values: [T; 2]) -> Self {
        Self {
            black: values[Player::Black.index()],
            white: values[Player::White.index()],
        }
    }

    #[inline]
    pub fn to_array(self) -> [T; 2] {
        let mut out = [self.black; 2];
        out[Player::White.index()] = self.white;
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub color: CellColor,
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    #[serde(default)]
    pub observed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Player>,
}

impl From<Cell> for CellSnapshot {
    fn from(cell: Cell) -> Self {
        Self {
            color: cell.color,
            piece_type: cell.piece_type,
            observed: cell.observed,
            owner: cell.owner,
        }
    }
}

impl From<CellSnapshot> for Cell {
    fn from(snap: CellSnapshot) -> Self {
        Self {
            color: snap.color,
            piece_type: snap.piece_type,
            observed: snap.observed,
            owner: snap.owner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
    pub board: Vec<Vec<Option<CellSnapshot>>>,
    pub current_player: Player,
    pub observations_left: PerPlayer<u8>,
    #[serde(default)]
    pub last_move_type: PerPlayer<Option<PieceType>>,
    #[serde(default)]
    pub observed_this_turn: bool,
    #[serde(default)]
    pub current_turn: u32,
    #[serde(default)]
    pub last_observation_turn: PerPlayer<Option<u32>>,
    #[serde(default, rename = "hasUsed50")]
    pub has_used_joker: PerPlayer<bool>,
}

impl GameStateSnapshot {
    pub fn from_json(text: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&GameState> for GameStateSnapshot {
    fn from(state: &GameState) -> Self {
        let board = (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| state.board.get(row, col).map(CellSnapshot::from))
                    .collect()
            })
            .collect();

        Self {
            board,
            current_player: state.current_player,
            observations_left: PerPlayer::from_array(state.observations_left),
            last_move_type: PerPlayer::from_array(state.last_move_type),
            observed_this_turn: state.observed_this_turn,
            current_turn: state.current_turn,
            last_observation_turn: PerPlayer::from_array(state.last_observation_turn),
            has_used_joker: PerPlayer::from_array(state.has_used_joker),
        }
    }
}

impl TryFrom<GameStateSnapshot> for GameState {
    type Error = EngineError;

    fn try_from(snapshot: GameStateSnapshot) -> EngineResult<Self> {
        if snapshot.board.len() != BOARD_SIZE {
            return Err(EngineError::invalid_state(format!(
                "board must have {BOARD_SIZE} rows, found {}",
                snapshot.board.len()
            )));
        }

        let mut board = Board::new_empty();
        for (row, cells) in snapshot.board.iter().enumerate() {
            if cells.len() != BOARD_SIZE {
                return Err(EngineError::invalid_state(format!(
                    "row {row} must have {BOARD_SIZE} cells, found {}",
                    cells.len()
                )));
            }
            for (col, cell) in cells.iter().enumerate() {
                board.set(row, col, cell.map(Cell::from));
            }
        }

        let state = GameState {
            board,
            current_player: snapshot.current_player,
            observations_left: snapshot.observations_left.to_array(),
            last_move_type: snapshot.last_move_type.to_array(),
            last_observation_turn: snapshot.last_observation_turn.to_array(),
            has_used_joker: snapshot.has_used_joker.to_array(),
            observed_this_turn: snapshot.observed_this_turn,
            current_turn: snapshot.current_turn,
            passed_before: false,
            game_over: false,
        };

        validate_state(&state)?;
        Ok(state)
    }
}

/// Check the structural invariants a real game can never break.
///
/// The unobserved tier hierarchy is deliberately not checked: flips move
/// pieces between players, so it only holds at placement time.
pub fn validate_state(state: &GameState) -> EngineResult<()> {
    let mut jokers_seen = [0u8; 2];

    for (sq, cell) in state.board.occupied() {
        let (row, col) = row_col(sq);
        let gray = cell.color == CellColor::Gray;
        let joker = cell.piece_type == PieceType::Joker;

        if gray != joker {
            return Err(EngineError::invalid_state(format!(
                "cell ({row},{col}): gray color and type 50 must go together"
            )));
        }
        if gray != cell.owner.is_some() {
            return Err(EngineError::invalid_state(format!(
                "cell ({row},{col}): owner is only meaningful on a gray joker"
            )));
        }
        if joker && cell.observed {
            return Err(EngineError::invalid_state(format!(
                "cell ({row},{col}): an observed joker must already be collapsed"
            )));
        }
        if let Some(owner) = cell.owner {
            jokers_seen[owner.index()] += 1;
            if !state.has_used_joker[owner.index()] {
                return Err(EngineError::invalid_state(format!(
                    "cell ({row},{col}): {owner} joker on board but not marked used"
                )));
            }
        }
    }

    for player in [Player::Black, Player::White] {
        if jokers_seen[player.index()] > 1 {
            return Err(EngineError::invalid_state(format!(
                "{player} has more than one joker on the board"
            )));
        }
        if state.observations_left_for(player) > MAX_OBSERVATIONS {
            return Err(EngineError::invalid_state(format!(
                "{player} has {} observations left, maximum is {MAX_OBSERVATIONS}",
                state.observations_left_for(player)
            )));
        }
        if let Some(turn) = state.last_observation_turn_for(player) {
            if turn > state.current_turn {
                return Err(EngineError::invalid_state(format!(
                    "{player} last observed on turn {turn}, after current turn {}",
                    state.current_turn
                )));
            }
        }
    }

    Ok(())
}
