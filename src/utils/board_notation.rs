//! Plain-text board notation for tests, logs and the command line.
//!
//! Eight lines of eight whitespace-separated tokens, row 0 first:
//! `--` empty, `B70` / `W90` a quantum piece, a trailing `*` marks it
//! observed (`W100*`), and `G50:B` is a gray joker owned by Black.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::game_state::reversi_types::*;

fn player_letter(player: Player) -> char {
    match player {
        Player::Black => 'B',
        Player::White => 'W',
    }
}

fn parse_player(letter: &str) -> Option<Player> {
    match letter {
        "B" => Some(Player::Black),
        "W" => Some(Player::White),
        _ => None,
    }
}

pub fn render_cell(cell: Option<Cell>) -> String {
    let Some(cell) = cell else {
        return "--".to_owned();
    };
    match (cell.color, cell.owner) {
        (CellColor::Gray, Some(owner)) => format!("G50:{}", player_letter(owner)),
        (CellColor::Gray, None) => "G50".to_owned(),
        (color, _) => {
            let letter = if color == CellColor::Black { 'B' } else { 'W' };
            let star = if cell.observed { "*" } else { "" };
            format!("{letter}{}{star}", cell.piece_type.percent())
        }
    }
}

pub fn parse_cell(token: &str) -> EngineResult<Option<Cell>> {
    if token == "--" {
        return Ok(None);
    }

    if let Some(owner) = token.strip_prefix("G50:") {
        let owner = parse_player(owner)
            .ok_or_else(|| EngineError::notation(format!("bad joker owner in '{token}'")))?;
        return Ok(Some(Cell::joker(owner)));
    }

    let (body, observed) = match token.strip_suffix('*') {
        Some(body) => (body, true),
        None => (token, false),
    };
    if body.len() < 2 || !body.is_char_boundary(1) {
        return Err(EngineError::notation(format!("unrecognized cell '{token}'")));
    }
    let (letter, percent) = body.split_at(1);

    let player = parse_player(letter)
        .ok_or_else(|| EngineError::notation(format!("bad color in '{token}'")))?;
    let piece_type = percent
        .parse::<u8>()
        .ok()
        .and_then(|p| PieceType::try_from(p).ok())
        .filter(|t| *t != PieceType::Joker)
        .ok_or_else(|| EngineError::notation(format!("bad stability in '{token}'")))?;

    let mut cell = Cell::quantum(player, piece_type);
    cell.observed = observed;
    Ok(Some(cell))
}

pub fn parse_board(text: &str) -> EngineResult<Board> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if rows.len() != BOARD_SIZE {
        return Err(EngineError::notation(format!(
            "expected {BOARD_SIZE} rows, found {}",
            rows.len()
        )));
    }

    let mut board = Board::new_empty();
    for (row, line) in rows.iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != BOARD_SIZE {
            return Err(EngineError::notation(format!(
                "row {row}: expected {BOARD_SIZE} cells, found {}",
                tokens.len()
            )));
        }
        for (col, token) in tokens.into_iter().enumerate() {
            board.set(row, col, parse_cell(token)?);
        }
    }
    Ok(board)
}

pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        let line: Vec<String> = (0..BOARD_SIZE)
            .map(|col| format!("{:>5}", render_cell(board.get(row, col))))
            .collect();
        out.push_str(line.join(" ").trim_start());
        out.push('\n');
    }
    out
}

/// Board plus a one-line header with the side to move and resources.
pub fn render_game_state(state: &GameState) -> String {
    format!(
        "turn {} to move {} observations B{} W{}\n{}",
        state.current_turn,
        state.current_player,
        state.observations_left_for(Player::Black),
        state.observations_left_for(Player::White),
        render_board(&state.board)
    )
}
