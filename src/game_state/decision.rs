//! The one value every engine tier hands back to its caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::reversi_types::PieceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Decision {
    #[serde(rename_all = "camelCase")]
    Placement {
        row: u8,
        col: u8,
        piece_type: PieceType,
    },
    Observe,
    Pass,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Placement {
                row,
                col,
                piece_type,
            } => write!(f, "place {}@({row},{col})", piece_type.percent()),
            Decision::Observe => write!(f, "observe"),
            Decision::Pass => write!(f, "pass"),
        }
    }
}
