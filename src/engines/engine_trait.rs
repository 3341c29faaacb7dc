//! Engine abstraction shared by every AI tier.
//!
//! A tier is a function from a game state to one `Decision`; callers such as
//! the match harness and the CLI select tiers at runtime behind this trait.

use crate::errors::EngineResult;
use crate::game_state::decision::Decision;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Fixed root depth; engines pick their own when `None`.
    pub depth: Option<u8>,
    pub max_nodes: Option<u64>,
    /// Whether the engine may drop its joker. Engine-vs-engine play keeps it off.
    pub allow_jokers: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    pub decision: Decision,
    pub info_lines: Vec<String>,
}

impl Default for EngineOutput {
    fn default() -> Self {
        Self {
            decision: Decision::Pass,
            info_lines: Vec::new(),
        }
    }
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &SearchParams,
    ) -> EngineResult<EngineOutput>;
}
