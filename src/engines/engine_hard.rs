//! Hard-tier engine: adaptive-depth alpha-beta with observe branches.
//!
//! Depth follows the number of empty cells unless the caller pins one. Input
//! is validated before any search work, so a malformed state never reaches the
//! recursion.

use tracing::debug;

use crate::engines::engine_trait::{Engine, EngineOutput, SearchParams};
use crate::errors::EngineResult;
use crate::game_state::decision::Decision;
use crate::game_state::game_state::GameState;
use crate::game_state::snapshot::{validate_state, GameStateSnapshot};
use crate::search::alpha_beta::{alpha_beta_search, choose_depth, SearchConfig};
use crate::search::board_scoring::{BoardScorer, PhaseScorer};

pub struct HardEngine {
    config: SearchConfig,
    scorer: Box<dyn BoardScorer>,
}

impl HardEngine {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            scorer: Box::new(PhaseScorer::default()),
        }
    }

    pub fn with_scorer(config: SearchConfig, scorer: Box<dyn BoardScorer>) -> Self {
        Self { config, scorer }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Default for HardEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for HardEngine {
    fn name(&self) -> &str {
        "QuantumReversi Hard"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &SearchParams,
    ) -> EngineResult<EngineOutput> {
        validate_state(game_state)?;

        let empties = game_state.empty_count();
        let depth = params.depth.unwrap_or_else(|| choose_depth(empties));
        let mut config = self.config;
        if let Some(max_nodes) = params.max_nodes {
            config.max_nodes = max_nodes;
        }
        debug!(empties, depth, player = %game_state.current_player, "hard engine deciding");

        let result = alpha_beta_search(game_state, self.scorer.as_ref(), depth, &config);
        let decision = result.decision();

        let mut out = EngineOutput {
            decision,
            info_lines: Vec::new(),
        };
        out.info_lines.push(format!(
            "info depth {} score {} nodes {} time {}",
            result.depth, result.score, result.nodes, result.elapsed_ms
        ));
        if result.budget_exhausted {
            out.info_lines
                .push(format!("info string node budget {} exhausted", config.max_nodes));
        }
        out.info_lines.push(format!("bestmove {decision}"));
        Ok(out)
    }
}

/// Decide for the side to move in a wire snapshot with default settings.
pub fn decide_from_snapshot(snapshot: GameStateSnapshot) -> EngineResult<Decision> {
    let state = GameState::try_from(snapshot)?;
    let mut engine = HardEngine::new();
    Ok(engine.choose_move(&state, &SearchParams::default())?.decision)
}
