//! Crate root module declarations for the Quantum Reversi engine project.
//!
//! This file exposes all top-level subsystems (game state, rules, observation,
//! search, engines, the referee, and utility helpers) so the binary, tests,
//! benches, and external tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod decision;
    pub mod game_state;
    pub mod reversi_types;
    pub mod snapshot;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod piece_type_rules;
}

pub mod observation {
    pub mod observe;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod move_ordering;
    pub mod observe_penalty;
}

pub mod tables {
    pub mod position_weights;
}

pub mod engines {
    pub mod engine_hard;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod game_flow {
    pub mod referee;
}

pub mod utils {
    pub mod board_notation;
    pub mod engine_match_harness;
}

pub use engines::engine_hard::{decide_from_snapshot, HardEngine};
pub use errors::{EngineError, EngineResult};
pub use game_state::decision::Decision;
pub use game_state::game_state::GameState;
pub use game_state::snapshot::GameStateSnapshot;
