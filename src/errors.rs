//! Error types shared by the engine, the referee and the notation helpers.
//!
//! The absence of a legal action is never an error: it is reported as
//! `Decision::Pass`. Errors are reserved for malformed input and for decisions
//! the referee refuses to apply.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The snapshot handed to the engine violates a structural invariant.
    #[error("invalid game state: {reason}")]
    InvalidState { reason: String },

    /// The referee rejected a decision for the current position.
    #[error("illegal decision: {reason}")]
    IllegalDecision { reason: String },

    /// A text board could not be parsed.
    #[error("board notation error: {reason}")]
    Notation { reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        EngineError::InvalidState {
            reason: reason.into(),
        }
    }

    pub(crate) fn illegal(reason: impl Into<String>) -> Self {
        EngineError::IllegalDecision {
            reason: reason.into(),
        }
    }

    pub(crate) fn notation(reason: impl Into<String>) -> Self {
        EngineError::Notation {
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
