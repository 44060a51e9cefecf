//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Debate topic cannot be empty")]
    EmptyTopic,

    #[error("A debate needs at least one turn, got {0}")]
    InvalidTurns(usize),

    #[error("Participant name cannot be empty")]
    EmptyName,

    #[error("Participant name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("Participant '{0}' has no model assigned")]
    MissingModel(String),

    #[error("Unknown side '{0}' (expected 'for' or 'against')")]
    InvalidSide(String),
}
