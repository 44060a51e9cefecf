//! Domain layer for llm-debate
//!
//! This crate contains the core debate concepts, value objects and pure rules.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! Two debaters argue a topic (optionally `for`/`against` a premise) for a
//! fixed number of turns. An optional judge critiques and scores every turn,
//! then renders a final verdict.
//!
//! ## Events
//!
//! Every externally observable occurrence is a [`DebateEvent`] with a tag
//! from the closed set HEADER, PLAN, THINK, TURN, SCORE, VERDICT.
//!
//! ## Verdict rules
//!
//! Judges are unreliable at emitting structured data. The [`verdict`] module
//! holds the parsing, validation, fallback and score-inversion repair rules
//! that turn their output into a consistent [`VerdictResult`].

pub mod config;
pub mod core;
pub mod debate;
pub mod event;
pub mod participant;
pub mod prompt;
pub mod session;
pub mod stats;
pub mod verdict;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::{error::DomainError, model::Model};
pub use debate::{
    entities::{DebateSpec, Phase},
    outcome::premise_outcome,
    schedule::{ScheduledTurn, Seat, TurnSchedule},
};
pub use event::{DebateEvent, EventMetadata, EventType, HeaderMetadata, JudgeProfile};
pub use participant::{DEFAULT_COLOR, Persona, Side};
pub use prompt::DebatePrompt;
pub use session::{Conversation, Message, Role};
pub use stats::{DebateStatistics, RunRecord};
pub use verdict::{
    ScoreCard, StructuredReplyError, VerdictCandidate, VerdictProblem, VerdictResult, confirm_winner,
    parse_score_card, parse_verdict_candidate,
};
