//! Application layer for llm-debate
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod collector;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use collector::{CollectedResult, ResultCollector};
pub use ports::{
    batch_observer::{BatchObserver, NoBatchObserver, RunListenerFactory},
    event_bus::EventBus,
    event_listener::{DebateListener, ListenerError, NoListener},
    lineup::{FixedLineup, Lineup, LineupError, LineupProvider},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
};
pub use use_cases::participant::{Participant, ParticipantError};
pub use use_cases::run_batch::{BatchReport, RunBatchError, RunBatchInput, RunBatchUseCase};
pub use use_cases::run_debate::{DebateOutcome, RunDebateError, RunDebateInput, RunDebateUseCase};
pub use use_cases::verdict::MAX_EXTRACTION_ATTEMPTS;
