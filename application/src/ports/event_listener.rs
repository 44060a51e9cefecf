//! Debate event listener port
//!
//! The phase machine publishes every [`DebateEvent`] through a
//! [`DebateListener`]. Delivery is synchronous and ordered; a listener that
//! fails aborts the run.

use debate_domain::DebateEvent;
use thiserror::Error;

/// Errors raised by listeners while consuming an event
#[derive(Error, Debug)]
pub enum ListenerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Consumer of debate events
pub trait DebateListener: Send + Sync {
    fn on_event(&self, event: &DebateEvent) -> Result<(), ListenerError>;
}

/// No-op listener for tests and headless runs
pub struct NoListener;

impl DebateListener for NoListener {
    fn on_event(&self, _event: &DebateEvent) -> Result<(), ListenerError> {
        Ok(())
    }
}
