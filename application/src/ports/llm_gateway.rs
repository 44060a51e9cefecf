//! LLM Gateway port
//!
//! Defines the interface for communicating with the text generation backend.

use async_trait::async_trait;
use debate_domain::{Message, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A single generation call: the full ordered history for one model
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: &'a Model,
    pub messages: &'a [Message],
    /// Ask the backend to constrain its reply to a JSON object
    pub structured: bool,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(model: &'a Model, messages: &'a [Message]) -> Self {
        Self {
            model,
            messages,
            structured: false,
        }
    }

    pub fn structured(mut self, structured: bool) -> Self {
        self.structured = structured;
        self
    }
}

/// Gateway for LLM communication
///
/// The gateway is stateless with respect to conversations: every call
/// carries the whole history. Implementations (adapters) live in the
/// infrastructure layer and may be shared by several participants.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate the next assistant reply for the given history
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, GatewayError>;

    /// Models the backend can currently serve
    async fn available_models(&self) -> Result<Vec<Model>, GatewayError>;
}
