//! Conversational participant
//!
//! A [`Participant`] is a persona bound to its own conversation history and
//! a shared generation gateway. Every operation is one awaited round trip
//! that appends the outbound prompt and the reply to the history.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use debate_domain::core::string::preview;
use debate_domain::{
    Conversation, DebatePrompt, Model, Persona, ScoreCard, Side, StructuredReplyError,
    parse_score_card,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised by participant operations
#[derive(Error, Debug)]
pub enum ParticipantError {
    #[error("{participant}: generation failed: {source}")]
    Generation {
        participant: String,
        #[source]
        source: GatewayError,
    },

    #[error("{participant}: model {model} returned an empty reply")]
    EmptyReply { participant: String, model: String },

    #[error("{participant}: malformed score for {target}: {source}")]
    MalformedScore {
        participant: String,
        target: String,
        #[source]
        source: StructuredReplyError,
    },
}

impl ParticipantError {
    /// Whether the backend failed to produce a usable reply
    pub fn is_generation(&self) -> bool {
        matches!(
            self,
            ParticipantError::Generation { .. } | ParticipantError::EmptyReply { .. }
        )
    }
}

/// A debater or judge with its own conversation
///
/// Not `Clone`: each participant owns exactly one history, and the phase
/// machine borrows it mutably for the length of a run.
pub struct Participant {
    persona: Persona,
    conversation: Conversation,
    gateway: Arc<dyn LlmGateway>,
}

impl std::fmt::Debug for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("persona", &self.persona)
            .field("history_len", &self.conversation.len())
            .finish()
    }
}

impl Participant {
    pub fn new(persona: Persona, gateway: Arc<dyn LlmGateway>) -> Self {
        let conversation = Conversation::new(persona.system_directive());
        Self {
            persona,
            conversation,
            gateway,
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn name(&self) -> &str {
        &self.persona.name
    }

    pub fn model(&self) -> &Model {
        &self.persona.model
    }

    pub fn color(&self) -> &str {
        &self.persona.color
    }

    pub fn side(&self) -> Option<Side> {
        self.persona.side
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Send one message and return the reply.
    ///
    /// The message is appended before the call. An empty or whitespace-only
    /// reply is an error and is not appended.
    pub async fn chat(&mut self, message: &str, structured: bool) -> Result<String, ParticipantError> {
        self.conversation.push_user(message);

        let request = CompletionRequest::new(&self.persona.model, self.conversation.messages())
            .structured(structured);
        let result = self.gateway.complete(request).await;
        let reply = result.map_err(|source| ParticipantError::Generation {
            participant: self.persona.name.clone(),
            source,
        })?;

        debug!(
            participant = %self.persona.name,
            model = %self.persona.model,
            history = self.conversation.len(),
            structured,
            "reply: {}",
            preview(&reply, 80)
        );

        if reply.trim().is_empty() {
            return Err(ParticipantError::EmptyReply {
                participant: self.persona.name.clone(),
                model: self.persona.model.to_string(),
            });
        }

        self.conversation.push_assistant(reply.clone());
        Ok(reply)
    }

    /// Private pre-debate strategy
    pub async fn plan(&mut self, topic: &str) -> Result<String, ParticipantError> {
        self.chat(&DebatePrompt::plan(topic), false).await
    }

    /// Private reasoning before the opening statement
    pub async fn think_opening(
        &mut self,
        topic: &str,
        premise: Option<&str>,
        side: Option<Side>,
        opponent: &str,
    ) -> Result<String, ParticipantError> {
        let prompt = DebatePrompt::think_opening(topic, premise, side, opponent);
        self.chat(&prompt, false).await
    }

    /// Private reflection on the opponent's latest statement
    pub async fn think(
        &mut self,
        opponent_statement: &str,
        is_final: bool,
    ) -> Result<String, ParticipantError> {
        self.chat(&DebatePrompt::think(opponent_statement, is_final), false)
            .await
    }

    /// Public turn
    pub async fn respond(&mut self, is_final: bool) -> Result<String, ParticipantError> {
        self.chat(&DebatePrompt::respond(is_final), false).await
    }

    /// Judge's private critique of one statement
    pub async fn evaluate(
        &mut self,
        speaker: &str,
        statement: &str,
    ) -> Result<String, ParticipantError> {
        self.chat(&DebatePrompt::evaluate(speaker, statement), false)
            .await
    }

    /// Judge's numeric score for `speaker`; `first` asks for an initial
    /// impression instead of a running score. Malformed replies are not
    /// retried.
    pub async fn score(&mut self, speaker: &str, first: bool) -> Result<ScoreCard, ParticipantError> {
        let reply = self.chat(&DebatePrompt::score(speaker, first), true).await?;
        parse_score_card(&reply).map_err(|source| ParticipantError::MalformedScore {
            participant: self.persona.name.clone(),
            target: speaker.to_string(),
            source,
        })
    }

    /// Drop everything but the system directive
    pub fn reset(&mut self) {
        self.conversation.reset();
    }
}
