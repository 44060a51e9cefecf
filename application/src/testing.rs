//! In-memory test doubles shared by the use case tests.

use crate::ports::event_listener::{DebateListener, ListenerError};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use async_trait::async_trait;
use debate_domain::{DebateEvent, Model, Role};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A scripted reply
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Text(String),
    Error(String),
}

pub(crate) fn text(s: &str) -> Reply {
    Reply::Text(s.to_string())
}

pub(crate) fn fail(s: &str) -> Reply {
    Reply::Error(s.to_string())
}

struct Rule {
    model: Option<String>,
    needle: String,
    replies: VecDeque<Reply>,
}

/// What a participant actually sent
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub model: String,
    pub prompt: String,
    pub structured: bool,
    pub history_len: usize,
}

/// Gateway that answers from scripted rules
///
/// A rule matches when its model matches and the outbound prompt contains
/// its needle; matching rules are consumed in order. Unmatched requests get a
/// neutral score card in structured mode and a numbered line of text
/// otherwise.
pub(crate) struct ScriptedGateway {
    rules: Mutex<Vec<Rule>>,
    requests: Mutex<Vec<RecordedRequest>>,
    models: Vec<Model>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self {
            rules: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            models: vec![Model::new("llama3"), Model::new("qwen2")],
        }
    }

    /// Script replies for prompts to `model` containing `needle`
    pub(crate) fn on(self, model: &str, needle: &str, replies: Vec<Reply>) -> Self {
        self.rules.lock().unwrap().push(Rule {
            model: Some(model.to_string()),
            needle: needle.to_string(),
            replies: replies.into(),
        });
        self
    }

    /// Script replies for prompts to any model containing `needle`
    pub(crate) fn on_any(self, needle: &str, replies: Vec<Reply>) -> Self {
        self.rules.lock().unwrap().push(Rule {
            model: None,
            needle: needle.to_string(),
            replies: replies.into(),
        });
        self
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn prompts_to(&self, model: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.model == model)
            .map(|r| r.prompt)
            .collect()
    }

    fn scripted(&self, model: &str, prompt: &str) -> Option<Reply> {
        let mut rules = self.rules.lock().unwrap();
        rules
            .iter_mut()
            .filter(|rule| rule.model.as_deref().is_none_or(|m| m == model))
            .filter(|rule| prompt.contains(&rule.needle))
            .find_map(|rule| rule.replies.pop_front())
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, GatewayError> {
        let prompt = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();
        let model = request.model.to_string();
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(RecordedRequest {
                model: model.clone(),
                prompt: prompt.clone(),
                structured: request.structured,
                history_len: request.messages.len(),
            });
            requests.len()
        };

        match self.scripted(&model, &prompt) {
            Some(Reply::Text(t)) => Ok(t),
            Some(Reply::Error(e)) => Err(GatewayError::RequestFailed(e)),
            None if request.structured => {
                Ok(r#"{"score": 6, "reasoning": "Solid."}"#.to_string())
            }
            None => Ok(format!("{} reply #{}", model, count)),
        }
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(self.models.clone())
    }
}

/// Listener that keeps every event it sees
#[derive(Default)]
pub(crate) struct RecordingListener {
    events: Mutex<Vec<DebateEvent>>,
}

impl RecordingListener {
    pub(crate) fn events(&self) -> Vec<DebateEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl DebateListener for RecordingListener {
    fn on_event(&self, event: &DebateEvent) -> Result<(), ListenerError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
