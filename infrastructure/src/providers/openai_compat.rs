//! OpenAI-compatible chat completion gateway
//!
//! Talks to any server exposing `POST /v1/chat/completions`. Model discovery
//! uses Ollama's `GET /api/tags`, which other servers may not provide.

use async_trait::async_trait;
use debate_application::{CompletionRequest, GatewayError, LlmGateway};
use debate_domain::{Message, Model};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// Gateway backed by an OpenAI-compatible HTTP server (Ollama by default)
#[derive(Debug, Clone)]
pub struct OpenAiCompatGateway {
    base_url: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl OpenAiCompatGateway {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
            http_client,
        })
    }

    fn chat_endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn tags_endpoint(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    fn build_request<'a>(request: &CompletionRequest<'a>) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: request.model.as_str(),
            messages: request.messages,
            stream: false,
            response_format: request.structured.then_some(ResponseFormat {
                kind: "json_object",
            }),
        }
    }

    fn map_send_error(&self, error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::Timeout
        } else if error.is_connect() {
            GatewayError::ConnectionError(format!("{}: {}", self.base_url, error))
        } else {
            GatewayError::RequestFailed(error.to_string())
        }
    }

    fn extract_content(
        completion: ChatCompletionResponse,
        model: &Model,
    ) -> Result<String, GatewayError> {
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| {
                GatewayError::InvalidResponse(format!("{} returned no choices", model))
            })
    }

    fn parse_tags(tags: TagsResponse) -> Vec<Model> {
        let mut models: Vec<Model> = tags
            .models
            .into_iter()
            .map(|entry| Model::new(entry.name))
            .filter(|model| !model.is_empty())
            .collect();
        models.sort();
        models.dedup();
        models
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatGateway {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, GatewayError> {
        let body = Self::build_request(&request);

        let mut builder = self
            .http_client
            .post(self.chat_endpoint())
            .header("Content-Type", "application/json");
        if let Some(api_key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = builder
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::ModelNotAvailable(format!(
                "{} ({})",
                request.model, error_text
            )));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        Self::extract_content(completion, request.model)
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        let response = self
            .http_client
            .get(self.tags_endpoint())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            warn!(
                "Model listing not supported at {} ({})",
                self.base_url,
                response.status()
            );
            return Ok(vec![]);
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let models = Self::parse_tags(tags);
        debug!("Discovered {} models at {}", models.len(), self.base_url);
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> OpenAiCompatGateway {
        OpenAiCompatGateway::new(
            "http://localhost:11434/",
            Some(String::new()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoints_trim_trailing_slash() {
        let gateway = gateway();
        assert_eq!(
            gateway.chat_endpoint(),
            "http://localhost:11434/v1/chat/completions"
        );
        assert_eq!(gateway.tags_endpoint(), "http://localhost:11434/api/tags");
        assert!(gateway.api_key.is_none());
    }

    #[test]
    fn test_structured_request_sets_json_mode() {
        let model = Model::new("llama3");
        let messages = vec![Message::system("Be brief."), Message::user("Hi")];

        let plain = CompletionRequest::new(&model, &messages);
        let json = serde_json::to_value(OpenAiCompatGateway::build_request(&plain)).unwrap();
        assert_eq!(json["model"], "llama3");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Hi");
        assert!(json.get("response_format").is_none());

        let structured = plain.structured(true);
        let json =
            serde_json::to_value(OpenAiCompatGateway::build_request(&structured)).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_extract_content() {
        let model = Model::new("llama3");
        let completion: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "Hello"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            OpenAiCompatGateway::extract_content(completion, &model).unwrap(),
            "Hello"
        );

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            OpenAiCompatGateway::extract_content(empty, &model),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_tags() {
        let tags: TagsResponse = serde_json::from_str(
            r#"{"models": [{"name": "qwen2:7b", "size": 1}, {"name": "llama3"}, {"name": "llama3"}]}"#,
        )
        .unwrap();
        assert_eq!(
            OpenAiCompatGateway::parse_tags(tags),
            vec![Model::new("llama3"), Model::new("qwen2:7b")]
        );
    }
}
