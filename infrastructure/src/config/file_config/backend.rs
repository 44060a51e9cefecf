//! Backend configuration from TOML (`[backend]` section)

use debate_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Default Ollama endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// OpenAI-compatible generation backend (Ollama by default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Server root; the chat endpoint is `{base_url}/v1/chat/completions`.
    pub base_url: String,
    /// Bearer token. Ollama ignores it, hosted gateways usually need it.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Force every persona onto this model. Takes precedence over
    /// `randomize_models`.
    pub model: Option<String>,
    /// Give each persona a random model discovered on the backend.
    /// When false, personas keep the model named in the debate file.
    pub randomize_models: bool,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: 300,
            model: None,
            randomize_models: true,
        }
    }
}

impl FileBackendConfig {
    /// Parse the fixed model, reporting an empty name as an issue.
    pub fn parse_model(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        match self.model.as_deref() {
            None => (None, vec![]),
            Some(name) if name.trim().is_empty() => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        persona: "backend.model".to_string(),
                    },
                    "backend.model: model name cannot be empty",
                )],
            ),
            Some(name) => (Some(Model::new(name)), vec![]),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_model().1;

        if self.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "backend.base_url".to_string(),
                },
                "backend.base_url cannot be empty",
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "backend.timeout_secs".to_string(),
                },
                "backend.timeout_secs cannot be 0",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model() {
        let config = FileBackendConfig {
            model: Some(" llama3 ".to_string()),
            ..Default::default()
        };
        let (model, issues) = config.parse_model();
        assert_eq!(model, Some(Model::new("llama3")));
        assert!(issues.is_empty());

        let config = FileBackendConfig {
            model: Some("  ".to_string()),
            ..Default::default()
        };
        let (model, issues) = config.parse_model();
        assert!(model.is_none());
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_models_are_randomized_by_default() {
        let config = FileBackendConfig::default();
        assert!(config.randomize_models);
        assert!(config.model.is_none());

        let pinned = FileBackendConfig {
            model: Some("llama3".to_string()),
            ..Default::default()
        };
        assert!(pinned.validate().is_empty());
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let config = FileBackendConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::OutOfRange { field } if field == "backend.timeout_secs"
        ));
    }
}
