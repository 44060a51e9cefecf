//! Debate run configuration from TOML (`[debate]` section)

use debate_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw debate settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Overrides the debate file's `turns` when set
    pub turns: Option<usize>,
    /// Number of runs; more than one switches to batch mode
    pub runs: usize,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            turns: None,
            runs: 1,
        }
    }
}

impl FileDebateConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.turns == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTurns,
                "debate.turns must be at least 1",
            ));
        }
        if self.runs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "debate.runs".to_string(),
                },
                "debate.runs must be at least 1",
            ));
        }
        issues
    }
}
