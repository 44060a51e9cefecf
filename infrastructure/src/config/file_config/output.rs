//! Output configuration from TOML (`[output]` section)

use debate_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Narrowest line width the terminal renderer accepts
pub const MIN_LINE_WIDTH: usize = 20;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Wrap width; a debate file's `line_width` takes precedence
    pub line_width: Option<usize>,
    /// Where JSONL transcripts are written; `None` disables them
    pub transcript_dir: Option<PathBuf>,
    /// Print private PLAN/THINK events
    pub show_thoughts: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            line_width: None,
            transcript_dir: Some(PathBuf::from("results")),
            show_thoughts: true,
        }
    }
}

impl FileOutputConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        match self.line_width {
            Some(width) if width < MIN_LINE_WIDTH => vec![ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "output.line_width".to_string(),
                },
                format!(
                    "output.line_width {} is too narrow, using {}",
                    width, MIN_LINE_WIDTH
                ),
            )],
            _ => vec![],
        }
    }
}
