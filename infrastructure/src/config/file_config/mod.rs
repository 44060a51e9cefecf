//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backend;
mod debate;
mod output;

pub use backend::{DEFAULT_BASE_URL, FileBackendConfig};
pub use debate::FileDebateConfig;
pub use output::{FileOutputConfig, MIN_LINE_WIDTH};

use debate_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Generation backend
    pub backend: FileBackendConfig,
    /// Run settings
    pub debate: FileDebateConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.backend.validate();
        issues.extend(self.debate.validate());
        issues.extend(self.output.validate());
        issues
    }
}
