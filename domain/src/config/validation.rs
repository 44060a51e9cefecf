//! Configuration validation results.
//!
//! Both the application config file and debate definition files are
//! checked before a run starts. Checks never fail fast; they return every
//! issue found so the user can fix them in one pass.

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the debate cannot run with this configuration.
    Error,
    /// Non-fatal: the run proceeds but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// The debate topic is missing or blank.
    EmptyTopic,
    /// A debate needs at least one turn.
    ZeroTurns,
    /// A required persona pool has no entries.
    EmptyPool { pool: String },
    /// Two personas share a name.
    DuplicateName { name: String },
    /// A persona has no model and no fallback model is configured.
    EmptyModelName { persona: String },
    /// A persona has no name.
    EmptyPersonaName { pool: String },
    /// A value is outside its accepted range.
    OutOfRange { field: String },
    /// A field is set but has no effect.
    UnusedField { field: String },
}

/// A detected issue in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}
