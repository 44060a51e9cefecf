//! Debate definition files (YAML)
//!
//! A debate file names the topic, an optional premise and the persona
//! pools the lineup is drawn from:
//!
//! ```yaml
//! topic: Should cities ban private cars?
//! premise: Private cars should be banned from city centres
//! turns: 6
//! for:
//!   - name: Ada
//!     model: llama3
//!     personality: A pragmatic urban planner.
//! against:
//!   - name: Brook
//!     model: qwen2
//! judge:
//!   - name: Morgan
//!     model: llama3
//!     judging_criteria: Rewards evidence over rhetoric.
//! ```
//!
//! `audience` is accepted in place of `judge`, and may hold a single persona
//! instead of a list. Older files without sides list two debaters under
//! `agents`.

use crate::config::MIN_LINE_WIDTH;
use debate_domain::{
    ConfigIssue, ConfigIssueCode, DebateSpec, Persona,
    debate::entities::DEFAULT_TURNS,
};
use figment::{
    Figment,
    providers::{Format, Yaml},
};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DebateFileError {
    #[error("Debate file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse debate file: {0}")]
    Parse(#[from] Box<figment::Error>),
}

fn default_turns() -> usize {
    DEFAULT_TURNS
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Box<Persona>),
    Many(Vec<Persona>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Persona>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(persona) => vec![*persona],
        OneOrMany::Many(personas) => personas,
    })
}

/// Parsed debate definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DebateFile {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub premise: Option<String>,
    #[serde(default = "default_turns")]
    pub turns: usize,
    #[serde(default)]
    pub line_width: Option<usize>,
    #[serde(default, rename = "for")]
    pub for_pool: Vec<Persona>,
    #[serde(default)]
    pub against: Vec<Persona>,
    #[serde(default, alias = "audience", deserialize_with = "one_or_many")]
    pub judge: Vec<Persona>,
    /// Side-less debaters from older files
    #[serde(default)]
    pub agents: Vec<Persona>,
    #[serde(skip)]
    stem: String,
}

impl DebateFile {
    pub fn load(path: &Path) -> Result<Self, DebateFileError> {
        if !path.is_file() {
            return Err(DebateFileError::NotFound(path.to_path_buf()));
        }
        let mut file: DebateFile = Figment::from(Yaml::file(path))
            .extract()
            .map_err(Box::new)?;
        file.stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(file)
    }

    pub fn from_yaml_str(yaml: &str, stem: impl Into<String>) -> Result<Self, DebateFileError> {
        let mut file: DebateFile = Figment::from(Yaml::string(yaml))
            .extract()
            .map_err(Box::new)?;
        file.stem = stem.into();
        Ok(file)
    }

    /// File name without extension, used to name transcripts
    pub fn stem(&self) -> &str {
        if self.stem.is_empty() {
            "debate"
        } else {
            &self.stem
        }
    }

    /// True when debaters come from `for`/`against` pools and argue sides
    pub fn has_sides(&self) -> bool {
        !self.for_pool.is_empty() || !self.against.is_empty()
    }

    /// Debate parameters, with an optional override for the turn count
    pub fn to_spec(&self, turns: Option<usize>) -> DebateSpec {
        let spec = DebateSpec::new(self.topic.trim()).with_turns(turns.unwrap_or(self.turns));
        match &self.premise {
            Some(premise) => spec.with_premise(premise.trim()),
            None => spec,
        }
    }

    fn pools(&self) -> [(&'static str, &[Persona]); 4] {
        [
            ("for", &self.for_pool),
            ("against", &self.against),
            ("agents", &self.agents),
            ("judge", &self.judge),
        ]
    }

    /// Check the file before any run. `models_assigned` is true when the
    /// backend config supplies models, so personas may omit theirs.
    pub fn validate(&self, models_assigned: bool) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.topic.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyTopic,
                "topic is missing or blank",
            ));
        }
        if self.turns == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTurns,
                "turns must be at least 1",
            ));
        }
        if let Some(width) = self.line_width
            && width < MIN_LINE_WIDTH
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "line_width".to_string(),
                },
                format!("line_width {} is too narrow, using {}", width, MIN_LINE_WIDTH),
            ));
        }

        if self.has_sides() {
            for (pool, personas) in [("for", &self.for_pool), ("against", &self.against)] {
                if personas.is_empty() {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::EmptyPool {
                            pool: pool.to_string(),
                        },
                        format!("'{}' needs at least one persona", pool),
                    ));
                }
            }
            if !self.agents.is_empty() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnusedField {
                        field: "agents".to_string(),
                    },
                    "'agents' is ignored when 'for' and 'against' are given",
                ));
            }
        } else if self.agents.len() < 2 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyPool {
                    pool: "for".to_string(),
                },
                "define 'for' and 'against' persona pools (or two 'agents')",
            ));
        }

        if self.premise.is_some() && !self.has_sides() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnusedField {
                    field: "premise".to_string(),
                },
                "premise has no effect without 'for' and 'against' pools",
            ));
        }

        let mut seen = HashSet::new();
        for (pool, personas) in self.pools() {
            for persona in personas {
                let name = persona.name.trim();
                if name.is_empty() {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::EmptyPersonaName {
                            pool: pool.to_string(),
                        },
                        format!("a persona in '{}' has no name", pool),
                    ));
                    continue;
                }
                if !seen.insert(name) {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::DuplicateName {
                            name: name.to_string(),
                        },
                        format!("persona name '{}' is used more than once", name),
                    ));
                }
                if persona.model.is_empty() && !models_assigned {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::EmptyModelName {
                            persona: name.to_string(),
                        },
                        format!("persona '{}' has no model (set one or pass --model)", name),
                    ));
                }
            }
        }

        issues
    }
}
