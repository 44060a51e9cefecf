//! Debate domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Turns used when a debate file does not specify them
pub const DEFAULT_TURNS: usize = 6;

/// Phase of a debate run, strictly ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    /// Header emission, no generation
    Setup,
    /// Both debaters plan privately
    Planning,
    /// First debater reasons and delivers the opening statement
    Opening,
    /// Judge evaluates and scores the opening
    JudgeOpening,
    /// Alternating turns after the opening
    Turns,
    /// Judge renders the final verdict
    Verdict,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Setup => "setup",
            Phase::Planning => "planning",
            Phase::Opening => "opening",
            Phase::JudgeOpening => "judge_opening",
            Phase::Turns => "turns",
            Phase::Verdict => "verdict",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Setup => "Setup",
            Phase::Planning => "Planning",
            Phase::Opening => "Opening Statement",
            Phase::JudgeOpening => "Judging Opening",
            Phase::Turns => "Turns",
            Phase::Verdict => "Verdict",
        }
    }

    /// Phases executed for a debate with or without a judge
    pub fn sequence(judged: bool) -> Vec<Phase> {
        if judged {
            vec![
                Phase::Setup,
                Phase::Planning,
                Phase::Opening,
                Phase::JudgeOpening,
                Phase::Turns,
                Phase::Verdict,
            ]
        } else {
            vec![Phase::Setup, Phase::Planning, Phase::Opening, Phase::Turns]
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// What is being debated and for how long (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateSpec {
    pub topic: String,
    /// Falsifiable claim the debaters argue `for` / `against`
    pub premise: Option<String>,
    /// Total debater utterances, opening included
    pub turns: usize,
}

impl DebateSpec {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            premise: None,
            turns: DEFAULT_TURNS,
        }
    }

    pub fn with_premise(mut self, premise: impl Into<String>) -> Self {
        let premise = premise.into();
        self.premise = if premise.trim().is_empty() {
            None
        } else {
            Some(premise)
        };
        self
    }

    pub fn with_turns(mut self, turns: usize) -> Self {
        self.turns = turns;
        self
    }

    pub fn premise(&self) -> Option<&str> {
        self.premise.as_deref()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.topic.trim().is_empty() {
            return Err(DomainError::EmptyTopic);
        }
        if self.turns == 0 {
            return Err(DomainError::InvalidTurns(self.turns));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_defaults() {
        let spec = DebateSpec::new("Can machines think?");
        assert_eq!(spec.turns, DEFAULT_TURNS);
        assert!(spec.premise().is_none());
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_blank_premise_is_none() {
        let spec = DebateSpec::new("t").with_premise("   ");
        assert!(spec.premise.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_turns_and_empty_topic() {
        assert_eq!(
            DebateSpec::new("t").with_turns(0).validate(),
            Err(DomainError::InvalidTurns(0))
        );
        assert_eq!(DebateSpec::new(" ").validate(), Err(DomainError::EmptyTopic));
    }

    #[test]
    fn test_phase_sequence() {
        assert_eq!(Phase::sequence(false).len(), 4);
        let judged = Phase::sequence(true);
        assert_eq!(judged.first(), Some(&Phase::Setup));
        assert_eq!(judged.last(), Some(&Phase::Verdict));
        assert!(judged.windows(2).all(|w| w[0] < w[1]));
    }
}
