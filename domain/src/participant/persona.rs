//! Persona configuration record

use super::side::Side;
use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Display color used when a persona does not specify one
pub const DEFAULT_COLOR: &str = "white";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// One debater or judge definition, as written in a debate file
///
/// The free-text fields are concatenated once, in declaration order, into
/// the participant's system directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    /// May be left empty when the model is chosen at run time
    #[serde(default)]
    pub model: Model,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub judging_criteria: String,
    #[serde(default)]
    pub instructions: String,
    /// Assigned by the lineup, not by the persona author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

impl Persona {
    pub fn new(name: impl Into<String>, model: impl Into<Model>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            color: default_color(),
            personality: String::new(),
            position: String::new(),
            judging_criteria: String::new(),
            instructions: String::new(),
            side: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_personality(mut self, text: impl Into<String>) -> Self {
        self.personality = text.into();
        self
    }

    pub fn with_position(mut self, text: impl Into<String>) -> Self {
        self.position = text.into();
        self
    }

    pub fn with_judging_criteria(mut self, text: impl Into<String>) -> Self {
        self.judging_criteria = text.into();
        self
    }

    pub fn with_instructions(mut self, text: impl Into<String>) -> Self {
        self.instructions = text.into();
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.model = model.into();
        self
    }

    /// System directive: personality, position, judging criteria and
    /// instructions, blank entries skipped, separated by a blank line.
    pub fn system_directive(&self) -> String {
        [
            &self.personality,
            &self.position,
            &self.judging_criteria,
            &self.instructions,
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        if self.model.is_empty() {
            return Err(DomainError::MissingModel(self.name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_directive_order_and_blank_skipping() {
        let persona = Persona::new("Ada", "llama3")
            .with_personality("  Curious and exact.  ")
            .with_position("")
            .with_judging_criteria("   ")
            .with_instructions("Keep it short.");
        assert_eq!(persona.system_directive(), "Curious and exact.\n\nKeep it short.");
    }

    #[test]
    fn test_system_directive_all_fields() {
        let persona = Persona::new("Judge", "llama3")
            .with_personality("P")
            .with_position("Q")
            .with_judging_criteria("R")
            .with_instructions("S");
        assert_eq!(persona.system_directive(), "P\n\nQ\n\nR\n\nS");
    }

    #[test]
    fn test_deserialize_defaults_color() {
        let persona: Persona =
            serde_json::from_str(r#"{"name": "Ada", "model": "llama3"}"#).unwrap();
        assert_eq!(persona.color, DEFAULT_COLOR);
        assert!(persona.side.is_none());
        assert!(persona.personality.is_empty());
    }

    #[test]
    fn test_validate() {
        assert!(Persona::new("Ada", "llama3").validate().is_ok());
        assert_eq!(
            Persona::new(" ", "llama3").validate(),
            Err(DomainError::EmptyName)
        );
        assert_eq!(
            Persona::new("Ada", "").validate(),
            Err(DomainError::MissingModel("Ada".to_string()))
        );
    }
}
