//! Lineup port
//!
//! A lineup is the cast of one debate run: two debaters in speaking order
//! and an optional judge. Providers decide who is drawn, which side each
//! debater argues, and which model backs each persona.

use debate_domain::{Persona, Side};
use thiserror::Error;

/// Errors that can occur while drawing a lineup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineupError {
    #[error("Persona pool '{0}' is empty")]
    EmptyPool(String),

    #[error("Invalid persona: {0}")]
    InvalidPersona(String),
}

/// Cast of one debate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineup {
    /// Speaks first
    pub opener: Persona,
    pub responder: Persona,
    pub judge: Option<Persona>,
}

impl Lineup {
    pub fn new(opener: Persona, responder: Persona) -> Self {
        Self {
            opener,
            responder,
            judge: None,
        }
    }

    pub fn with_judge(mut self, judge: Persona) -> Self {
        self.judge = Some(judge);
        self
    }

    pub fn debater_names(&self) -> [String; 2] {
        [self.opener.name.clone(), self.responder.name.clone()]
    }

    /// The debater assigned to `side`, if any
    pub fn debater_on(&self, side: Side) -> Option<&Persona> {
        [&self.opener, &self.responder]
            .into_iter()
            .find(|p| p.side == Some(side))
    }
}

/// Source of lineups for successive runs
pub trait LineupProvider: Send {
    fn next_lineup(&mut self) -> Result<Lineup, LineupError>;
}

/// Always yields the same lineup
pub struct FixedLineup(pub Lineup);

impl LineupProvider for FixedLineup {
    fn next_lineup(&mut self) -> Result<Lineup, LineupError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debater_on_side() {
        let lineup = Lineup::new(
            Persona::new("Brook", "m").with_side(Side::Against),
            Persona::new("Ada", "m").with_side(Side::For),
        );
        assert_eq!(lineup.debater_on(Side::For).unwrap().name, "Ada");
        assert_eq!(lineup.debater_on(Side::Against).unwrap().name, "Brook");
        assert_eq!(lineup.debater_names(), ["Brook".to_string(), "Ada".to_string()]);
    }
}
