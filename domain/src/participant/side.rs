//! Debate side value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Which side of the premise a debater argues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    For,
    Against,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::For => "for",
            Side::Against => "against",
        }
    }

    /// Upper-case label used inside prompts
    pub fn label(&self) -> &'static str {
        match self {
            Side::For => "FOR",
            Side::Against => "AGAINST",
        }
    }

    /// Human-facing role name used by renderers
    pub fn role(&self) -> &'static str {
        match self {
            Side::For => "For",
            Side::Against => "Against",
        }
    }

    pub fn is_affirmative(&self) -> bool {
        matches!(self, Side::For)
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::For => Side::Against,
            Side::Against => Side::For,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "for" => Ok(Side::For),
            "against" => Ok(Side::Against),
            other => Err(DomainError::InvalidSide(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parse() {
        assert_eq!("FOR".parse::<Side>().unwrap(), Side::For);
        assert_eq!(" against ".parse::<Side>().unwrap(), Side::Against);
        assert!("neutral".parse::<Side>().is_err());
    }

    #[test]
    fn test_side_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Against).unwrap(), "\"against\"");
        let side: Side = serde_json::from_str("\"for\"").unwrap();
        assert_eq!(side, Side::For);
    }

    #[test]
    fn test_side_labels() {
        assert_eq!(Side::For.label(), "FOR");
        assert_eq!(Side::Against.role(), "Against");
        assert_eq!(Side::For.opposite(), Side::Against);
        assert!(Side::For.is_affirmative());
        assert!(!Side::Against.is_affirmative());
    }
}
