//! Verdict value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound of every score (inclusive); the lower bound is 0
pub const MAX_SCORE: u8 = 10;

/// Score assigned to both debaters when no usable scores were extracted
pub const NEUTRAL_SCORE: u8 = 5;

/// A judge's numeric score for one speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub score: u8,
    pub reasoning: String,
}

/// Final, internally consistent verdict
///
/// `scores` holds exactly one entry per debater and
/// `scores[winner] >= scores[loser]` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictResult {
    pub winner: String,
    pub scores: BTreeMap<String, u8>,
    /// Public, in-character announcement
    pub reasoning: String,
    /// Private deliberation, kept for transparency only
    pub deliberation: String,
    /// Produced by the deterministic fallback rather than a validated reply
    pub fallback_used: bool,
}

impl VerdictResult {
    pub fn score_of(&self, name: &str) -> Option<u8> {
        self.scores.get(name).copied()
    }

    /// The debater that did not win
    pub fn loser<'a>(&self, names: &'a [String; 2]) -> &'a str {
        if names[0] == self.winner {
            &names[1]
        } else {
            &names[0]
        }
    }
}
