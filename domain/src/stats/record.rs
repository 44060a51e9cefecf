//! Per-run result row

use crate::participant::Side;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of one completed debate run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_num: usize,
    /// Both debaters in speaking order, whether or not they argued a side
    #[serde(default)]
    pub debaters: Vec<String>,
    /// Debater name to model
    #[serde(default)]
    pub models: BTreeMap<String, String>,
    pub agent_for: Option<String>,
    pub model_for: Option<String>,
    pub agent_against: Option<String>,
    pub model_against: Option<String>,
    pub judge: Option<String>,
    pub model_judge: Option<String>,
    pub first_speaker: Option<String>,
    pub premise: Option<String>,
    pub premise_upheld: Option<bool>,
    pub winner: Option<String>,
    pub scores: BTreeMap<String, u8>,
}

impl RunRecord {
    /// Side of the winner, if the winner argued one
    pub fn winner_side(&self) -> Option<Side> {
        self.side_of(self.winner.as_deref()?)
    }

    /// Side a debater argued in this run
    pub fn side_of(&self, name: &str) -> Option<Side> {
        if self.agent_for.as_deref() == Some(name) {
            Some(Side::For)
        } else if self.agent_against.as_deref() == Some(name) {
            Some(Side::Against)
        } else {
            None
        }
    }

    pub fn model_of(&self, name: &str) -> Option<&str> {
        self.models.get(name).map(String::as_str)
    }

    pub fn score_of(&self, name: &str) -> Option<u8> {
        self.scores.get(name).copied()
    }
}
