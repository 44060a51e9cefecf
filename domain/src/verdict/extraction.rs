//! Verdict validation, fallback and repair rules

use super::value_objects::NEUTRAL_SCORE;
use std::collections::BTreeMap;

/// One parsed (not yet validated) structured verdict reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerdictCandidate {
    pub winner: Option<String>,
    pub scores: BTreeMap<String, u8>,
}

/// A constraint the previous structured reply violated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerdictProblem {
    /// The reply could not be parsed as a JSON object at all
    Unparseable,
    /// `winner` is absent or not one of the two debaters
    InvalidWinner {
        got: Option<String>,
        expected: [String; 2],
    },
    /// `scores` has no entry for this debater
    MissingScore { name: String },
}

impl std::fmt::Display for VerdictProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictProblem::Unparseable => write!(f, "the response was not a valid JSON object"),
            VerdictProblem::InvalidWinner { got, expected } => write!(
                f,
                "\"winner\" must be '{}' or '{}', got {}",
                expected[0],
                expected[1],
                got.as_deref()
                    .map(|g| format!("'{}'", g))
                    .unwrap_or_else(|| "nothing".to_string())
            ),
            VerdictProblem::MissingScore { name } => {
                write!(f, "\"scores\" is missing an entry for '{}'", name)
            }
        }
    }
}

impl VerdictCandidate {
    fn has_valid_winner(&self, names: &[String; 2]) -> bool {
        self.winner
            .as_ref()
            .is_some_and(|w| names.iter().any(|n| n == w))
    }

    fn has_all_scores(&self, names: &[String; 2]) -> bool {
        names.iter().all(|n| self.scores.contains_key(n))
    }

    /// Every constraint this candidate violates, in a stable order
    pub fn problems(&self, names: &[String; 2]) -> Vec<VerdictProblem> {
        let mut problems = Vec::new();
        if !self.has_valid_winner(names) {
            problems.push(VerdictProblem::InvalidWinner {
                got: self.winner.clone(),
                expected: names.clone(),
            });
        }
        for name in names {
            if !self.scores.contains_key(name) {
                problems.push(VerdictProblem::MissingScore { name: name.clone() });
            }
        }
        problems
    }

    pub fn is_valid(&self, names: &[String; 2]) -> bool {
        self.has_valid_winner(names) && self.has_all_scores(names)
    }
}

/// Winner plus exactly one score per debater
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictDecision {
    pub winner: String,
    pub scores: BTreeMap<String, u8>,
}

impl VerdictDecision {
    /// Accept a validated candidate, dropping any score keyed to a stranger.
    ///
    /// Returns `None` when the candidate is not valid for `names`.
    pub fn from_candidate(candidate: &VerdictCandidate, names: &[String; 2]) -> Option<Self> {
        if !candidate.is_valid(names) {
            return None;
        }
        let winner = candidate.winner.clone()?;
        let scores = names
            .iter()
            .filter_map(|n| candidate.scores.get(n).map(|s| (n.clone(), *s)))
            .collect();
        Some(Self { winner, scores })
    }

    /// Deterministic verdict when no structured reply validated.
    ///
    /// With both scores available from the last parsed reply, the winner is
    /// the confirmed winner if there is one, otherwise the strictly higher
    /// scorer, with a tie going to the first name. Without both scores, the
    /// winner is the confirmed winner or the first name and both debaters
    /// get [`NEUTRAL_SCORE`].
    pub fn fallback(
        last: Option<&VerdictCandidate>,
        names: &[String; 2],
        confirmed: Option<&str>,
    ) -> Self {
        let confirmed = confirmed
            .and_then(|c| names.iter().find(|n| n.as_str() == c))
            .cloned();

        let complete = last.filter(|c| c.has_all_scores(names));
        let Some(candidate) = complete else {
            return Self {
                winner: confirmed.unwrap_or_else(|| names[0].clone()),
                scores: names.iter().map(|n| (n.clone(), NEUTRAL_SCORE)).collect(),
            };
        };

        let scores: BTreeMap<String, u8> = names
            .iter()
            .map(|n| (n.clone(), candidate.scores[n]))
            .collect();

        let winner = confirmed.unwrap_or_else(|| {
            if scores[&names[1]] > scores[&names[0]] {
                names[1].clone()
            } else {
                names[0].clone()
            }
        });

        Self { winner, scores }
    }

    /// Swap the two scores if the winner's is strictly lower.
    ///
    /// The winner identity is kept; the score-to-name association is what
    /// gets corrected. Returns whether a swap happened.
    pub fn repair_inversion(&mut self, names: &[String; 2]) -> bool {
        let loser = if self.winner == names[0] {
            &names[1]
        } else {
            &names[0]
        };
        let (Some(&winner_score), Some(&loser_score)) =
            (self.scores.get(&self.winner), self.scores.get(loser))
        else {
            return false;
        };
        if winner_score >= loser_score {
            return false;
        }
        self.scores.insert(self.winner.clone(), loser_score);
        self.scores.insert(loser.clone(), winner_score);
        true
    }
}
