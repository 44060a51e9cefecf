//! Result collector
//!
//! A [`DebateListener`] that keeps just enough of a debate's HEADER and
//! VERDICT events to build a [`RunRecord`].

use crate::ports::event_listener::{DebateListener, ListenerError};
use debate_domain::{DebateEvent, EventMetadata, RunRecord, Side};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Structured result data captured from events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedResult {
    pub participants: Vec<String>,
    pub sides: BTreeMap<String, Side>,
    pub models: BTreeMap<String, String>,
    pub judge: Option<String>,
    pub judge_model: Option<String>,
    pub premise: Option<String>,
    pub winner: Option<String>,
    pub scores: BTreeMap<String, u8>,
    pub premise_upheld: Option<bool>,
}

impl CollectedResult {
    fn debater_on(&self, side: Side) -> Option<&String> {
        self.sides
            .iter()
            .find(|(_, s)| **s == side)
            .map(|(name, _)| name)
    }

    /// Flatten into a batch row
    pub fn to_record(&self, run_num: usize) -> RunRecord {
        let agent_for = self.debater_on(Side::For).cloned();
        let agent_against = self.debater_on(Side::Against).cloned();
        let model_of = |name: &Option<String>| {
            name.as_ref()
                .and_then(|n| self.models.get(n))
                .cloned()
        };
        RunRecord {
            run_num,
            debaters: self.participants.clone(),
            models: self.models.clone(),
            model_for: model_of(&agent_for),
            model_against: model_of(&agent_against),
            agent_for,
            agent_against,
            judge: self.judge.clone(),
            model_judge: self.judge_model.clone(),
            first_speaker: self.participants.first().cloned(),
            premise: self.premise.clone(),
            premise_upheld: self.premise_upheld,
            winner: self.winner.clone(),
            scores: self.scores.clone(),
        }
    }
}

/// Listener capturing the result of one debate
#[derive(Default)]
pub struct ResultCollector {
    result: Mutex<CollectedResult>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> CollectedResult {
        self.lock().clone()
    }

    pub fn to_record(&self, run_num: usize) -> RunRecord {
        self.lock().to_record(run_num)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CollectedResult> {
        // A poisoned lock still holds a consistent snapshot
        self.result.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DebateListener for ResultCollector {
    fn on_event(&self, event: &DebateEvent) -> Result<(), ListenerError> {
        let mut result = self.lock();
        match &event.metadata {
            EventMetadata::Header(header) => {
                result.participants = header.participants.clone();
                result.sides = header.sides.clone();
                result.models = header.models.clone();
                result.premise = header.premise.clone();
                result.judge = header.judge.as_ref().map(|j| j.name.clone());
                result.judge_model = header.judge.as_ref().map(|j| j.model.clone());
            }
            EventMetadata::Verdict {
                winner,
                scores,
                premise_upheld,
                ..
            } => {
                result.winner = winner.clone();
                result.scores = scores.clone();
                result.premise_upheld = *premise_upheld;
            }
            _ => {}
        }
        Ok(())
    }
}
