//! Run Debate use case
//!
//! Drives one debate through its fixed phase sequence:
//!
//! ```text
//! Setup -> Planning -> Opening -> [JudgeOpening] -> Turns -> [Verdict]
//! ```
//!
//! Every observable step is published to a [`DebateListener`] in order.
//! All generation calls are awaited one at a time; any participant or
//! listener error aborts the run.

use super::participant::{Participant, ParticipantError};
use crate::ports::event_listener::{DebateListener, ListenerError, NoListener};
use debate_domain::{
    DEFAULT_COLOR, DebateEvent, DebatePrompt, DebateSpec, DomainError, EventMetadata,
    HeaderMetadata, JudgeProfile, Phase, Seat, Side, TurnSchedule, VerdictResult,
    premise_outcome,
};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a debate run
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Invalid debate: {0}")]
    InvalidDebate(#[from] DomainError),

    #[error(transparent)]
    Participant(#[from] ParticipantError),

    #[error("Listener failed: {0}")]
    Listener(#[from] ListenerError),
}

/// Input for the RunDebate use case
///
/// Participants are borrowed mutably for the whole run; their histories
/// keep growing and are not reset afterwards.
pub struct RunDebateInput<'a> {
    pub spec: DebateSpec,
    /// Speaks first
    pub opener: &'a mut Participant,
    pub responder: &'a mut Participant,
    pub judge: Option<&'a mut Participant>,
}

impl<'a> RunDebateInput<'a> {
    pub fn new(
        spec: DebateSpec,
        opener: &'a mut Participant,
        responder: &'a mut Participant,
    ) -> Self {
        Self {
            spec,
            opener,
            responder,
            judge: None,
        }
    }

    pub fn with_judge(mut self, judge: &'a mut Participant) -> Self {
        self.judge = Some(judge);
        self
    }

    fn validate(&self) -> Result<(), DomainError> {
        self.spec.validate()?;

        let mut seen = HashSet::new();
        let judge = self.judge.as_deref();
        for participant in [Some(&*self.opener), Some(&*self.responder), judge]
            .into_iter()
            .flatten()
        {
            participant.persona().validate()?;
            if !seen.insert(participant.name()) {
                return Err(DomainError::DuplicateName(participant.name().to_string()));
            }
        }
        Ok(())
    }
}

/// Result of a completed debate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateOutcome {
    /// `None` for an unjudged debate
    pub verdict: Option<VerdictResult>,
    /// `None` when there is no premise, no verdict or the winner has no side
    pub premise_upheld: Option<bool>,
    /// Debater statements delivered, opening included
    pub turns_spoken: usize,
}

impl DebateOutcome {
    pub fn winner(&self) -> Option<&str> {
        self.verdict.as_ref().map(|v| v.winner.as_str())
    }
}

/// Use case for running a single debate
#[derive(Debug, Default, Clone, Copy)]
pub struct RunDebateUseCase;

impl RunDebateUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Execute the use case without publishing events
    pub async fn execute(&self, input: RunDebateInput<'_>) -> Result<DebateOutcome, RunDebateError> {
        self.execute_with_listener(input, &NoListener).await
    }

    /// Execute the use case, publishing every event to `listener`
    pub async fn execute_with_listener(
        &self,
        input: RunDebateInput<'_>,
        listener: &dyn DebateListener,
    ) -> Result<DebateOutcome, RunDebateError> {
        input.validate()?;

        let RunDebateInput {
            spec,
            opener,
            responder,
            mut judge,
        } = input;

        info!(
            "Starting debate '{}': {} vs {} ({} turns, {})",
            spec.topic,
            opener.name(),
            responder.name(),
            spec.turns,
            judge
                .as_deref()
                .map(|j| format!("judged by {}", j.name()))
                .unwrap_or_else(|| "unjudged".to_string())
        );

        let mut run = DebateRun::new(&spec, opener, responder, judge.as_deref(), listener);

        run.enter(Phase::Setup);
        run.emit_header(opener, responder, judge.as_deref())?;

        run.enter(Phase::Planning);
        for debater in [&mut *opener, &mut *responder] {
            let plan = debater.plan(&spec.topic).await?;
            run.emit(EventMetadata::Plan, debater.name(), plan)?;
        }

        run.enter(Phase::Opening);
        let opening = run.opening_statement(opener, responder.name()).await?;

        if let Some(judge) = judge.as_deref_mut() {
            run.enter(Phase::JudgeOpening);
            run.judge_turn(judge, opener.name(), &opening).await?;
        }

        run.enter(Phase::Turns);
        let mut last_statement = opening;
        for turn in TurnSchedule::new(spec.turns).iter() {
            let speaker: &mut Participant = match turn.speaker {
                Seat::Opener => &mut *opener,
                Seat::Responder => &mut *responder,
            };
            debug!(
                "Turn {} by {}{}",
                turn.index + 1,
                speaker.name(),
                if turn.is_final { " (final)" } else { "" }
            );

            let thought = speaker.think(&last_statement, turn.is_final).await?;
            run.emit(EventMetadata::Think, speaker.name(), thought)?;

            let statement = speaker.respond(turn.is_final).await?;
            run.emit(EventMetadata::Turn, speaker.name(), statement.clone())?;
            run.turns_spoken += 1;

            if let Some(judge) = judge.as_deref_mut() {
                run.judge_turn(judge, speaker.name(), &statement).await?;
            }
            last_statement = statement;
        }

        let (verdict, premise_upheld) = match judge {
            Some(judge) => {
                run.enter(Phase::Verdict);
                let names = [opener.name().to_string(), responder.name().to_string()];
                let (verdict, upheld) = run.verdict(judge, &names).await?;
                (Some(verdict), upheld)
            }
            None => (None, None),
        };

        info!(
            "Debate finished after {} turns{}",
            run.turns_spoken,
            verdict
                .as_ref()
                .map(|v| format!(", winner: {}", v.winner))
                .unwrap_or_default()
        );

        Ok(DebateOutcome {
            verdict,
            premise_upheld,
            turns_spoken: run.turns_spoken,
        })
    }
}

/// Per-run state shared by the phases
struct DebateRun<'a> {
    spec: &'a DebateSpec,
    listener: &'a dyn DebateListener,
    colors: BTreeMap<String, String>,
    sides: BTreeMap<String, Side>,
    /// Debaters the judge has scored at least once
    scored: HashSet<String>,
    turns_spoken: usize,
}

impl<'a> DebateRun<'a> {
    fn new(
        spec: &'a DebateSpec,
        opener: &Participant,
        responder: &Participant,
        judge: Option<&Participant>,
        listener: &'a dyn DebateListener,
    ) -> Self {
        let colors = [Some(opener), Some(responder), judge]
            .into_iter()
            .flatten()
            .map(|p| (p.name().to_string(), p.color().to_string()))
            .collect();
        let sides = [opener, responder]
            .into_iter()
            .filter_map(|p| p.side().map(|side| (p.name().to_string(), side)))
            .collect();
        Self {
            spec,
            listener,
            colors,
            sides,
            scored: HashSet::new(),
            turns_spoken: 0,
        }
    }

    fn enter(&self, phase: Phase) {
        info!("Phase: {}", phase);
    }

    fn emit(
        &self,
        metadata: EventMetadata,
        speaker: &str,
        content: impl Into<String>,
    ) -> Result<(), ListenerError> {
        let color = self
            .colors
            .get(speaker)
            .map(String::as_str)
            .unwrap_or(DEFAULT_COLOR);
        self.listener
            .on_event(&DebateEvent::new(metadata, speaker, content, color))
    }

    fn emit_header(
        &self,
        opener: &Participant,
        responder: &Participant,
        judge: Option<&Participant>,
    ) -> Result<(), ListenerError> {
        let debaters = [opener, responder];
        let header = HeaderMetadata {
            topic: self.spec.topic.clone(),
            premise: self.spec.premise.clone(),
            sides: self.sides.clone(),
            participants: debaters.iter().map(|d| d.name().to_string()).collect(),
            colors: self.colors.clone(),
            personalities: debaters
                .iter()
                .map(|d| (d.name().to_string(), d.persona().personality.trim().to_string()))
                .collect(),
            models: debaters
                .iter()
                .map(|d| (d.name().to_string(), d.model().to_string()))
                .collect(),
            judge: judge.map(|j| JudgeProfile {
                name: j.name().to_string(),
                color: j.color().to_string(),
                personality: j.persona().personality.trim().to_string(),
                judging_criteria: j.persona().judging_criteria.trim().to_string(),
                model: j.model().to_string(),
            }),
        };
        self.listener.on_event(&DebateEvent::header(header))
    }

    async fn opening_statement(
        &mut self,
        opener: &mut Participant,
        opponent: &str,
    ) -> Result<String, RunDebateError> {
        let spec = self.spec;
        let side = opener.side();
        let thought = opener
            .think_opening(&spec.topic, spec.premise(), side, opponent)
            .await?;
        self.emit(EventMetadata::Think, opener.name(), thought)?;

        let prompt = DebatePrompt::opening_statement(&spec.topic, spec.premise(), side, opponent);
        let opening = opener.chat(&prompt, false).await?;
        self.emit(EventMetadata::Turn, opener.name(), opening.clone())?;
        self.turns_spoken += 1;
        Ok(opening)
    }

    /// Private critique, then a score; the first score for a speaker is an
    /// initial impression, later ones are running scores.
    async fn judge_turn(
        &mut self,
        judge: &mut Participant,
        speaker: &str,
        statement: &str,
    ) -> Result<(), RunDebateError> {
        let critique = judge.evaluate(speaker, statement).await?;
        self.emit(EventMetadata::Think, judge.name(), critique)?;

        let first = !self.scored.contains(speaker);
        let card = judge.score(speaker, first).await?;
        self.scored.insert(speaker.to_string());
        debug!("{} scored {} at {}/10", judge.name(), speaker, card.score);

        self.emit(
            EventMetadata::Score {
                target: speaker.to_string(),
                score: Some(card.score),
            },
            judge.name(),
            card.reasoning,
        )?;
        Ok(())
    }

    async fn verdict(
        &mut self,
        judge: &mut Participant,
        names: &[String; 2],
    ) -> Result<(VerdictResult, Option<bool>), RunDebateError> {
        let premise = self.spec.premise();
        let verdict = judge.verdict(names, premise, &self.sides).await?;
        let premise_upheld = premise_outcome(premise, &self.sides, Some(&verdict.winner));

        if !verdict.deliberation.trim().is_empty() {
            self.emit(
                EventMetadata::Think,
                judge.name(),
                verdict.deliberation.clone(),
            )?;
        }

        self.emit(
            EventMetadata::Verdict {
                winner: Some(verdict.winner.clone()),
                scores: verdict.scores.clone(),
                premise: self.spec.premise.clone(),
                premise_upheld,
            },
            judge.name(),
            verdict.reasoning.clone(),
        )?;

        Ok((verdict, premise_upheld))
    }
}
