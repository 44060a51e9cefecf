//! Run Batch use case
//!
//! Runs the same debate definition N times. Each run draws a fresh lineup,
//! builds fresh participants (so no history carries over), publishes to
//! its own listener stack, and contributes one [`RunRecord`]. A failed run
//! is reported and skipped.

use super::participant::Participant;
use super::run_debate::{RunDebateError, RunDebateInput, RunDebateUseCase};
use crate::collector::ResultCollector;
use crate::ports::batch_observer::{BatchObserver, RunListenerFactory};
use crate::ports::event_bus::EventBus;
use crate::ports::event_listener::DebateListener;
use crate::ports::lineup::{Lineup, LineupError, LineupProvider};
use crate::ports::llm_gateway::LlmGateway;
use debate_domain::{DebateSpec, DebateStatistics, RunRecord};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors that stop the whole batch
#[derive(Error, Debug)]
pub enum RunBatchError {
    #[error("Batch needs at least one run")]
    NoRuns,

    #[error("Lineup error: {0}")]
    Lineup(#[from] LineupError),
}

/// Input for the RunBatch use case
#[derive(Debug, Clone)]
pub struct RunBatchInput {
    pub spec: DebateSpec,
    pub runs: usize,
}

impl RunBatchInput {
    pub fn new(spec: DebateSpec, runs: usize) -> Self {
        Self { spec, runs }
    }
}

/// Outcome of a batch
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One row per completed run, in run order
    pub records: Vec<RunRecord>,
    /// Run numbers that failed
    pub failed_runs: Vec<usize>,
}

impl BatchReport {
    pub fn statistics(&self) -> DebateStatistics {
        DebateStatistics::compute(&self.records)
    }
}

/// Use case for running repeated debates
pub struct RunBatchUseCase {
    gateway: Arc<dyn LlmGateway>,
    debate: RunDebateUseCase,
}

impl RunBatchUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            debate: RunDebateUseCase::new(),
        }
    }

    pub async fn execute(
        &self,
        input: RunBatchInput,
        lineups: &mut dyn LineupProvider,
        listeners: &dyn RunListenerFactory,
        observer: &dyn BatchObserver,
    ) -> Result<BatchReport, RunBatchError> {
        if input.runs == 0 {
            return Err(RunBatchError::NoRuns);
        }

        info!("Starting batch of {} debate(s)", input.runs);
        let mut report = BatchReport::default();

        for run_num in 1..=input.runs {
            let lineup = lineups.next_lineup()?;
            observer.on_run_start(run_num, input.runs, &lineup);

            match self.run_once(&input.spec, run_num, &lineup, listeners).await {
                Ok(record) => {
                    info!(
                        "Run {}/{} finished (winner: {})",
                        run_num,
                        input.runs,
                        record.winner.as_deref().unwrap_or("none")
                    );
                    observer.on_run_complete(&record);
                    report.records.push(record);
                }
                Err(e) => {
                    error!("Run {}/{} failed: {}", run_num, input.runs, e);
                    observer.on_run_failed(run_num, &e);
                    report.failed_runs.push(run_num);
                }
            }
        }

        info!(
            "Batch finished: {} completed, {} failed",
            report.records.len(),
            report.failed_runs.len()
        );
        Ok(report)
    }

    async fn run_once(
        &self,
        spec: &DebateSpec,
        run_num: usize,
        lineup: &Lineup,
        listeners: &dyn RunListenerFactory,
    ) -> Result<RunRecord, RunDebateError> {
        let mut opener = Participant::new(lineup.opener.clone(), self.gateway.clone());
        let mut responder = Participant::new(lineup.responder.clone(), self.gateway.clone());
        let mut judge = lineup
            .judge
            .clone()
            .map(|persona| Participant::new(persona, self.gateway.clone()));

        let listener = listeners.listener_for(run_num, lineup)?;
        let collector = ResultCollector::new();
        let stack: Vec<&dyn DebateListener> = vec![&*listener, &collector];
        let bus = EventBus::new(stack);

        let mut input = RunDebateInput::new(spec.clone(), &mut opener, &mut responder);
        if let Some(judge) = judge.as_mut() {
            input = input.with_judge(judge);
        }
        self.debate.execute_with_listener(input, &bus).await?;

        Ok(collector.to_record(run_num))
    }
}
