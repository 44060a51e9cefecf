//! CLI entrypoint for llm-debate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use clap::Parser;
use debate_application::{
    BatchObserver, DebateListener, EventBus, Lineup, LineupProvider, ListenerError, LlmGateway,
    Participant, RunBatchInput, RunBatchUseCase, RunDebateError, RunDebateInput,
    RunDebateUseCase,
};
use debate_domain::{ConfigIssue, DebateEvent, DebateSpec, Model, RunRecord};
use debate_infrastructure::{
    BatchResultsWriter, ConfigLoader, DebateFile, FileBackendConfig, FileConfig,
    JsonlTranscriptWriter, ModelSelection, OpenAiCompatGateway, PersonaPicker, results_path,
    transcript_path,
};
use debate_presentation::{
    BatchProgress, Cli, ConsoleListener, OutputConfig, StatsFormatter,
    config::DEFAULT_LINE_WIDTH,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Listeners owned by one run: the terminal renderer and the transcript file
struct RunOutputs {
    console: Option<ConsoleListener>,
    transcript: Option<JsonlTranscriptWriter>,
}

impl RunOutputs {
    fn open(
        output: OutputConfig,
        quiet: bool,
        transcript: Option<PathBuf>,
    ) -> Result<Self, ListenerError> {
        Ok(Self {
            console: (!quiet).then(|| ConsoleListener::new(output)),
            transcript: transcript.map(JsonlTranscriptWriter::create).transpose()?,
        })
    }

    fn transcript_path(&self) -> Option<&Path> {
        self.transcript.as_ref().map(|t| t.path())
    }

    fn bus(&self) -> EventBus<'_> {
        let mut bus = EventBus::default();
        if let Some(console) = &self.console {
            bus.register(console);
        }
        if let Some(transcript) = &self.transcript {
            bus.register(transcript);
        }
        bus
    }
}

impl DebateListener for RunOutputs {
    fn on_event(&self, event: &DebateEvent) -> Result<(), ListenerError> {
        self.bus().on_event(event)
    }
}

/// Batch callbacks: terminal progress plus the per-run results file
struct BatchOutputs<'a> {
    session: &'a Session,
    progress: BatchProgress,
    results: Option<BatchResultsWriter>,
}

impl BatchObserver for BatchOutputs<'_> {
    fn on_run_start(&self, run_num: usize, total: usize, lineup: &Lineup) {
        self.progress.on_run_start(run_num, total, lineup);
    }

    fn on_run_complete(&self, record: &RunRecord) {
        self.progress.on_run_complete(record);
        if let Some(results) = &self.results {
            let transcript = self.session.transcript_for(Some(record.run_num));
            if let Err(e) = results.append(record, transcript.as_deref()) {
                warn!(
                    "Could not record run {} in {}: {}",
                    record.run_num,
                    results.path().display(),
                    e
                );
            }
        }
    }

    fn on_run_failed(&self, run_num: usize, error: &RunDebateError) {
        self.progress.on_run_failed(run_num, error);
    }
}

/// Log warnings and fail on errors
fn check_issues(source: &str, issues: &[ConfigIssue]) -> Result<()> {
    let mut errors = 0;
    for issue in issues {
        if issue.is_error() {
            eprintln!("{}: {}", source, issue);
            errors += 1;
        } else {
            warn!("{}: {}", source, issue.message);
        }
    }
    if errors > 0 {
        bail!("{} has {} error(s)", source, errors);
    }
    Ok(())
}

async fn select_models(
    cli: &Cli,
    backend: &FileBackendConfig,
    gateway: &dyn LlmGateway,
) -> Result<ModelSelection> {
    if let Some(name) = &cli.model {
        let model = Model::new(name);
        if model.is_empty() {
            bail!("--model cannot be empty");
        }
        return Ok(ModelSelection::Fixed(model));
    }
    if let (Some(model), _) = backend.parse_model() {
        return Ok(ModelSelection::Fixed(model));
    }
    if cli.persona_models || !backend.randomize_models {
        return Ok(ModelSelection::Persona);
    }

    match gateway.available_models().await {
        Ok(models) if !models.is_empty() => {
            info!(
                "Drawing models from: {}",
                models
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            Ok(ModelSelection::Random(models))
        }
        Ok(_) => {
            warn!("No models found on the backend, using the models from the debate file");
            Ok(ModelSelection::Persona)
        }
        Err(e) => {
            warn!("Could not list models ({}), using the models from the debate file", e);
            Ok(ModelSelection::Persona)
        }
    }
}

fn build_participants(
    lineup: &Lineup,
    gateway: &Arc<dyn LlmGateway>,
) -> (Participant, Participant, Option<Participant>) {
    (
        Participant::new(lineup.opener.clone(), gateway.clone()),
        Participant::new(lineup.responder.clone(), gateway.clone()),
        lineup
            .judge
            .clone()
            .map(|persona| Participant::new(persona, gateway.clone())),
    )
}

struct Session {
    spec: DebateSpec,
    stem: String,
    output: OutputConfig,
    quiet: bool,
    transcript_dir: Option<PathBuf>,
    started: DateTime<Local>,
}

impl Session {
    fn transcript_for(&self, run: Option<usize>) -> Option<PathBuf> {
        self.transcript_dir
            .as_deref()
            .map(|dir| transcript_path(dir, &self.stem, self.started, run))
    }
}

async fn run_single(
    session: &Session,
    gateway: Arc<dyn LlmGateway>,
    picker: &mut PersonaPicker,
) -> Result<()> {
    let lineup = picker.next_lineup()?;
    let (mut opener, mut responder, mut judge) = build_participants(&lineup, &gateway);
    let outputs = RunOutputs::open(session.output, session.quiet, session.transcript_for(None))?;

    let mut input = RunDebateInput::new(session.spec.clone(), &mut opener, &mut responder);
    if let Some(judge) = judge.as_mut() {
        input = input.with_judge(judge);
    }
    let outcome = RunDebateUseCase::new()
        .execute_with_listener(input, &outputs)
        .await?;

    if session.quiet {
        match outcome.winner() {
            Some(winner) => println!("Winner: {}", winner),
            None => println!("Debate finished ({} turns)", outcome.turns_spoken),
        }
    }
    if let Some(path) = outputs.transcript_path() {
        println!("\nTranscript saved to {}", path.display());
    }
    Ok(())
}

async fn run_batch(
    session: &Session,
    gateway: Arc<dyn LlmGateway>,
    picker: &mut PersonaPicker,
    runs: usize,
) -> Result<()> {
    println!("Running {} debate(s) on \"{}\"", runs, session.spec.topic);
    if let Some(dir) = &session.transcript_dir {
        println!("Transcripts: {}", dir.display());
    }

    let factory =
        |run_num: usize, _lineup: &Lineup| -> Result<Box<dyn DebateListener>, ListenerError> {
            let transcript = session.transcript_for(Some(run_num));
            Ok(Box::new(RunOutputs::open(
                session.output,
                session.quiet,
                transcript,
            )?))
        };
    let results = session
        .transcript_dir
        .as_deref()
        .map(|dir| BatchResultsWriter::create(results_path(dir, &session.stem, session.started)))
        .transpose()?;
    let observer = BatchOutputs {
        session,
        progress: BatchProgress::new(session.output.color, session.quiet),
        results,
    };

    let report = RunBatchUseCase::new(gateway)
        .execute(
            RunBatchInput::new(session.spec.clone(), runs),
            picker,
            &factory,
            &observer,
        )
        .await?;

    if !report.failed_runs.is_empty() {
        warn!(
            "{} run(s) failed: {:?}",
            report.failed_runs.len(),
            report.failed_runs
        );
    }
    print!(
        "{}",
        StatsFormatter::new(session.output.color).format(&report.statistics())
    );
    if let Some(results) = &observer.results {
        println!("\nResults saved to {}", results.path().display());
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    let config = ConfigLoader::load(cli.config.as_deref())?;
    check_issues("config", &config.validate())?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting llm-debate");
    let mut config = load_config(&cli)?;
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }

    let debate_path = cli.debate.as_deref().context("A debate file is required")?;
    let debate = DebateFile::load(debate_path)?;

    // === Dependency Injection ===
    let gateway: Arc<dyn LlmGateway> = Arc::new(OpenAiCompatGateway::new(
        config.backend.base_url.clone(),
        config.backend.api_key.clone(),
        Duration::from_secs(config.backend.timeout_secs),
    )?);

    let selection = select_models(&cli, &config.backend, gateway.as_ref()).await?;
    check_issues(
        &debate_path.display().to_string(),
        &debate.validate(selection.assigns_models()),
    )?;

    let runs = cli.runs.unwrap_or(config.debate.runs);
    if runs == 0 {
        bail!("At least one run is required");
    }

    let output = OutputConfig {
        color: config.output.color && !cli.no_color,
        show_thoughts: config.output.show_thoughts && !cli.no_thoughts,
        ..OutputConfig::default()
    }
    .with_line_width(
        debate
            .line_width
            .or(config.output.line_width)
            .unwrap_or(DEFAULT_LINE_WIDTH),
    );

    let transcript_dir = if cli.no_transcript {
        None
    } else {
        cli.transcript_dir.clone().or(config.output.transcript_dir.clone())
    };

    let session = Session {
        spec: debate.to_spec(cli.turns.or(config.debate.turns)),
        stem: debate.stem().to_string(),
        output,
        quiet: cli.quiet,
        transcript_dir,
        started: Local::now(),
    };

    let mut picker = PersonaPicker::new(&debate, selection);
    if let Some(seed) = cli.seed {
        picker = picker.with_seed(seed);
    }

    if runs == 1 {
        run_single(&session, gateway, &mut picker).await
    } else {
        run_batch(&session, gateway, &mut picker, runs).await
    }
}
