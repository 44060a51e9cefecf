//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for llm-debate
#[derive(Parser, Debug)]
#[command(name = "llm-debate")]
#[command(author, version, about = "Run structured debates between LLM personas")]
#[command(long_about = r#"
llm-debate stages a debate between two LLM personas, optionally scored and
judged by a third.

The debate runs in fixed phases:
1. Planning:  both debaters privately plan their case
2. Opening:   the first speaker delivers an opening statement
3. Turns:     the debaters alternate, the judge scoring every turn
4. Verdict:   the judge names a winner and scores both debaters

Debaters and judges are drawn at random from the persona pools of a YAML
debate file, and each is given a random model from those the backend lists
unless --model or --persona-models says otherwise. With a run count above 1, the debate is repeated and
statistics over all runs are printed at the end.

Configuration files are loaded from (in priority order):
1. DEBATE_* environment variables
2. --config <path>     Explicit config file
3. ./debate.toml       Project-level config
4. ~/.config/llm-debate/config.toml   Global config

Example:
  llm-debate debates/can_ai_think.yaml
  llm-debate debates/can_ai_think.yaml 20 --model llama3.1:8b
  llm-debate debates/cars.yaml --persona-models --seed 7
"#)]
pub struct Cli {
    /// Path to the debate definition (YAML)
    #[arg(required_unless_present = "show_config")]
    pub debate: Option<PathBuf>,

    /// Number of debate runs (overrides `debate.runs`)
    pub runs: Option<usize>,

    /// Force every participant to use this model
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Keep the model each persona names instead of drawing one from the backend
    #[arg(long, conflicts_with = "model")]
    pub persona_models: bool,

    /// Number of debater turns, opening included (overrides the debate file)
    #[arg(short, long, value_name = "N")]
    pub turns: Option<usize>,

    /// Seed for persona and model draws
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Backend base URL (overrides `backend.base_url`)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory for JSONL transcripts (overrides `output.transcript_dir`)
    #[arg(long, value_name = "DIR")]
    pub transcript_dir: Option<PathBuf>,

    /// Do not write JSONL transcripts
    #[arg(long)]
    pub no_transcript: bool,

    /// Hide private planning and reflection
    #[arg(long)]
    pub no_thoughts: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print the verdict of each run and the final statistics
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_debate_and_runs() {
        let cli = Cli::try_parse_from(["llm-debate", "cars.yaml", "12", "-vv", "--seed", "3"])
            .unwrap();
        assert_eq!(cli.debate, Some(PathBuf::from("cars.yaml")));
        assert_eq!(cli.runs, Some(12));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.seed, Some(3));
        assert!(!cli.quiet);
    }

    #[test]
    fn test_debate_required_unless_show_config() {
        assert!(Cli::try_parse_from(["llm-debate"]).is_err());
        let cli = Cli::try_parse_from(["llm-debate", "--show-config"]).unwrap();
        assert!(cli.debate.is_none());
    }

    #[test]
    fn test_model_conflicts_with_persona_models() {
        assert!(
            Cli::try_parse_from(["llm-debate", "d.yaml", "-m", "llama3", "--persona-models"])
                .is_err()
        );
        let cli = Cli::try_parse_from(["llm-debate", "d.yaml"]).unwrap();
        assert!(!cli.persona_models);
        assert!(cli.model.is_none());
    }
}
