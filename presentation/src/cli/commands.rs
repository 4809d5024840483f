//! CLI command definitions

use agora_domain::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for simulation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Colored per-topology report
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for agora
#[derive(Parser, Debug)]
#[command(name = "agora")]
#[command(author, version, about = "Networked agents debate math problems toward consensus")]
#[command(long_about = r#"
Agora wires agents of different capability into a network and lets
neighbours debate until every active pair agrees.

For each topology and problem:
1. Solve: every agent answers independently
2. Debate: disagreeing neighbours exchange messages and update their answers
3. Score: each final answer is graded against the reference

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./agora.toml        Project-level config
3. ~/.config/agora/config.toml   Global config

Example:
  agora --dataset gsm8k_test.jsonl --limit 20
  agora -t chain -t star --size 7 --problem "What is 17 * 3?" --reference 51
  agora --dataset gsm8k_test.jsonl -o json > report.json
"#)]
pub struct Cli {
    /// Single problem to simulate instead of a dataset
    #[arg(long, value_name = "TEXT", requires = "reference", conflicts_with = "dataset")]
    pub problem: Option<String>,

    /// Reference answer for --problem
    #[arg(long, value_name = "ANSWER", requires = "problem")]
    pub reference: Option<String>,

    /// GSM8K-style JSONL dataset
    #[arg(short, long, value_name = "PATH")]
    pub dataset: Option<PathBuf>,

    /// Use only the first N dataset problems
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Topology presets to compare (can be specified multiple times)
    #[arg(short, long, value_name = "PRESET")]
    pub topology: Vec<String>,

    /// Agents per preset topology
    #[arg(long, value_name = "N")]
    pub size: Option<u32>,

    /// Seed for the random topology
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rounds per pairwise debate
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<u32>,

    /// Total rounds an agent may debate before going inactive
    #[arg(long, value_name = "N")]
    pub round_ceiling: Option<u32>,

    /// Sweep cap per problem (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub max_sweeps: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
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

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Record every debate event as JSONL
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_repeated_topologies() {
        let cli = Cli::parse_from(["agora", "-t", "chain", "--topology", "star", "-o", "json"]);
        assert_eq!(cli.topology, vec!["chain", "star"]);
        assert_eq!(cli.output.map(OutputFormat::from), Some(OutputFormat::Json));
    }

    #[test]
    fn test_problem_requires_reference() {
        assert!(Cli::try_parse_from(["agora", "--problem", "1 + 1"]).is_err());
        let cli =
            Cli::try_parse_from(["agora", "--problem", "1 + 1", "--reference", "2"]).unwrap();
        assert_eq!(cli.reference.as_deref(), Some("2"));
    }

    #[test]
    fn test_problem_conflicts_with_dataset() {
        let result = Cli::try_parse_from([
            "agora",
            "--problem",
            "1 + 1",
            "--reference",
            "2",
            "--dataset",
            "test.jsonl",
        ]);
        assert!(result.is_err());
    }
}
