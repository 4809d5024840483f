//! CLI entrypoint for agora
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use agora_application::{
    ConversationLogger, DebateProgressNotifier, NoProgress, RunSimulationInput,
    RunSimulationUseCase,
};
use agora_domain::{OutputFormat, Problem, ProblemRecord};
use agora_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, LlmReasoner, ModelRouter,
    OpenAiChatClient, load_gsm8k,
};
use agora_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let _log_guard = init_logging(&cli)?;

    info!("Starting agora");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&cli, &mut config);
    config.validate().context("Invalid configuration")?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    let params = config.simulation.to_debate_params()?;
    let topologies = config.topologies.to_specs(&params.rank_range)?;
    let problems = load_problems(&cli, &config)?;

    // === Dependency Injection ===
    let client = OpenAiChatClient::from_config(&config.reasoner)?;
    let router = ModelRouter::from_config(&config.reasoner);
    let reasoner = Arc::new(LlmReasoner::new(
        client,
        router,
        params.rank_range.max(),
    ));

    let mut use_case = RunSimulationUseCase::new(reasoner);
    if let Some(path) = cli
        .conversation_log
        .clone()
        .or_else(|| config.logging.conversation_log.clone())
        && let Some(logger) = JsonlConversationLogger::new(&path)
    {
        info!("Recording debates to {}", path.display());
        let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
        use_case = use_case.with_conversation_logger(logger);
    }

    let format = config.output.format.unwrap_or_default();
    let progress: Box<dyn DebateProgressNotifier> =
        match (config.output.show_progress, std::io::stderr().is_terminal(), format) {
            (false, _, _) => Box::new(NoProgress),
            (true, true, _) => Box::new(ProgressReporter::new()),
            // Keep stdout clean for JSON consumers
            (true, false, OutputFormat::Json) => Box::new(NoProgress),
            (true, false, OutputFormat::Text) => Box::new(SimpleProgress),
        };

    let input = RunSimulationInput::new(topologies, problems).with_params(params);
    let report = use_case
        .execute_with_progress(input, progress.as_ref())
        .await?;

    let output = match format {
        OutputFormat::Text => ConsoleFormatter::format(&report),
        OutputFormat::Json => ConsoleFormatter::format_json(&report),
    };
    println!("{}", output);

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over `-v`; with
/// `--log-file` diagnostics go to that file through a background writer.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(directory).with_context(|| {
                format!("Could not create log directory {}", directory.display())
            })?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// CLI flags take precedence over every config source.
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(max_rounds) = cli.max_rounds {
        config.simulation.max_rounds_per_pair = max_rounds;
    }
    if let Some(ceiling) = cli.round_ceiling {
        config.simulation.round_ceiling = ceiling;
    }
    if let Some(max_sweeps) = cli.max_sweeps {
        config.simulation.max_sweeps = max_sweeps;
    }
    if !cli.topology.is_empty() {
        config.topologies.presets = cli.topology.clone();
        // Explicit presets replace configured custom networks too
        config.topologies.custom.clear();
    }
    if let Some(size) = cli.size {
        config.topologies.size = size;
    }
    if let Some(seed) = cli.seed {
        config.topologies.seed = seed;
    }
    if let Some(path) = &cli.dataset {
        config.dataset.path = Some(path.clone());
    }
    if let Some(limit) = cli.limit {
        config.dataset.limit = Some(limit);
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
    if cli.quiet {
        config.output.show_progress = false;
    }
}

/// A single `--problem` wins; otherwise the configured dataset is loaded.
fn load_problems(cli: &Cli, config: &FileConfig) -> Result<Vec<ProblemRecord>> {
    if let (Some(problem), Some(reference)) = (&cli.problem, &cli.reference) {
        let problem = Problem::new(problem.as_str())?;
        return Ok(vec![ProblemRecord::new(1, problem, reference.as_str())]);
    }

    let Some(path) = &config.dataset.path else {
        bail!("No problems given. Use --problem with --reference, or --dataset <PATH>.");
    };
    let problems = load_gsm8k(path, config.dataset.limit)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;
    if problems.is_empty() {
        bail!("Dataset {} contains no problems", path.display());
    }
    Ok(problems)
}
