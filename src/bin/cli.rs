use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use directions_runner::prelude::*;
use directions_runner::sequence::runner_config::DelayMode;
use directions_runner::ConsoleReporter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "directions-runner")]
#[command(about = "Run step-by-step directions asynchronously", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a runner.yaml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to a YAML or JSON file with the list of steps
    #[arg(short, long, global = true)]
    steps: Option<PathBuf>,

    /// Fixed delay before each step, in milliseconds
    #[arg(short, long, global = true, conflicts_with = "random")]
    delay_ms: Option<u64>,

    /// Use a random delay between the configured bounds
    #[arg(short, long, global = true)]
    random: bool,

    /// Print report events as JSON lines
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single step
    Step {
        /// Zero-based index of the step
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Run steps independently; they finish in any order
    Scatter {
        /// Step indices (default: every step)
        #[arg(value_name = "INDEX")]
        indices: Vec<usize>,
    },

    /// Run steps one after another, stopping at the first failure
    Chain {
        /// Step indices (default: every step)
        #[arg(value_name = "INDEX")]
        indices: Vec<usize>,
    },

    /// Run steps concurrently and print all their values
    All {
        /// Step indices (default: every step)
        #[arg(value_name = "INDEX")]
        indices: Vec<usize>,
    },

    /// Fetch launches and print their mission patch image URLs
    Patches {
        /// Number of launches to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "directions_runner=debug"
    } else {
        "directions_runner=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %e, "Runner failed");
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = load_config(&cli)?;
    let runner = StepRunner::from_config(&config)
        .context("Invalid delay configuration")?
        .reporter(ConsoleReporter::new().json(cli.json));

    match cli.command {
        Commands::Step { index } => run_step(&runner, index).await,
        Commands::Scatter { indices } => {
            let indices = or_all(indices, runner.sequence());
            run_scatter(&runner, indices).await
        }
        Commands::Chain { indices } => {
            let indices = or_all(indices, runner.sequence());
            run_chain(&runner, indices).await
        }
        Commands::All { indices } => {
            let indices = or_all(indices, runner.sequence());
            run_all(&runner, indices, cli.json).await
        }
        Commands::Patches { limit } => {
            run_patches(&config, limit.or(config.launches.limit)).await
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<RunnerConfig> {
    let mut config = match &cli.config {
        Some(path) => RunnerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RunnerConfig::default(),
    };

    if let Some(path) = &cli.steps {
        let steps = SequenceLoader::load_file(path)
            .with_context(|| format!("Failed to load steps {}", path.display()))?;
        config.steps = Some(steps);
    }

    if cli.random {
        config.delay.mode = DelayMode::Random;
    }
    if let Some(ms) = cli.delay_ms {
        config.delay.mode = DelayMode::Fixed;
        config.delay.fixed_ms = ms;
    }

    tracing::debug!(
        steps = config.sequence().len(),
        mode = ?config.delay.mode,
        "Configuration loaded"
    );
    Ok(config)
}

fn or_all(indices: Vec<usize>, sequence: &StepSequence) -> Vec<usize> {
    if indices.is_empty() {
        sequence.indices().collect()
    } else {
        indices
    }
}

async fn run_step(runner: &StepRunner, index: usize) -> anyhow::Result<bool> {
    match runner.run_step(index).await {
        Ok(_) => Ok(true),
        Err(e) => {
            println!("{}", e);
            Ok(false)
        }
    }
}

async fn run_scatter(runner: &StepRunner, indices: Vec<usize>) -> anyhow::Result<bool> {
    let mut success = true;
    runner
        .run_independent_with(indices, |index, outcome| {
            if let StepOutcome::Failure(e) = outcome {
                tracing::debug!(index, "Independent step failed");
                println!("{}", e);
                success = false;
            }
        })
        .await;
    Ok(success)
}

async fn run_chain(runner: &StepRunner, indices: Vec<usize>) -> anyhow::Result<bool> {
    let started = tokio::time::Instant::now();
    let result = runner
        .chain(indices)
        .on_error(|e| tracing::error!(index = e.index(), "Chain stopped: {}", e))
        .finally(move || {
            tracing::debug!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Chain settled"
            )
        })
        .run()
        .await;

    tracing::info!(
        run_id = %result.run_id,
        completed = result.completed.len(),
        "Chain finished"
    );
    Ok(result.success)
}

async fn run_all(runner: &StepRunner, indices: Vec<usize>, json: bool) -> anyhow::Result<bool> {
    match runner.run_all(indices).await {
        Ok(values) => {
            if json {
                println!("{}", serde_json::json!({ "values": values }));
            } else {
                println!("values: {:?}", values);
            }
            Ok(true)
        }
        Err(e) => {
            println!("{}", e);
            Ok(false)
        }
    }
}

async fn run_patches(config: &RunnerConfig, limit: Option<usize>) -> anyhow::Result<bool> {
    let source = HttpLaunchSource::from_config(&config.launches)?;

    match mission_patches(&source, limit).await {
        Ok(patches) => {
            for patch in patches {
                println!("{}", patch);
            }
            Ok(true)
        }
        Err(e) => {
            println!("Something went wrong! {}", e);
            Ok(false)
        }
    }
}
