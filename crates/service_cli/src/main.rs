//! odts CLI entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use service_cli::commands;
use service_cli::commands::run::parse_point;
use service_cli::prelude::*;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Newton's-method optimiser with audit trail export
#[derive(Parser)]
#[command(name = "odts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one optimisation
    Run {
        /// Starting point, comma separated (e.g. 0.3,0.8)
        #[arg(long, allow_hyphen_values = true)]
        x0: Option<String>,

        /// Iteration bound
        #[arg(short, long = "max-iter")]
        max_iter: Option<usize>,

        /// Objective to minimise
        #[arg(long, value_enum)]
        objective: Option<ObjectiveKind>,

        /// Output directory for audit artefacts
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Skip writing audit artefacts
        #[arg(long)]
        no_export: bool,
    },

    /// Check configuration and optimiser health
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(&cli.config)?.with_env_override();

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    info!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Run {
            x0,
            max_iter,
            objective,
            output_dir,
            no_export,
        } => {
            let overrides = RunOverrides {
                x0: x0.as_deref().map(parse_point).transpose()?,
                max_iterations: max_iter,
                objective,
                output_dir,
                no_export,
            };
            commands::run::run(config, &overrides)?;
        }
        Commands::Check => commands::check::run(&config)?,
    }

    Ok(())
}
