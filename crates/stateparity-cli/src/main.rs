//! stateparity CLI - reconcile device telemetry records against command output.

use clap::{Parser, Subcommand};
use stateparity_core::ReconciliationEngine;
use stateparity_store::PathReconciler;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;

use commands::{compare, normalize, paths};
use config::Settings;
use error::CliError;

#[derive(Parser)]
#[command(name = "stateparity")]
#[command(about = "Reconcile structured telemetry records against device command output")]
struct Cli {
    /// Config file (default: $STATEPARITY_CONFIG, else built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Fixture file to use instead of the configured or built-in fixtures
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the two records of a telemetry path
    Compare {
        /// Telemetry path (prompted for on stdin if omitted)
        path: Option<String>,
        /// Compare every known path
        #[arg(long, conflicts_with = "path")]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Exit with error code if any field is missing or mismatched
        #[arg(long)]
        strict: bool,
    },
    /// List known telemetry paths and their commands
    Paths {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the normalized form of values
    Normalize {
        /// Values to normalize
        #[arg(required = true)]
        values: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load(cli.config.as_deref())?;
    init_tracing(&settings.logging.level);
    debug!(?settings, "loaded settings");

    match cli.command {
        Commands::Compare {
            path,
            all,
            json,
            strict,
        } => {
            let fixtures = settings.fixture_set(cli.fixtures.as_deref())?;
            let engine = ReconciliationEngine::new(settings.engine.clone());
            let reconciler = PathReconciler::new(&fixtures, &fixtures, engine);
            compare::run(&reconciler, path, all, json, strict)
        }
        Commands::Paths { json } => {
            let fixtures = settings.fixture_set(cli.fixtures.as_deref())?;
            paths::run(&fixtures, json)
        }
        Commands::Normalize { values } => {
            normalize::run(&values);
            Ok(())
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the configured level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
