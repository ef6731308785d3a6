//! Ledger CLI - replay account operations from the terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ledger_core::OperationResult;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{config, replay};

/// Ledger - single-currency account ledger
#[derive(Parser)]
#[command(name = "ledger", version, about, long_about = None)]
struct Cli {
    /// Show debug logs (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply operations from a CSV file to a fresh account
    Replay {
        /// Path to CSV file (columns: id,type,amount[,currency])
        file: PathBuf,
        /// Account ID to open
        #[arg(long, default_value_t = 1)]
        account_id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change account settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    let json = cli.wants_json();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if json => {
            output::json(&failure(&e));
            ExitCode::FAILURE
        }
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

impl Cli {
    fn wants_json(&self) -> bool {
        match &self.command {
            Commands::Replay { json, .. } => *json,
            Commands::Config {
                command: config::ConfigCommands::Show { json },
            } => *json,
            Commands::Config { .. } => false,
        }
    }
}

/// JSON envelope for a failed command; ledger errors carry their kind
fn failure(e: &anyhow::Error) -> OperationResult<()> {
    let message = format!("{:#}", e);
    match e.downcast_ref::<ledger_core::Error>() {
        Some(err) => {
            let mut result = OperationResult::from(Err::<(), _>(err.clone()));
            result.error = Some(message);
            result
        }
        None => OperationResult::fail(message),
    }
}

/// Warnings only by default; RUST_LOG or --verbose raise the level
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay { file, account_id, json } => replay::run(&file, account_id, json),
        Commands::Config { command } => config::run(command),
    }
}
