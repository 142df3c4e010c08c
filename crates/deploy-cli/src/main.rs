//! compose-deploy CLI
//!
//! Resolves deployment configuration for checked-out repositories and
//! assembles deployment requests from the command line.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose { "debug" } else { "warn" };
    deploy_core::logging::init(directive)
        .map_err(|e| CliError::user(format!("failed to initialize logging: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Commands::Resolve { dir, name } => commands::run_resolve(&dir, name.as_deref()),
        Commands::Validate { dir } => commands::run_validate(&dir),
        Commands::Assemble(args) => commands::run_assemble(&args),
    }
}
