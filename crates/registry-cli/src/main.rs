//! TOIL Registry CLI
//!
//! The command-line interface for the registry build/validate pipeline.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        report_error(&e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Build { check } => {
            if check {
                commands::run_check(&root)
            } else {
                commands::run_build(&root)
            }
        }
        Commands::Validate => commands::run_validate(&root),
        Commands::Sync { source } => commands::run_sync(&root, &source),
    }
}

/// Print the failure with its itemized violation list, if any.
fn report_error(err: &CliError) {
    eprintln!("{}: {}", "error".red().bold(), err);
    if let CliError::Core(registry_core::Error::Validation { violations }) = err {
        for violation in violations {
            eprintln!("   {} {}", "!".red(), violation);
        }
    }
}
