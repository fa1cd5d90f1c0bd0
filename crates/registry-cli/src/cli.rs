//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// TOIL Registry - build, validate, and check the product registry
#[derive(Parser, Debug)]
#[command(name = "registry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Registry root (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate the registry and write both export artifacts
    ///
    /// With --check, regenerates the artifacts in memory and compares
    /// them byte-for-byte against the committed ones instead of writing.
    Build {
        /// Check for drift against committed artifacts; write nothing
        #[arg(long)]
        check: bool,
    },

    /// Run cross-validation and the schema check without writing
    Validate,

    /// Generate review-only candidate artifacts from an external source
    ///
    /// Never touches the canonical index; all output goes to the
    /// candidate paths under the exports directory.
    Sync {
        /// Directory of proposed product packs
        #[arg(short, long)]
        source: PathBuf,
    },
}
