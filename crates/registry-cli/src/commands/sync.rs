//! Candidate sync command implementation

use std::path::Path;

use colored::Colorize;

use registry_core::pipeline::RegistrySnapshot;
use registry_core::{CandidateOutputs, CandidateSyncGenerator};
use registry_fs::NormalizedPath;

use crate::commands::resolve_layout;
use crate::error::{CliError, Result};

/// Run the sync command
///
/// Ingests an external pack source and writes review-only candidate
/// artifacts. The canonical index is never written.
pub fn run_sync(root: &Path, source: &Path) -> Result<()> {
    println!(
        "{} Generating candidate artifacts from {}...",
        "=>".blue().bold(),
        source.display()
    );

    if !source.is_dir() {
        return Err(CliError::user(format!(
            "candidate source is not a directory: {}",
            source.display()
        )));
    }

    let layout = resolve_layout(root)?;
    let schema = RegistrySnapshot::load_schema(&layout)?;
    let generator = CandidateSyncGenerator::new(CandidateOutputs::from_layout(&layout));
    let report = generator.run(&NormalizedPath::new(source), &schema)?;

    println!(
        "{} {} candidate(s) rendered for review:",
        "OK".green().bold(),
        report.candidates
    );
    for path in &report.written {
        println!("   {} {}", "+".green(), path.to_string().cyan());
    }

    Ok(())
}
