//! Build and check command implementations

use std::path::Path;

use colored::Colorize;

use registry_core::Pipeline;

use crate::commands::resolve_layout;
use crate::error::Result;

/// Run the build command
///
/// Validates the registry and writes both export artifacts atomically.
pub fn run_build(root: &Path) -> Result<()> {
    println!("{} Building registry exports...", "=>".blue().bold());

    let pipeline = Pipeline::new(resolve_layout(root)?);
    let outcome = pipeline.build()?;

    println!(
        "{} Wrote {} entr{} to:",
        "OK".green().bold(),
        outcome.entries,
        if outcome.entries == 1 { "y" } else { "ies" }
    );
    for path in &outcome.written {
        println!("   {} {}", "+".green(), path.to_string().cyan());
    }

    Ok(())
}

/// Run the build command in check mode
///
/// Regenerates the artifacts in memory and compares them against the
/// committed ones. Exits non-zero on drift; writes nothing.
pub fn run_check(root: &Path) -> Result<()> {
    println!("{} Checking registry for drift...", "=>".blue().bold());

    let pipeline = Pipeline::new(resolve_layout(root)?);
    let entries = pipeline.check()?;

    println!(
        "{} Committed artifacts match the canonical sources ({} entries).",
        "OK".green().bold(),
        entries
    );

    Ok(())
}
