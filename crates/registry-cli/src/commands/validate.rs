//! Validate command implementation

use std::path::Path;

use colored::Colorize;

use registry_core::Pipeline;

use crate::commands::resolve_layout;
use crate::error::Result;

/// Run the validate command
///
/// Runs the cross-validator and the schema validator without writing.
/// The schema check targets the committed versioned export when one
/// exists, otherwise a freshly generated body.
pub fn run_validate(root: &Path) -> Result<()> {
    println!("{} Validating registry...", "=>".blue().bold());

    let pipeline = Pipeline::new(resolve_layout(root)?);
    let outcome = pipeline.validate()?;

    let target = if outcome.checked_committed {
        "committed versioned export"
    } else {
        "freshly generated export"
    };
    println!(
        "{} {} entries valid; schema check passed against the {}.",
        "OK".green().bold(),
        outcome.entries,
        target
    );

    Ok(())
}
