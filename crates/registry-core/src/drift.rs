//! Drift detection between generated and committed artifacts
//!
//! Compares freshly generated artifact bodies byte-for-byte against the
//! committed files. Runs in check mode only and performs no writes; the
//! diff in the error is rendered line-by-line so ordering and field-value
//! divergences are visible directly.

use similar::TextDiff;

use registry_fs::{RegistryLayout, io};

use crate::error::{Error, Result};
use crate::export::ExportSet;

/// Compare generated artifacts against the committed ones.
///
/// # Errors
///
/// `DriftDetectedError` naming the first divergent artifact, with a
/// unified diff (committed vs generated). A missing committed artifact is
/// drift too.
pub fn check_drift(layout: &RegistryLayout, fresh: &ExportSet) -> Result<()> {
    let artifacts = [
        (layout.legacy_export(), fresh.legacy.as_str()),
        (layout.versioned_export(), fresh.versioned.as_str()),
    ];

    for (path, generated) in artifacts {
        if !path.is_file() {
            return Err(Error::DriftDetected {
                artifact: path.to_string(),
                diff: "committed artifact is missing".to_string(),
            });
        }
        let committed = io::read_text(&path)?;
        if committed != generated {
            let diff = TextDiff::from_lines(committed.as_str(), generated)
                .unified_diff()
                .header("committed", "generated")
                .to_string();
            return Err(Error::DriftDetected {
                artifact: path.to_string(),
                diff,
            });
        }
        tracing::debug!(artifact = %path, "artifact matches");
    }

    Ok(())
}
