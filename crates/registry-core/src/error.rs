//! Error types for registry-core

use std::path::PathBuf;

use registry_model::Violation;

/// Result type for registry-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the registry pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] registry_fs::Error),

    #[error(transparent)]
    Parse(#[from] registry_parse::Error),

    #[error(transparent)]
    Model(#[from] registry_model::Error),

    /// Aggregate cross-validation failure carrying every violation found.
    #[error("Registry validation failed with {} violation(s)", violations.len())]
    Validation { violations: Vec<Violation> },

    #[error("Schema violation at {path}: {constraint}")]
    SchemaViolation { path: String, constraint: String },

    #[error("Drift detected in {artifact}:\n{diff}")]
    DriftDetected { artifact: String, diff: String },

    #[error("Invalid candidate pack at {path}: {message}")]
    CandidatePack { path: PathBuf, message: String },
}

impl Error {
    pub fn schema_violation(path: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::SchemaViolation {
            path: path.into(),
            constraint: constraint.into(),
        }
    }
}
