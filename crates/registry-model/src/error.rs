//! Error types for registry-model

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid TOIL ID format: {id:?}")]
    InvalidIdFormat { id: String },

    #[error("Unrecognized status: {status:?}")]
    InvalidStatus { status: String },

    #[error("Failed to parse schema document at {path}: {message}")]
    SchemaParse { path: PathBuf, message: String },

    #[error("Schema document at {path} declares invalid version {version:?}: {message}")]
    SchemaVersion {
        path: PathBuf,
        version: String,
        message: String,
    },
}
