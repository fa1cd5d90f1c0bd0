//! Error types for registry-parse

use std::path::PathBuf;

/// Result type for registry-parse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing the index or record documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] registry_fs::Error),

    #[error(
        "More than one qualifying index table: header rows at lines {first_line} and {second_line}"
    )]
    DuplicateTable { first_line: usize, second_line: usize },

    #[error("No qualifying index table found")]
    TableNotFound,

    #[error("Malformed row at line {line}: expected {expected} cells, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Record {path} is missing required field {field:?}")]
    RecordFieldMissing { path: PathBuf, field: String },

    #[error("Records {first} and {second} both declare identifier {toil_id}")]
    DuplicateRecordFile {
        toil_id: String,
        first: PathBuf,
        second: PathBuf,
    },
}
