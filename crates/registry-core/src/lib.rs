//! Build/validate pipeline for the TOIL product registry
//!
//! Wires the index parser and record reader into cross-validation, export
//! generation, schema checking, and drift detection, all over one read-only
//! snapshot of the working tree taken at run start.

pub mod candidate;
pub mod drift;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod schema;
pub mod validate;

pub use candidate::{CandidateOutputs, CandidateReport, CandidateSyncGenerator};
pub use error::{Error, Result};
pub use export::{ExportSet, VersionedExport, generate};
pub use pipeline::{BuildOutcome, Pipeline, RegistrySnapshot, ValidateOutcome};
pub use validate::cross_validate;
