//! Core data model of the TOIL product registry.
//!
//! Holds the identifier and entry types shared by the parser, validator,
//! and export generator, plus the violation taxonomy and the declared
//! schema document.

pub mod entry;
pub mod error;
pub mod id;
pub mod schema;
pub mod violation;

pub use entry::{ProductEntry, Status};
pub use error::{Error, Result};
pub use id::ToilId;
pub use schema::SchemaDocument;
pub use violation::{Violation, ViolationKind};
