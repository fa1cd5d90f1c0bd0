//! Declared schema document
//!
//! `schema/product_index.schema.json` declares the contract the versioned
//! export must satisfy: its version string, the required per-entry fields,
//! the identifier pattern, and the enumerated status and license-state
//! values. The schema validator checks exports against this document; the
//! export generator stamps its `schema_version` into the versioned shape.

use std::path::Path;

use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Parsed schema document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Declared export version, a semver string.
    pub schema_version: String,
    /// Fields every export entry must carry.
    pub required_entry_fields: Vec<String>,
    /// Anchored regex every `toil_id` must match.
    pub toil_id_pattern: String,
    /// Recognized lifecycle status values.
    pub status_values: Vec<String>,
    /// Recognized license states.
    pub license_states: Vec<String>,
}

impl SchemaDocument {
    /// Parse a schema document from JSON text.
    ///
    /// The declared version must parse as semver and the identifier
    /// pattern must compile; a schema document that fails either is
    /// rejected up front rather than surfacing as spurious violations
    /// during export validation.
    pub fn from_json(path: &Path, content: &str) -> Result<Self> {
        let schema: SchemaDocument =
            serde_json::from_str(content).map_err(|e| Error::SchemaParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Version::parse(&schema.schema_version).map_err(|e| Error::SchemaVersion {
            path: path.to_path_buf(),
            version: schema.schema_version.clone(),
            message: e.to_string(),
        })?;

        Regex::new(&schema.toil_id_pattern).map_err(|e| Error::SchemaParse {
            path: path.to_path_buf(),
            message: format!("invalid toil_id_pattern: {e}"),
        })?;

        Ok(schema)
    }

    /// The compiled identifier pattern.
    pub fn id_pattern(&self) -> Regex {
        // Compilation was checked in from_json.
        Regex::new(&self.toil_id_pattern).unwrap()
    }
}
