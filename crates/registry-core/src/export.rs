//! Export artifact generation
//!
//! A pure function from validated entries to the two JSON artifact bodies.
//! Identical input always yields byte-identical output: entries are sorted
//! by identifier, field order is fixed by the entry type, and no wall-clock
//! data is embedded.

use serde::{Deserialize, Serialize};

use registry_model::ProductEntry;

/// The versioned export shape: a wrapper object around the entry list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedExport {
    pub schema_version: String,
    pub products: Vec<ProductEntry>,
}

/// Rendered artifact bodies, ready for atomic write or drift comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSet {
    /// Bare ordered list (legacy shape).
    pub legacy: String,
    /// Wrapper object with `schema_version` (versioned shape).
    pub versioned: String,
}

/// Render both export artifacts from validated entries.
///
/// `schema_version` is the version declared by the schema document; the
/// versioned artifact must carry exactly that value.
pub fn generate(entries: &[ProductEntry], schema_version: &str) -> ExportSet {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.toil_id.cmp(&b.toil_id));

    let legacy = render_json(&sorted);
    let versioned = render_json(&VersionedExport {
        schema_version: schema_version.to_string(),
        products: sorted,
    });

    ExportSet { legacy, versioned }
}

fn render_json<T: Serialize>(value: &T) -> String {
    // Serialization of these shapes cannot fail: no maps with non-string
    // keys, no non-finite floats.
    let mut body = serde_json::to_string_pretty(value).expect("export serialization");
    body.push('\n');
    body
}
