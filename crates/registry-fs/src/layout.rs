//! Registry working-tree layout
//!
//! All components resolve paths through one `RegistryLayout` value computed
//! at run start, never through ambient state.

use crate::NormalizedPath;
use crate::config::LayoutOverrides;

/// Canonical index file, relative to the registry root.
pub const DEFAULT_INDEX_FILE: &str = "index/TOIL_Product_Index.md";
/// Per-identifier record directory.
pub const DEFAULT_RECORDS_DIR: &str = "records";
/// Generated export directory.
pub const DEFAULT_EXPORTS_DIR: &str = "exports";
/// Schema document directory.
pub const DEFAULT_SCHEMA_DIR: &str = "schema";
/// Review-only candidate artifact directory, inside the exports dir.
pub const CANDIDATES_SUBDIR: &str = "candidates";

/// Legacy export file name (bare list shape).
pub const LEGACY_EXPORT_FILE: &str = "product_index.json";
/// Versioned export file name (wrapper object shape).
pub const VERSIONED_EXPORT_FILE: &str = "product_index_v1.json";
/// Declared schema document file name.
pub const SCHEMA_FILE: &str = "product_index.schema.json";
/// Review-only candidate table file name.
pub const CANDIDATE_TABLE_FILE: &str = "CANDIDATE_INDEX.md";

/// Resolved paths of one registry working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryLayout {
    root: NormalizedPath,
    index_file: NormalizedPath,
    records_dir: NormalizedPath,
    exports_dir: NormalizedPath,
    schema_dir: NormalizedPath,
}

impl RegistryLayout {
    /// Layout with default paths under `root`.
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            index_file: root.join(DEFAULT_INDEX_FILE),
            records_dir: root.join(DEFAULT_RECORDS_DIR),
            exports_dir: root.join(DEFAULT_EXPORTS_DIR),
            schema_dir: root.join(DEFAULT_SCHEMA_DIR),
            root,
        }
    }

    /// Layout with config overrides applied on top of the defaults.
    pub fn with_overrides(root: NormalizedPath, overrides: &LayoutOverrides) -> Self {
        let mut layout = Self::new(root.clone());
        if let Some(index) = &overrides.index {
            layout.index_file = root.join(index);
        }
        if let Some(records) = &overrides.records {
            layout.records_dir = root.join(records);
        }
        if let Some(exports) = &overrides.exports {
            layout.exports_dir = root.join(exports);
        }
        if let Some(schema) = &overrides.schema {
            layout.schema_dir = root.join(schema);
        }
        layout
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// The canonical index document.
    pub fn index_file(&self) -> &NormalizedPath {
        &self.index_file
    }

    /// Directory of per-identifier record documents.
    pub fn records_dir(&self) -> &NormalizedPath {
        &self.records_dir
    }

    pub fn exports_dir(&self) -> &NormalizedPath {
        &self.exports_dir
    }

    /// Committed legacy export (bare list).
    pub fn legacy_export(&self) -> NormalizedPath {
        self.exports_dir.join(LEGACY_EXPORT_FILE)
    }

    /// Committed versioned export (wrapper object).
    pub fn versioned_export(&self) -> NormalizedPath {
        self.exports_dir.join(VERSIONED_EXPORT_FILE)
    }

    /// Declared schema document.
    pub fn schema_file(&self) -> NormalizedPath {
        self.schema_dir.join(SCHEMA_FILE)
    }

    /// Candidate artifact directory (never overlaps the canonical paths).
    pub fn candidates_dir(&self) -> NormalizedPath {
        self.exports_dir.join(CANDIDATES_SUBDIR)
    }
}
