//! The registry pipeline
//!
//! A run takes one read-only snapshot of the working tree (index text,
//! record store, schema document), then validates, generates, and either
//! writes artifacts atomically (build), compares against the committed
//! ones (check), or stops after validation (validate). Nothing is written
//! when any validation fails.

use std::collections::BTreeMap;

use registry_fs::{RegistryLayout, io};
use registry_model::{ProductEntry, SchemaDocument};
use registry_parse::{IndexTable, RecordFields, parse_index, read_records};

use crate::error::{Error, Result};
use crate::export::{self, ExportSet};
use crate::{drift, schema, validate};

/// Read-only snapshot of the canonical sources, taken at run start.
///
/// Components read from this value, never from the filesystem directly,
/// so one run sees one consistent state.
#[derive(Debug)]
pub struct RegistrySnapshot {
    /// Canonical index text; `None` when the index file does not exist.
    pub index_source: Option<String>,
    /// Record store keyed by declared identifier.
    pub records: BTreeMap<String, RecordFields>,
    /// Declared schema document.
    pub schema: SchemaDocument,
}

impl RegistrySnapshot {
    /// Load the snapshot for a layout.
    pub fn load(layout: &RegistryLayout) -> Result<Self> {
        let index_source = if layout.index_file().is_file() {
            Some(io::read_text(layout.index_file())?)
        } else {
            None
        };
        let records = read_records(layout.records_dir())?;

        let schema_path = layout.schema_file();
        let schema_text = io::read_text(&schema_path)?;
        let schema = SchemaDocument::from_json(&schema_path.to_native(), &schema_text)?;

        Ok(Self {
            index_source,
            records,
            schema,
        })
    }

    /// Load only the schema document.
    ///
    /// The candidate pipeline needs the declared version but must stay
    /// isolated from the canonical index and record store.
    pub fn load_schema(layout: &RegistryLayout) -> Result<SchemaDocument> {
        let schema_path = layout.schema_file();
        let schema_text = io::read_text(&schema_path)?;
        Ok(SchemaDocument::from_json(
            &schema_path.to_native(),
            &schema_text,
        )?)
    }

    /// Parse the index table out of the snapshot.
    ///
    /// An absent index (no file, or no qualifying table) is downgraded to
    /// an empty table only when the record store is empty too; with
    /// records present it stays a hard error.
    fn index_table(&self) -> Result<IndexTable> {
        let parsed = match &self.index_source {
            Some(source) => parse_index(source),
            None => Err(registry_parse::Error::TableNotFound),
        };
        match parsed {
            Ok(table) => Ok(table),
            Err(registry_parse::Error::TableNotFound) if self.records.is_empty() => {
                Ok(IndexTable {
                    header_line: 0,
                    rows: Vec::new(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub entries: usize,
    pub written: Vec<registry_fs::NormalizedPath>,
}

/// Outcome of a successful validate run.
#[derive(Debug, Clone)]
pub struct ValidateOutcome {
    pub entries: usize,
    /// True when the schema check ran against the committed versioned
    /// export rather than a freshly generated one.
    pub checked_committed: bool,
}

/// Single-pass batch pipeline over one registry working tree.
pub struct Pipeline {
    layout: RegistryLayout,
}

impl Pipeline {
    pub fn new(layout: RegistryLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &RegistryLayout {
        &self.layout
    }

    /// Cross-validate the snapshot into entries.
    fn validated_entries(&self, snapshot: &RegistrySnapshot) -> Result<Vec<ProductEntry>> {
        let table = snapshot.index_table()?;
        validate::cross_validate(&table, &snapshot.records)
            .map_err(|violations| Error::Validation { violations })
    }

    /// Validate and write both artifacts atomically.
    pub fn build(&self) -> Result<BuildOutcome> {
        let snapshot = RegistrySnapshot::load(&self.layout)?;
        let entries = self.validated_entries(&snapshot)?;
        let exports = self.generate_checked(&entries, &snapshot)?;

        let legacy_path = self.layout.legacy_export();
        let versioned_path = self.layout.versioned_export();
        io::write_text(&legacy_path, &exports.legacy)?;
        io::write_text(&versioned_path, &exports.versioned)?;

        tracing::info!(entries = entries.len(), "build wrote both artifacts");

        Ok(BuildOutcome {
            entries: entries.len(),
            written: vec![legacy_path, versioned_path],
        })
    }

    /// Validate, regenerate in memory, and compare against the committed
    /// artifacts. Performs no writes.
    pub fn check(&self) -> Result<usize> {
        let snapshot = RegistrySnapshot::load(&self.layout)?;
        let entries = self.validated_entries(&snapshot)?;
        let exports = self.generate_checked(&entries, &snapshot)?;
        drift::check_drift(&self.layout, &exports)?;

        tracing::info!(entries = entries.len(), "check found no drift");

        Ok(entries.len())
    }

    /// Cross-validate and schema-check without writing.
    ///
    /// The schema check runs against the committed versioned export when
    /// one exists (the CI regression case) and against a freshly generated
    /// body otherwise (the pre-commit case); the logic is identical.
    pub fn validate(&self) -> Result<ValidateOutcome> {
        let snapshot = RegistrySnapshot::load(&self.layout)?;
        let entries = self.validated_entries(&snapshot)?;

        let versioned_path = self.layout.versioned_export();
        let checked_committed = versioned_path.is_file();
        let versioned = if checked_committed {
            io::read_text(&versioned_path)?
        } else {
            export::generate(&entries, &snapshot.schema.schema_version).versioned
        };
        schema::check_versioned_export(&versioned, &snapshot.schema)?;

        Ok(ValidateOutcome {
            entries: entries.len(),
            checked_committed,
        })
    }

    fn generate_checked(
        &self,
        entries: &[ProductEntry],
        snapshot: &RegistrySnapshot,
    ) -> Result<ExportSet> {
        let exports = export::generate(entries, &snapshot.schema.schema_version);
        schema::check_versioned_export(&exports.versioned, &snapshot.schema)?;
        Ok(exports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry_fs::NormalizedPath;
    use tempfile::TempDir;

    const SCHEMA_JSON: &str = r#"{
  "schema_version": "1.0.0",
  "required_entry_fields": ["toil_id", "product_name", "category",
    "lead_creator", "status", "license_state", "aliases", "legacy_ids"],
  "toil_id_pattern": "^T4L-TOIL-[0-9]{3}-[A-Z0-9]+$",
  "status_values": ["Concept", "Prototype", "Active", "Licensed", "Dormant"],
  "license_states": ["Open for Licensing", "Licensed", "Internal Only", "Unlicensed"]
}"#;

    fn seed_registry(root: &std::path::Path) -> RegistryLayout {
        let layout = RegistryLayout::new(NormalizedPath::new(root));
        std::fs::create_dir_all(root.join("index")).unwrap();
        std::fs::create_dir_all(root.join("records")).unwrap();
        std::fs::create_dir_all(root.join("schema")).unwrap();
        std::fs::write(
            layout.index_file().to_native(),
            "\
# TOIL Product Index

| TOIL ID | Product Name | Category | Lead Creator | Status | License State | Aliases (Optional) | Legacy IDs (Optional) |
|---|---|---|---|---|---|---|---|
| T4L-TOIL-002-KIVAI | Kivai Voice Module | Voice Interface | Ariel Martin | Prototype | Internal Only |  |  |
| T4L-TOIL-001-CDD | Clean Drain Device | HVAC Hardware | Ariel Martin | Active | Open for Licensing | DrainClean T Adapter | T4L-2025-001 |
",
        )
        .unwrap();
        write_record(
            &layout,
            "T4L-TOIL-001-CDD",
            "Clean Drain Device",
            "Active",
        );
        write_record(
            &layout,
            "T4L-TOIL-002-KIVAI",
            "Kivai Voice Module",
            "Prototype",
        );
        std::fs::write(layout.schema_file().to_native(), SCHEMA_JSON).unwrap();
        layout
    }

    fn write_record(layout: &RegistryLayout, toil_id: &str, name: &str, status: &str) {
        std::fs::write(
            layout.records_dir().join(&format!("{toil_id}.md")).to_native(),
            format!(
                "# {name}\n\n- TOIL ID: {toil_id}\n- Product Name: {name}\n- Status: {status}\n- License State: Open for Licensing\n"
            ),
        )
        .unwrap();
    }

    #[test]
    fn build_writes_sorted_artifacts() {
        let dir = TempDir::new().unwrap();
        let layout = seed_registry(dir.path());
        let pipeline = Pipeline::new(layout.clone());

        let outcome = pipeline.build().unwrap();
        assert_eq!(outcome.entries, 2);

        let legacy = io::read_text(&layout.legacy_export()).unwrap();
        let entries: serde_json::Value = serde_json::from_str(&legacy).unwrap();
        assert_eq!(entries[0]["toil_id"], "T4L-TOIL-001-CDD");
        assert_eq!(entries[1]["toil_id"], "T4L-TOIL-002-KIVAI");

        let versioned: serde_json::Value =
            serde_json::from_str(&io::read_text(&layout.versioned_export()).unwrap()).unwrap();
        assert_eq!(versioned["schema_version"], "1.0.0");
    }

    #[test]
    fn build_is_byte_deterministic_across_runs() {
        let dir = TempDir::new().unwrap();
        let layout = seed_registry(dir.path());
        let pipeline = Pipeline::new(layout.clone());

        pipeline.build().unwrap();
        let first = io::read_text(&layout.versioned_export()).unwrap();
        pipeline.build().unwrap();
        let second = io::read_text(&layout.versioned_export()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn check_passes_after_build_and_fails_after_hand_edit() {
        let dir = TempDir::new().unwrap();
        let layout = seed_registry(dir.path());
        let pipeline = Pipeline::new(layout.clone());

        pipeline.build().unwrap();
        pipeline.check().unwrap();

        // Hand-edit the committed export without touching the sources.
        let mut committed = io::read_text(&layout.legacy_export()).unwrap();
        committed = committed.replace("Clean Drain Device", "Edited By Hand");
        std::fs::write(layout.legacy_export().to_native(), committed).unwrap();

        assert!(matches!(
            pipeline.check(),
            Err(Error::DriftDetected { .. })
        ));
    }

    #[test]
    fn validation_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let layout = seed_registry(dir.path());
        // Remove one record to break the bijection.
        std::fs::remove_file(
            layout
                .records_dir()
                .join("T4L-TOIL-001-CDD.md")
                .to_native(),
        )
        .unwrap();
        let pipeline = Pipeline::new(layout.clone());

        let err = pipeline.build().unwrap_err();
        match err {
            Error::Validation { violations } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].toil_id, "T4L-TOIL-001-CDD");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(!layout.legacy_export().exists());
        assert!(!layout.versioned_export().exists());
    }

    #[test]
    fn validate_uses_committed_export_when_present() {
        let dir = TempDir::new().unwrap();
        let layout = seed_registry(dir.path());
        let pipeline = Pipeline::new(layout.clone());

        let fresh = pipeline.validate().unwrap();
        assert!(!fresh.checked_committed);

        pipeline.build().unwrap();
        let committed = pipeline.validate().unwrap();
        assert!(committed.checked_committed);
        assert_eq!(committed.entries, 2);
    }

    #[test]
    fn empty_registry_without_records_builds_empty_exports() {
        let dir = TempDir::new().unwrap();
        let layout = seed_registry(dir.path());
        // Drop the index and the records; keep the schema.
        std::fs::remove_file(layout.index_file().to_native()).unwrap();
        std::fs::remove_dir_all(layout.records_dir().to_native()).unwrap();
        let pipeline = Pipeline::new(layout.clone());

        let outcome = pipeline.build().unwrap();
        assert_eq!(outcome.entries, 0);
        assert_eq!(io::read_text(&layout.legacy_export()).unwrap(), "[]\n");
    }

    #[test]
    fn missing_table_with_records_present_is_fatal() {
        let dir = TempDir::new().unwrap();
        let layout = seed_registry(dir.path());
        std::fs::write(layout.index_file().to_native(), "# No table anymore\n").unwrap();
        let pipeline = Pipeline::new(layout);

        assert!(matches!(
            pipeline.build(),
            Err(Error::Parse(registry_parse::Error::TableNotFound))
        ));
    }
}
