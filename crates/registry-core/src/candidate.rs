//! Candidate sync generation from an external product source
//!
//! Ingests a lower-trust directory of product packs and renders candidate
//! artifacts for human review. The generator is constructed from a
//! `CandidateOutputs` value that carries only the candidate paths, so it
//! has no handle on the canonical index document: the no-write contract is
//! structural, not conventional.

use std::sync::LazyLock;

use regex::Regex;

use registry_fs::layout::{CANDIDATE_TABLE_FILE, LEGACY_EXPORT_FILE, VERSIONED_EXPORT_FILE};
use registry_fs::{NormalizedPath, RegistryLayout, io};
use registry_model::{ProductEntry, SchemaDocument, Status, ToilId};
use registry_parse::Preamble;

use crate::error::{Error, Result};
use crate::export;

/// First TOIL ID anywhere in a pack document identifies the proposal.
static TOIL_ID_ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"T4L-TOIL-[0-9]{3}-[A-Z0-9]+").unwrap());

/// Fallbacks for metadata a pack omits.
const DEFAULT_LEAD_CREATOR: &str = "Ariel Martin";
const DEFAULT_STATUS: &str = "Active";
const DEFAULT_LICENSE_STATE: &str = "Open for Licensing";

/// Candidate artifact paths. Deliberately excludes every canonical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateOutputs {
    legacy_export: NormalizedPath,
    versioned_export: NormalizedPath,
    table: NormalizedPath,
}

impl CandidateOutputs {
    /// Derive the candidate paths from a registry layout.
    pub fn from_layout(layout: &RegistryLayout) -> Self {
        let dir = layout.candidates_dir();
        Self {
            legacy_export: dir.join(LEGACY_EXPORT_FILE),
            versioned_export: dir.join(VERSIONED_EXPORT_FILE),
            table: dir.join(CANDIDATE_TABLE_FILE),
        }
    }

    pub fn table(&self) -> &NormalizedPath {
        &self.table
    }

    pub fn legacy_export(&self) -> &NormalizedPath {
        &self.legacy_export
    }

    pub fn versioned_export(&self) -> &NormalizedPath {
        &self.versioned_export
    }
}

/// Summary of one candidate sync run.
#[derive(Debug, Clone)]
pub struct CandidateReport {
    pub candidates: usize,
    pub written: Vec<NormalizedPath>,
}

/// Renders review-only candidate artifacts from an external pack source.
pub struct CandidateSyncGenerator {
    outputs: CandidateOutputs,
}

impl CandidateSyncGenerator {
    pub fn new(outputs: CandidateOutputs) -> Self {
        Self { outputs }
    }

    /// Ingest `source_dir` and write the candidate artifacts.
    ///
    /// Rendering goes through the same export generator as the canonical
    /// pipeline; only the output paths differ.
    pub fn run(
        &self,
        source_dir: &NormalizedPath,
        schema: &SchemaDocument,
    ) -> Result<CandidateReport> {
        let mut entries = Vec::new();
        for pack_dir in discover_packs(source_dir)? {
            entries.push(parse_pack(&pack_dir)?);
        }
        entries.sort_by(|a, b| a.toil_id.cmp(&b.toil_id));

        tracing::info!(candidates = entries.len(), source = %source_dir, "rendering candidates");

        let exports = export::generate(&entries, &schema.schema_version);
        let table = render_candidate_table(&entries);

        io::write_text(&self.outputs.legacy_export, &exports.legacy)?;
        io::write_text(&self.outputs.versioned_export, &exports.versioned)?;
        io::write_text(&self.outputs.table, &table)?;

        Ok(CandidateReport {
            candidates: entries.len(),
            written: vec![
                self.outputs.legacy_export.clone(),
                self.outputs.versioned_export.clone(),
                self.outputs.table.clone(),
            ],
        })
    }
}

/// Pack subdirectories that carry a README, in name order.
fn discover_packs(source_dir: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let mut packs: Vec<NormalizedPath> = std::fs::read_dir(source_dir.to_native())
        .map_err(|e| registry_fs::Error::io(source_dir.to_native(), e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| NormalizedPath::new(entry.path()))
        .filter(|path| path.is_dir() && path.join("README.md").is_file())
        .collect();
    packs.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    Ok(packs)
}

fn parse_pack(pack_dir: &NormalizedPath) -> Result<ProductEntry> {
    let readme = pack_dir.join("README.md");
    let content = io::read_text(&readme)?;

    let raw_id = TOIL_ID_ANYWHERE
        .find(&content)
        .ok_or_else(|| Error::CandidatePack {
            path: readme.to_native(),
            message: "no TOIL ID found".to_string(),
        })?
        .as_str();
    let toil_id = ToilId::parse(raw_id).map_err(|e| Error::CandidatePack {
        path: readme.to_native(),
        message: e.to_string(),
    })?;

    let preamble = Preamble::extract(&content);
    let status_raw = preamble.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());
    let status = status_raw.parse::<Status>().map_err(|_| Error::CandidatePack {
        path: readme.to_native(),
        message: format!("unrecognized status {status_raw:?}"),
    })?;

    Ok(ProductEntry {
        toil_id,
        product_name: preamble
            .product_name
            .unwrap_or_else(|| title_case_folder(pack_dir.file_name().unwrap_or_default())),
        category: preamble.category.unwrap_or_default(),
        lead_creator: preamble
            .lead_creator
            .unwrap_or_else(|| DEFAULT_LEAD_CREATOR.to_string()),
        status,
        license_state: preamble
            .license_state
            .unwrap_or_else(|| DEFAULT_LICENSE_STATE.to_string()),
        aliases: preamble.aliases,
        legacy_ids: preamble.legacy_ids,
    })
}

/// `clean-drain-device` -> `Clean Drain Device`
fn title_case_folder(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Review-only markdown table, same column set as the canonical index.
fn render_candidate_table(entries: &[ProductEntry]) -> String {
    let mut out = String::from(
        "# Candidate Product Index (REVIEW ONLY)\n\n\
         Generated from an external source. Not authoritative; never merged\n\
         into the canonical index automatically.\n\n",
    );
    out.push_str(
        "| TOIL ID | Product Name | Category | Lead Creator | Status | License State | \
         Aliases (Optional) | Legacy IDs (Optional) |\n",
    );
    out.push_str(
        "|-------|-------------|----------|--------------|--------|---------------|\
         -------------------|-----------------------|\n",
    );
    for entry in entries {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            entry.toil_id,
            entry.product_name,
            entry.category,
            entry.lead_creator,
            entry.status,
            entry.license_state,
            entry.aliases.join(", "),
            entry.legacy_ids.join(", "),
        ));
    }
    out
}
