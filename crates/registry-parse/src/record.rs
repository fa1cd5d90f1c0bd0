//! Record store reader
//!
//! One record document per identifier lives in the records directory. The
//! fields needed for cross-validation sit in a labeled key/value preamble
//! (`- Key: Value` bullet lines). Keys are case-insensitive; the first
//! occurrence of a key wins, so prose further down a record cannot shadow
//! the preamble.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use registry_fs::{NormalizedPath, io};

use crate::error::{Error, Result};

/// `- Key: Value` (bullet optional), first colon separates key from value.
static KEY_VALUE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*]?\s*([^:]+?)\s*:\s*(.+)$").unwrap());

/// Metadata extracted from a document preamble.
///
/// Shared between the record reader (which requires a subset) and the
/// candidate sync generator (which fills gaps with defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preamble {
    pub toil_id: Option<String>,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub lead_creator: Option<String>,
    pub status: Option<String>,
    pub license_state: Option<String>,
    pub aliases: Vec<String>,
    pub legacy_ids: Vec<String>,
}

impl Preamble {
    /// Extract labeled fields from document text.
    pub fn extract(content: &str) -> Self {
        let mut preamble = Self::default();
        for line in content.lines() {
            let Some(captures) = KEY_VALUE_LINE.captures(line) else {
                continue;
            };
            let key = captures[1].trim().to_lowercase();
            let value = captures[2].trim().to_string();
            match key.as_str() {
                "toil id" => set_first(&mut preamble.toil_id, value),
                "product name" => set_first(&mut preamble.product_name, value),
                "category" => set_first(&mut preamble.category, value),
                "lead creator" => set_first(&mut preamble.lead_creator, value),
                "status" => set_first(&mut preamble.status, value),
                "license state" => set_first(&mut preamble.license_state, value),
                "aliases" => {
                    if preamble.aliases.is_empty() {
                        preamble.aliases = split_list(&value);
                    }
                }
                "legacy ids" => {
                    if preamble.legacy_ids.is_empty() {
                        preamble.legacy_ids = split_list(&value);
                    }
                }
                _ => {}
            }
        }
        preamble
    }
}

fn set_first(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// The fields of one record needed for cross-validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    /// File name stem, the address the record was found under.
    pub file_stem: String,
    pub toil_id: String,
    pub product_name: String,
    pub status: String,
    pub license_state: String,
}

/// Parse one record document.
///
/// # Errors
///
/// `RecordFieldMissing` if any of the four required fields is absent.
pub fn parse_record(path: &NormalizedPath, content: &str) -> Result<RecordFields> {
    let preamble = Preamble::extract(content);
    let require = |field: &str, value: Option<String>| {
        value.ok_or_else(|| Error::RecordFieldMissing {
            path: path.to_native(),
            field: field.to_string(),
        })
    };

    Ok(RecordFields {
        file_stem: path.file_stem().unwrap_or_default().to_string(),
        toil_id: require("TOIL ID", preamble.toil_id)?,
        product_name: require("Product Name", preamble.product_name)?,
        status: require("Status", preamble.status)?,
        license_state: require("License State", preamble.license_state)?,
    })
}

/// Read every record in the records directory.
///
/// Returns a map keyed by the declared TOIL ID, in identifier order. Files
/// without a `.md` extension are ignored; a missing directory reads as an
/// empty store (the bijection check reports each absence individually).
///
/// # Errors
///
/// `DuplicateRecordFile` when two files declare the same identifier;
/// `RecordFieldMissing` from individual records.
pub fn read_records(records_dir: &NormalizedPath) -> Result<BTreeMap<String, RecordFields>> {
    let mut records = BTreeMap::new();
    let mut paths_by_id: BTreeMap<String, NormalizedPath> = BTreeMap::new();

    if !records_dir.is_dir() {
        return Ok(records);
    }

    let mut entries: Vec<_> = std::fs::read_dir(records_dir.to_native())
        .map_err(|e| registry_fs::Error::io(records_dir.to_native(), e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| NormalizedPath::new(entry.path()))
        .filter(|path| path.extension() == Some("md") && path.is_file())
        .collect();
    entries.sort_by(|a, b| a.as_str().cmp(b.as_str()));

    for path in entries {
        let content = io::read_text(&path)?;
        let fields = parse_record(&path, &content)?;
        if let Some(first) = paths_by_id.get(&fields.toil_id) {
            return Err(Error::DuplicateRecordFile {
                toil_id: fields.toil_id,
                first: first.to_native(),
                second: path.to_native(),
            });
        }
        paths_by_id.insert(fields.toil_id.clone(), path);
        records.insert(fields.toil_id.clone(), fields);
    }

    tracing::debug!(records = records.len(), dir = %records_dir, "read record store");

    Ok(records)
}
