//! Cross-validation of index rows against the record store
//!
//! Enforces every registry invariant before any export is produced. All
//! violations are collected before failing, so one run surfaces the
//! complete defect list instead of the first defect only.

use std::collections::{BTreeMap, HashSet};

use registry_model::{ProductEntry, Status, ToilId, Violation, ViolationKind};
use registry_parse::{IndexTable, RecordFields};

/// Validate index rows against the record store.
///
/// On success returns the entries in index order. On failure returns every
/// violation found, sorted by identifier then violation kind.
pub fn cross_validate(
    table: &IndexTable,
    records: &BTreeMap<String, RecordFields>,
) -> std::result::Result<Vec<ProductEntry>, Vec<Violation>> {
    let mut violations = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for row in &table.rows {
        let id = row.toil_id.as_str();

        if !ToilId::is_valid(id) {
            violations.push(Violation::new(id, ViolationKind::InvalidIdFormat));
        }

        if !seen.insert(id) {
            violations.push(Violation::new(id, ViolationKind::DuplicateId));
        }

        match records.get(id) {
            None => violations.push(Violation::new(id, ViolationKind::MissingRecord)),
            Some(record) => {
                if record.product_name != row.product_name {
                    violations.push(Violation::new(id, ViolationKind::FieldMismatch {
                        field: "product_name".into(),
                        index_value: row.product_name.clone(),
                        record_value: record.product_name.clone(),
                    }));
                }
                if record.status != row.status {
                    violations.push(Violation::new(id, ViolationKind::FieldMismatch {
                        field: "status".into(),
                        index_value: row.status.clone(),
                        record_value: record.status.clone(),
                    }));
                }
            }
        }

        if row.status.parse::<Status>().is_err() {
            violations.push(Violation::new(id, ViolationKind::InvalidStatus {
                status: row.status.clone(),
            }));
        }
    }

    for record_id in records.keys() {
        if !seen.contains(record_id.as_str()) {
            violations.push(Violation::new(record_id, ViolationKind::OrphanRecord));
        }
    }

    if !violations.is_empty() {
        violations.sort_by_key(|v| v.sort_key());
        tracing::debug!(count = violations.len(), "cross-validation failed");
        return Err(violations);
    }

    let entries = table
        .rows
        .iter()
        .map(|row| ProductEntry {
            // Both parses were checked above; an error here is unreachable.
            toil_id: ToilId::parse(&row.toil_id).expect("validated id"),
            product_name: row.product_name.clone(),
            category: row.category.clone(),
            lead_creator: row.lead_creator.clone(),
            status: row.status.parse().expect("validated status"),
            license_state: row.license_state.clone(),
            aliases: row.aliases.clone(),
            legacy_ids: row.legacy_ids.clone(),
        })
        .collect();

    tracing::debug!(entries = table.rows.len(), "cross-validation passed");

    Ok(entries)
}
