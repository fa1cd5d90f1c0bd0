//! Schema validation of the versioned export
//!
//! Checks a versioned export body against the declared schema document.
//! The same logic runs against freshly generated artifacts (pre-commit)
//! and committed ones (regression check). Unlike the cross-validator this
//! fails on the first violation; aggregation of independent defects is the
//! cross-validator's job.

use semver::Version;
use serde_json::Value;

use registry_model::SchemaDocument;

use crate::error::{Error, Result};

/// Validate a versioned export body against the schema document.
pub fn check_versioned_export(body: &str, schema: &SchemaDocument) -> Result<()> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| Error::schema_violation("$", format!("not valid JSON: {e}")))?;

    let object = root
        .as_object()
        .ok_or_else(|| Error::schema_violation("$", "versioned export must be a JSON object"))?;

    let version = object
        .get("schema_version")
        .ok_or_else(|| Error::schema_violation("schema_version", "required field is missing"))?
        .as_str()
        .ok_or_else(|| Error::schema_violation("schema_version", "must be a string"))?;

    Version::parse(version).map_err(|e| {
        Error::schema_violation("schema_version", format!("not a semver version: {e}"))
    })?;

    if version != schema.schema_version {
        return Err(Error::schema_violation(
            "schema_version",
            format!(
                "must be {:?} as declared by the schema document, got {:?}",
                schema.schema_version, version
            ),
        ));
    }

    let products = object
        .get("products")
        .ok_or_else(|| Error::schema_violation("products", "required field is missing"))?
        .as_array()
        .ok_or_else(|| Error::schema_violation("products", "must be a list"))?;

    let id_pattern = schema.id_pattern();
    for (i, product) in products.iter().enumerate() {
        let path = format!("products[{i}]");
        let entry = product
            .as_object()
            .ok_or_else(|| Error::schema_violation(&path, "entry must be a JSON object"))?;

        for field in &schema.required_entry_fields {
            if !entry.contains_key(field) {
                return Err(Error::schema_violation(
                    format!("{path}.{field}"),
                    "required field is missing",
                ));
            }
        }

        let toil_id = require_string(entry, &path, "toil_id")?;
        if !id_pattern.is_match(toil_id) {
            return Err(Error::schema_violation(
                format!("{path}.toil_id"),
                format!("must match pattern {}", schema.toil_id_pattern),
            ));
        }

        let status = require_string(entry, &path, "status")?;
        if !schema.status_values.iter().any(|s| s == status) {
            return Err(Error::schema_violation(
                format!("{path}.status"),
                format!("must be one of {:?}", schema.status_values),
            ));
        }

        let license_state = require_string(entry, &path, "license_state")?;
        if !schema.license_states.iter().any(|s| s == license_state) {
            return Err(Error::schema_violation(
                format!("{path}.license_state"),
                format!("must be one of {:?}", schema.license_states),
            ));
        }

        for field in ["aliases", "legacy_ids"] {
            let value = entry.get(field).ok_or_else(|| {
                Error::schema_violation(format!("{path}.{field}"), "required field is missing")
            })?;
            let items = value.as_array().ok_or_else(|| {
                Error::schema_violation(format!("{path}.{field}"), "must be a list")
            })?;
            if items.iter().any(|item| !item.is_string()) {
                return Err(Error::schema_violation(
                    format!("{path}.{field}"),
                    "every item must be a string",
                ));
            }
        }
    }

    tracing::debug!(products = products.len(), "schema check passed");

    Ok(())
}

fn require_string<'a>(
    entry: &'a serde_json::Map<String, Value>,
    path: &str,
    field: &str,
) -> Result<&'a str> {
    entry
        .get(field)
        .ok_or_else(|| {
            Error::schema_violation(format!("{path}.{field}"), "required field is missing")
        })?
        .as_str()
        .ok_or_else(|| Error::schema_violation(format!("{path}.{field}"), "must be a string"))
}
