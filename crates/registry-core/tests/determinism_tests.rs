//! Determinism and ordering properties of the export generator.

use proptest::prelude::*;

use registry_core::{generate, schema};
use registry_model::{ProductEntry, SchemaDocument, Status, ToilId};

const SCHEMA_JSON: &str = r#"{
  "schema_version": "1.0.0",
  "required_entry_fields": ["toil_id", "product_name", "category",
    "lead_creator", "status", "license_state", "aliases", "legacy_ids"],
  "toil_id_pattern": "^T4L-TOIL-[0-9]{3}-[A-Z0-9]+$",
  "status_values": ["Concept", "Prototype", "Active", "Licensed", "Dormant"],
  "license_states": ["Open for Licensing", "Licensed", "Internal Only", "Unlicensed"]
}"#;

fn schema_document() -> SchemaDocument {
    SchemaDocument::from_json(std::path::Path::new("schema.json"), SCHEMA_JSON).unwrap()
}

fn arb_status() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

fn arb_license_state() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Open for Licensing".to_string(),
        "Licensed".to_string(),
        "Internal Only".to_string(),
        "Unlicensed".to_string(),
    ])
}

fn arb_entry() -> impl Strategy<Value = ProductEntry> {
    (
        0u16..1000,
        "[A-Z0-9]{2,8}",
        "[A-Za-z][A-Za-z ]{0,18}",
        arb_status(),
        arb_license_state(),
        prop::collection::vec("[A-Za-z0-9 ]{1,12}", 0..3),
        prop::collection::vec("T4L-[0-9]{4}-[0-9]{3}", 0..3),
    )
        .prop_map(
            |(seq, slug, name, status, license_state, aliases, legacy_ids)| ProductEntry {
                toil_id: ToilId::parse(&format!("T4L-TOIL-{seq:03}-{slug}")).unwrap(),
                product_name: name.clone(),
                category: "HVAC Hardware".into(),
                lead_creator: "Ariel Martin".into(),
                status,
                license_state,
                aliases,
                legacy_ids,
            },
        )
}

proptest! {
    #[test]
    fn generation_is_byte_deterministic(entries in prop::collection::vec(arb_entry(), 0..8)) {
        let first = generate(&entries, "1.0.0");
        let second = generate(&entries, "1.0.0");
        prop_assert_eq!(first.legacy, second.legacy);
        prop_assert_eq!(first.versioned, second.versioned);
    }

    #[test]
    fn generation_is_order_insensitive(mut entries in prop::collection::vec(arb_entry(), 0..8)) {
        let forward = generate(&entries, "1.0.0");
        entries.reverse();
        let reversed = generate(&entries, "1.0.0");
        prop_assert_eq!(forward.legacy, reversed.legacy);
        prop_assert_eq!(forward.versioned, reversed.versioned);
    }

    #[test]
    fn legacy_export_is_sorted_by_toil_id(entries in prop::collection::vec(arb_entry(), 0..8)) {
        let exports = generate(&entries, "1.0.0");
        let rendered: Vec<ProductEntry> = serde_json::from_str(&exports.legacy).unwrap();
        let ids: Vec<&str> = rendered.iter().map(|e| e.toil_id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        prop_assert_eq!(ids, sorted);
    }

    #[test]
    fn generated_versioned_export_conforms_to_schema(
        entries in prop::collection::vec(arb_entry(), 0..8)
    ) {
        let exports = generate(&entries, "1.0.0");
        prop_assert!(
            schema::check_versioned_export(&exports.versioned, &schema_document()).is_ok()
        );
    }
}
