//! End-to-end pipeline tests over the committed registry fixture.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use registry_core::{Error, Pipeline};
use registry_fs::{NormalizedPath, RegistryLayout};
use registry_model::ViolationKind;

fn fixture_root() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/registry")
}

fn copy_dir(src: &Path, dst: &Path) {
    fs::create_dir_all(dst).unwrap();
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn checkout_fixture() -> (TempDir, Pipeline) {
    let dir = TempDir::new().unwrap();
    copy_dir(&fixture_root(), dir.path());
    let layout = RegistryLayout::new(NormalizedPath::new(dir.path()));
    let pipeline = Pipeline::new(layout);
    (dir, pipeline)
}

#[test]
fn check_mode_passes_on_the_untouched_fixture() {
    let (_dir, pipeline) = checkout_fixture();
    let entries = pipeline.check().unwrap();
    assert_eq!(entries, 2);
}

#[test]
fn build_reproduces_the_committed_artifacts_byte_for_byte() {
    let (dir, pipeline) = checkout_fixture();

    let legacy_before = fs::read(dir.path().join("exports/product_index.json")).unwrap();
    let versioned_before = fs::read(dir.path().join("exports/product_index_v1.json")).unwrap();

    pipeline.build().unwrap();

    let legacy_after = fs::read(dir.path().join("exports/product_index.json")).unwrap();
    let versioned_after = fs::read(dir.path().join("exports/product_index_v1.json")).unwrap();
    assert_eq!(
        String::from_utf8(legacy_before).unwrap(),
        String::from_utf8(legacy_after).unwrap()
    );
    assert_eq!(
        String::from_utf8(versioned_before).unwrap(),
        String::from_utf8(versioned_after).unwrap()
    );
}

#[test]
fn editing_a_committed_export_is_detected_as_drift() {
    let (dir, pipeline) = checkout_fixture();

    let export = dir.path().join("exports/product_index_v1.json");
    let edited = fs::read_to_string(&export)
        .unwrap()
        .replace("Kivai Voice Module", "Renamed In Export Only");
    fs::write(&export, edited).unwrap();

    match pipeline.check() {
        Err(Error::DriftDetected { artifact, diff }) => {
            assert!(artifact.ends_with("product_index_v1.json"));
            assert!(diff.contains("Renamed In Export Only"));
        }
        other => panic!("expected DriftDetected, got {other:?}"),
    }
}

#[test]
fn editing_a_source_without_rebuilding_is_detected_as_drift() {
    let (dir, pipeline) = checkout_fixture();

    // Flip a status in both index and record so validation still passes.
    for path in [
        dir.path().join("index/TOIL_Product_Index.md"),
        dir.path().join("records/T4L-TOIL-002-KIVAI.md"),
    ] {
        let edited = fs::read_to_string(&path)
            .unwrap()
            .replace("Prototype", "Active");
        fs::write(&path, edited).unwrap();
    }

    assert!(matches!(pipeline.check(), Err(Error::DriftDetected { .. })));
}

#[test]
fn broken_bijection_surfaces_every_violation_at_once() {
    let (dir, pipeline) = checkout_fixture();

    // Orphan one record and strand one index row in a single run.
    fs::remove_file(dir.path().join("records/T4L-TOIL-001-CDD.md")).unwrap();
    fs::write(
        dir.path().join("records/T4L-TOIL-777-GHOST.md"),
        "# Ghost\n\n- TOIL ID: T4L-TOIL-777-GHOST\n- Product Name: Ghost\n- Status: Dormant\n- License State: Unlicensed\n",
    )
    .unwrap();

    match pipeline.check() {
        Err(Error::Validation { violations }) => {
            assert_eq!(violations.len(), 2);
            assert_eq!(violations[0].toil_id, "T4L-TOIL-001-CDD");
            assert_eq!(violations[0].kind, ViolationKind::MissingRecord);
            assert_eq!(violations[1].toil_id, "T4L-TOIL-777-GHOST");
            assert_eq!(violations[1].kind, ViolationKind::OrphanRecord);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn versioned_export_schema_version_matches_the_schema_document() {
    let (dir, pipeline) = checkout_fixture();
    pipeline.build().unwrap();

    let schema: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("schema/product_index.schema.json")).unwrap(),
    )
    .unwrap();
    let versioned: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("exports/product_index_v1.json")).unwrap(),
    )
    .unwrap();

    assert_eq!(versioned["schema_version"], schema["schema_version"]);
}

#[test]
fn legacy_export_equals_versioned_products_list() {
    let (dir, pipeline) = checkout_fixture();
    pipeline.build().unwrap();

    let legacy: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("exports/product_index.json")).unwrap(),
    )
    .unwrap();
    let versioned: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("exports/product_index_v1.json")).unwrap(),
    )
    .unwrap();

    assert_eq!(versioned["products"], legacy);
}
