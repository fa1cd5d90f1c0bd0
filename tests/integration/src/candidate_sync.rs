//! Candidate sync isolation tests over the registry fixture.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use registry_core::pipeline::RegistrySnapshot;
use registry_core::{CandidateOutputs, CandidateSyncGenerator, Pipeline};
use registry_fs::{NormalizedPath, RegistryLayout, checksum};

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

fn write_pack(source: &Path, dir_name: &str, readme: &str) {
    let pack = source.join(dir_name);
    fs::create_dir_all(&pack).unwrap();
    fs::write(pack.join("README.md"), readme).unwrap();
}

#[test]
fn sync_never_alters_the_canonical_index_or_exports() {
    let dir = TempDir::new().unwrap();
    copy_dir(&fixture_root(), dir.path());
    let layout = RegistryLayout::new(NormalizedPath::new(dir.path()));

    let index_before =
        checksum::compute_file_checksum(&layout.index_file().to_native()).unwrap();
    let legacy_before =
        checksum::compute_file_checksum(&layout.legacy_export().to_native()).unwrap();
    let versioned_before =
        checksum::compute_file_checksum(&layout.versioned_export().to_native()).unwrap();

    let source = TempDir::new().unwrap();
    write_pack(
        source.path(),
        "solar-vent-kit",
        "# Solar Vent Kit\n\nID: T4L-TOIL-050-SVK\n\n- Category: Ventilation\n- Status: Concept\n",
    );
    write_pack(
        source.path(),
        "grey-water-switch",
        "ID: T4L-TOIL-014-GWS\n\n- Product Name: Grey Water Switch\n- License State: Licensed\n- Status: Licensed\n",
    );

    let schema = RegistrySnapshot::load_schema(&layout).unwrap();
    let generator = CandidateSyncGenerator::new(CandidateOutputs::from_layout(&layout));
    let report = generator
        .run(&NormalizedPath::new(source.path()), &schema)
        .unwrap();
    assert_eq!(report.candidates, 2);

    assert_eq!(
        checksum::compute_file_checksum(&layout.index_file().to_native()).unwrap(),
        index_before
    );
    assert_eq!(
        checksum::compute_file_checksum(&layout.legacy_export().to_native()).unwrap(),
        legacy_before
    );
    assert_eq!(
        checksum::compute_file_checksum(&layout.versioned_export().to_native()).unwrap(),
        versioned_before
    );

    // Candidate artifacts landed under the distinctly named candidate dir.
    let candidates = dir.path().join("exports/candidates");
    assert!(candidates.join("product_index.json").exists());
    assert!(candidates.join("product_index_v1.json").exists());
    assert!(candidates.join("CANDIDATE_INDEX.md").exists());

    // Candidate exports are sorted and review-only labeled.
    let legacy: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(candidates.join("product_index.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(legacy[0]["toil_id"], "T4L-TOIL-014-GWS");
    assert_eq!(legacy[1]["toil_id"], "T4L-TOIL-050-SVK");
    let table = fs::read_to_string(candidates.join("CANDIDATE_INDEX.md")).unwrap();
    assert!(table.contains("REVIEW ONLY"));

    // The canonical pipeline still passes check mode afterwards.
    Pipeline::new(layout).check().unwrap();
}
