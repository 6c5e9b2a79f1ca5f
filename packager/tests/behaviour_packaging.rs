//! Behaviour-driven tests for coverage artefact packaging.
//!
//! These scenarios drive the whole pipeline against throwaway Cargo projects:
//! manifests are scanned, coverage globs are evaluated under `target/`, and
//! the matches are zipped. Tests use the rstest-bdd v0.5.0 mutable world
//! pattern.

use camino::{Utf8Path, Utf8PathBuf};
use coverpack_packager::archive::{ARCHIVE_PREFIX, SUFFIX_LEN};
use coverpack_packager::error::PackagerError;
use coverpack_packager::pipeline::{PackRequest, PreparedArchive, pack};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// World types
// ---------------------------------------------------------------------------

#[derive(Default)]
struct PackagingWorld {
    temp_dir: Option<TempDir>,
    prepared: Option<PreparedArchive>,
    packaging_error: Option<PackagerError>,
}

#[fixture]
fn world() -> PackagingWorld {
    PackagingWorld {
        temp_dir: Some(TempDir::new().expect("temp dir")),
        ..PackagingWorld::default()
    }
}

fn base_path(world: &PackagingWorld) -> Utf8PathBuf {
    let dir = world.temp_dir.as_ref().expect("temp_dir set");
    Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf-8 temp dir")
}

fn project_root(world: &PackagingWorld) -> Utf8PathBuf {
    base_path(world).join("project")
}

fn output_dir(world: &PackagingWorld) -> Utf8PathBuf {
    base_path(world).join("out")
}

fn write_file(path: &Utf8Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, contents).expect("write file");
}

fn bin_manifest(name: &str) -> String {
    format!("[package]\nname = \"{name}\"\n\n[[bin]]\nname = \"{name}\"\npath = \"src/main.rs\"\n")
}

/// List the entry names of the produced archive.
fn archive_entries(world: &PackagingWorld) -> Vec<String> {
    let prepared = world.prepared.as_ref().expect("archive prepared");
    let file = fs::File::open(&prepared.path).expect("open archive");
    let archive = zip::ZipArchive::new(file).expect("read archive");
    let mut names: Vec<String> = archive.file_names().map(str::to_owned).collect();
    names.sort();
    names
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("a manifest declaring the binary \"{name}\"")]
fn given_root_manifest(world: &mut PackagingWorld, name: String) {
    write_file(&project_root(world).join("Cargo.toml"), &bin_manifest(&name));
}

#[given("a manifest without binaries")]
fn given_manifest_without_bins(world: &mut PackagingWorld) {
    write_file(
        &project_root(world).join("Cargo.toml"),
        "[package]\nname = \"library-only\"\n",
    );
}

#[given("a member manifest \"{member}\" declaring the binary \"{name}\"")]
fn given_member_manifest(world: &mut PackagingWorld, member: String, name: String) {
    let manifest = project_root(world).join(member).join("Cargo.toml");
    write_file(&manifest, &bin_manifest(&name));
}

#[given("a member manifest \"{member}\" that is not valid TOML")]
fn given_broken_member(world: &mut PackagingWorld, member: String) {
    let manifest = project_root(world).join(member).join("Cargo.toml");
    write_file(&manifest, "[[bin]\nname = ");
}

#[given("a coverage file \"{relative}\" in the build directory")]
fn given_coverage_file(world: &mut PackagingWorld, relative: String) {
    let path = project_root(world).join("target").join(&relative);
    write_file(&path, &format!("counters for {relative}"));
}

#[when("the coverage files are packaged")]
fn when_packaged(world: &mut PackagingWorld) {
    let root = project_root(world);
    let output = output_dir(world);
    fs::create_dir_all(&output).expect("mkdir out");
    let request = PackRequest {
        build_dir: root.join("target"),
        root,
        output_dir: output,
    };

    match pack(&request, &mut StdRng::seed_from_u64(7)) {
        Ok(prepared) => world.prepared = Some(prepared),
        Err(err) => world.packaging_error = Some(err),
    }
}

#[then("the archive carries a randomised coverage name")]
fn then_archive_named(world: &mut PackagingWorld) {
    let prepared = world.prepared.as_ref().expect("archive prepared");
    let filename = prepared.path.file_name().expect("filename");
    let suffix = filename
        .strip_prefix(&format!("{ARCHIVE_PREFIX}-"))
        .and_then(|rest| rest.strip_suffix(".zip"))
        .expect("coverage-<suffix>.zip");
    assert_eq!(suffix.len(), SUFFIX_LEN);
    assert!(
        suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()),
        "suffix must be lowercase alphanumeric: {suffix}"
    );
    assert_eq!(prepared.path.parent(), Some(output_dir(world).as_path()));
}

#[then("the archive contains exactly \"{first}\" and \"{second}\"")]
fn then_archive_contains_exactly(world: &mut PackagingWorld, first: String, second: String) {
    let mut expected = vec![first, second];
    expected.sort();
    assert_eq!(archive_entries(world), expected);
}

#[then("the archive contains {count} entries")]
fn then_archive_has_n_entries(world: &mut PackagingWorld, count: usize) {
    assert_eq!(archive_entries(world).len(), count);
}

#[then("packaging fails because no coverage files were found")]
fn then_no_coverage_files(world: &mut PackagingWorld) {
    let err = world.packaging_error.as_ref().expect("packaging error");
    assert!(
        matches!(err, PackagerError::NoCoverageFiles { .. }),
        "expected NoCoverageFiles, got {err:?}"
    );
    assert!(world.prepared.is_none());
}

#[then("packaging fails with an invalid manifest error")]
fn then_invalid_manifest(world: &mut PackagingWorld) {
    let err = world.packaging_error.as_ref().expect("packaging error");
    assert!(
        matches!(err, PackagerError::InvalidManifest { path, .. } if path.ends_with("broken/Cargo.toml")),
        "expected InvalidManifest, got {err:?}"
    );
}

#[then("no archive is left in the output directory")]
fn then_no_archive_left(world: &mut PackagingWorld) {
    let leftovers = fs::read_dir(output_dir(world)).expect("read out").count();
    assert_eq!(leftovers, 0);
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/packaging.feature",
    name = "Package the coverage files of a declared binary"
)]
fn scenario_package_declared_binary(world: PackagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/packaging.feature",
    name = "Binaries declared by workspace members are included"
)]
fn scenario_workspace_members(world: PackagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/packaging.feature",
    name = "Packaging fails when no binaries are declared"
)]
fn scenario_no_binaries(world: PackagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/packaging.feature",
    name = "Packaging fails when the build directory is missing"
)]
fn scenario_missing_build_dir(world: PackagingWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/packaging.feature",
    name = "A malformed manifest aborts packaging"
)]
fn scenario_malformed_manifest(world: PackagingWorld) {
    let _ = world;
}
