//! Manifest scanning for declared binary targets.
//!
//! Every `Cargo.toml` beneath the project root is read and the names of its
//! `[[bin]]` targets collected. Only the `bin` array is deserialised; the rest
//! of the manifest is ignored, so workspace roots, virtual manifests, and
//! library-only crates all parse cleanly and simply contribute no names.

use crate::bin_name::BinaryName;
use crate::error::{PackagerError, Result};
use crate::walk::regular_files;
use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use serde::Deserialize;

/// File name identifying a Cargo manifest.
pub const MANIFEST_FILE_NAME: &str = "Cargo.toml";

/// The subset of a Cargo manifest the scanner cares about.
#[derive(Debug, Deserialize)]
struct ManifestDocument {
    #[serde(default)]
    bin: Vec<BinTarget>,
}

/// One `[[bin]]` entry.
#[derive(Debug, Deserialize)]
struct BinTarget {
    name: Option<String>,
}

/// Finds every `Cargo.toml` beneath `root`, sorted by path.
///
/// # Errors
///
/// Returns an error if the directory tree cannot be traversed.
pub fn find_manifests(root: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let manifests: Vec<Utf8PathBuf> = regular_files(root)?
        .into_iter()
        .filter(|path| path.file_name() == Some(MANIFEST_FILE_NAME))
        .collect();
    info!("considering: {}", join_paths(&manifests));
    Ok(manifests)
}

/// Extracts the declared binary names from one manifest's contents.
///
/// Entries without a name, or with an empty one, are skipped.
///
/// # Errors
///
/// Returns the TOML error if `contents` is not valid TOML or its `bin` key is
/// not an array of tables.
pub fn parse_bin_names(contents: &str) -> std::result::Result<Vec<BinaryName>, toml::de::Error> {
    let document: ManifestDocument = toml::from_str(contents)?;
    Ok(document
        .bin
        .into_iter()
        .filter_map(|target| target.name)
        .filter(|name| !name.is_empty())
        .map(BinaryName::from)
        .collect())
}

/// Reads one manifest and returns the binary names it declares.
///
/// # Errors
///
/// Returns [`PackagerError::ManifestRead`] if the file cannot be read and
/// [`PackagerError::InvalidManifest`] if it cannot be parsed.
pub fn read_bin_names(manifest: &Utf8Path) -> Result<Vec<BinaryName>> {
    let contents =
        std::fs::read_to_string(manifest).map_err(|source| PackagerError::ManifestRead {
            path: manifest.to_owned(),
            source,
        })?;

    parse_bin_names(&contents).map_err(|source| PackagerError::InvalidManifest {
        path: manifest.to_owned(),
        source,
    })
}

/// Collects binary names across the given manifests, in manifest order.
///
/// Names are not deduplicated.
///
/// # Errors
///
/// Fails on the first manifest that cannot be read or parsed.
pub fn collect_bin_names(manifests: &[Utf8PathBuf]) -> Result<Vec<BinaryName>> {
    let mut names = Vec::new();
    for manifest in manifests {
        names.extend(read_bin_names(manifest)?);
    }
    info!("bins found: {}", join_names(&names));
    Ok(names)
}

/// Scans `root` for manifests and returns every declared binary name.
///
/// Finding no manifests is not an error; the result is simply empty.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked or any manifest cannot be
/// read or parsed.
pub fn scan_bin_names(root: &Utf8Path) -> Result<Vec<BinaryName>> {
    let manifests = find_manifests(root)?;
    collect_bin_names(&manifests)
}

fn join_names(names: &[BinaryName]) -> String {
    names
        .iter()
        .map(BinaryName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_paths(paths: &[Utf8PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
