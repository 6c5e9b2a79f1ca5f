//! Discovery and archiving pipeline orchestration.
//!
//! This module wires the three stages together: manifests under the project
//! root yield binary names, binary names yield coverage globs evaluated under
//! the build directory, and the matched files are streamed into an archive.
//! Data only flows forward; a failure at any stage aborts the run.

use crate::archive::build_archive;
use crate::bin_name::BinaryName;
use crate::error::{PackagerError, Result};
use crate::locator::locate_coverage_files;
use crate::manifest::{collect_bin_names, find_manifests};
use camino::{Utf8Path, Utf8PathBuf};
use coverpack::PackConfig;
use rand::Rng;

/// Resolved inputs for one packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackRequest {
    /// Absolute project root.
    pub root: Utf8PathBuf,
    /// Absolute build directory searched for coverage artefacts.
    pub build_dir: Utf8PathBuf,
    /// Directory that receives the archive.
    pub output_dir: Utf8PathBuf,
}

impl PackRequest {
    /// Resolves a request from a project root and its configuration.
    ///
    /// The root is canonicalised so every discovered path is absolute.
    /// Relative build and output directories are resolved against it. When
    /// the configuration names no output directory, the system temporary
    /// directory is used.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::RootNotFound`] if `root` is not a directory
    /// and [`PackagerError::NonUtf8Path`] if a resolved path is not UTF-8.
    pub fn resolve(root: &Utf8Path, config: &PackConfig) -> Result<Self> {
        if !root.is_dir() {
            return Err(PackagerError::RootNotFound {
                path: root.to_owned(),
            });
        }
        let canonical_root = root.canonicalize_utf8()?;
        let build_dir = config.build_dir_in(&canonical_root);
        let output_dir = match config.output_dir_in(&canonical_root) {
            Some(dir) => dir,
            None => system_temp_dir()?,
        };

        Ok(Self {
            root: canonical_root,
            build_dir,
            output_dir,
        })
    }
}

/// What a discovery pass found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Every manifest that was read.
    pub manifests: Vec<Utf8PathBuf>,
    /// Binary names declared across those manifests, duplicates included.
    pub binaries: Vec<BinaryName>,
    /// Coverage artefacts matched under the build directory.
    pub coverage_files: Vec<Utf8PathBuf>,
}

impl Discovery {
    /// Returns true when no coverage artefact was matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coverage_files.is_empty()
    }
}

/// A finished archive and the discovery that fed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedArchive {
    /// Absolute path of the archive.
    pub path: Utf8PathBuf,
    /// The discovery pass whose files were archived.
    pub discovery: Discovery,
}

/// Runs manifest scanning and artefact location without writing anything.
///
/// # Errors
///
/// Returns an error if a manifest cannot be read or parsed, or if a
/// directory cannot be traversed. An empty result is not an error here.
pub fn discover(request: &PackRequest) -> Result<Discovery> {
    let manifests = find_manifests(&request.root)?;
    let binaries = collect_bin_names(&manifests)?;
    let coverage_files = locate_coverage_files(&request.build_dir, &binaries)?;

    Ok(Discovery {
        manifests,
        binaries,
        coverage_files,
    })
}

/// Discovers coverage artefacts and archives them.
///
/// # Errors
///
/// Returns [`PackagerError::NoCoverageFiles`] when discovery matched
/// nothing, and propagates every manifest, traversal, and archive failure.
pub fn pack<R: Rng + ?Sized>(request: &PackRequest, rng: &mut R) -> Result<PreparedArchive> {
    let discovery = discover(request)?;
    if discovery.is_empty() {
        return Err(PackagerError::NoCoverageFiles {
            build_dir: request.build_dir.clone(),
        });
    }

    let path = build_archive(&discovery.coverage_files, &request.output_dir, rng)?;
    Ok(PreparedArchive { path, discovery })
}

/// Packages the coverage artefacts of the project at `root` using its
/// `coverpack.toml` (or defaults) and a thread-local random source.
///
/// Returns the path of the archive.
///
/// # Errors
///
/// Returns any configuration, discovery, or archive failure.
pub fn prepare_archive(root: &Utf8Path) -> Result<Utf8PathBuf> {
    let config = PackConfig::discover(root)?;
    let request = PackRequest::resolve(root, &config)?;
    pack(&request, &mut rand::thread_rng()).map(|prepared| prepared.path)
}

fn system_temp_dir() -> Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(std::env::temp_dir())
        .map_err(|err| PackagerError::NonUtf8Path(err.into_path_buf()))
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
