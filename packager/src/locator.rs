//! Coverage artefact discovery under the build directory.
//!
//! Each declared binary contributes one glob, `**/<stem>*.gc*`, and the whole
//! set is evaluated in a single traversal of the build directory. Keying the
//! search on binary names keeps `.gcda` files from dependencies and build
//! scripts out of the archive.

use crate::bin_name::BinaryName;
use crate::error::Result;
use crate::walk::regular_files;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::{debug, info};

/// Returns one coverage glob per binary name, duplicates included.
#[must_use]
pub fn coverage_patterns(names: &[BinaryName]) -> Vec<String> {
    names.iter().map(BinaryName::coverage_pattern).collect()
}

/// A compiled set of coverage globs.
///
/// `*` never crosses a path separator, so `my_tool*` cannot match a directory
/// named `my_tool_data/` and then any `.gc*` file inside it.
#[derive(Debug, Clone)]
pub struct CoverageMatcher {
    set: GlobSet,
}

impl CoverageMatcher {
    /// Compiles the given patterns. An empty slice yields a matcher that
    /// accepts nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::PackagerError::InvalidPattern`] if a pattern
    /// fails to compile.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(
                GlobBuilder::new(pattern.as_ref())
                    .literal_separator(true)
                    .build()?,
            );
        }
        Ok(Self {
            set: builder.build()?,
        })
    }

    /// Compiles the coverage globs for the given binary names.
    ///
    /// # Errors
    ///
    /// Returns an error if a derived pattern fails to compile.
    pub fn for_binaries(names: &[BinaryName]) -> Result<Self> {
        let patterns = coverage_patterns(names);
        debug!("coverage patterns: {patterns:?}");
        Self::new(&patterns)
    }

    /// Returns true when no pattern was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Returns true if `relative` (a path relative to the search root)
    /// matches any pattern.
    #[must_use]
    pub fn is_match(&self, relative: &Utf8Path) -> bool {
        self.set.is_match(relative.as_str())
    }
}

/// Finds the coverage artefacts for `names` beneath `build_dir`.
///
/// Returns absolute paths to regular files, sorted by path. An empty name
/// list, or a build directory that does not exist, yields an empty list.
///
/// # Errors
///
/// Returns an error if a pattern fails to compile or the build directory
/// cannot be traversed.
pub fn locate_coverage_files(
    build_dir: &Utf8Path,
    names: &[BinaryName],
) -> Result<Vec<Utf8PathBuf>> {
    let matcher = CoverageMatcher::for_binaries(names)?;
    if matcher.is_empty() || !build_dir.is_dir() {
        return Ok(Vec::new());
    }

    let files: Vec<Utf8PathBuf> = regular_files(build_dir)?
        .into_iter()
        .filter(|path| {
            path.strip_prefix(build_dir)
                .is_ok_and(|relative| matcher.is_match(relative))
        })
        .collect();

    info!(
        "found {} coverage file(s) under {build_dir}",
        files.len()
    );
    Ok(files)
}
