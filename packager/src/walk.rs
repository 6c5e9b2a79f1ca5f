//! Recursive file enumeration shared by manifest and artefact discovery.
//!
//! Both discovery stages need the same traversal: every regular file below a
//! directory, no depth limit, hidden entries skipped, symlinks followed,
//! deterministic order.

use crate::error::{PackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Returns every regular file beneath `root`, sorted by path.
///
/// Entries whose name starts with `.` are neither returned nor descended
/// into, so `.git` and similar directories never contribute matches. The
/// root itself is always walked, even when its own name is hidden.
///
/// Symbolic links are followed: a link to a file is returned under the link's
/// own path, and a link to a directory is descended. Link cycles are reported
/// as traversal errors.
///
/// # Errors
///
/// Returns [`PackagerError::Walk`] if a directory cannot be read and
/// [`PackagerError::NonUtf8Path`] if a file path is not valid UTF-8.
pub fn regular_files(root: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for walked in walker {
        let entry = walked.map_err(|source| PackagerError::Walk {
            root: root.to_owned(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::try_from(entry.into_path())
            .map_err(|err| PackagerError::NonUtf8Path(err.into_path_buf()))?;
        files.push(path);
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
