//! Error types for coverage archive creation.
//!
//! Covers the empty-input precondition, I/O failures on either side of the
//! copy, and failures reported by the zip writer itself.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising while writing a coverage archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// No input files were supplied.
    #[error("no coverage files provided for archiving")]
    EmptyFileList,

    /// An input path has no filename component.
    #[error("coverage path has no filename: {0}")]
    InvalidInputPath(Utf8PathBuf),

    /// Two inputs share a base filename and would collide inside the archive.
    #[error("duplicate archive entry {name} (from {first} and {second})")]
    DuplicateEntry {
        /// The colliding entry name.
        name: String,
        /// The input that claimed the name first.
        first: Utf8PathBuf,
        /// The input that collided with it.
        second: Utf8PathBuf,
    },

    /// An I/O operation failed on an input file or the archive itself.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file being read or written.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The zip writer rejected an entry or failed to finalise the archive.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl ArchiveError {
    /// Builds a closure that wraps an I/O error with the path it concerns.
    pub(crate) fn io(path: &camino::Utf8Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_owned(),
            source,
        }
    }
}
