//! Coverage archive creation.
//!
//! Located coverage files are streamed into a single zip archive whose
//! entries carry base filenames only. The archive lands in the system
//! temporary directory (or a configured output directory) under a randomised
//! `coverage-<suffix>.zip` name so concurrent runs never collide.
//!
//! # Modules
//!
//! - [`error`] - Archive error types
//! - [`naming`] - Randomised archive file names
//! - [`writer`] - Streaming zip writer

pub mod error;
pub mod naming;
pub mod writer;

pub use error::ArchiveError;
pub use naming::{ARCHIVE_PREFIX, ArchiveName, ArchiveSuffix, SUFFIX_LEN};
pub use writer::{build_archive, entry_name, write_archive};
