//! Error types for the coverage packager.
//!
//! This module defines the errors surfaced while discovering coverage
//! artefacts and building the archive. Discovery failures carry a hint about
//! the build step that most likely did not run.

use crate::archive::ArchiveError;
use camino::Utf8PathBuf;
use coverpack::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing a coverage archive.
#[derive(Debug, Error)]
pub enum PackagerError {
    /// The project root does not exist or is not a directory.
    #[error("project root {path} is not a directory")]
    RootNotFound {
        /// The path that was supplied as the project root.
        path: Utf8PathBuf,
    },

    /// A `Cargo.toml` could not be read.
    #[error("failed to read manifest {path}")]
    ManifestRead {
        /// Path to the unreadable manifest.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A `Cargo.toml` could not be parsed, or its `bin` table has an
    /// unexpected shape.
    #[error("invalid Cargo.toml at {path}: {source}")]
    InvalidManifest {
        /// Path to the invalid manifest.
        path: Utf8PathBuf,
        /// The TOML deserialisation failure.
        #[source]
        source: toml::de::Error,
    },

    /// A directory traversal failed.
    #[error("failed to walk {root}")]
    Walk {
        /// Directory being traversed.
        root: Utf8PathBuf,
        /// The underlying traversal error.
        #[source]
        source: walkdir::Error,
    },

    /// A coverage glob could not be compiled.
    #[error("invalid coverage pattern: {0}")]
    InvalidPattern(#[from] globset::Error),

    /// A discovered path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// No coverage artefacts matched any declared binary.
    #[error(
        "unable to find any coverage files under {build_dir}; \
         was `cargo test` executed with coverage instrumentation?"
    )]
    NoCoverageFiles {
        /// Build directory that was searched.
        build_dir: Utf8PathBuf,
    },

    /// The project configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The archive could not be written.
    #[error("failed to create coverage archive: {0}")]
    Archive(#[from] ArchiveError),

    /// An I/O operation outside manifest reading failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write output.
    #[error("failed to write output to {path}")]
    WriteFailed {
        /// Destination that could not be written.
        path: Utf8PathBuf,
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`PackagerError`].
pub type Result<T> = std::result::Result<T, PackagerError>;
