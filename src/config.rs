//! Project-level configuration loaded from `coverpack.toml`.
//!
//! A project may place a `coverpack.toml` next to its root `Cargo.toml` to
//! tell the packager where build output lives and where the finished archive
//! should be written. Every key is optional: a missing file, or a file that
//! omits a key, falls back to the defaults that match a stock Cargo layout.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

/// File name looked up in the project root by [`PackConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "coverpack.toml";

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration at {path}")]
    Read {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or contains unknown keys.
    #[error("invalid configuration at {path}: {source}")]
    Parse {
        /// Path of the invalid file.
        path: Utf8PathBuf,
        /// The TOML deserialisation failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Settings that shape coverage discovery and archive placement.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackConfig {
    /// Build output directory, resolved relative to the project root.
    ///
    /// Cargo writes instrumented objects and their `.gcno`/`.gcda`
    /// companions beneath `target` unless `CARGO_TARGET_DIR` says otherwise,
    /// so projects with a relocated target directory set this key.
    pub build_dir: Utf8PathBuf,
    /// Directory that receives the archive. Blank or absent values select
    /// the system temporary directory.
    pub output_dir: Option<Utf8PathBuf>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            build_dir: Utf8PathBuf::from(Self::DEFAULT_BUILD_DIR),
            output_dir: None,
        }
    }
}

impl PackConfig {
    /// Build directory used when none is configured.
    pub const DEFAULT_BUILD_DIR: &'static str = "target";

    /// Loads configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid configuration document.
    pub fn load_from(path: &Utf8Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Loads `coverpack.toml` from `root`, falling back to defaults when the
    /// project does not carry one.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file exists but cannot be loaded.
    pub fn discover(root: &Utf8Path) -> Result<Self, ConfigError> {
        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load_from(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the absolute build directory for the given project root.
    ///
    /// Absolute `build_dir` values are returned unchanged.
    #[must_use]
    pub fn build_dir_in(&self, root: &Utf8Path) -> Utf8PathBuf {
        root.join(&self.build_dir)
    }

    /// Returns the configured output directory, treating blank values as
    /// absent.
    #[must_use]
    pub fn output_dir(&self) -> Option<&Utf8Path> {
        self.output_dir
            .as_deref()
            .filter(|dir| !dir.as_str().trim().is_empty())
    }

    /// Returns the configured output directory resolved against `root`, as
    /// [`Self::build_dir_in`] does for the build directory.
    #[must_use]
    pub fn output_dir_in(&self, root: &Utf8Path) -> Option<Utf8PathBuf> {
        self.output_dir().map(|dir| root.join(dir))
    }
}
