//! Semantic wrapper for declared binary target names.
//!
//! This module provides the [`BinaryName`] newtype for type-safe handling of
//! `[[bin]]` names read from Cargo manifests, and the conversions from a
//! declared name to the file stem and glob pattern its coverage artefacts use.

use std::fmt;

/// Glob suffix matching the `.gcno`/`.gcda` pair and any other `.gc*`
/// companion emitted by gcov-style instrumentation.
pub const COVERAGE_EXTENSION_GLOB: &str = "*.gc*";

/// A binary target name as declared in a Cargo manifest.
///
/// Names are carried exactly as declared; duplicates across manifests are
/// preserved by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinaryName(String);

impl BinaryName {
    /// Create a new binary name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the binary name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the file stem rustc uses for this target's object files.
    ///
    /// Cargo declares `my-tool` but rustc emits `my_tool-<hash>.gcno`, so every
    /// hyphen becomes an underscore.
    ///
    /// # Example
    ///
    /// ```
    /// use coverpack_packager::bin_name::BinaryName;
    ///
    /// assert_eq!(BinaryName::from("my-cli-tool").artifact_stem(), "my_cli_tool");
    /// ```
    #[must_use]
    pub fn artifact_stem(&self) -> String {
        self.0.replace('-', "_")
    }

    /// Returns the recursive glob matching this target's coverage artefacts.
    ///
    /// # Example
    ///
    /// ```
    /// use coverpack_packager::bin_name::BinaryName;
    ///
    /// assert_eq!(BinaryName::from("my-tool").coverage_pattern(), "**/my_tool*.gc*");
    /// ```
    #[must_use]
    pub fn coverage_pattern(&self) -> String {
        format!("**/{}{COVERAGE_EXTENSION_GLOB}", self.artifact_stem())
    }
}

impl AsRef<str> for BinaryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BinaryName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for BinaryName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for BinaryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
