//! Randomised archive naming.
//!
//! Archives are named `coverage-<suffix>.zip`, where the suffix is drawn from
//! a caller-supplied random source. Production code passes a thread-local
//! generator; tests pass a seeded one and get stable names.

use camino::{Utf8Path, Utf8PathBuf};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

/// The fixed prefix for coverage archive names.
pub const ARCHIVE_PREFIX: &str = "coverage";

/// The fixed file extension for coverage archives.
const ARCHIVE_EXTENSION: &str = ".zip";

/// Number of characters in a generated suffix.
pub const SUFFIX_LEN: usize = 13;

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A short lowercase alphanumeric string that disambiguates archive names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveSuffix(String);

impl ArchiveSuffix {
    /// Draws a fresh [`SUFFIX_LEN`]-character suffix from `rng`.
    ///
    /// # Example
    ///
    /// ```
    /// use coverpack_packager::archive::{ArchiveSuffix, SUFFIX_LEN};
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let suffix = ArchiveSuffix::generate(&mut StdRng::seed_from_u64(7));
    /// assert_eq!(suffix.as_str().len(), SUFFIX_LEN);
    /// ```
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let suffix = (0..SUFFIX_LEN)
            .filter_map(|_| SUFFIX_ALPHABET.choose(rng).copied().map(char::from))
            .collect();
        Self(suffix)
    }

    /// Get the suffix as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchiveSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A coverage archive file name.
///
/// # Examples
///
/// ```
/// use coverpack_packager::archive::{ArchiveName, ArchiveSuffix};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let name = ArchiveName::new(ArchiveSuffix::generate(&mut StdRng::seed_from_u64(1)));
/// assert!(name.filename().starts_with("coverage-"));
/// assert!(name.filename().ends_with(".zip"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    suffix: ArchiveSuffix,
}

impl ArchiveName {
    /// Create an archive name from a suffix.
    #[must_use]
    pub const fn new(suffix: ArchiveSuffix) -> Self {
        Self { suffix }
    }

    /// Draw a fresh archive name from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(ArchiveSuffix::generate(rng))
    }

    /// Return the suffix component.
    #[must_use]
    pub const fn suffix(&self) -> &ArchiveSuffix {
        &self.suffix
    }

    /// Return the filename as a string without consuming the value.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }

    /// Return the full archive path inside `dir`.
    #[must_use]
    pub fn path_in(&self, dir: &Utf8Path) -> Utf8PathBuf {
        dir.join(self.filename())
    }
}

impl fmt::Display for ArchiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ARCHIVE_PREFIX}-{}{ARCHIVE_EXTENSION}", self.suffix)
    }
}
