//! Output formatting for the packager CLI.
//!
//! This module renders the human-facing progress and dry-run text, and the
//! `archive=<path>` record that hands the archive over to later steps of a
//! GitHub Actions job.

use crate::error::{PackagerError, Result};
use crate::pipeline::{Discovery, PackRequest};
use camino::Utf8Path;
use std::fs::OpenOptions;
use std::io::Write;

/// Output key under which the archive path is published.
pub const GITHUB_OUTPUT_KEY: &str = "archive";

/// Format a success message after archiving.
#[must_use]
pub fn success_message(count: usize, archive: &Utf8Path) -> String {
    let plural = if count == 1 { "file" } else { "files" };
    format!("Archived {count} coverage {plural} to {archive}")
}

/// Format the `key=value` line GitHub Actions reads from `$GITHUB_OUTPUT`.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use coverpack_packager::output::github_output_record;
///
/// let line = github_output_record(Utf8Path::new("/tmp/coverage-abc.zip"));
/// assert_eq!(line, "archive=/tmp/coverage-abc.zip\n");
/// ```
#[must_use]
pub fn github_output_record(archive: &Utf8Path) -> String {
    format!("{GITHUB_OUTPUT_KEY}={archive}\n")
}

/// Append the archive record to a GitHub Actions output file.
///
/// The file is created if it does not exist; existing records are kept.
///
/// # Errors
///
/// Returns [`PackagerError::WriteFailed`] if the file cannot be opened or
/// written.
pub fn append_github_output(output_file: &Utf8Path, archive: &Utf8Path) -> Result<()> {
    let write_failed = |source| PackagerError::WriteFailed {
        path: output_file.to_owned(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_file)
        .map_err(write_failed)?;
    file.write_all(github_output_record(archive).as_bytes())
        .map_err(write_failed)
}

/// What a dry run found, ready for display.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use coverpack_packager::output::DryRunReport;
/// use coverpack_packager::pipeline::{Discovery, PackRequest};
///
/// let request = PackRequest {
///     root: Utf8PathBuf::from("/work/app"),
///     build_dir: Utf8PathBuf::from("/work/app/target"),
///     output_dir: Utf8PathBuf::from("/tmp"),
/// };
/// let discovery = Discovery::default();
///
/// let text = DryRunReport { request: &request, discovery: &discovery }.display_text();
/// assert!(text.contains("Dry run"));
/// assert!(text.contains("/work/app/target"));
/// ```
#[derive(Debug)]
pub struct DryRunReport<'a> {
    /// The resolved request.
    pub request: &'a PackRequest,
    /// The discovery pass to report.
    pub discovery: &'a Discovery,
}

impl DryRunReport<'_> {
    /// Format the dry-run report for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let mut lines = vec![
            "Dry run - no archive will be written".to_owned(),
            String::new(),
            format!("Project root: {}", self.request.root),
            format!("Build directory: {}", self.request.build_dir),
            format!("Output directory: {}", self.request.output_dir),
            String::new(),
            format!("Manifests considered: {}", self.discovery.manifests.len()),
        ];

        lines.push("Binaries:".to_owned());
        if self.discovery.binaries.is_empty() {
            lines.push("  (none declared)".to_owned());
        }
        for name in &self.discovery.binaries {
            lines.push(format!("  - {name}"));
        }

        lines.push("Coverage files:".to_owned());
        if self.discovery.coverage_files.is_empty() {
            lines.push("  (none found)".to_owned());
        }
        for path in &self.discovery.coverage_files {
            lines.push(format!("  - {path}"));
        }

        lines.join("\n")
    }
}

/// Write a line to stderr, ignoring failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bin_name::BinaryName;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    #[fixture]
    fn request() -> PackRequest {
        PackRequest {
            root: Utf8PathBuf::from("/work/app"),
            build_dir: Utf8PathBuf::from("/work/app/target"),
            output_dir: Utf8PathBuf::from("/tmp"),
        }
    }

    #[rstest]
    #[case::singular(1, "1 coverage file to")]
    #[case::plural(4, "4 coverage files to")]
    fn success_message_pluralises_correctly(#[case] count: usize, #[case] expected: &str) {
        let msg = success_message(count, Utf8Path::new("/tmp/coverage-x.zip"));
        assert!(msg.contains(expected));
        assert!(msg.ends_with("/tmp/coverage-x.zip"));
    }

    #[rstest]
    fn dry_run_lists_binaries_and_files(request: PackRequest) {
        let discovery = Discovery {
            manifests: vec![Utf8PathBuf::from("/work/app/Cargo.toml")],
            binaries: vec![BinaryName::from("my-tool")],
            coverage_files: vec![Utf8PathBuf::from("/work/app/target/my_tool.gcda")],
        };

        let text = DryRunReport {
            request: &request,
            discovery: &discovery,
        }
        .display_text();

        assert!(text.contains("Manifests considered: 1"));
        assert!(text.contains("  - my-tool"));
        assert!(text.contains("  - /work/app/target/my_tool.gcda"));
    }

    #[rstest]
    fn dry_run_flags_empty_discovery(request: PackRequest) {
        let discovery = Discovery::default();

        let text = DryRunReport {
            request: &request,
            discovery: &discovery,
        }
        .display_text();

        assert!(text.contains("(none declared)"));
        assert!(text.contains("(none found)"));
    }

    #[test]
    fn github_output_appends_records() {
        let dir = TempDir::new().expect("temp dir");
        let file = Utf8PathBuf::try_from(dir.path().join("github_output")).expect("utf-8");
        fs::write(&file, "previous=value\n").expect("seed");

        append_github_output(&file, Utf8Path::new("/tmp/coverage-abc.zip")).expect("append");

        assert_eq!(
            fs::read_to_string(&file).expect("read"),
            "previous=value\narchive=/tmp/coverage-abc.zip\n"
        );
    }

    #[test]
    fn github_output_reports_unwritable_destinations() {
        let dir = TempDir::new().expect("temp dir");
        let file = Utf8PathBuf::try_from(dir.path().join("missing/dir/output")).expect("utf-8");

        let err = append_github_output(&file, Utf8Path::new("/tmp/a.zip")).expect_err("must fail");

        assert!(matches!(err, PackagerError::WriteFailed { ref path, .. } if *path == file));
    }

    #[test]
    fn write_stderr_line_appends_newline() {
        let mut sink = Vec::new();
        write_stderr_line(&mut sink, "hello");
        assert_eq!(sink, b"hello\n");
    }
}
