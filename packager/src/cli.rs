//! CLI argument definitions for the coverage packager.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

/// Bundle gcov coverage artefacts of a Cargo project into a zip archive.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "coverpack")]
#[command(version, about)]
#[command(long_about = concat!(
    "Bundle gcov coverage artefacts of a Cargo project into a zip archive.\n\n",
    "Every Cargo.toml beneath the project root is scanned for [[bin]] targets. ",
    "The .gcno and .gcda files those binaries produced under the build directory ",
    "are then streamed into coverage-<random>.zip in the temporary directory, ",
    "ready for upload to a coverage service.\n\n",
    "The archive path is printed on stdout. Build the project with coverage ",
    "instrumentation and run `cargo test` first, otherwise nothing is found.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Archive coverage for the project in the current directory:\n",
    "    $ coverpack\n\n",
    "  Use a relocated target directory:\n",
    "    $ coverpack --build-dir build/cargo path/to/project\n\n",
    "  Preview what would be archived:\n",
    "    $ coverpack --dry-run\n",
))]
pub struct Cli {
    /// Project root to scan [default: current directory].
    #[arg(value_name = "ROOT")]
    pub root: Option<Utf8PathBuf>,

    /// Configuration file [default: ROOT/coverpack.toml when present].
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Build directory, relative to the project root [default: target].
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<Utf8PathBuf>,

    /// Directory that receives the archive, relative to the current
    /// directory [default: system temp dir].
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Append `archive=<path>` to this GitHub Actions output file.
    #[arg(long, value_name = "FILE", env = "GITHUB_OUTPUT")]
    pub github_output: Option<Utf8PathBuf>,

    /// Report what would be archived and exit without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Returns the log level implied by the verbosity flags.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
