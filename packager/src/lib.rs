//! Coverage artefact packager.
//!
//! This crate finds the gcov coverage output (`.gcno`/`.gcda`) produced by
//! building and testing a multi-binary Cargo project and bundles it into a
//! single zip archive for upload to a coverage service. It backs the
//! `coverpack` CLI binary and can be driven programmatically through
//! [`pipeline::pack`].
//!
//! # Modules
//!
//! - [`archive`] - Randomised archive naming and streaming zip creation
//! - [`bin_name`] - Semantic wrapper for declared binary target names
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types
//! - [`locator`] - Coverage artefact discovery under the build directory
//! - [`manifest`] - Cargo manifest scanning for `[[bin]]` targets
//! - [`output`] - Progress, dry-run, and GitHub Actions output formatting
//! - [`pipeline`] - Discovery and archiving orchestration
//! - [`walk`] - Recursive file enumeration

pub mod archive;
pub mod bin_name;
pub mod cli;
pub mod error;
pub mod locator;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod walk;
