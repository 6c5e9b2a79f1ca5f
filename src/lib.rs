//! Shared configuration for the coverpack coverage archiver.
//!
//! The packager crate reads [`PackConfig`] to learn where a project's build
//! output lives and where the finished coverage archive should be written.

pub mod config;

pub use config::{CONFIG_FILE_NAME, ConfigError, PackConfig};
