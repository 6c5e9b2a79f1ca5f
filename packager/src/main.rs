//! coverpack CLI entrypoint.
//!
//! This binary scans a Cargo project for declared binaries, collects the
//! coverage artefacts they produced, and writes them to a zip archive whose
//! path is printed on stdout.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use coverpack::PackConfig;
use coverpack_packager::cli::Cli;
use coverpack_packager::error::{PackagerError, Result};
use coverpack_packager::output::{
    DryRunReport, append_github_output, success_message, write_stderr_line,
};
use coverpack_packager::pipeline::{PackRequest, discover, pack};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Installs `env_logger`; `RUST_LOG` takes precedence over `-v` flags.
fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    let root = resolve_root(cli.root.as_deref())?;
    let config = load_config(cli, &root)?;
    let request = PackRequest::resolve(&root, &config)?;

    if cli.dry_run {
        let discovery = discover(&request)?;
        write_stderr_line(
            stderr,
            DryRunReport {
                request: &request,
                discovery: &discovery,
            }
            .display_text(),
        );
        return Ok(());
    }

    let prepared = pack(&request, &mut rand::thread_rng())?;

    if let Some(output_file) = cli.github_output.as_deref() {
        append_github_output(output_file, &prepared.path)?;
    }
    if !cli.quiet {
        write_stderr_line(
            stderr,
            success_message(prepared.discovery.coverage_files.len(), &prepared.path),
        );
    }
    writeln!(stdout, "{}", prepared.path)?;
    Ok(())
}

/// Returns the explicit root, or the current directory.
fn resolve_root(root: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
    match root {
        Some(path) => Ok(path.to_owned()),
        None => current_dir_utf8(),
    }
}

fn current_dir_utf8() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|err| PackagerError::NonUtf8Path(err.into_path_buf()))
}

/// Loads the configuration file and applies CLI overrides on top of it.
///
/// A relative `--output-dir` is taken from the current directory, like any
/// other command-line path.
fn load_config(cli: &Cli, root: &Utf8Path) -> Result<PackConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => PackConfig::load_from(path)?,
        None => PackConfig::discover(root)?,
    };
    if let Some(build_dir) = &cli.build_dir {
        config.build_dir.clone_from(build_dir);
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output_dir = Some(current_dir_utf8()?.join(output_dir));
    }
    Ok(config)
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}
