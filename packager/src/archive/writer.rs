//! Streaming zip writer for coverage artefacts.
//!
//! Inputs are copied into the archive one at a time, so memory use stays flat
//! regardless of how large the `.gcda` files grow. The archive is complete
//! only once the central directory is written and the file is synced; a
//! failure at any point removes the partial file.

use super::error::ArchiveError;
use super::naming::ArchiveName;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use rand::Rng;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Returns the name an input file is stored under: its base filename.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidInputPath`] if the path has no filename.
pub fn entry_name(path: &Utf8Path) -> Result<&str, ArchiveError> {
    path.file_name()
        .ok_or_else(|| ArchiveError::InvalidInputPath(path.to_owned()))
}

/// Write `entries` into a zip stream over `sink` and return the sink once
/// the central directory has been written.
///
/// Each entry is a `(source_path, archive_name)` pair; entries are written
/// in order and deflate-compressed.
///
/// # Errors
///
/// Returns [`ArchiveError::Io`] if a source cannot be read or the sink
/// cannot be written, and [`ArchiveError::Zip`] if the zip writer fails.
pub fn write_archive<W: Write + Seek>(
    sink: W,
    entries: &[(Utf8PathBuf, String)],
) -> Result<W, ArchiveError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(sink);

    for (source_path, archive_name) in entries {
        info!("Archiving coverage file: {source_path}");
        let mut source = File::open(source_path).map_err(ArchiveError::io(source_path))?;
        zip.start_file(archive_name.as_str(), options)?;
        io::copy(&mut source, &mut zip).map_err(ArchiveError::io(source_path))?;
    }

    Ok(zip.finish()?)
}

/// Package `files` into `coverage-<suffix>.zip` inside `destination_dir`.
///
/// The suffix is drawn from `rng`. Returns the path of the finished archive.
///
/// # Errors
///
/// Returns [`ArchiveError::EmptyFileList`] before touching the filesystem if
/// `files` is empty, [`ArchiveError::DuplicateEntry`] if two inputs share a
/// base filename, and I/O or zip errors raised while writing. Any failure
/// after the archive file was created removes it again.
pub fn build_archive<R: Rng + ?Sized>(
    files: &[Utf8PathBuf],
    destination_dir: &Utf8Path,
    rng: &mut R,
) -> Result<Utf8PathBuf, ArchiveError> {
    if files.is_empty() {
        return Err(ArchiveError::EmptyFileList);
    }

    let entries = plan_entries(files)?;
    let archive_path = ArchiveName::random(rng).path_in(destination_dir);
    debug!("Creating an archive with coverage files at {archive_path}");

    let output = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&archive_path)
        .map_err(ArchiveError::io(&archive_path))?;

    match write_and_sync(output, &entries, &archive_path) {
        Ok(()) => {
            info!("Coverage files archive was created at the {archive_path}");
            Ok(archive_path)
        }
        Err(err) => {
            discard_partial_archive(&archive_path);
            Err(err)
        }
    }
}

/// Pair every input with its entry name, rejecting name collisions.
fn plan_entries(files: &[Utf8PathBuf]) -> Result<Vec<(Utf8PathBuf, String)>, ArchiveError> {
    let mut claimed: HashMap<&str, &Utf8PathBuf> = HashMap::with_capacity(files.len());
    let mut entries = Vec::with_capacity(files.len());

    for path in files {
        let name = entry_name(path)?;
        if let Some(first) = claimed.insert(name, path) {
            return Err(ArchiveError::DuplicateEntry {
                name: name.to_owned(),
                first: first.clone(),
                second: path.clone(),
            });
        }
        entries.push((path.clone(), name.to_owned()));
    }

    Ok(entries)
}

fn write_and_sync(
    output: File,
    entries: &[(Utf8PathBuf, String)],
    archive_path: &Utf8Path,
) -> Result<(), ArchiveError> {
    let buffered = write_archive(BufWriter::new(output), entries)?;
    let file = buffered
        .into_inner()
        .map_err(|err| ArchiveError::io(archive_path)(err.into_error()))?;
    file.sync_all().map_err(ArchiveError::io(archive_path))
}

fn discard_partial_archive(path: &Utf8Path) {
    if let Err(err) = fs::remove_file(path) {
        warn!("failed to remove partial archive {path}: {err}");
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
