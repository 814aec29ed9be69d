//! Batch construction of the corpus signature file
//!
//! Scans a corpus directory, averages every decodable image and overwrites the
//! signature file. Runs outside of interactive use; unreadable images are
//! skipped rather than aborting the scan.

use crate::index::signature::{SignatureRecord, average_signatures};
use crate::io::configuration::{AUXILIARY_FILE_NAMES, INDEX_FILE_NAME};
use crate::io::error::{MosaicError, Result, file_system_error};
use crate::io::image::load_rgb;
use crate::io::progress::ProgressReporter;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Outcome of a signature file build
#[derive(Debug, Clone, Default)]
pub struct IndexReport {
    /// Location of the written signature file
    pub index_path: PathBuf,
    /// Number of records written
    pub indexed: usize,
    /// Corpus files that could not be decoded
    pub skipped: Vec<PathBuf>,
}

/// Whether a directory member name can be a corpus image
///
/// The signature file itself and the auxiliary download scripts never are.
pub fn is_corpus_member(file_name: &str) -> bool {
    file_name != INDEX_FILE_NAME
        && file_name != "."
        && file_name != ".."
        && !AUXILIARY_FILE_NAMES.contains(&file_name)
}

/// List candidate corpus files in file name order
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn collect_corpus_files(corpus_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries =
        std::fs::read_dir(corpus_dir).map_err(file_system_error(corpus_dir, "read directory"))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(file_system_error(corpus_dir, "read directory"))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::warn!("Skipping non UTF-8 file name {}", path.display());
            continue;
        };
        if !is_corpus_member(&name) {
            continue;
        }
        if name.chars().any(char::is_whitespace) {
            log::warn!("Skipping '{name}': identifiers cannot contain whitespace");
            continue;
        }
        files.push((name, path));
    }

    files.sort();
    Ok(files)
}

/// Average one corpus image into a signature record
///
/// # Errors
///
/// Returns an error if the image cannot be decoded or has no pixels
pub fn signature_record(identifier: &str, path: &Path) -> Result<SignatureRecord> {
    let image = load_rgb(path)?;
    let signatures = average_signatures(&image).ok_or_else(|| MosaicError::InvalidSourceData {
        reason: format!("'{}' has no pixels", path.display()),
    })?;
    Ok(SignatureRecord {
        identifier: identifier.to_string(),
        signatures,
    })
}

/// Rebuild the signature file of a corpus directory
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or the signature file
/// cannot be written. Individual undecodable images are skipped and reported.
pub fn build_signature_file(corpus_dir: &Path, progress: &ProgressReporter) -> Result<IndexReport> {
    let files = collect_corpus_files(corpus_dir)?;
    log::info!(
        "Indexing {} candidate files in {}",
        files.len(),
        corpus_dir.display()
    );

    let phase = progress.phase(files.len() as u64, "Indexing");
    let mut contents = String::new();
    let mut report = IndexReport {
        index_path: corpus_dir.join(INDEX_FILE_NAME),
        ..IndexReport::default()
    };

    for (identifier, path) in files {
        match signature_record(&identifier, &path) {
            Ok(record) => {
                let _ = writeln!(contents, "{record}");
                report.indexed += 1;
            }
            Err(err) => {
                log::warn!("Skipping unreadable corpus entry: {err}");
                report.skipped.push(path);
            }
        }
        phase.advance();
    }
    phase.finish();

    std::fs::write(&report.index_path, contents)
        .map_err(file_system_error(&report.index_path, "write signature file"))?;

    log::info!(
        "Wrote {} records to {} ({} skipped)",
        report.indexed,
        report.index_path.display(),
        report.skipped.len()
    );
    Ok(report)
}
