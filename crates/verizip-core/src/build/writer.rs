//! Zip writing with hash-while-streaming.

use crate::ArchiveError;
use crate::ArchiveOptions;
use crate::Result;
use crate::build::BuildProgress;
use crate::build::BuildReport;
use crate::build::NullProgress;
use crate::collect::SourceEntry;
use crate::hash::HashRecord;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Copy buffer size for streaming files into the archive.
const BUFFER_SIZE: usize = 64 * 1024;

/// Creates a zip archive at `output` containing every collected entry.
///
/// Each source file is read exactly once: the bytes stream into the archive
/// and through the hasher simultaneously, and the digest captured during
/// that read is the authoritative source digest for later verification.
///
/// On any failure the partially written archive is deleted; a zip left on
/// disk is always one that finished writing.
///
/// # Errors
///
/// Returns an error if:
/// - `output` already exists
/// - a source file cannot be opened or read
/// - the archive cannot be written or finalized
pub fn build_archive(
    output: &Path,
    entries: &[SourceEntry],
    options: &ArchiveOptions,
) -> Result<(Vec<HashRecord>, BuildReport)> {
    build_archive_with_progress(output, entries, options, &mut NullProgress)
}

/// [`build_archive`] with progress callbacks.
///
/// # Errors
///
/// Same conditions as [`build_archive`].
pub fn build_archive_with_progress(
    output: &Path,
    entries: &[SourceEntry],
    options: &ArchiveOptions,
    progress: &mut dyn BuildProgress,
) -> Result<(Vec<HashRecord>, BuildReport)> {
    options.validate()?;

    let file = File::create_new(output).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            ArchiveError::OutputExists {
                path: output.to_path_buf(),
            }
        } else {
            ArchiveError::WriteFailure {
                path: output.to_path_buf(),
                reason: e.to_string(),
            }
        }
    })?;

    let result = write_entries(file, output, entries, options, progress);
    if result.is_err() {
        // Never leave a half-written archive behind
        let _ = std::fs::remove_file(output);
    }
    result
}

fn write_entries<W: Write + Seek>(
    writer: W,
    output: &Path,
    entries: &[SourceEntry],
    options: &ArchiveOptions,
    progress: &mut dyn BuildProgress,
) -> Result<(Vec<HashRecord>, BuildReport)> {
    let mut zip = ZipWriter::new(writer);
    let mut records = Vec::with_capacity(entries.len());
    let mut report = BuildReport::default();
    let start = std::time::Instant::now();

    let file_options = zip_file_options(options);
    let total = entries.len();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    for (idx, entry) in entries.iter().enumerate() {
        progress.on_entry_start(&entry.archive_path, total, idx + 1);

        let mut source = File::open(&entry.path).map_err(|e| ArchiveError::ReadFailure {
            path: entry.path.clone(),
            source: e,
        })?;

        zip.start_file(&entry.archive_path, file_options)
            .map_err(|e| write_failure(output, &e))?;

        let mut hasher = blake3::Hasher::new();
        loop {
            let n = source.read(&mut buffer).map_err(|e| ArchiveError::ReadFailure {
                path: entry.path.clone(),
                source: e,
            })?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
            zip.write_all(&buffer[..n])
                .map_err(|e| write_failure(output, &e))?;
            report.bytes_written += n as u64;
            progress.on_bytes_written(n as u64);
        }

        records.push(HashRecord {
            archive_path: entry.archive_path.clone(),
            digest: crate::Digest::from_bytes(*hasher.finalize().as_bytes()),
        });
        report.files_added += 1;
        progress.on_entry_complete(&entry.archive_path);
    }

    zip.finish().map_err(|e| write_failure(output, &e))?;
    report.duration = start.elapsed();
    progress.on_complete();

    Ok((records, report))
}

fn zip_file_options(options: &ArchiveOptions) -> SimpleFileOptions {
    let base = SimpleFileOptions::default().large_file(true);
    if options.compression_level == Some(0) {
        base.compression_method(CompressionMethod::Stored)
    } else {
        let level = options.compression_level.unwrap_or(6);
        base.compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level)))
    }
}

fn write_failure(output: &Path, err: &dyn std::fmt::Display) -> ArchiveError {
    ArchiveError::WriteFailure {
        path: output.to_path_buf(),
        reason: err.to_string(),
    }
}
