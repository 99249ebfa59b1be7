//! Post-build archive verification.
//!
//! Reopens the finished archive, recomputes a digest for every entry from
//! its stored bytes, and compares against the digests recorded while the
//! source files streamed into the archive. The sweep never stops at the
//! first discrepancy: the caller always gets the complete picture.

use crate::ArchiveError;
use crate::Digest;
use crate::Result;
use crate::hash::HashRecord;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Outcome of comparing one entry against its source digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Archive-side digest equals the source-side digest.
    Match,

    /// Digests differ; the entry's content was corrupted in transit.
    Mismatch,

    /// The job expected this entry but the archive does not contain it.
    MissingInArchive,

    /// The entry exists but its stored bytes could not be read back.
    Unreadable,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Match => "match",
            Self::Mismatch => "mismatch",
            Self::MissingInArchive => "missing in archive",
            Self::Unreadable => "unreadable",
        };
        write!(f, "{label}")
    }
}

/// Verification outcome for one archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryVerification {
    /// Entry name inside the archive.
    pub archive_path: String,

    /// Comparison outcome.
    pub status: EntryStatus,
}

/// Full result of a verification sweep.
///
/// Entries are sorted by `archive_path` so reports are deterministic
/// regardless of how the sweep was executed.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    /// Per-entry outcomes, one per recorded digest.
    pub entries: Vec<EntryVerification>,

    /// File entries present in the archive that no record covers.
    pub unexpected_entries: Vec<String>,
}

impl VerificationReport {
    /// Returns `true` only if every entry matched and the archive contains
    /// nothing unexpected.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.unexpected_entries.is_empty()
            && self.entries.iter().all(|e| e.status == EntryStatus::Match)
    }

    /// Number of discrepancies: non-matching entries plus unexpected ones.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        let mismatched = self
            .entries
            .iter()
            .filter(|e| e.status != EntryStatus::Match)
            .count();
        mismatched + self.unexpected_entries.len()
    }

    /// Entries that did not verify cleanly, in report order.
    pub fn failures(&self) -> impl Iterator<Item = &EntryVerification> {
        self.entries
            .iter()
            .filter(|e| e.status != EntryStatus::Match)
    }
}

/// Re-hashes every recorded entry inside the finished archive and compares
/// against the source-side digests.
///
/// Directory markers (names ending in `/`) are ignored; verification is
/// file-by-file. The full sweep always completes, accumulating every
/// discrepancy rather than stopping at the first.
///
/// # Errors
///
/// Returns [`ArchiveError::ArchiveUnreadable`] if the archive itself cannot
/// be opened or its central directory cannot be parsed. Per-entry problems
/// are reported through the returned [`VerificationReport`], never as
/// errors.
pub fn verify_archive(archive_path: &Path, records: &[HashRecord]) -> Result<VerificationReport> {
    let file = File::open(archive_path).map_err(|e| ArchiveError::ArchiveUnreadable {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| ArchiveError::ArchiveUnreadable {
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let expected: HashSet<&str> = records.iter().map(|r| r.archive_path.as_str()).collect();
    let mut unexpected_entries: Vec<String> = archive
        .file_names()
        .filter(|name| !name.ends_with('/') && !expected.contains(name))
        .map(ToString::to_string)
        .collect();
    unexpected_entries.sort_unstable();

    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let status = entry_status(&mut archive, record);
        entries.push(EntryVerification {
            archive_path: record.archive_path.clone(),
            status,
        });
    }
    entries.sort_unstable_by(|a, b| a.archive_path.cmp(&b.archive_path));

    Ok(VerificationReport {
        entries,
        unexpected_entries,
    })
}

fn entry_status<R: std::io::Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    record: &HashRecord,
) -> EntryStatus {
    let entry = match archive.by_name(&record.archive_path) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return EntryStatus::MissingInArchive,
        Err(_) => return EntryStatus::Unreadable,
    };

    match Digest::from_reader(entry) {
        Ok(digest) if digest == record.digest => EntryStatus::Match,
        Ok(_) => EntryStatus::Mismatch,
        Err(_) => EntryStatus::Unreadable,
    }
}
