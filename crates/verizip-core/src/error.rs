//! Error types for verified archive creation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while building or verifying an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// One or more source paths do not exist.
    #[error("source path(s) not found: {}", join_paths(.paths))]
    SourceNotFound {
        /// Every missing path, in the order given by the caller.
        paths: Vec<PathBuf>,
    },

    /// Two distinct sources map to the same entry name inside the archive.
    #[error("archive name collision on '{archive_path}': '{}' and '{}'", .first.display(), .second.display())]
    NameCollision {
        /// The contested entry name.
        archive_path: String,
        /// Source that claimed the name first.
        first: PathBuf,
        /// Source that collided with it.
        second: PathBuf,
    },

    /// A source file could not be read during the build.
    #[error("cannot read '{}': {source}", .path.display())]
    ReadFailure {
        /// The unreadable source file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The archive could not be written or finalized.
    #[error("cannot write archive '{}': {reason}", .path.display())]
    WriteFailure {
        /// The output archive path.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The produced archive cannot be reopened for verification.
    #[error("archive '{}' is unreadable: {reason}", .path.display())]
    ArchiveUnreadable {
        /// The archive path.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// One or more entries failed the post-build hash comparison.
    #[error("verification failed: {failed} of {total} entries did not match")]
    VerificationFailed {
        /// Number of entries that were not a clean match.
        failed: usize,
        /// Total entries checked.
        total: usize,
    },

    /// An explicitly requested output path already exists.
    #[error("output path '{}' already exists; refusing to overwrite", .path.display())]
    OutputExists {
        /// The requested output path.
        path: PathBuf,
    },

    /// A path cannot be represented as a UTF-8 archive entry name.
    #[error("path is not valid UTF-8: {}", .path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// Requested compression level outside the supported range.
    #[error("invalid compression level {level} (expected 0-9)")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArchiveError {
    /// Returns `true` if this error was detected before any archive bytes
    /// were written.
    ///
    /// Pre-write errors guarantee no partial output file exists.
    #[must_use]
    pub const fn is_pre_write(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. }
                | Self::NameCollision { .. }
                | Self::OutputExists { .. }
                | Self::NonUtf8Path { .. }
                | Self::InvalidCompressionLevel { .. }
        )
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}
