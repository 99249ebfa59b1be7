//! Error conversion utilities for the CLI.
//!
//! Converts verizip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use verizip_core::ArchiveError;

/// Converts an `ArchiveError` into a user-friendly anyhow error with a HINT.
pub fn convert_archive_error(err: ArchiveError) -> anyhow::Error {
    match err {
        ArchiveError::SourceNotFound { .. } => {
            anyhow!(
                "{err}\n\
                 HINT: Check the spelling of each source path; nothing was written."
            )
        }
        ArchiveError::NameCollision { .. } => {
            anyhow!(
                "{err}\n\
                 HINT: Rename one of the sources or archive them separately; nothing was written."
            )
        }
        ArchiveError::OutputExists { .. } => {
            anyhow!(
                "{err}\n\
                 HINT: Pass a different --output path or remove the existing file first."
            )
        }
        ArchiveError::ReadFailure { .. } => {
            anyhow!(
                "{err}\n\
                 HINT: The file may have been removed or had its permissions changed mid-run. \
                 The partial archive was deleted."
            )
        }
        ArchiveError::WriteFailure { .. } => {
            anyhow!(
                "{err}\n\
                 HINT: Check free disk space and permissions at the output location. \
                 The partial archive was deleted."
            )
        }
        ArchiveError::ArchiveUnreadable { .. } => {
            anyhow!(
                "{err}\n\
                 HINT: The finished archive could not be reopened for verification; \
                 do not trust its contents."
            )
        }
        ArchiveError::VerificationFailed { .. } => {
            anyhow!(
                "{err}\n\
                 HINT: The archive was removed because its contents did not match the sources. \
                 Re-run to produce a fresh one."
            )
        }
        _ => anyhow::Error::from(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_convert_source_not_found() {
        let err = ArchiveError::SourceNotFound {
            paths: vec![PathBuf::from("/gone")],
        };
        let converted = convert_archive_error(err);
        let msg = format!("{converted:?}");
        assert!(msg.contains("'/gone'"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_verification_failed() {
        let err = ArchiveError::VerificationFailed {
            failed: 2,
            total: 5,
        };
        let converted = convert_archive_error(err);
        let msg = format!("{converted:?}");
        assert!(msg.contains("2 of 5"));
        assert!(msg.contains("archive was removed"));
    }

    #[test]
    fn test_convert_output_exists() {
        let err = ArchiveError::OutputExists {
            path: PathBuf::from("taken.zip"),
        };
        let converted = convert_archive_error(err);
        let msg = format!("{converted:?}");
        assert!(msg.contains("taken.zip"));
        assert!(msg.contains("--output"));
    }

    #[test]
    fn test_convert_passthrough_io() {
        let io_err = std::io::Error::other("low level");
        let converted = convert_archive_error(ArchiveError::Io(io_err));
        let msg = format!("{converted:?}");
        assert!(msg.contains("low level"));
    }
}
