//! Job orchestration: naming, collect, build, verify.
//!
//! The orchestrator owns the ambient inputs the core otherwise avoids: the
//! working directory for relative paths and default output naming, and the
//! run timestamp used when several sources share one derived archive name.
//! Both arrive explicitly through [`JobContext`] so runs are deterministic
//! and testable.

use crate::ArchiveError;
use crate::ArchiveOptions;
use crate::Result;
use crate::build;
use crate::build::BuildProgress;
use crate::build::BuildReport;
use crate::collect;
use crate::verify;
use crate::verify::VerificationReport;
use std::path::Path;
use std::path::PathBuf;

/// Explicit ambient inputs for one job.
#[derive(Debug, Clone)]
pub struct JobContext {
    /// Directory that relative source and output paths resolve against,
    /// and that derived archive names land in.
    pub working_dir: PathBuf,

    /// Preformatted run timestamp (e.g. `2024-03-01_14-22-05`) used for the
    /// multi-source default archive name.
    pub run_timestamp: String,
}

impl JobContext {
    /// Creates a context from a working directory and run timestamp.
    pub fn new(working_dir: impl Into<PathBuf>, run_timestamp: impl Into<String>) -> Self {
        Self {
            working_dir: working_dir.into(),
            run_timestamp: run_timestamp.into(),
        }
    }
}

/// Result of a completed collect → build → verify sequence.
#[derive(Debug)]
pub struct JobSummary {
    /// Where the archive was written.
    pub output_path: PathBuf,

    /// Build phase statistics.
    pub build: BuildReport,

    /// Full verification sweep results.
    pub verification: VerificationReport,

    /// Whether the archive was deleted because verification failed.
    pub archive_removed: bool,
}

impl JobSummary {
    /// Maps the verification outcome onto the error type, for callers that
    /// turn a completed-but-failed sweep into a process exit status.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::VerificationFailed`] when any entry did not
    /// verify cleanly.
    pub fn ensure_verified(&self) -> Result<()> {
        if self.verification.ok() {
            Ok(())
        } else {
            Err(ArchiveError::VerificationFailed {
                failed: self.verification.failed_count(),
                total: self.verification.entries.len(),
            })
        }
    }
}

/// Runs a full verified-archival job.
///
/// Sequences collection, building, and verification. The verification sweep
/// always completes; an archive that fails it is deleted, and the summary
/// carries every per-entry outcome either way. Call
/// [`JobSummary::ensure_verified`] to convert a failed sweep into an error.
///
/// # Errors
///
/// Returns an error if any source is missing, entry names collide, the
/// explicit output already exists, the build fails, or the finished archive
/// cannot be reopened. A failed hash comparison is NOT an error from this
/// function: it is reported through the summary.
pub fn run(
    sources: &[PathBuf],
    output: Option<&Path>,
    options: &ArchiveOptions,
    ctx: &JobContext,
    progress: &mut dyn BuildProgress,
) -> Result<JobSummary> {
    options.validate()?;

    let sources: Vec<PathBuf> = sources.iter().map(|p| absolutize(p, ctx)).collect();

    // Fail fast on missing sources, before naming or any write
    let missing: Vec<PathBuf> = sources.iter().filter(|p| !p.exists()).cloned().collect();
    if !missing.is_empty() {
        return Err(ArchiveError::SourceNotFound { paths: missing });
    }

    let output_path = resolve_output_path(&sources, output, ctx)?;
    let root_prefix = root_prefix(&sources, &output_path, options)?;

    let entries = collect::collect_sources(&sources, options, root_prefix.as_deref())?;
    let (records, build_report) =
        build::build_archive_with_progress(&output_path, &entries, options, progress)?;
    let verification = verify::verify_archive(&output_path, &records)?;

    let archive_removed = if verification.ok() {
        false
    } else {
        // An archive that failed its hash comparison is not kept
        let _ = std::fs::remove_file(&output_path);
        true
    };

    Ok(JobSummary {
        output_path,
        build: build_report,
        verification,
        archive_removed,
    })
}

/// Resolves the output archive path.
///
/// An explicit path is used as-is but refused if it already exists. A
/// derived name (`<stem>.zip` for one source, `<timestamp>_archive.zip` for
/// several) lands in the working directory and gains a `_2`, `_3`, …
/// suffix until it is free.
pub fn resolve_output_path(
    sources: &[PathBuf],
    output: Option<&Path>,
    ctx: &JobContext,
) -> Result<PathBuf> {
    if let Some(explicit) = output {
        let explicit = absolutize(explicit, ctx);
        if explicit.exists() {
            return Err(ArchiveError::OutputExists { path: explicit });
        }
        return Ok(explicit);
    }

    let filename = if let [single] = sources {
        format!("{}.zip", utf8_stem(single)?)
    } else {
        format!("{}_archive.zip", ctx.run_timestamp)
    };

    Ok(safe_output_path(ctx.working_dir.join(filename)))
}

/// Finds a nearby free name when the derived one is taken.
fn safe_output_path(candidate: PathBuf) -> PathBuf {
    if !candidate.exists() {
        return candidate;
    }

    let stem = candidate
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    let parent = candidate.parent().map_or_else(PathBuf::new, Path::to_path_buf);

    for suffix in 2u32.. {
        let next = parent.join(format!("{stem}_{suffix}.zip"));
        if !next.exists() {
            return next;
        }
    }
    unreachable!("suffix search space exhausted")
}

/// Computes the shared root folder name for root-directory mode.
///
/// One directory source wraps under its own name; one file source wraps
/// under its stem; several sources wrap under the archive's stem.
fn root_prefix(
    sources: &[PathBuf],
    output_path: &Path,
    options: &ArchiveOptions,
) -> Result<Option<String>> {
    if !options.root_directory {
        return Ok(None);
    }

    let prefix = if let [single] = sources {
        if single.is_dir() {
            utf8_file_name(single)?
        } else {
            utf8_stem(single)?
        }
    } else {
        utf8_stem(output_path)?
    };
    Ok(Some(prefix))
}

fn absolutize(path: &Path, ctx: &JobContext) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        ctx.working_dir.join(path)
    }
}

fn utf8_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .or_else(|| path.file_name())
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
        .ok_or_else(|| ArchiveError::NonUtf8Path {
            path: path.to_path_buf(),
        })
}

fn utf8_file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
        .ok_or_else(|| ArchiveError::NonUtf8Path {
            path: path.to_path_buf(),
        })
}
