//! Deterministic source traversal and archive-path computation.

use crate::ArchiveError;
use crate::ArchiveOptions;
use crate::Result;
use crate::collect::filters;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// One file scheduled for archiving.
///
/// `archive_path` is the entry name inside the zip: relative, forward-slash
/// separated on every host, unique within a single job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Filesystem location of the file.
    pub path: PathBuf,

    /// Name the file will carry inside the archive.
    pub archive_path: String,
}

/// Collects all files under the given sources into an ordered, deduplicated
/// entry list.
///
/// Traversal is depth-first with lexicographic ordering inside each
/// directory, so repeated runs over an unmodified tree produce an identical
/// list. Exclusion flags prune whole subtrees. `root_prefix`, when set,
/// nests every entry under one synthetic top-level folder.
///
/// Naming policy:
/// - a single source file is named by its base file name;
/// - a single source directory contributes paths relative to itself;
/// - with several sources, each directory's base name becomes an implicit
///   namespace for the files beneath it.
///
/// # Errors
///
/// Returns an error if:
/// - any source path does not exist (all missing paths are reported
///   together, before anything else happens)
/// - two distinct files map to the same archive path
/// - a path is not valid UTF-8
/// - the filesystem fails during traversal
pub fn collect_sources(
    sources: &[PathBuf],
    options: &ArchiveOptions,
    root_prefix: Option<&str>,
) -> Result<Vec<SourceEntry>> {
    let missing: Vec<PathBuf> = sources.iter().filter(|p| !p.exists()).cloned().collect();
    if !missing.is_empty() {
        return Err(ArchiveError::SourceNotFound { paths: missing });
    }

    let namespaced = sources.len() > 1;
    let mut entries = Vec::new();

    for source in sources {
        if source.is_dir() {
            let namespace = if namespaced {
                Some(utf8_file_name(source)?)
            } else {
                None
            };
            walk_directory(source, options, namespace, root_prefix, &mut entries)?;
        } else {
            // A file argument is always named by its base file name; with
            // several sources that name doubles as its namespace.
            let name = utf8_file_name(source)?;
            entries.push(SourceEntry {
                path: source.clone(),
                archive_path: apply_prefix(root_prefix, name),
            });
        }
    }

    dedup_entries(entries)
}

fn walk_directory(
    source: &Path,
    options: &ArchiveOptions,
    namespace: Option<&str>,
    root_prefix: Option<&str>,
    entries: &mut Vec<SourceEntry>,
) -> Result<()> {
    let walker = WalkDir::new(source)
        .sort_by_file_name()
        .into_iter()
        // The explicitly named source root is exempt from pruning
        .filter_entry(|entry| {
            entry.depth() == 0
                || entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !filters::should_prune(name, entry.file_type().is_dir(), options))
        });

    for entry in walker {
        let entry = entry.map_err(walk_error)?;
        if !is_archivable_file(&entry) {
            continue;
        }

        let mut rel = relative_archive_path(entry.path(), source)?;
        if let Some(namespace) = namespace {
            rel = format!("{namespace}/{rel}");
        }
        entries.push(SourceEntry {
            path: entry.path().to_path_buf(),
            archive_path: apply_prefix(root_prefix, &rel),
        });
    }

    Ok(())
}

/// Regular files are archived; a symlink counts when its target resolves to
/// a regular file (directory symlinks are neither traversed nor stored).
fn is_archivable_file(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink() && std::fs::metadata(entry.path()).is_ok_and(|m| m.is_file())
}

/// Fails distinct files that contend for one archive name; exact duplicates
/// (same file given twice) collapse to a single entry.
fn dedup_entries(entries: Vec<SourceEntry>) -> Result<Vec<SourceEntry>> {
    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut unique = Vec::with_capacity(entries.len());

    for entry in entries {
        match seen.entry(entry.archive_path.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(entry.path.clone());
                unique.push(entry);
            }
            Entry::Occupied(existing) if *existing.get() == entry.path => {}
            Entry::Occupied(existing) => {
                return Err(ArchiveError::NameCollision {
                    archive_path: entry.archive_path,
                    first: existing.get().clone(),
                    second: entry.path,
                });
            }
        }
    }

    Ok(unique)
}

/// Computes the forward-slash relative path of `path` under `source`.
fn relative_archive_path(path: &Path, source: &Path) -> Result<String> {
    let relative = path.strip_prefix(source).map_err(|_| ArchiveError::Io(
        std::io::Error::other(format!(
            "path {} is not under source {}",
            path.display(),
            source.display()
        )),
    ))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| ArchiveError::NonUtf8Path {
                path: path.to_path_buf(),
            })?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}

fn utf8_file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ArchiveError::NonUtf8Path {
            path: path.to_path_buf(),
        })
}

fn apply_prefix(prefix: Option<&str>, rel: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}/{rel}"),
        None => rel.to_string(),
    }
}

fn walk_error(err: walkdir::Error) -> ArchiveError {
    let path = err
        .path()
        .map_or_else(PathBuf::new, std::path::Path::to_path_buf);
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("directory traversal failed"));
    ArchiveError::ReadFailure { path, source }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(entries: &[SourceEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.archive_path.as_str()).collect()
    }

    #[test]
    fn test_single_directory_relative_to_itself() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/file.txt"), "x").unwrap();
        fs::write(temp.path().join("top.txt"), "y").unwrap();

        let entries = collect_sources(
            &[temp.path().to_path_buf()],
            &ArchiveOptions::default(),
            None,
        )
        .unwrap();

        assert_eq!(names(&entries), vec!["sub/file.txt", "top.txt"]);
    }

    #[test]
    fn test_ordering_is_lexicographic_within_directories() {
        let temp = TempDir::new().unwrap();
        for name in ["zebra.txt", "alpha.txt", "mid.txt"] {
            fs::write(temp.path().join(name), name).unwrap();
        }

        let entries = collect_sources(
            &[temp.path().to_path_buf()],
            &ArchiveOptions::default(),
            None,
        )
        .unwrap();

        assert_eq!(names(&entries), vec!["alpha.txt", "mid.txt", "zebra.txt"]);
    }

    #[test]
    fn test_single_file_named_by_base_name() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("report.pdf");
        fs::write(&file, "pdf").unwrap();

        let entries = collect_sources(&[file.clone()], &ArchiveOptions::default(), None).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].archive_path, "report.pdf");
        assert_eq!(entries[0].path, file);
    }

    #[test]
    fn test_multiple_sources_gain_namespaces() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("one")).unwrap();
        fs::create_dir(temp.path().join("two")).unwrap();
        fs::write(temp.path().join("one/a.txt"), "a").unwrap();
        fs::write(temp.path().join("two/a.txt"), "a").unwrap();

        let entries = collect_sources(
            &[temp.path().join("one"), temp.path().join("two")],
            &ArchiveOptions::default(),
            None,
        )
        .unwrap();

        assert_eq!(names(&entries), vec!["one/a.txt", "two/a.txt"]);
    }

    #[test]
    fn test_dotfile_pruning_skips_subtree() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".hidden")).unwrap();
        fs::write(temp.path().join(".hidden/file.txt"), "secret").unwrap();
        fs::write(temp.path().join(".env"), "secret").unwrap();
        fs::write(temp.path().join("visible.txt"), "ok").unwrap();

        let entries = collect_sources(
            &[temp.path().to_path_buf()],
            &ArchiveOptions::default().with_ignore_dotfiles(true),
            None,
        )
        .unwrap();

        assert_eq!(names(&entries), vec!["visible.txt"]);
    }

    #[test]
    fn test_volume_folder_pruning_skips_subtree() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("System Volume Information")).unwrap();
        fs::write(
            temp.path().join("System Volume Information/x.txt"),
            "meta",
        )
        .unwrap();
        fs::create_dir(temp.path().join("$RECYCLE.BIN")).unwrap();
        fs::write(temp.path().join("$RECYCLE.BIN/y.txt"), "trash").unwrap();
        fs::write(temp.path().join("keep.txt"), "ok").unwrap();

        let entries = collect_sources(
            &[temp.path().to_path_buf()],
            &ArchiveOptions::default().with_ignore_windows_volume_folders(true),
            None,
        )
        .unwrap();

        assert_eq!(names(&entries), vec!["keep.txt"]);
    }

    #[test]
    fn test_explicit_dotfile_source_survives_pruning() {
        let temp = TempDir::new().unwrap();
        let hidden = temp.path().join(".config");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join("settings.toml"), "k=v").unwrap();

        let entries = collect_sources(
            &[hidden],
            &ArchiveOptions::default().with_ignore_dotfiles(true),
            None,
        )
        .unwrap();

        assert_eq!(names(&entries), vec!["settings.toml"]);
    }

    #[test]
    fn test_root_prefix_applied_to_every_entry() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let entries = collect_sources(
            &[temp.path().to_path_buf()],
            &ArchiveOptions::default(),
            Some("wrapped"),
        )
        .unwrap();

        assert_eq!(names(&entries), vec!["wrapped/a.txt"]);
    }

    #[test]
    fn test_missing_sources_reported_together() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("real.txt"), "x").unwrap();

        let result = collect_sources(
            &[
                temp.path().join("real.txt"),
                temp.path().join("ghost_one"),
                temp.path().join("ghost_two"),
            ],
            &ArchiveOptions::default(),
            None,
        );

        match result {
            Err(ArchiveError::SourceNotFound { paths }) => {
                assert_eq!(paths.len(), 2);
                assert!(paths[0].ends_with("ghost_one"));
                assert!(paths[1].ends_with("ghost_two"));
            }
            other => panic!("expected SourceNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_name_collision_detected() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("one")).unwrap();
        fs::create_dir(temp.path().join("two")).unwrap();
        fs::write(temp.path().join("one/same.txt"), "1").unwrap();
        fs::write(temp.path().join("two/same.txt"), "2").unwrap();

        let result = collect_sources(
            &[
                temp.path().join("one/same.txt"),
                temp.path().join("two/same.txt"),
            ],
            &ArchiveOptions::default(),
            None,
        );

        assert!(matches!(
            result,
            Err(ArchiveError::NameCollision { archive_path, .. }) if archive_path == "same.txt"
        ));
    }

    #[test]
    fn test_identical_source_given_twice_is_deduplicated() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("once.txt");
        fs::write(&file, "x").unwrap();

        let entries =
            collect_sources(&[file.clone(), file], &ArchiveOptions::default(), None).unwrap();

        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_empty_file_is_collected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("empty.bin"), b"").unwrap();

        let entries = collect_sources(
            &[temp.path().to_path_buf()],
            &ArchiveOptions::default(),
            None,
        )
        .unwrap();

        assert_eq!(names(&entries), vec!["empty.bin"]);
    }

    #[test]
    fn test_empty_directories_produce_no_entries() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("hollow")).unwrap();
        fs::write(temp.path().join("solid.txt"), "x").unwrap();

        let entries = collect_sources(
            &[temp.path().to_path_buf()],
            &ArchiveOptions::default(),
            None,
        )
        .unwrap();

        assert_eq!(names(&entries), vec!["solid.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_symlink_is_collected_as_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("target.txt"), "content").unwrap();
        std::os::unix::fs::symlink(temp.path().join("target.txt"), temp.path().join("link.txt"))
            .unwrap();

        let entries = collect_sources(
            &[temp.path().to_path_buf()],
            &ArchiveOptions::default(),
            None,
        )
        .unwrap();

        assert_eq!(names(&entries), vec!["link.txt", "target.txt"]);
    }
}
