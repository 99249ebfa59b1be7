//! Exclusion predicates for source traversal.

use crate::ArchiveOptions;

/// Directory names that hold hidden Windows volume metadata.
const WINDOWS_VOLUME_FOLDERS: [&str; 2] = ["System Volume Information", "$RECYCLE.BIN"];

/// Checks if a file name is a dotfile (starts with `.`).
///
/// Applies to the name component only, never the full path.
///
/// # Examples
///
/// ```
/// use verizip_core::collect::filters;
///
/// assert!(filters::is_dotfile(".gitignore"));
/// assert!(!filters::is_dotfile("visible.txt"));
/// ```
#[must_use]
pub fn is_dotfile(name: &str) -> bool {
    name.starts_with('.')
}

/// Checks if a directory name is a Windows volume metadata folder.
#[must_use]
pub fn is_windows_volume_folder(name: &str) -> bool {
    WINDOWS_VOLUME_FOLDERS.contains(&name)
}

/// Checks if a traversal entry should be pruned, subtree included.
///
/// Pruning a directory skips everything beneath it; the caller is expected
/// to exempt the traversal root so explicitly named sources always survive.
#[must_use]
pub fn should_prune(name: &str, is_dir: bool, options: &ArchiveOptions) -> bool {
    if options.ignore_dotfiles && is_dotfile(name) {
        return true;
    }
    if options.ignore_windows_volume_folders && is_dir && is_windows_volume_folder(name) {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dotfile() {
        assert!(is_dotfile(".hidden"));
        assert!(is_dotfile(".DS_Store"));
        assert!(is_dotfile("."));
        assert!(!is_dotfile("visible.txt"));
        assert!(!is_dotfile("dotless"));
        assert!(!is_dotfile(""));
    }

    #[test]
    fn test_is_windows_volume_folder() {
        assert!(is_windows_volume_folder("System Volume Information"));
        assert!(is_windows_volume_folder("$RECYCLE.BIN"));
        assert!(!is_windows_volume_folder("system volume information"));
        assert!(!is_windows_volume_folder("$Recycle.Bin"));
        assert!(!is_windows_volume_folder("documents"));
    }

    #[test]
    fn test_should_prune_respects_flags() {
        let none = ArchiveOptions::default();
        assert!(!should_prune(".hidden", true, &none));
        assert!(!should_prune("$RECYCLE.BIN", true, &none));

        let dotfiles = ArchiveOptions::default().with_ignore_dotfiles(true);
        assert!(should_prune(".hidden", true, &dotfiles));
        assert!(should_prune(".env", false, &dotfiles));
        assert!(!should_prune("$RECYCLE.BIN", true, &dotfiles));

        let volumes = ArchiveOptions::default().with_ignore_windows_volume_folders(true);
        assert!(should_prune("System Volume Information", true, &volumes));
        assert!(!should_prune(".hidden", true, &volumes));
    }

    #[test]
    fn test_should_prune_volume_folders_only_as_directories() {
        let volumes = ArchiveOptions::default().with_ignore_windows_volume_folders(true);
        // A regular file that happens to carry the name is kept
        assert!(!should_prune("$RECYCLE.BIN", false, &volumes));
    }
}
