//! Configuration for verified archive jobs.

use crate::ArchiveError;
use crate::Result;

/// Options controlling collection, naming, and compression for one job.
///
/// # Examples
///
/// ```
/// use verizip_core::ArchiveOptions;
///
/// let options = ArchiveOptions::default()
///     .with_ignore_dotfiles(true)
///     .with_root_directory(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
    /// Wrap every entry under one shared parent folder inside the archive.
    ///
    /// Default: `false`.
    pub root_directory: bool,

    /// Prune files and directories whose name starts with `.`, including
    /// their entire subtree.
    ///
    /// Default: `false`.
    pub ignore_dotfiles: bool,

    /// Prune directories named `System Volume Information` or
    /// `$RECYCLE.BIN`, including their entire subtree.
    ///
    /// Default: `false`.
    pub ignore_windows_volume_folders: bool,

    /// Deflate compression level (0-9); 0 stores entries uncompressed.
    ///
    /// `None` uses the default level 6.
    pub compression_level: Option<u8>,
}

impl ArchiveOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets root-directory wrapping.
    #[must_use]
    pub fn with_root_directory(mut self, enabled: bool) -> Self {
        self.root_directory = enabled;
        self
    }

    /// Sets dotfile pruning.
    #[must_use]
    pub fn with_ignore_dotfiles(mut self, enabled: bool) -> Self {
        self.ignore_dotfiles = enabled;
        self
    }

    /// Sets Windows volume folder pruning.
    #[must_use]
    pub fn with_ignore_windows_volume_folders(mut self, enabled: bool) -> Self {
        self.ignore_windows_volume_folders = enabled;
        self
    }

    /// Sets the compression level.
    #[must_use]
    pub fn with_compression_level(mut self, level: Option<u8>) -> Self {
        self.compression_level = level;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is set but not in 0-9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(ArchiveError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = ArchiveOptions::default();
        assert!(!options.root_directory);
        assert!(!options.ignore_dotfiles);
        assert!(!options.ignore_windows_volume_folders);
        assert_eq!(options.compression_level, None);
    }

    #[test]
    fn test_options_builder() {
        let options = ArchiveOptions::new()
            .with_root_directory(true)
            .with_ignore_dotfiles(true)
            .with_ignore_windows_volume_folders(true)
            .with_compression_level(Some(9));

        assert!(options.root_directory);
        assert!(options.ignore_dotfiles);
        assert!(options.ignore_windows_volume_folders);
        assert_eq!(options.compression_level, Some(9));
    }

    #[test]
    fn test_options_validate() {
        assert!(ArchiveOptions::default().validate().is_ok());
        assert!(
            ArchiveOptions::default()
                .with_compression_level(Some(0))
                .validate()
                .is_ok()
        );
        assert!(
            ArchiveOptions::default()
                .with_compression_level(Some(9))
                .validate()
                .is_ok()
        );

        let result = ArchiveOptions::default()
            .with_compression_level(Some(10))
            .validate();
        assert!(matches!(
            result,
            Err(ArchiveError::InvalidCompressionLevel { level: 10 })
        ));
    }
}
