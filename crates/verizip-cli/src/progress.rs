//! Progress bar implementation for the build phase.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use verizip_core::build::BuildProgress;

/// CLI progress bar wrapper implementing `BuildProgress`.
///
/// Displays a per-entry progress bar when running in a TTY. Automatically
/// cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a new CLI progress bar.
    ///
    /// The entry total is not known until the collector has run, so the bar
    /// length is set lazily from the first callback.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::no_length();

        // Template: "Compressing [████████░░░░] 42/100 files (elapsed 3s)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} files (elapsed {elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        bar.set_message(message.to_string());

        Self { bar }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl BuildProgress for CliProgress {
    fn on_entry_start(&mut self, _archive_path: &str, total: usize, _current: usize) {
        if self.bar.length() != Some(total as u64) {
            self.bar.set_length(total as u64);
        }
    }

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _archive_path: &str) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}
