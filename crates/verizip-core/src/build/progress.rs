//! Progress reporting seam for the build phase.

/// Callback interface for observing build progress.
///
/// The core never talks to a terminal; callers that want a progress bar
/// implement this trait and hand it to
/// [`build_archive_with_progress`](crate::build::build_archive_with_progress).
pub trait BuildProgress {
    /// Called before an entry starts streaming into the archive.
    fn on_entry_start(&mut self, archive_path: &str, total: usize, current: usize);

    /// Called for each chunk written; `bytes` is the chunk length.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after an entry has been fully written and hashed.
    fn on_entry_complete(&mut self, archive_path: &str);

    /// Called once when the archive has been finalized.
    fn on_complete(&mut self);
}

/// A progress sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl BuildProgress for NullProgress {
    fn on_entry_start(&mut self, _archive_path: &str, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _archive_path: &str) {}

    fn on_complete(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_progress_accepts_events() {
        let mut progress = NullProgress;
        progress.on_entry_start("a.txt", 2, 1);
        progress.on_bytes_written(128);
        progress.on_entry_complete("a.txt");
        progress.on_complete();
    }
}
