//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use verizip_core::EntryStatus;
use verizip_core::JobSummary;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn write_success_summary(&self, summary: &JobSummary) {
        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Archive created and verified: {}",
                style("✓").green().bold(),
                summary.output_path.display()
            ));
        } else {
            let _ = self.term.write_line(&format!(
                "Archive created and verified: {}",
                summary.output_path.display()
            ));
        }

        let _ = self
            .term
            .write_line(&format!("  Files added:  {}", summary.build.files_added));
        let _ = self.term.write_line(&format!(
            "  Total size:   {}",
            Self::format_size(summary.build.bytes_written)
        ));
        let _ = self.term.write_line(&format!(
            "  Verification: all {} entries match",
            summary.verification.entries.len()
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration:     {:?}", summary.build.duration));
        }
    }

    fn write_failure_summary(&self, summary: &JobSummary) {
        // Failures always print, even in quiet mode
        let err = Term::stderr();

        if self.use_colors {
            let _ = err.write_line(&format!(
                "{} Verification failed for {}",
                style("✗").red().bold(),
                summary.output_path.display()
            ));
        } else {
            let _ = err.write_line(&format!(
                "Verification failed for {}",
                summary.output_path.display()
            ));
        }

        for failure in summary.verification.failures() {
            let label = match failure.status {
                EntryStatus::Mismatch => "mismatch",
                EntryStatus::MissingInArchive => "missing in archive",
                EntryStatus::Unreadable => "unreadable",
                EntryStatus::Match => continue,
            };
            let _ = err.write_line(&format!("  {label:<20} {}", failure.archive_path));
        }
        for unexpected in &summary.verification.unexpected_entries {
            let _ = err.write_line(&format!("  {:<20} {unexpected}", "unexpected entry"));
        }

        if summary.archive_removed {
            let _ = err.write_line("  The archive was removed.");
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_job_summary(&self, summary: &JobSummary) -> Result<()> {
        if !summary.verification.ok() {
            self.write_failure_summary(summary);
            return Ok(());
        }

        if self.quiet {
            return Ok(());
        }

        self.write_success_summary(summary);

        if summary.build.has_warnings() {
            let _ = self.term.write_line("");
            for warning in &summary.build.warnings {
                self.format_warning(warning);
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let err = Term::stderr();
        if self.use_colors {
            let _ = err.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = err.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
