//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use verizip_core::JobSummary;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct EntryOutput {
    archive_path: String,
    status: String,
}

#[derive(Serialize)]
struct SummaryOutput {
    output_path: String,
    files_added: usize,
    bytes_written: u64,
    duration_ms: u128,
    verified: bool,
    entries: Vec<EntryOutput>,
    unexpected_entries: Vec<String>,
    archive_removed: bool,
    warnings: Vec<String>,
}

impl OutputFormatter for JsonFormatter {
    fn format_job_summary(&self, summary: &JobSummary) -> Result<()> {
        let data = SummaryOutput {
            output_path: summary.output_path.display().to_string(),
            files_added: summary.build.files_added,
            bytes_written: summary.build.bytes_written,
            duration_ms: summary.build.duration.as_millis(),
            verified: summary.verification.ok(),
            entries: summary
                .verification
                .entries
                .iter()
                .map(|e| EntryOutput {
                    archive_path: e.archive_path.clone(),
                    status: e.status.to_string(),
                })
                .collect(),
            unexpected_entries: summary.verification.unexpected_entries.clone(),
            archive_removed: summary.archive_removed,
            warnings: summary.build.warnings.clone(),
        };

        let output = JsonOutput::success("create", data);
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("create", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
