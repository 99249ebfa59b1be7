//! Verizip CLI - create zip archives with per-entry hash verification.

mod cli;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use verizip_core::ArchiveOptions;
use verizip_core::build::BuildProgress;
use verizip_core::build::NullProgress;
use verizip_core::job;
use verizip_core::job::JobContext;

fn main() {
    let cli = cli::Cli::parse();
    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    if let Err(err) = execute(&cli, &*formatter) {
        formatter.format_error(&err);
        std::process::exit(1);
    }
}

fn execute(cli: &cli::Cli, formatter: &dyn output::OutputFormatter) -> Result<()> {
    let options = ArchiveOptions::default()
        .with_root_directory(cli.root_directory)
        .with_ignore_dotfiles(cli.ignore_dotfiles)
        .with_ignore_windows_volume_folders(cli.ignore_windows_volume_folders)
        .with_compression_level(cli.compression_level);

    let ctx = JobContext::new(
        std::env::current_dir()?,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string(),
    );

    let mut bar;
    let mut null = NullProgress;
    let progress: &mut dyn BuildProgress =
        if progress::CliProgress::should_show() && !cli.quiet && !cli.json {
            bar = progress::CliProgress::new("Compressing");
            &mut bar
        } else {
            &mut null
        };

    let summary = job::run(&cli.sources, cli.output.as_deref(), &options, &ctx, progress)
        .map_err(error::convert_archive_error)?;

    formatter.format_job_summary(&summary)?;

    if let Err(err) = summary.ensure_verified() {
        if cli.json {
            // The JSON summary already carries verified=false; emit exactly
            // one object and fail the process
            std::process::exit(1);
        }
        return Err(error::convert_archive_error(err));
    }

    Ok(())
}
