//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "verizip")]
#[command(author, version)]
#[command(about = "Create zip archives and verify every entry against its source hash")]
pub struct Cli {
    /// Files or directories to compress
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Output archive path (default: derived from the source name)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Place all entries within a shared parent folder inside the archive
    #[arg(short = 'd', long)]
    pub root_directory: bool,

    /// Ignore files and folders beginning with '.' (typically hidden)
    #[arg(long)]
    pub ignore_dotfiles: bool,

    /// Ignore folders named 'System Volume Information' and '$RECYCLE.BIN'
    #[arg(long)]
    pub ignore_windows_volume_folders: bool,

    /// Compression level (0-9; 0 stores entries uncompressed)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub compression_level: Option<u8>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,
}
