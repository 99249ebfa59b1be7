//! Hash-verified zip archive creation.
//!
//! `verizip-core` compresses source directories and files into a zip
//! archive, then verifies file-by-file that a BLAKE3 digest computed from
//! each original matches a digest recomputed from the corresponding entry
//! inside the produced archive. It detects silent corruption during
//! compression; it does not attempt to repair it.
//!
//! # Examples
//!
//! ```no_run
//! use verizip_core::ArchiveOptions;
//! use verizip_core::build::NullProgress;
//! use verizip_core::job::JobContext;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = JobContext::new("/home/user", "2024-03-01_14-22-05");
//! let options = ArchiveOptions::default().with_ignore_dotfiles(true);
//! let summary = verizip_core::job::run(
//!     &["photos".into()],
//!     None,
//!     &options,
//!     &ctx,
//!     &mut NullProgress,
//! )?;
//! summary.ensure_verified()?;
//! println!("archive at {}", summary.output_path.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod build;
pub mod collect;
pub mod config;
pub mod error;
pub mod hash;
pub mod job;
pub mod verify;

// Re-export main API types
pub use config::ArchiveOptions;
pub use error::ArchiveError;
pub use error::Result;
pub use hash::Digest;
pub use hash::HashRecord;
pub use job::JobContext;
pub use job::JobSummary;
pub use verify::EntryStatus;
pub use verify::VerificationReport;
