//! Source path collection.
//!
//! Turns caller-supplied source paths into the flat, deterministic list of
//! entries that the builder writes and the verifier checks.

pub mod filters;
pub mod walker;

pub use walker::SourceEntry;
pub use walker::collect_sources;
