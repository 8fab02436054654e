//! Local Document Storage
//!
//! Persists uploaded PDFs to a local directory so the workflow engine can read
//! them by absolute path when it handles the ingest event.
//!
//! ## Behavior
//! - **Validation**: filenames are checked before anything touches the disk.
//!   Path separators, dot segments and non-PDF extensions are rejected.
//! - **Placement**: files land in `upload_dir/filename`, the directory being
//!   created on first use.
//! - **Collisions**: a second upload with the same name overwrites the first.

pub mod sink;
pub mod types;

#[cfg(test)]
mod tests;
