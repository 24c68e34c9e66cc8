//! Command implementations
//!
//! Commands are organized into two categories:
//!
//! - `plumbing`: Inspection of what is already stored (versions, checksums)
//! - `porcelain`: Registration workflows that write into the repository
//!
//! Each command is an `impl Repository` block writing its progress to the
//! repository's writer.

pub mod plumbing;
pub mod porcelain;
