//! Plumbing commands (low-level repository inspection)
//!
//! ## Commands
//!
//! - `versions`: List the versions recorded in a package's metadata document
//! - `verify`: Check an artifact record against its checksum sidecars

pub mod verify;
pub mod versions;
