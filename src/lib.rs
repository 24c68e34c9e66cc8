//! Register prebuilt archives in a local Maven-layout repository
//!
//! - `areas`: the repository and the files it manages
//! - `artifacts`: coordinates, checksums, descriptors and metadata formats
//! - `commands`: the operations exposed by the `m2local` binary
//! - `config`: SDK-derived defaults

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
