//! Repository data structures and formats
//!
//! - `checksum`: MD5 / SHA-1 digests and sidecar lines
//! - `coordinates`: package identifiers, versions and repository paths
//! - `fetch`: retrieving artifacts from the internal build server
//! - `metadata`: editing the `versions` list of `maven-metadata.xml`
//! - `pom`: generated project descriptors

pub mod checksum;
pub mod coordinates;
pub mod fetch;
pub mod metadata;
pub mod pom;
