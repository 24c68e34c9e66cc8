//! Repository coordinates
//!
//! Maven-style addressing of a package inside the local repository:
//!
//! - `package_id`: `group.artifact` identifiers and opaque versions
//! - `layout`: repository-relative paths derived from a package and version

pub mod layout;
pub mod package_id;

/// Extension of the project-object-model descriptor written next to each archive
pub const DESCRIPTOR_EXTENSION: &str = "pom";

/// File name of the per-package version index
pub const METADATA_FILE_NAME: &str = "maven-metadata.xml";
