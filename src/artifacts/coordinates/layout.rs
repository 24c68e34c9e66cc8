//! Repository-relative paths of an artifact record
//!
//! For package `com.example.mylib`, version `1.2.3` and an `aar` archive:
//!
//! ```text
//! com/example/mylib/maven-metadata.xml
//! com/example/mylib/1.2.3/mylib-1.2.3.aar
//! com/example/mylib/1.2.3/mylib-1.2.3.pom
//! ```

use crate::artifacts::coordinates::package_id::{PackageId, Version};
use crate::artifacts::coordinates::{DESCRIPTOR_EXTENSION, METADATA_FILE_NAME};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    package: PackageId,
    version: Version,
    /// Packaging type, taken from the source archive extension (may be empty)
    packaging: String,
}

impl ArtifactLayout {
    pub fn new(package: PackageId, version: Version, packaging: impl Into<String>) -> Self {
        ArtifactLayout {
            package,
            version,
            packaging: packaging.into(),
        }
    }

    /// Build a layout whose packaging is the extension of `archive`
    pub fn for_archive(package: PackageId, version: Version, archive: &Path) -> Self {
        let packaging = archive_extension(archive);
        Self::new(package, version, packaging)
    }

    pub fn package(&self) -> &PackageId {
        &self.package
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    pub fn package_dir(&self) -> PathBuf {
        self.package.to_path()
    }

    pub fn version_dir(&self) -> PathBuf {
        self.package_dir().join(self.version.as_ref())
    }

    /// `artifact-version`, shared by the archive and its descriptor
    pub fn base_file_name(&self) -> String {
        format!("{}-{}", self.package.artifact(), self.version)
    }

    pub fn archive_file_name(&self) -> String {
        if self.packaging.is_empty() {
            self.base_file_name()
        } else {
            format!("{}.{}", self.base_file_name(), self.packaging)
        }
    }

    pub fn descriptor_file_name(&self) -> String {
        format!("{}.{}", self.base_file_name(), DESCRIPTOR_EXTENSION)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.version_dir().join(self.archive_file_name())
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.version_dir().join(self.descriptor_file_name())
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.package_dir().join(METADATA_FILE_NAME)
    }
}

/// Text after the final `.` of the file name, or an empty string
pub fn archive_extension(archive: &Path) -> String {
    archive
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}
