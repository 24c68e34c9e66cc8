use crate::areas::repository::Repository;
use crate::artifacts::coordinates::layout::ArtifactLayout;
use crate::artifacts::coordinates::package_id::{PackageId, Version};
use crate::artifacts::pom::Pom;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Files touched by a registration, as absolute paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub layout: ArtifactLayout,
    pub archive: PathBuf,
    pub descriptor: PathBuf,
    /// Checksum sidecars of the archive, then of the descriptor
    pub sidecars: Vec<PathBuf>,
    pub metadata: PathBuf,
    /// Whether the metadata document gained a new version entry
    pub version_added: bool,
}

// Stages run in order and are not rolled back: when the metadata document is
// missing, the archive and descriptor stay in place and the error surfaces
// last. Every stage overwrites or is idempotent, so re-running is safe.
impl Repository {
    pub fn deploy(
        &mut self,
        archive: &Path,
        package: &str,
        version: &str,
    ) -> anyhow::Result<Deployment> {
        let package = PackageId::try_parse(package)?;
        let source = std::fs::metadata(archive)
            .with_context(|| format!("Unable to read archive {}", archive.display()))?;
        if !source.is_file() {
            anyhow::bail!("archive {} is not a regular file", archive.display());
        }

        let layout = ArtifactLayout::for_archive(package, Version::new(version), archive);
        let archive_dest = self.path().join(layout.archive_path());

        writeln!(
            self.writer(),
            "Copying {} => {}",
            archive.display(),
            archive_dest.display()
        )?;
        self.store().ensure_dir(&layout.version_dir())?;
        if is_same_file(archive, &archive_dest) {
            tracing::warn!(archive = %archive.display(), "archive is already in place, not copying");
        } else {
            self.store().copy_in(archive, &layout.archive_path())?;
        }
        let mut sidecars = self.store().write_checksums(&layout.archive_path())?;

        let descriptor_dest = self.path().join(layout.descriptor_path());
        writeln!(self.writer(), "Generating {}", descriptor_dest.display())?;
        let pom = Pom::from_layout(&layout);
        self.store()
            .write_file(&layout.descriptor_path(), pom.render().as_bytes())?;
        sidecars.extend(self.store().write_checksums(&layout.descriptor_path())?);

        let metadata_path = self.path().join(layout.metadata_path());
        writeln!(
            self.writer(),
            "Modifying metadata file at {}",
            metadata_path.display()
        )?;
        let version_added = self
            .metadata()
            .register_version(&layout.metadata_path(), version)?;

        tracing::info!(
            package = %layout.package(),
            version,
            version_added,
            "artifact registered"
        );

        Ok(Deployment {
            layout,
            archive: archive_dest,
            descriptor: descriptor_dest,
            sidecars,
            metadata: metadata_path,
            version_added,
        })
    }
}

/// `std::fs::copy` onto itself truncates the file
fn is_same_file(source: &Path, dest: &Path) -> bool {
    match (source.canonicalize(), dest.canonicalize()) {
        (Ok(source), Ok(dest)) => source == dest,
        _ => false,
    }
}
