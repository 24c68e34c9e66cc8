use crate::areas::repository::Repository;
use crate::artifacts::checksum::SIDECAR_KINDS;
use crate::artifacts::coordinates::layout::ArtifactLayout;
use crate::artifacts::coordinates::package_id::{PackageId, Version};
use anyhow::Context;

impl Repository {
    /// Check every file of an artifact record against its checksum sidecars
    ///
    /// Prints one `<file> (<algorithm>): OK|FAILED` line per sidecar and fails
    /// if any digest does not match.
    pub fn verify(&mut self, package: &str, version: &str) -> anyhow::Result<()> {
        let package = PackageId::try_parse(package)?;
        let layout = ArtifactLayout::new(package, Version::new(version), "");
        let version_dir = self.path().join(layout.version_dir());
        let base_name = layout.base_file_name();

        let mut files = std::fs::read_dir(&version_dir)
            .with_context(|| format!("Unable to list {}", version_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(&base_name))
            .filter(|name| {
                !SIDECAR_KINDS
                    .iter()
                    .any(|kind| name.ends_with(&format!(".{}", kind.extension())))
            })
            .collect::<Vec<_>>();
        files.sort();

        if files.is_empty() {
            anyhow::bail!(
                "no artifact files for {} {} in {}",
                layout.package(),
                version,
                version_dir.display()
            );
        }

        let mut failures = 0usize;
        for file in &files {
            let checks = self
                .store()
                .verify_checksums(&layout.version_dir().join(file))?;

            for check in checks {
                let status = if check.is_valid() {
                    "OK"
                } else {
                    failures += 1;
                    "FAILED"
                };
                writeln!(self.writer(), "{} ({}): {}", file, check.kind, status)?;
            }
        }

        if failures > 0 {
            anyhow::bail!("{failures} computed checksum(s) did not match");
        }

        Ok(())
    }
}
