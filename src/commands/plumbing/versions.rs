use crate::areas::repository::Repository;
use crate::artifacts::coordinates::METADATA_FILE_NAME;
use crate::artifacts::coordinates::package_id::PackageId;

impl Repository {
    /// Print every version listed in the package's metadata document
    pub fn versions(&mut self, package: &str) -> anyhow::Result<Vec<String>> {
        let package = PackageId::try_parse(package)?;
        let metadata_path = package.to_path().join(METADATA_FILE_NAME);

        let versions = self.metadata().versions(&metadata_path)?;
        for version in &versions {
            writeln!(self.writer(), "{version}")?;
        }

        Ok(versions)
    }
}
