use crate::areas::repository::Repository;
use crate::artifacts::fetch::{ArtifactFetcher, FetchRequest, GMS_CORE_TARGET};
use crate::commands::porcelain::deploy::Deployment;
use std::path::Path;

/// Package identifier the fetched Play Services archive is registered under
pub const GMS_PACKAGE: &str = "com.google.android.gms.play-services";

/// File name the fetched archive is stored under before registration
pub const FETCHED_ARCHIVE_NAME: &str = "gmscore-latest.aar";

impl Repository {
    /// Fetch the latest Play Services build from `branch` and register it as `version`
    pub fn install_dogfood(
        &mut self,
        fetcher: &dyn ArtifactFetcher,
        branch: &str,
        version: &str,
        keyfile: &Path,
        scratch_dir: &Path,
    ) -> anyhow::Result<Deployment> {
        if !keyfile.is_file() {
            anyhow::bail!("keyfile {} does not exist", keyfile.display());
        }

        let request = FetchRequest::new(
            branch.to_string(),
            GMS_CORE_TARGET.to_string(),
            keyfile.to_path_buf(),
            scratch_dir.join(FETCHED_ARCHIVE_NAME),
        );

        writeln!(
            self.writer(),
            "Fetching {} from branch {} => {}",
            request.target,
            request.branch,
            request.destination.display()
        )?;
        let archive = fetcher.fetch(&request)?;

        self.deploy(&archive, GMS_PACKAGE, version)
    }
}
