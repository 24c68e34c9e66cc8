//! Artifact fetching from the internal build server
//!
//! The build server is reached through the `fetch_artifact` tool shipped
//! next to this binary. Callers only depend on [`ArtifactFetcher`], so the
//! registration flow can be driven by any source that yields a local file.

use anyhow::Context;
use derive_new::new;
use is_executable::IsExecutable;
use std::path::PathBuf;
use std::process::Command;

/// Name of the external fetch executable
pub const FETCH_TOOL_NAME: &str = "fetch_artifact";

/// Build target holding the Play Services binaries
pub const GMS_CORE_TARGET: &str = "GmsCore";

/// Artifact name pattern published by the `GmsCore` target
pub const GMS_CORE_ARTIFACT_PATTERN: &str = "google-play-services-???????.aar";

const SERVICE_ACCOUNT_EMAIL: &str =
    "1088486625756-9i8onaub0hcnmqm16st2f3h6lhc7r2k7@developer.gserviceaccount.com";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FetchRequest {
    /// Source branch on the build server
    pub branch: String,
    pub target: String,
    /// OAuth key of the service account
    pub keyfile: PathBuf,
    /// Where the fetched artifact should land
    pub destination: PathBuf,
}

pub trait ArtifactFetcher {
    /// Fetch the latest artifact matching `request`, returning its local path
    fn fetch(&self, request: &FetchRequest) -> anyhow::Result<PathBuf>;
}

/// Fetches artifacts by running the external `fetch_artifact` executable
#[derive(Debug, Clone)]
pub struct FetchArtifactTool {
    executable: PathBuf,
}

impl FetchArtifactTool {
    pub fn new(executable: PathBuf) -> anyhow::Result<Self> {
        if !executable.is_file() {
            anyhow::bail!(
                "couldn't find {} executable at {}; it should be placed in the same directory as this program",
                FETCH_TOOL_NAME,
                executable.display()
            );
        }

        if !executable.is_executable() {
            anyhow::bail!(
                "{} at {} is not executable",
                FETCH_TOOL_NAME,
                executable.display()
            );
        }

        Ok(FetchArtifactTool { executable })
    }

    /// Locate the tool next to the running executable
    pub fn beside_current_exe() -> anyhow::Result<Self> {
        let current_exe =
            std::env::current_exe().context("unable to locate the running executable")?;
        let current_exe = current_exe.canonicalize().unwrap_or(current_exe);
        let dir = current_exe
            .parent()
            .context("running executable has no parent directory")?;

        Self::new(dir.join(FETCH_TOOL_NAME))
    }

    fn command(&self, request: &FetchRequest) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .arg("--branch")
            .arg(&request.branch)
            .arg("--target")
            .arg(&request.target)
            .arg("--latest")
            .arg(format!(
                "--apiary_service_account_email={SERVICE_ACCOUNT_EMAIL}"
            ))
            .arg(format!(
                "--apiary_service_account_private_key_path={}",
                request.keyfile.display()
            ))
            .arg(GMS_CORE_ARTIFACT_PATTERN)
            .arg(&request.destination);
        command
    }
}

impl ArtifactFetcher for FetchArtifactTool {
    fn fetch(&self, request: &FetchRequest) -> anyhow::Result<PathBuf> {
        let mut command = self.command(request);
        tracing::info!(?command, "fetching artifact");

        let status = command
            .status()
            .with_context(|| format!("failed to run {}", self.executable.display()))?;

        if !status.success() {
            anyhow::bail!(
                "{} exited with {} while fetching {} from branch {}",
                FETCH_TOOL_NAME,
                status,
                request.target,
                request.branch
            );
        }

        if !request.destination.is_file() {
            anyhow::bail!(
                "{} reported success but {} does not exist",
                FETCH_TOOL_NAME,
                request.destination.display()
            );
        }

        Ok(request.destination.clone())
    }
}
