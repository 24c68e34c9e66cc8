//! Artifact files inside the repository
//!
//! Every file the registrar stores is accompanied by checksum sidecars, see
//! [`crate::artifacts::checksum`]. Paths passed to the store are relative to
//! the repository root.

use crate::artifacts::checksum::{
    ChecksumKind, Digester, SIDECAR_KINDS, parse_sidecar_line, sidecar_line,
};
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct ArtifactStore {
    /// Repository root
    path: Box<Path>,
}

/// Outcome of checking one sidecar against the file it describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarCheck {
    pub kind: ChecksumKind,
    pub sidecar: PathBuf,
    pub expected: String,
    pub actual: String,
}

impl SidecarCheck {
    pub fn is_valid(&self) -> bool {
        self.expected == self.actual
    }
}

impl ArtifactStore {
    /// Create `dir` and any missing ancestors; no-op when it already exists
    pub fn ensure_dir(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let dir = self.path.join(dir);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Unable to create directory {}", dir.display()))?;

        Ok(dir)
    }

    /// Copy `source` byte for byte to `dest`, replacing any existing file
    pub fn copy_in(&self, source: &Path, dest: &Path) -> anyhow::Result<PathBuf> {
        let dest = self.path.join(dest);
        let bytes = std::fs::copy(source, &dest).with_context(|| {
            format!("Unable to copy {} to {}", source.display(), dest.display())
        })?;
        tracing::debug!(bytes, dest = %dest.display(), "archive copied");

        Ok(dest)
    }

    pub fn write_file(&self, dest: &Path, content: &[u8]) -> anyhow::Result<PathBuf> {
        let dest = self.path.join(dest);
        std::fs::write(&dest, content)
            .with_context(|| format!("Unable to write {}", dest.display()))?;

        Ok(dest)
    }

    /// Write one sidecar per [`SIDECAR_KINDS`] entry next to `file`
    pub fn write_checksums(&self, file: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let file = self.path.join(file);
        let data = std::fs::read(&file)
            .with_context(|| format!("Unable to read {} for hashing", file.display()))?;
        let file_name = file_name_of(&file)?;

        SIDECAR_KINDS
            .iter()
            .map(|kind| {
                let sidecar = file.with_file_name(kind.sidecar_name(&file_name));
                let digest = kind.digest(&data);
                std::fs::write(&sidecar, sidecar_line(&digest, &file_name))
                    .with_context(|| format!("Unable to write {}", sidecar.display()))?;
                tracing::debug!(%kind, %digest, sidecar = %sidecar.display(), "checksum written");

                Ok(sidecar)
            })
            .collect()
    }

    /// Recompute the digests of `file` and compare them to its sidecars
    pub fn verify_checksums(&self, file: &Path) -> anyhow::Result<Vec<SidecarCheck>> {
        let file = self.path.join(file);
        let data = std::fs::read(&file)
            .with_context(|| format!("Unable to read {}", file.display()))?;
        let file_name = file_name_of(&file)?;

        SIDECAR_KINDS
            .iter()
            .map(|kind| {
                let sidecar = file.with_file_name(kind.sidecar_name(&file_name));
                let line = std::fs::read_to_string(&sidecar)
                    .with_context(|| format!("Unable to read {}", sidecar.display()))?;
                let (expected, recorded_name) = parse_sidecar_line(&line)
                    .with_context(|| format!("Invalid checksum file {}", sidecar.display()))?;

                if expected.len() != kind.hex_len() {
                    anyhow::bail!(
                        "{} holds a {}-digit digest, {} digests have {}",
                        sidecar.display(),
                        expected.len(),
                        kind,
                        kind.hex_len()
                    );
                }
                if recorded_name != file_name {
                    anyhow::bail!(
                        "{} describes {} instead of {}",
                        sidecar.display(),
                        recorded_name,
                        file_name
                    );
                }

                Ok(SidecarCheck {
                    kind: *kind,
                    sidecar,
                    expected,
                    actual: kind.digest(&data),
                })
            })
            .collect()
    }
}

fn file_name_of(path: &Path) -> anyhow::Result<String> {
    Ok(path
        .file_name()
        .with_context(|| format!("Invalid file path {}", path.display()))?
        .to_string_lossy()
        .into_owned())
}
