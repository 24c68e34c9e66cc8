//! Per-package metadata documents
//!
//! Writers take a process-wide mutex and then an exclusive advisory lock on
//! a sibling `maven-metadata.xml.lock`, so concurrent registrations of the
//! same package, from threads or from separate processes on one host,
//! cannot lose each other's version entries. The document itself is
//! replaced by renaming a fully written temporary file over it.

use crate::artifacts::metadata::{insert_version, list_versions};
use anyhow::Context;
use derive_new::new;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// `fcntl` locks belong to the whole process, threads queue here first
static METADATA_WRITERS: Mutex<()> = Mutex::new(());

const LOCK_SUFFIX: &str = "lock";
const TEMP_SUFFIX: &str = "tmp";

#[derive(Debug, new)]
pub struct MetadataIndex {
    /// Repository root
    path: Box<Path>,
}

impl MetadataIndex {
    /// Add `version` to the metadata document at `metadata_path`
    ///
    /// Returns `false` when the version was already listed, in which case the
    /// document is not written at all. The document must already exist.
    pub fn register_version(&self, metadata_path: &Path, version: &str) -> anyhow::Result<bool> {
        let metadata_path = self.path.join(metadata_path);
        std::fs::metadata(&metadata_path).with_context(|| {
            format!("Unable to open metadata file {}", metadata_path.display())
        })?;

        let _writers = METADATA_WRITERS
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let lock_path = sibling_path(&metadata_path, LOCK_SUFFIX);
        let mut lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Unable to open lock file {}", lock_path.display()))?;
        let _lock = file_guard::lock(&mut lock_file, file_guard::Lock::Exclusive, 0, 1)
            .with_context(|| format!("Unable to lock {}", lock_path.display()))?;

        let document = std::fs::read_to_string(&metadata_path)
            .with_context(|| format!("Unable to read {}", metadata_path.display()))?;

        let Some(rewritten) = insert_version(&document, version)
            .with_context(|| format!("Unable to update {}", metadata_path.display()))?
        else {
            tracing::debug!(version, path = %metadata_path.display(), "version already listed");
            return Ok(false);
        };

        replace_document(&metadata_path, rewritten.as_bytes())?;
        tracing::debug!(version, path = %metadata_path.display(), "version added");

        Ok(true)
    }

    pub fn versions(&self, metadata_path: &Path) -> anyhow::Result<Vec<String>> {
        let metadata_path = self.path.join(metadata_path);
        let document = std::fs::read_to_string(&metadata_path)
            .with_context(|| format!("Unable to read metadata file {}", metadata_path.display()))?;

        list_versions(&document)
            .with_context(|| format!("Invalid metadata file {}", metadata_path.display()))
    }
}

/// Write `content` next to `path` and rename it into place, leaving the old
/// document intact if anything fails before the rename
fn replace_document(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let temp_path = sibling_path(path, TEMP_SUFFIX);
    let mut file = std::fs::File::create(&temp_path)
        .with_context(|| format!("Unable to create {}", temp_path.display()))?;
    file.write_all(content)
        .and_then(|()| file.sync_all())
        .with_context(|| format!("Unable to write {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Unable to replace {}", path.display()))
}

/// `maven-metadata.xml` => `maven-metadata.xml.<suffix>`
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
