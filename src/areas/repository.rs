use crate::areas::artifact_store::ArtifactStore;
use crate::areas::metadata::MetadataIndex;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Handle on a local Maven-layout repository
///
/// Command output (progress lines) goes to `writer`, so tests and callers can
/// capture it instead of printing to stdout.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    store: ArtifactStore,
    metadata: MetadataIndex,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> Self {
        let path: Box<Path> = path.into();

        Repository {
            store: ArtifactStore::new(path.clone()),
            metadata: MetadataIndex::new(path.clone()),
            path,
            writer: RefCell::new(writer),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn metadata(&self) -> &MetadataIndex {
        &self.metadata
    }
}
