use crate::common::{metadata_document, read_versions};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use m2local::areas::repository::Repository;
use m2local::artifacts::fetch::{ArtifactFetcher, FetchRequest};
use m2local::commands::porcelain::install_dogfood::GMS_PACKAGE;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::path::PathBuf;

/// Writes fixed content to the requested destination and records the request
struct StubFetcher {
    content: &'static [u8],
    requests: RefCell<Vec<FetchRequest>>,
}

impl ArtifactFetcher for StubFetcher {
    fn fetch(&self, request: &FetchRequest) -> anyhow::Result<PathBuf> {
        std::fs::write(&request.destination, self.content)?;
        self.requests.borrow_mut().push(request.clone());
        Ok(request.destination.clone())
    }
}

struct FailingFetcher;

impl ArtifactFetcher for FailingFetcher {
    fn fetch(&self, request: &FetchRequest) -> anyhow::Result<PathBuf> {
        anyhow::bail!("branch {} not found", request.branch)
    }
}

fn gms_repository() -> TempDir {
    let repository = TempDir::new().expect("Failed to create temp dir");
    repository
        .child("com/google/android/gms/play-services/maven-metadata.xml")
        .write_str(&metadata_document(
            "com.google.android.gms",
            "play-services",
            &["5.0.89"],
        ))
        .expect("Failed to write metadata");
    repository
}

#[test]
fn fetch_and_register_with_stub_fetcher() -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = gms_repository();
    let scratch = TempDir::new()?;
    let keyfile = scratch.child("key.p12");
    keyfile.write_str("secret")?;
    let fetcher = StubFetcher {
        content: b"PK\x03\x04 fake aar",
        requests: RefCell::new(Vec::new()),
    };

    let mut repository = Repository::new(repository_dir.path(), Box::new(std::io::sink()));
    let deployment = repository.install_dogfood(
        &fetcher,
        "ub-gcore-manchego-release",
        "6.0.0",
        keyfile.path(),
        scratch.path(),
    )?;

    let requests = fetcher.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].branch, "ub-gcore-manchego-release");
    assert_eq!(requests[0].target, "GmsCore");
    assert_eq!(requests[0].keyfile, keyfile.path());
    assert_eq!(
        requests[0].destination,
        scratch.path().join("gmscore-latest.aar")
    );

    assert_eq!(deployment.layout.package().to_string(), GMS_PACKAGE);
    repository_dir
        .child("com/google/android/gms/play-services/6.0.0/play-services-6.0.0.aar")
        .assert(b"PK\x03\x04 fake aar" as &[u8]);
    repository_dir
        .child("com/google/android/gms/play-services/6.0.0/play-services-6.0.0.pom")
        .assert(predicate::path::is_file());
    assert_eq!(
        read_versions(&deployment.metadata),
        vec!["5.0.89", "6.0.0"]
    );

    Ok(())
}

#[test]
fn fetch_failure_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = gms_repository();
    let scratch = TempDir::new()?;
    let keyfile = scratch.child("key.p12");
    keyfile.write_str("secret")?;

    let mut repository = Repository::new(repository_dir.path(), Box::new(std::io::sink()));
    let err = repository
        .install_dogfood(&FailingFetcher, "nope", "6.0.0", keyfile.path(), scratch.path())
        .unwrap_err();

    assert!(err.to_string().contains("branch nope not found"));
    repository_dir
        .child("com/google/android/gms/play-services/6.0.0")
        .assert(predicate::path::missing());

    Ok(())
}

#[test]
fn missing_keyfile_is_rejected_before_fetching() -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = gms_repository();
    let scratch = TempDir::new()?;
    let fetcher = StubFetcher {
        content: b"",
        requests: RefCell::new(Vec::new()),
    };

    let mut repository = Repository::new(repository_dir.path(), Box::new(std::io::sink()));
    let result = repository.install_dogfood(
        &fetcher,
        "ub-gcore-manchego-release",
        "6.0.0",
        &scratch.path().join("missing.p12"),
        scratch.path(),
    );

    assert!(result.is_err());
    assert!(fetcher.requests.borrow().is_empty());

    Ok(())
}
