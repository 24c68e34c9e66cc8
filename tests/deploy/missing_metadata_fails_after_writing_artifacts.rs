use crate::common::{
    PACKAGE, archive_dir, archive_path, empty_repository_dir, m2local_deploy,
};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use m2local::areas::repository::Repository;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn missing_metadata_is_not_found(
    empty_repository_dir: TempDir,
    archive_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut repository = Repository::new(empty_repository_dir.path(), Box::new(std::io::sink()));

    let err = repository
        .deploy(&archive_path(&archive_dir), PACKAGE, "1.2.3")
        .unwrap_err();

    let io_error = err
        .downcast_ref::<std::io::Error>()
        .expect("Expected an I/O error");
    assert_eq!(io_error.kind(), std::io::ErrorKind::NotFound);

    // the artifact record is left in place
    let version_dir = empty_repository_dir.child("com/example/mylib/1.2.3");
    version_dir
        .child("mylib-1.2.3.aar")
        .assert(predicate::path::is_file());
    version_dir
        .child("mylib-1.2.3.pom.sha1")
        .assert(predicate::path::is_file());
    empty_repository_dir
        .child("com/example/mylib/maven-metadata.xml")
        .assert(predicate::path::missing());

    Ok(())
}

#[rstest]
fn missing_metadata_exits_with_diagnostic(
    empty_repository_dir: TempDir,
    archive_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    m2local_deploy(
        empty_repository_dir.path(),
        &archive_path(&archive_dir),
        PACKAGE,
        "1.2.3",
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("maven-metadata.xml"));

    Ok(())
}
