use crate::common::{
    PACKAGE, archive_dir, archive_path, m2local_deploy, repository_dir, run_m2local_command,
};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

fn verify_command(repository: &TempDir, version: &str) -> assert_cmd::Command {
    let mut cmd = run_m2local_command(&["verify", "-p", PACKAGE, "-v", version]);
    cmd.arg("-r").arg(repository.path());
    cmd
}

#[rstest]
fn freshly_registered_artifact_verifies(
    repository_dir: TempDir,
    archive_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    m2local_deploy(repository_dir.path(), &archive_path(&archive_dir), PACKAGE, "1.2.3")
        .assert()
        .success();

    verify_command(&repository_dir, "1.2.3")
        .assert()
        .success()
        .stdout(
            "mylib-1.2.3.aar (MD5): OK\n\
             mylib-1.2.3.aar (SHA-1): OK\n\
             mylib-1.2.3.pom (MD5): OK\n\
             mylib-1.2.3.pom (SHA-1): OK\n",
        );

    Ok(())
}

#[rstest]
fn tampered_archive_fails_verification(
    repository_dir: TempDir,
    archive_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    m2local_deploy(repository_dir.path(), &archive_path(&archive_dir), PACKAGE, "1.2.3")
        .assert()
        .success();

    repository_dir
        .child("com/example/mylib/1.2.3/mylib-1.2.3.aar")
        .write_str("tampered")?;

    verify_command(&repository_dir, "1.2.3")
        .assert()
        .failure()
        .stdout(predicate::str::contains("mylib-1.2.3.aar (MD5): FAILED"))
        .stdout(predicate::str::contains("mylib-1.2.3.pom (SHA-1): OK"))
        .stderr(predicate::str::contains("2 computed checksum(s) did not match"));

    Ok(())
}

#[rstest]
fn unregistered_version_cannot_be_verified(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    verify_command(&repository_dir, "9.9.9").assert().failure();

    Ok(())
}
