use crate::common::{metadata_document, read_versions, run_m2local_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use std::os::unix::fs::PermissionsExt;

/// Stand-in for the build server tool: writes the archive to its last argument
const FETCH_SCRIPT: &str = r#"#!/bin/sh
for last; do :; done
printf 'fetched aar' > "$last"
"#;

#[test]
fn install_with_fetch_tool_script() -> Result<(), Box<dyn std::error::Error>> {
    let sdk = TempDir::new()?;
    let metadata =
        sdk.child("extras/google/m2repository/com/google/android/gms/play-services/maven-metadata.xml");
    metadata.write_str(&metadata_document(
        "com.google.android.gms",
        "play-services",
        &["5.0.89"],
    ))?;
    let keyfile = sdk.child("key.p12");
    keyfile.write_str("secret")?;
    let tool = sdk.child("fetch_artifact");
    tool.write_str(FETCH_SCRIPT)?;
    std::fs::set_permissions(tool.path(), std::fs::Permissions::from_mode(0o755))?;

    let mut cmd = run_m2local_command(&["install-dogfood", "-b", "main", "-v", "6.1.0"]);
    cmd.env("ANDROID_HOME", sdk.path())
        .env("TMPDIR", sdk.path())
        .arg("-k")
        .arg(keyfile.path())
        .arg("--fetch-tool")
        .arg(tool.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Fetching GmsCore from branch main"));

    sdk.child(
        "extras/google/m2repository/com/google/android/gms/play-services/6.1.0/play-services-6.1.0.aar",
    )
    .assert("fetched aar");
    assert_eq!(read_versions(metadata.path()), vec!["5.0.89", "6.1.0"]);

    Ok(())
}

#[test]
fn failing_fetch_tool_aborts_install() -> Result<(), Box<dyn std::error::Error>> {
    let sdk = TempDir::new()?;
    sdk.child("extras/google/m2repository").create_dir_all()?;
    let keyfile = sdk.child("key.p12");
    keyfile.write_str("secret")?;
    let tool = sdk.child("fetch_artifact");
    tool.write_str("#!/bin/sh\nexit 3\n")?;
    std::fs::set_permissions(tool.path(), std::fs::Permissions::from_mode(0o755))?;

    let mut cmd = run_m2local_command(&["install-dogfood", "-b", "main", "-v", "6.1.0"]);
    cmd.env("ANDROID_HOME", sdk.path())
        .env("TMPDIR", sdk.path())
        .arg("-k")
        .arg(keyfile.path())
        .arg("--fetch-tool")
        .arg(tool.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("fetch_artifact exited with"));

    Ok(())
}
