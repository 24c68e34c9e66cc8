//! SDK-derived configuration
//!
//! The SDK location is read from the environment once, by the CLI layer, and
//! handed to the commands as explicit paths. Nothing below `main` looks at
//! environment variables.

use derive_new::new;
use std::path::{Path, PathBuf};

/// Environment variable naming the Android SDK root
pub const ANDROID_HOME_ENV: &str = "ANDROID_HOME";

/// Location of the Google Maven repository inside the SDK
const M2_REPOSITORY_SUBPATH: [&str; 3] = ["extras", "google", "m2repository"];

#[derive(Debug, Clone, Default, PartialEq, Eq, new)]
pub struct SdkConfig {
    android_home: Option<PathBuf>,
}

impl SdkConfig {
    pub fn android_home(&self) -> Option<&Path> {
        self.android_home.as_deref()
    }

    /// `$ANDROID_HOME/extras/google/m2repository`
    pub fn m2_repository(&self) -> anyhow::Result<PathBuf> {
        let Some(android_home) = self.android_home() else {
            anyhow::bail!(
                "{ANDROID_HOME_ENV} not set. Please set {ANDROID_HOME_ENV} to the location of a valid Android SDK or pass --repository-path"
            );
        };

        Ok(M2_REPOSITORY_SUBPATH
            .iter()
            .fold(android_home.to_path_buf(), |path, segment| path.join(segment)))
    }

    /// The explicit repository path if given, the SDK repository otherwise
    pub fn resolve_repository(&self, explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => self.m2_repository(),
        }
    }

    /// Like [`SdkConfig::m2_repository`], but the directory must exist
    pub fn existing_m2_repository(&self) -> anyhow::Result<PathBuf> {
        let repository = self.m2_repository()?;
        if !repository.is_dir() {
            anyhow::bail!(
                "{ANDROID_HOME_ENV} not set or not valid: {} does not exist. Please set {ANDROID_HOME_ENV} to the location of a valid Android SDK",
                repository.display()
            );
        }

        Ok(repository)
    }
}
