use std::path::PathBuf;

/// Fully qualified package identifier (`group.artifact`)
///
/// The last dot-delimited segment is the artifact name, everything before it
/// is the group. Both halves are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId {
    group: String,
    artifact: String,
}

impl PackageId {
    pub fn try_parse(name: &str) -> anyhow::Result<Self> {
        let Some((group, artifact)) = name.rsplit_once('.') else {
            anyhow::bail!(
                "invalid package identifier '{name}': expected <group>.<artifact>"
            );
        };

        if artifact.is_empty() || group.split('.').any(str::is_empty) {
            anyhow::bail!(
                "invalid package identifier '{name}': empty group segment or artifact"
            );
        }

        Ok(Self {
            group: group.to_string(),
            artifact: artifact.to_string(),
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    /// Group segments joined with the platform path separator
    pub fn group_path(&self) -> PathBuf {
        self.group.split('.').collect()
    }

    /// Group path followed by the artifact directory
    pub fn to_path(&self) -> PathBuf {
        self.group_path().join(&self.artifact)
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.group, self.artifact)
    }
}

/// Package version, used verbatim as a path segment and as XML text
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(String);

impl Version {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
