//! Project object model (POM) descriptor
//!
//! Each registered archive gets a minimal POM next to it so that Gradle and
//! Maven can resolve it. The descriptor always declares the support library
//! as a compile dependency; consumers of the Google repository expect it.

use crate::artifacts::coordinates::layout::ArtifactLayout;
use derive_new::new;
use quick_xml::escape::escape;

/// Dependency declared by every generated descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticDependency {
    pub group_id: &'static str,
    pub artifact_id: &'static str,
    pub version: &'static str,
    pub scope: &'static str,
}

pub const SUPPORT_V4_DEPENDENCY: StaticDependency = StaticDependency {
    group_id: "com.android.support",
    artifact_id: "support-v4",
    version: "19.1.0",
    scope: "compile",
};

const MODEL_VERSION: &str = "4.0.0";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Pom {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
}

impl Pom {
    pub fn from_layout(layout: &ArtifactLayout) -> Self {
        Pom::new(
            layout.package().group().to_string(),
            layout.package().artifact().to_string(),
            layout.version().to_string(),
            layout.packaging().to_string(),
        )
    }

    pub fn render(&self) -> String {
        let dependency = SUPPORT_V4_DEPENDENCY;

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<project xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd" xmlns="http://maven.apache.org/POM/4.0.0"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <modelVersion>{model_version}</modelVersion>
  <groupId>{group_id}</groupId>
  <artifactId>{artifact_id}</artifactId>
  <version>{version}</version>
  <packaging>{packaging}</packaging>
  <dependencies>
    <dependency>
      <groupId>{dep_group_id}</groupId>
      <artifactId>{dep_artifact_id}</artifactId>
      <version>{dep_version}</version>
      <scope>{dep_scope}</scope>
    </dependency>
  </dependencies>
</project>
"#,
            model_version = MODEL_VERSION,
            group_id = escape(self.group_id.as_str()),
            artifact_id = escape(self.artifact_id.as_str()),
            version = escape(self.version.as_str()),
            packaging = escape(self.packaging.as_str()),
            dep_group_id = dependency.group_id,
            dep_artifact_id = dependency.artifact_id,
            dep_version = dependency.version,
            dep_scope = dependency.scope,
        )
    }
}
