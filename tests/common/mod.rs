//! Common test utilities for ideadeps integration tests

// Not every helper is used by every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Gradle-style descriptor exercising every dependency kind and a conflict.
///
/// Expected scopes with the default rules:
/// - `:core`, `com.example:lib:1.0` → COMPILE
/// - `com.example:annotations:2.0` → PROVIDED and TEST
/// - `libs/tool.jar` → RUNTIME
/// - `junit:junit:4.13.2` → TEST
/// - `com.example:missing-lib:0.1` → unresolved
pub const GRADLE_DESCRIPTOR: &str = r#"
[module]
name = "app"
repository = "repo"

[buckets.implementation]
projects = [":core"]
artifacts = ["com.example:lib:1.0"]

[buckets.compileOnly]
artifacts = ["com.example:annotations:2.0"]

[buckets.compileClasspath]
extends = ["implementation", "compileOnly"]

[buckets.runtimeClasspath]
extends = ["implementation"]
files = ["libs/tool.jar"]

[buckets.testCompileClasspath]
extends = ["compileClasspath"]
artifacts = ["junit:junit:4.13.2", "com.example:missing-lib:0.1"]

[buckets.testRuntimeClasspath]
extends = ["testCompileClasspath", "runtimeClasspath"]
"#;

/// A module directory holding a descriptor and a local Maven repository.
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new().context("Failed to create temp dir")?,
        })
    }

    /// Project with [`GRADLE_DESCRIPTOR`] and its resolvable artifacts published.
    pub fn gradle() -> Result<Self> {
        let project = Self::new()?;
        project.write_descriptor(GRADLE_DESCRIPTOR)?;
        project.publish("com.example", "lib", "1.0", &[])?;
        project.publish("com.example", "annotations", "2.0", &[])?;
        project.publish("junit", "junit", "4.13.2", &["sources"])?;
        Ok(project)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_descriptor(&self, content: &str) -> Result<PathBuf> {
        let path = self.path().join("ideadeps.toml");
        fs::write(&path, content.trim_start()).context("Failed to write descriptor")?;
        Ok(path)
    }

    /// Publish `<name>-<version>.jar` plus attachments into `repo/` in Maven layout.
    pub fn publish(
        &self,
        group: &str,
        name: &str,
        version: &str,
        attachments: &[&str],
    ) -> Result<PathBuf> {
        let mut dir = self.path().join("repo");
        for segment in group.split('.') {
            dir.push(segment);
        }
        let dir = dir.join(name).join(version);
        fs::create_dir_all(&dir)?;

        let jar = dir.join(format!("{name}-{version}.jar"));
        fs::write(&jar, b"PK")?;
        for attachment in attachments {
            fs::write(dir.join(format!("{name}-{version}-{attachment}.jar")), b"PK")?;
        }
        Ok(jar)
    }

    pub fn create_dir(&self, relative: &str) -> Result<PathBuf> {
        let dir = self.path().join(relative);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// `ideadeps` running inside the project with a clean environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("ideadeps").expect("ideadeps binary is built");
        cmd.current_dir(self.path())
            .env_remove("IDEADEPS_OFFLINE")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}
