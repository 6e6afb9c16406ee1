//! Sample project descriptors and repository layouts.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractor::FileRepository;
use crate::models::ArtifactCoordinate;

/// Sample `ideadeps.toml` content.
#[derive(Clone, Debug)]
pub struct DescriptorFixture {
    pub content: String,
    pub name: String,
}

impl DescriptorFixture {
    /// Gradle-style buckets with one dependency of each kind and a local repository.
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: r#"
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
"#
            .trim()
            .to_string(),
        }
    }

    /// Buckets extending each other in a loop.
    pub fn cyclic() -> Self {
        Self {
            name: "cyclic".to_string(),
            content: r#"
[module]
name = "app"

[buckets.a]
extends = ["b"]

[buckets.b]
extends = ["a"]
"#
            .trim()
            .to_string(),
        }
    }

    /// Descriptor that is not valid TOML.
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: r#"
[module
name = "app"
"#
            .trim()
            .to_string(),
        }
    }

    /// Write the descriptor as `ideadeps.toml` in `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("ideadeps.toml");
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture '{}'", self.name))?;
        Ok(path)
    }
}

/// Create `<coordinate>.jar` plus one file per extra classifier (`sources`, `javadoc`)
/// under a Maven-layout repository rooted at `root`. Returns the main jar path.
pub fn publish_artifact(
    root: &Path,
    coordinate: &ArtifactCoordinate,
    attachments: &[&str],
) -> Result<PathBuf> {
    let repository = FileRepository::new(root);
    let dir = repository.version_dir(coordinate);
    fs::create_dir_all(&dir)?;

    let main = dir.join(FileRepository::file_name(coordinate, coordinate.classifier.as_deref()));
    fs::write(&main, b"PK")?;
    for attachment in attachments {
        fs::write(dir.join(FileRepository::file_name(coordinate, Some(attachment))), b"PK")?;
    }
    Ok(main)
}
