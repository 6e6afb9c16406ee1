//! Extracted dependencies and their canonical identities.
//!
//! The extractor produces three kinds of dependency. They share one key space,
//! [`DependencyIdentity`], so the membership index can tell when two buckets declare the
//! same logical dependency regardless of which bucket it was found in.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::{ArtifactCoordinate, ModuleVersionId};

/// Canonical key of a logical dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DependencyIdentity {
    /// Referenced project, keyed by its project path
    Project { path: String },
    /// Repository artifact, keyed by the requested coordinate and attachment flags
    Artifact {
        coordinate: ArtifactCoordinate,
        sources: bool,
        javadoc: bool,
    },
    /// Local file, keyed by its normalized absolute path
    LocalFile { path: PathBuf },
}

impl fmt::Display for DependencyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyIdentity::Project { path } => write!(f, "project {path}"),
            DependencyIdentity::Artifact { coordinate, .. } => write!(f, "{coordinate}"),
            DependencyIdentity::LocalFile { path } => write!(f, "file {}", path.display()),
        }
    }
}

/// Dependency on another project of the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDependency {
    /// Project path, e.g. `:libs:core`
    pub path: String,
    /// IDE module name the project is generated as
    pub module_name: String,
}

/// Repository artifact that resolved to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoArtifactDependency {
    /// Coordinate as requested in the bucket
    pub coordinate: ArtifactCoordinate,
    /// Module version it resolved to
    pub id: ModuleVersionId,
    pub file: PathBuf,
    pub source_files: Vec<PathBuf>,
    pub javadoc_files: Vec<PathBuf>,
    /// Whether sources were requested for this extraction
    pub download_sources: bool,
    /// Whether javadoc was requested for this extraction
    pub download_javadoc: bool,
}

/// Plain file dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileDependency {
    /// Normalized absolute path
    pub file: PathBuf,
}

/// One extracted dependency of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedDependency {
    Project(ProjectDependency),
    Artifact(RepoArtifactDependency),
    LocalFile(LocalFileDependency),
}

impl ExtractedDependency {
    /// Canonical identity used to merge the same dependency found in several buckets.
    pub fn identity(&self) -> DependencyIdentity {
        match self {
            ExtractedDependency::Project(project) => DependencyIdentity::Project {
                path: project.path.clone(),
            },
            ExtractedDependency::Artifact(artifact) => DependencyIdentity::Artifact {
                coordinate: artifact.coordinate.clone(),
                sources: artifact.download_sources,
                javadoc: artifact.download_javadoc,
            },
            ExtractedDependency::LocalFile(file) => DependencyIdentity::LocalFile {
                path: file.file.clone(),
            },
        }
    }
}

impl From<ProjectDependency> for ExtractedDependency {
    fn from(value: ProjectDependency) -> Self {
        ExtractedDependency::Project(value)
    }
}

impl From<RepoArtifactDependency> for ExtractedDependency {
    fn from(value: RepoArtifactDependency) -> Self {
        ExtractedDependency::Artifact(value)
    }
}

impl From<LocalFileDependency> for ExtractedDependency {
    fn from(value: LocalFileDependency) -> Self {
        ExtractedDependency::LocalFile(value)
    }
}

/// Repository artifact that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UnresolvedDependency {
    pub coordinate: ArtifactCoordinate,
    /// Why resolution failed
    pub problem: String,
}

impl UnresolvedDependency {
    pub fn new(coordinate: ArtifactCoordinate, problem: impl Into<String>) -> Self {
        Self {
            coordinate,
            problem: problem.into(),
        }
    }

    /// Name used to sort and deduplicate unresolved entries.
    pub fn display_name(&self) -> String {
        self.coordinate.to_string()
    }
}
