//! Dependency extraction.
//!
//! [`DependencyExtractor`] is the seam between resolution and the build model: given a
//! bucket it returns the project references, repository artifacts, and local files the
//! bucket (including everything it inherits) contains. Resolution calls it at most once
//! per bucket and kind, because extraction may resolve artifacts against a repository.
//!
//! [`RegistryExtractor`] is the concrete extractor. It walks the bucket hierarchy of a
//! [`BucketRegistry`] and resolves artifacts against a Maven-layout [`FileRepository`]:
//!
//! ```text
//! <root>/<group as dirs>/<name>/<version>/<name>-<version>[-<classifier>].jar
//! <root>/<group as dirs>/<name>/<version>/<name>-<version>-sources.jar
//! <root>/<group as dirs>/<name>/<version>/<name>-<version>-javadoc.jar
//! ```

use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::models::{
    ArtifactCoordinate, Bucket, Declaration, LocalFileDependency, ProjectDependency,
    RepoArtifactDependency, UnresolvedDependency,
};
use crate::registry::BucketRegistry;
use crate::utils::paths::normalize_path;

/// Extracts dependencies from a single bucket.
///
/// Implementations include inherited declarations. Repository failures are never
/// errors: they are reported through [`extract_unresolved_artifacts`] instead.
///
/// [`extract_unresolved_artifacts`]: DependencyExtractor::extract_unresolved_artifacts
pub trait DependencyExtractor {
    /// Project references declared in the bucket.
    fn extract_project_references(&self, bucket: &Bucket) -> Result<Vec<ProjectDependency>>;

    /// Repository artifacts that resolved to a file.
    fn extract_repo_artifacts(
        &self,
        bucket: &Bucket,
        download_sources: bool,
        download_javadoc: bool,
    ) -> Result<Vec<RepoArtifactDependency>>;

    /// Local file dependencies.
    fn extract_local_files(&self, bucket: &Bucket) -> Result<Vec<LocalFileDependency>>;

    /// Repository artifacts that failed to resolve.
    fn extract_unresolved_artifacts(&self, bucket: &Bucket) -> Result<Vec<UnresolvedDependency>>;
}

/// Outcome of looking an artifact up in a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactResolution {
    Resolved(RepoArtifactDependency),
    Unresolved(UnresolvedDependency),
}

/// Maven-layout artifact repository on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileRepository {
    root: PathBuf,
}

impl FileRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn version_dir(&self, coordinate: &ArtifactCoordinate) -> PathBuf {
        let mut dir = self.root.clone();
        for segment in coordinate.group.split('.') {
            dir.push(segment);
        }
        dir.join(&coordinate.name).join(&coordinate.version)
    }

    pub(crate) fn file_name(coordinate: &ArtifactCoordinate, classifier: Option<&str>) -> String {
        match classifier {
            Some(classifier) => {
                format!("{}-{}-{classifier}.jar", coordinate.name, coordinate.version)
            }
            None => format!("{}-{}.jar", coordinate.name, coordinate.version),
        }
    }

    /// Resolve a coordinate, attaching sources and javadoc when requested and present.
    pub fn resolve(
        &self,
        coordinate: &ArtifactCoordinate,
        download_sources: bool,
        download_javadoc: bool,
    ) -> ArtifactResolution {
        let dir = self.version_dir(coordinate);
        let file = dir.join(Self::file_name(coordinate, coordinate.classifier.as_deref()));

        match std::fs::metadata(&file) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return ArtifactResolution::Unresolved(UnresolvedDependency::new(
                    coordinate.clone(),
                    format!("{} is not a file", file.display()),
                ));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return ArtifactResolution::Unresolved(UnresolvedDependency::new(
                    coordinate.clone(),
                    format!("could not find {}", file.display()),
                ));
            }
            Err(e) => {
                return ArtifactResolution::Unresolved(UnresolvedDependency::new(
                    coordinate.clone(),
                    format!("could not read {}: {e}", file.display()),
                ));
            }
        }

        let attachment = |enabled: bool, kind: &str| -> Vec<PathBuf> {
            if !enabled {
                return Vec::new();
            }
            let path = dir.join(Self::file_name(coordinate, Some(kind)));
            if path.is_file() { vec![path] } else { Vec::new() }
        };

        ArtifactResolution::Resolved(RepoArtifactDependency {
            coordinate: coordinate.clone(),
            id: coordinate.module_version(),
            file,
            source_files: attachment(download_sources, "sources"),
            javadoc_files: attachment(download_javadoc, "javadoc"),
            download_sources,
            download_javadoc,
        })
    }
}

/// Extractor reading declarations from a [`BucketRegistry`].
pub struct RegistryExtractor<'r, R: BucketRegistry> {
    registry: &'r R,
    repository: Option<FileRepository>,
    module_dir: PathBuf,
    root_project: String,
}

impl<'r, R: BucketRegistry> RegistryExtractor<'r, R> {
    /// Create an extractor; relative file declarations resolve against `module_dir`.
    pub fn new(
        registry: &'r R,
        module_dir: impl Into<PathBuf>,
        root_project: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            repository: None,
            module_dir: module_dir.into(),
            root_project: root_project.into(),
        }
    }

    /// Resolve artifacts against `repository`. Without one every artifact is unresolved.
    #[must_use]
    pub fn with_repository(mut self, repository: FileRepository) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Declarations of the bucket and its ancestors, duplicates removed.
    fn declarations(&self, bucket: &Bucket) -> Vec<&'r Declaration> {
        let mut seen = HashSet::new();
        let mut declarations = Vec::new();
        let registry: &'r R = self.registry;
        for member in registry.hierarchy(bucket.id) {
            for declaration in &member.declarations {
                if seen.insert(declaration) {
                    declarations.push(declaration);
                }
            }
        }
        declarations
    }

    fn artifacts(&self, bucket: &Bucket) -> impl Iterator<Item = &'r ArtifactCoordinate> {
        self.declarations(bucket).into_iter().filter_map(|declaration| match declaration {
            Declaration::Artifact(coordinate) => Some(coordinate),
            _ => None,
        })
    }

    fn resolve(
        &self,
        coordinate: &ArtifactCoordinate,
        download_sources: bool,
        download_javadoc: bool,
    ) -> ArtifactResolution {
        match &self.repository {
            Some(repository) => repository.resolve(coordinate, download_sources, download_javadoc),
            None => ArtifactResolution::Unresolved(UnresolvedDependency::new(
                coordinate.clone(),
                "no repository configured",
            )),
        }
    }

    fn module_name(&self, path: &str) -> String {
        path.rsplit(':')
            .find(|segment| !segment.is_empty())
            .map_or_else(|| self.root_project.clone(), str::to_string)
    }
}

impl<R: BucketRegistry> DependencyExtractor for RegistryExtractor<'_, R> {
    fn extract_project_references(&self, bucket: &Bucket) -> Result<Vec<ProjectDependency>> {
        let projects: Vec<_> = self
            .declarations(bucket)
            .into_iter()
            .filter_map(|declaration| match declaration {
                Declaration::Project(path) => Some(ProjectDependency {
                    path: path.clone(),
                    module_name: self.module_name(path),
                }),
                _ => None,
            })
            .collect();
        debug!("Extracted {} project references from '{}'", projects.len(), bucket.name);
        Ok(projects)
    }

    fn extract_repo_artifacts(
        &self,
        bucket: &Bucket,
        download_sources: bool,
        download_javadoc: bool,
    ) -> Result<Vec<RepoArtifactDependency>> {
        let mut resolved = Vec::new();
        for coordinate in self.artifacts(bucket) {
            match self.resolve(coordinate, download_sources, download_javadoc) {
                ArtifactResolution::Resolved(artifact) => {
                    trace!("Resolved {} to {}", coordinate, artifact.file.display());
                    resolved.push(artifact);
                }
                ArtifactResolution::Unresolved(_) => {
                    trace!("Could not resolve {} in '{}'", coordinate, bucket.name);
                }
            }
        }
        debug!("Extracted {} repository artifacts from '{}'", resolved.len(), bucket.name);
        Ok(resolved)
    }

    fn extract_local_files(&self, bucket: &Bucket) -> Result<Vec<LocalFileDependency>> {
        let files: Vec<_> = self
            .declarations(bucket)
            .into_iter()
            .filter_map(|declaration| match declaration {
                Declaration::File(path) => {
                    let absolute =
                        if path.is_absolute() { path.clone() } else { self.module_dir.join(path) };
                    Some(LocalFileDependency {
                        file: normalize_path(&absolute),
                    })
                }
                _ => None,
            })
            .collect();
        debug!("Extracted {} local files from '{}'", files.len(), bucket.name);
        Ok(files)
    }

    fn extract_unresolved_artifacts(&self, bucket: &Bucket) -> Result<Vec<UnresolvedDependency>> {
        let unresolved: Vec<_> = self
            .artifacts(bucket)
            .filter_map(|coordinate| match self.resolve(coordinate, false, false) {
                ArtifactResolution::Unresolved(unresolved) => Some(unresolved),
                ArtifactResolution::Resolved(_) => None,
            })
            .collect();
        debug!("Found {} unresolved artifacts in '{}'", unresolved.len(), bucket.name);
        Ok(unresolved)
    }
}
