//! In-memory extractor that counts its calls.

use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::extractor::DependencyExtractor;
use crate::models::{
    ArtifactCoordinate, Bucket, BucketId, Declaration, LocalFileDependency, ProjectDependency,
    RepoArtifactDependency, UnresolvedDependency,
};

#[derive(Debug, Default, Clone, Copy)]
struct Calls {
    projects: usize,
    artifacts: usize,
    files: usize,
    unresolved: usize,
}

/// Extractor over a bucket's own declarations, without inheritance.
///
/// Artifacts whose name starts with `missing` are unresolved; every other artifact
/// resolves to `/repo/<name>-<version>.jar`, with a sources jar when requested.
#[derive(Debug, Default)]
pub struct CountingExtractor {
    calls: RefCell<HashMap<BucketId, Calls>>,
}

impl CountingExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(projects, artifacts, files)` extraction counts for a bucket.
    pub fn calls(&self, bucket: BucketId) -> (usize, usize, usize) {
        let calls = self.calls.borrow().get(&bucket).copied().unwrap_or_default();
        (calls.projects, calls.artifacts, calls.files)
    }

    /// Unresolved-artifact extraction count for a bucket.
    pub fn unresolved_calls(&self, bucket: BucketId) -> usize {
        self.calls.borrow().get(&bucket).map_or(0, |calls| calls.unresolved)
    }

    fn bump(&self, bucket: BucketId, f: impl FnOnce(&mut Calls)) {
        f(self.calls.borrow_mut().entry(bucket).or_default());
    }

    fn is_missing(coordinate: &ArtifactCoordinate) -> bool {
        coordinate.name.starts_with("missing")
    }

    fn artifacts(bucket: &Bucket) -> impl Iterator<Item = &ArtifactCoordinate> {
        bucket.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::Artifact(coordinate) => Some(coordinate),
            _ => None,
        })
    }
}

impl DependencyExtractor for CountingExtractor {
    fn extract_project_references(&self, bucket: &Bucket) -> Result<Vec<ProjectDependency>> {
        self.bump(bucket.id, |calls| calls.projects += 1);
        Ok(bucket
            .declarations
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::Project(path) => Some(ProjectDependency {
                    path: path.clone(),
                    module_name: path.trim_start_matches(':').replace(':', "-"),
                }),
                _ => None,
            })
            .collect())
    }

    fn extract_repo_artifacts(
        &self,
        bucket: &Bucket,
        download_sources: bool,
        download_javadoc: bool,
    ) -> Result<Vec<RepoArtifactDependency>> {
        self.bump(bucket.id, |calls| calls.artifacts += 1);
        Ok(Self::artifacts(bucket)
            .filter(|coordinate| !Self::is_missing(coordinate))
            .map(|coordinate| {
                let stem = format!("/repo/{}-{}", coordinate.name, coordinate.version);
                RepoArtifactDependency {
                    coordinate: coordinate.clone(),
                    id: coordinate.module_version(),
                    file: PathBuf::from(format!("{stem}.jar")),
                    source_files: if download_sources {
                        vec![PathBuf::from(format!("{stem}-sources.jar"))]
                    } else {
                        Vec::new()
                    },
                    javadoc_files: Vec::new(),
                    download_sources,
                    download_javadoc,
                }
            })
            .collect())
    }

    fn extract_local_files(&self, bucket: &Bucket) -> Result<Vec<LocalFileDependency>> {
        self.bump(bucket.id, |calls| calls.files += 1);
        Ok(bucket
            .declarations
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::File(path) => Some(LocalFileDependency { file: path.clone() }),
                _ => None,
            })
            .collect())
    }

    fn extract_unresolved_artifacts(&self, bucket: &Bucket) -> Result<Vec<UnresolvedDependency>> {
        self.bump(bucket.id, |calls| calls.unresolved += 1);
        Ok(Self::artifacts(bucket)
            .filter(|coordinate| Self::is_missing(coordinate))
            .map(|coordinate| UnresolvedDependency::new(coordinate.clone(), "not in repository"))
            .collect())
    }
}
