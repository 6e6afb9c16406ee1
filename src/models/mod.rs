//! Shared data models for scope resolution
//!
//! - [`bucket`] - buckets and raw declarations (input side)
//! - [`coordinate`] - repository artifact coordinates
//! - [`dependency`] - extracted dependencies and their canonical identities
//! - [`output`] - records emitted for the IDE module file

pub mod bucket;
pub mod coordinate;
pub mod dependency;
pub mod output;

pub use bucket::{Bucket, BucketId, Declaration};
pub use coordinate::{ArtifactCoordinate, ModuleVersionId};
pub use dependency::{
    DependencyIdentity, ExtractedDependency, LocalFileDependency, ProjectDependency,
    RepoArtifactDependency, UnresolvedDependency,
};
pub use output::{
    FilePath, IdeDependency, ResolvedDependencies, ResolvedDependency, SingleEntryLibrary,
};
