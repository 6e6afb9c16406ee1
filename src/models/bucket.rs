//! Dependency buckets and the raw declarations they hold.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::ArtifactCoordinate;

/// Registry-assigned bucket identity.
///
/// Two buckets with the same contents are still different buckets: a detached snapshot
/// gets its own id and never matches rules written against the bucket it was copied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BucketId(pub(crate) u32);

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A raw dependency declaration, as written in a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Declaration {
    /// Reference to another project of the build, e.g. `:core`
    Project(String),
    /// Artifact requested from the repository
    Artifact(ArtifactCoordinate),
    /// Plain file on disk
    File(PathBuf),
}

/// A named, ordered collection of declarations.
#[derive(Debug, Clone)]
pub struct Bucket {
    pub id: BucketId,
    pub name: String,
    /// Parent buckets whose declarations this bucket inherits
    pub extends: Vec<String>,
    pub declarations: Vec<Declaration>,
    /// Bucket this one was detached from, if it is a snapshot
    pub snapshot_of: Option<BucketId>,
}

impl Bucket {
    pub fn is_snapshot(&self) -> bool {
        self.snapshot_of.is_some()
    }
}
