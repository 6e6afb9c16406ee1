//! Membership indexing.
//!
//! The index maps every canonical dependency identity to the buckets it was found in.
//! It is built once per resolution pass over the union of buckets any scope rule
//! mentions, so a bucket shared by several scopes (or reached through inheritance) is
//! extracted exactly once per dependency kind.

use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;
use tracing::{debug, trace};

use crate::extractor::DependencyExtractor;
use crate::models::{BucketId, DependencyIdentity, ExtractedDependency, UnresolvedDependency};
use crate::module::ModuleDescriptor;
use crate::registry::BucketRegistry;

/// A value together with the buckets it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry<V> {
    /// First occurrence of the value
    pub value: V,
    pub buckets: IndexSet<BucketId>,
}

/// Insertion-ordered mapping from key to the buckets containing it.
#[derive(Debug, Clone)]
pub struct MembershipIndex<K, V> {
    entries: IndexMap<K, IndexEntry<V>>,
}

impl<K, V> Default for MembershipIndex<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq, V> MembershipIndex<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `value`, keyed by `key`, was found in `bucket`.
    ///
    /// The first value seen for a key is kept; later ones only add their bucket.
    pub fn record(&mut self, key: K, value: V, bucket: BucketId) {
        self.entries
            .entry(key)
            .or_insert_with(|| IndexEntry {
                value,
                buckets: IndexSet::new(),
            })
            .buckets
            .insert(bucket);
    }

    pub fn get(&self, key: &K) -> Option<&IndexEntry<V>> {
        self.entries.get(key)
    }

    /// Buckets a key was found in.
    pub fn buckets_of(&self, key: &K) -> Option<&IndexSet<BucketId>> {
        self.entries.get(key).map(|entry| &entry.buckets)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &IndexEntry<V>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Index of extracted dependencies keyed by identity.
pub type DependencyIndex = MembershipIndex<DependencyIdentity, ExtractedDependency>;

/// Index of unresolved artifacts keyed by display name.
pub type UnresolvedIndex = MembershipIndex<String, UnresolvedDependency>;

impl DependencyIndex {
    /// Extract every bucket in `buckets` once per kind and index the results.
    ///
    /// Repository artifacts are skipped entirely when the module is offline.
    pub fn build<R, E>(
        registry: &R,
        extractor: &E,
        buckets: &IndexSet<BucketId>,
        module: &ModuleDescriptor,
    ) -> Result<Self>
    where
        R: BucketRegistry + ?Sized,
        E: DependencyExtractor + ?Sized,
    {
        let mut index = Self::new();

        for &id in buckets {
            let Some(bucket) = registry.bucket(id) else {
                trace!("Bucket {} vanished from the registry, skipping", id);
                continue;
            };

            let projects = extractor
                .extract_project_references(bucket)
                .with_context(|| format!("Failed to extract projects from '{}'", bucket.name))?;
            for project in projects {
                let dependency = ExtractedDependency::from(project);
                index.record(dependency.identity(), dependency, id);
            }

            if !module.offline {
                let artifacts = extractor
                    .extract_repo_artifacts(bucket, module.download_sources, module.download_javadoc)
                    .with_context(|| {
                        format!("Failed to extract artifacts from '{}'", bucket.name)
                    })?;
                for artifact in artifacts {
                    let dependency = ExtractedDependency::from(artifact);
                    index.record(dependency.identity(), dependency, id);
                }
            }

            let files = extractor
                .extract_local_files(bucket)
                .with_context(|| format!("Failed to extract files from '{}'", bucket.name))?;
            for file in files {
                let dependency = ExtractedDependency::from(file);
                index.record(dependency.identity(), dependency, id);
            }
        }

        debug!(
            "Indexed {} dependencies from {} buckets{}",
            index.len(),
            buckets.len(),
            if module.offline { " (offline)" } else { "" }
        );
        Ok(index)
    }
}

impl UnresolvedIndex {
    /// Collect unresolved artifacts of every bucket in `buckets`, one extraction each.
    pub fn build<R, E>(registry: &R, extractor: &E, buckets: &IndexSet<BucketId>) -> Result<Self>
    where
        R: BucketRegistry + ?Sized,
        E: DependencyExtractor + ?Sized,
    {
        let mut index = Self::new();
        for &id in buckets {
            let Some(bucket) = registry.bucket(id) else {
                continue;
            };
            let unresolved = extractor.extract_unresolved_artifacts(bucket).with_context(|| {
                format!("Failed to collect unresolved artifacts from '{}'", bucket.name)
            })?;
            for dependency in unresolved {
                index.record(dependency.display_name(), dependency, id);
            }
        }
        Ok(index)
    }
}
