//! Collection of repository artifacts that failed to resolve.
//!
//! Uses the same plus/minus test as scope matching but skips conflict resolution: an
//! unresolved artifact reachable from several scopes is reported once, keyed by its
//! display name, and the result is sorted by that name.

use anyhow::Result;
use indexmap::IndexSet;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::index::UnresolvedIndex;
use super::rules::ScopeRules;
use crate::extractor::DependencyExtractor;
use crate::models::{BucketId, UnresolvedDependency};
use crate::registry::BucketRegistry;

/// Unresolved artifacts reachable from any primitive scope, sorted by display name.
pub fn collect_unresolved<R, E>(
    registry: &R,
    extractor: &E,
    rules: &ScopeRules,
) -> Result<Vec<UnresolvedDependency>>
where
    R: BucketRegistry + ?Sized,
    E: DependencyExtractor + ?Sized,
{
    let buckets: IndexSet<BucketId> =
        rules.primitives().flat_map(|(_, rule)| rule.buckets()).collect();
    let index = UnresolvedIndex::build(registry, extractor, &buckets)?;

    let mut sorted = BTreeMap::new();
    for (scope, rule) in rules.primitives() {
        for (name, entry) in index.iter() {
            if rule.matches(&entry.buckets) && !sorted.contains_key(name) {
                debug!("{} is unresolved in scope {}", name, scope);
                sorted.insert(name.clone(), entry.value.clone());
            }
        }
    }

    for dependency in sorted.values() {
        warn!("Could not resolve {}: {}", dependency.display_name(), dependency.problem);
    }
    Ok(sorted.into_values().collect())
}
