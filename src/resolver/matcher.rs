//! Scope matching and conflict resolution.
//!
//! Matching decides, per primitive scope, which indexed identities qualify: the identity
//! must sit in at least one plus bucket of the scope and in none of its minus buckets.
//! An identity can qualify for several scopes. Two priority rules then drop dominated
//! scopes, applied once each and in this order:
//!
//! 1. PROVIDED over COMPILE
//! 2. COMPILE over RUNTIME
//!
//! There is no PROVIDED over RUNTIME rule. An identity qualifying for exactly
//! {PROVIDED, RUNTIME} is emitted under both, and so is one qualifying for
//! {PROVIDED, COMPILE, RUNTIME}, because COMPILE is already gone when the second rule
//! is checked.

use indexmap::IndexSet;
use std::path::PathBuf;
use tracing::{debug, trace};

use super::index::DependencyIndex;
use super::rules::ScopeRules;
use crate::core::IdeaScope;
use crate::models::{
    BucketId, ExtractedDependency, FilePath, IdeDependency, ResolvedDependencies, ResolvedDependency,
    SingleEntryLibrary,
};
use crate::module::ModuleDescriptor;
use crate::utils::paths::PathFactory;

/// Priority rules as (winner, loser) pairs, in application order.
pub const PRIORITY_RULES: [(IdeaScope, IdeaScope); 2] = [
    (IdeaScope::Provided, IdeaScope::Compile),
    (IdeaScope::Compile, IdeaScope::Runtime),
];

/// Primitive scopes whose rule admits a dependency found in `buckets`.
///
/// Scopes come back in PROVIDED, COMPILE, TEST, RUNTIME order.
pub fn scopes_of(buckets: &IndexSet<BucketId>, rules: &ScopeRules) -> IndexSet<IdeaScope> {
    rules
        .primitives()
        .filter(|(_, rule)| rule.matches(buckets))
        .filter_map(|(scope, _)| scope.primitive())
        .collect()
}

fn prefer(scopes: &mut IndexSet<IdeaScope>, winner: IdeaScope, loser: IdeaScope) -> bool {
    if scopes.contains(&winner) && scopes.contains(&loser) {
        scopes.shift_remove(&loser);
        true
    } else {
        false
    }
}

/// Drop scopes dominated by a priority rule. Sets of one scope are returned untouched.
#[must_use]
pub fn resolve_conflicts(mut scopes: IndexSet<IdeaScope>) -> IndexSet<IdeaScope> {
    if scopes.len() > 1 {
        for (winner, loser) in PRIORITY_RULES {
            if prefer(&mut scopes, winner, loser) {
                trace!("{} wins over {}", winner, loser);
            }
        }
    }
    scopes
}

/// Build the IDE payload for an extracted dependency.
pub fn payload(
    dependency: &ExtractedDependency,
    module: &ModuleDescriptor,
    factory: &PathFactory,
) -> IdeDependency {
    match dependency {
        ExtractedDependency::Project(project) => IdeDependency::Module {
            name: project.module_name.clone(),
        },
        ExtractedDependency::Artifact(artifact) => {
            let attach = |enabled: bool, files: &[PathBuf]| -> Vec<FilePath> {
                if enabled {
                    files.iter().map(|file| factory.path(file)).collect()
                } else {
                    Vec::new()
                }
            };
            IdeDependency::Library(SingleEntryLibrary {
                class_path: factory.path(&artifact.file),
                javadoc: attach(module.download_javadoc, &artifact.javadoc_files),
                sources: attach(module.download_sources, &artifact.source_files),
                module_version: Some(artifact.id.clone()),
            })
        }
        ExtractedDependency::LocalFile(file) => {
            IdeDependency::Library(SingleEntryLibrary::plain(factory.path(&file.file)))
        }
    }
}

/// Match every indexed identity, resolve conflicts, and emit one record per surviving
/// scope.
///
/// Records follow index order, and within one identity PROVIDED, COMPILE, TEST,
/// RUNTIME order.
pub fn resolve(
    index: &DependencyIndex,
    rules: &ScopeRules,
    module: &ModuleDescriptor,
) -> ResolvedDependencies {
    let mut resolved = ResolvedDependencies::new();

    for (identity, entry) in index.iter() {
        let matched = scopes_of(&entry.buckets, rules);
        if matched.is_empty() {
            trace!("{} matches no scope", identity);
            continue;
        }

        let surviving = resolve_conflicts(matched.clone());
        if surviving.len() != matched.len() {
            debug!(
                "{} qualifies for {:?}, keeping {:?}",
                identity,
                matched.iter().map(|scope| scope.label()).collect::<Vec<_>>(),
                surviving.iter().map(|scope| scope.label()).collect::<Vec<_>>()
            );
        }

        let dependency = payload(&entry.value, module, &module.path_factory);
        for scope in surviving {
            resolved.insert(ResolvedDependency {
                identity: identity.clone(),
                scope,
                dependency: dependency.clone(),
            });
        }
    }

    resolved
}
