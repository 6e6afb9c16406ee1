//! Scope resolution for one IDE module.
//!
//! Given a registry of dependency buckets and a module descriptor, the resolver decides
//! which scope label (PROVIDED, COMPILE, TEST, RUNTIME) every distinct dependency is
//! reported under.
//!
//! # Pipeline
//!
//! 1. **Rules** ([`rules`]): each scope's default plus/minus buckets, unioned with the
//!    user's overrides. Missing bucket names are skipped.
//! 2. **Index** ([`index`]): every bucket mentioned by any rule is extracted exactly once
//!    per dependency kind, producing identity → buckets.
//! 3. **Match** ([`matcher`]): an identity qualifies for a scope when it sits in one of
//!    the scope's plus buckets and none of its minus buckets.
//! 4. **Conflicts** ([`matcher`]): PROVIDED beats COMPILE, then COMPILE beats RUNTIME.
//! 5. **Payloads** ([`matcher`]): module references for projects, libraries for
//!    artifacts and local files.
//!
//! Explicit directory libraries ([`explicit`]) skip all of this and are prepended to the
//! result. Unresolved artifacts ([`unresolved`]) are collected on a separate path.
//!
//! # Example
//!
//! ```rust
//! use ideadeps_cli::core::IdeaScope;
//! use ideadeps_cli::extractor::RegistryExtractor;
//! use ideadeps_cli::models::{Declaration, DependencyIdentity};
//! use ideadeps_cli::module::ModuleDescriptor;
//! use ideadeps_cli::registry::RegistryBuilder;
//! use ideadeps_cli::resolver::DependenciesProvider;
//!
//! let registry = RegistryBuilder::new()
//!     .bucket("compileClasspath", Vec::<String>::new(), vec![Declaration::Project(":core".into())])
//!     .bucket("runtimeClasspath", Vec::<String>::new(), vec![Declaration::Project(":core".into())])
//!     .build()?;
//! let extractor = RegistryExtractor::new(&registry, "/work/app", "app");
//! let provider = DependenciesProvider::new(&registry, &extractor);
//!
//! let resolved = provider.provide(&ModuleDescriptor::new("app"))?;
//! let core = DependencyIdentity::Project { path: ":core".into() };
//! assert_eq!(resolved.scopes_of(&core), vec![IdeaScope::Compile]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Concurrency
//!
//! A pass is synchronous and owns all of its intermediate state. Resolving several
//! modules concurrently only needs one provider per thread.

pub mod explicit;
pub mod index;
pub mod matcher;
pub mod rules;
pub mod unresolved;

pub use explicit::inject_explicit;
pub use index::{DependencyIndex, IndexEntry, MembershipIndex, UnresolvedIndex};
pub use matcher::{resolve_conflicts, scopes_of};
pub use rules::{ScopeRule, ScopeRules, default_roles, effective_rule};
pub use unresolved::collect_unresolved;

use anyhow::Result;
use tracing::{debug, info};

use crate::extractor::DependencyExtractor;
use crate::models::{ResolvedDependencies, UnresolvedDependency};
use crate::module::ModuleDescriptor;
use crate::registry::BucketRegistry;

/// Resolves the dependencies of modules backed by one registry and extractor.
pub struct DependenciesProvider<'a, R: ?Sized, E: ?Sized> {
    registry: &'a R,
    extractor: &'a E,
}

impl<'a, R, E> DependenciesProvider<'a, R, E>
where
    R: BucketRegistry + ?Sized,
    E: DependencyExtractor + ?Sized,
{
    pub fn new(registry: &'a R, extractor: &'a E) -> Self {
        Self {
            registry,
            extractor,
        }
    }

    /// Effective rules of every generated scope for `module`.
    pub fn effective_rules(&self, module: &ModuleDescriptor) -> ScopeRules {
        ScopeRules::for_module(self.registry, module)
    }

    /// Resolve every dependency of `module` to its scopes.
    ///
    /// Explicit directory libraries come first, followed by bucket-derived records in
    /// index order. A record identical to an earlier one is dropped.
    pub fn provide(&self, module: &ModuleDescriptor) -> Result<ResolvedDependencies> {
        let rules = self.effective_rules(module);
        let buckets = rules.referenced_buckets();
        debug!("Module '{}' references {} buckets", module.name, buckets.len());

        let index = DependencyIndex::build(self.registry, self.extractor, &buckets, module)?;

        let mut result = ResolvedDependencies::new();
        result.extend(inject_explicit(module));
        let explicit = result.len();
        result.extend(matcher::resolve(&index, &rules, module));

        info!(
            "Resolved {} dependencies for '{}' ({} explicit, {} identities indexed)",
            result.len(),
            module.name,
            explicit,
            index.len()
        );
        Ok(result)
    }

    /// Artifacts of `module` that failed to resolve, sorted by display name.
    ///
    /// Offline modules never touch the repository and report nothing.
    pub fn unresolved_dependencies(
        &self,
        module: &ModuleDescriptor,
    ) -> Result<Vec<UnresolvedDependency>> {
        if module.offline {
            debug!("Module '{}' is offline, skipping unresolved collection", module.name);
            return Ok(Vec::new());
        }
        let rules = self.effective_rules(module);
        collect_unresolved(self.registry, self.extractor, &rules)
    }
}
