//! Effective plus/minus bucket rules per scope.
//!
//! Every primitive scope has a default rule written against bucket roles:
//!
//! | Scope    | Plus                                           | Minus                          |
//! |----------|------------------------------------------------|--------------------------------|
//! | COMPILE  | compile-classpath                              |                                |
//! | RUNTIME  | runtime-classpath                              | implementation                 |
//! | TEST     | test-compile-classpath, test-runtime-classpath | runtime-classpath              |
//! | PROVIDED | compile-only                                   | implementation, api-elements   |
//!
//! User overrides are unioned onto the defaults, never replacing them. Names that do
//! not exist in the registry are skipped: build units routinely omit optional buckets.

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::core::GeneratedScope;
use crate::models::BucketId;
use crate::module::{BucketRole, BucketRoles, ModuleDescriptor, ScopeOverride};
use crate::registry::BucketRegistry;

/// Effective plus/minus bucket sets for one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeRule {
    pub plus: IndexSet<BucketId>,
    pub minus: IndexSet<BucketId>,
}

impl ScopeRule {
    /// A dependency found in `buckets` qualifies when it sits in at least one plus bucket
    /// and in no minus bucket.
    pub fn matches(&self, buckets: &IndexSet<BucketId>) -> bool {
        self.plus.iter().any(|bucket| buckets.contains(bucket))
            && !self.minus.iter().any(|bucket| buckets.contains(bucket))
    }

    /// Every bucket the rule mentions, plus first.
    pub fn buckets(&self) -> impl Iterator<Item = BucketId> + '_ {
        self.plus.iter().chain(self.minus.iter()).copied()
    }
}

const NO_ROLES: &[BucketRole] = &[];
const COMPILE_PLUS: &[BucketRole] = &[BucketRole::CompileClasspath];
const RUNTIME_PLUS: &[BucketRole] = &[BucketRole::RuntimeClasspath];
const RUNTIME_MINUS: &[BucketRole] = &[BucketRole::Implementation];
const TEST_PLUS: &[BucketRole] =
    &[BucketRole::TestCompileClasspath, BucketRole::TestRuntimeClasspath];
const TEST_MINUS: &[BucketRole] = &[BucketRole::RuntimeClasspath];
const PROVIDED_PLUS: &[BucketRole] = &[BucketRole::CompileOnly];
const PROVIDED_MINUS: &[BucketRole] = &[BucketRole::Implementation, BucketRole::ApiElements];

/// Default plus and minus roles for a scope. Legacy aliases have no defaults.
pub const fn default_roles(
    scope: GeneratedScope,
) -> (&'static [BucketRole], &'static [BucketRole]) {
    match scope {
        GeneratedScope::Compile => (COMPILE_PLUS, NO_ROLES),
        GeneratedScope::Runtime => (RUNTIME_PLUS, RUNTIME_MINUS),
        GeneratedScope::Test => (TEST_PLUS, TEST_MINUS),
        GeneratedScope::Provided => (PROVIDED_PLUS, PROVIDED_MINUS),
        _ => (NO_ROLES, NO_ROLES),
    }
}

fn add_if_exists<R: BucketRegistry + ?Sized>(
    registry: &R,
    target: &mut IndexSet<BucketId>,
    name: &str,
) {
    match registry.find_bucket(name) {
        Some(bucket) => {
            target.insert(bucket.id);
        }
        None => debug!("Skipping missing bucket '{}'", name),
    }
}

/// Default rule for `scope` merged with the user's additions.
pub fn effective_rule<R: BucketRegistry + ?Sized>(
    registry: &R,
    roles: &BucketRoles,
    scope: GeneratedScope,
    overrides: Option<&ScopeOverride>,
) -> ScopeRule {
    let (plus_roles, minus_roles) = default_roles(scope);
    let mut rule = ScopeRule::default();

    for role in plus_roles {
        add_if_exists(registry, &mut rule.plus, roles.name(*role));
    }
    for role in minus_roles {
        add_if_exists(registry, &mut rule.minus, roles.name(*role));
    }
    if let Some(overrides) = overrides {
        for name in &overrides.plus {
            add_if_exists(registry, &mut rule.plus, name);
        }
        for name in &overrides.minus {
            add_if_exists(registry, &mut rule.minus, name);
        }
    }

    debug!(
        "Scope {} uses {} plus and {} minus buckets",
        scope,
        rule.plus.len(),
        rule.minus.len()
    );
    rule
}

/// Rules for every generated scope of a module.
///
/// Aliases are included so the buckets they mention are indexed, but only primitive
/// scopes are ever matched.
#[derive(Debug, Clone, Default)]
pub struct ScopeRules {
    rules: IndexMap<GeneratedScope, ScopeRule>,
}

impl ScopeRules {
    /// Compute the effective rules of `module` against `registry`.
    pub fn for_module<R: BucketRegistry + ?Sized>(registry: &R, module: &ModuleDescriptor) -> Self {
        let rules = GeneratedScope::ALL
            .into_iter()
            .map(|scope| {
                let rule =
                    effective_rule(registry, &module.roles, scope, module.scope_override(scope));
                (scope, rule)
            })
            .collect();
        Self { rules }
    }

    pub fn get(&self, scope: GeneratedScope) -> Option<&ScopeRule> {
        self.rules.get(&scope)
    }

    /// Primitive scopes with their rules, in PROVIDED, COMPILE, TEST, RUNTIME order.
    pub fn primitives(&self) -> impl Iterator<Item = (GeneratedScope, &ScopeRule)> {
        GeneratedScope::primitives().filter_map(|scope| self.rules.get(&scope).map(|r| (scope, r)))
    }

    /// Union of every bucket mentioned by any rule, in first-mention order.
    pub fn referenced_buckets(&self) -> IndexSet<BucketId> {
        self.rules.values().flat_map(ScopeRule::buckets).collect()
    }
}

impl FromIterator<(GeneratedScope, ScopeRule)> for ScopeRules {
    fn from_iter<T: IntoIterator<Item = (GeneratedScope, ScopeRule)>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
