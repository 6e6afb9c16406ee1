//! Records emitted for the IDE module file.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::{DependencyIdentity, ModuleVersionId};
use crate::core::IdeaScope;

/// A path in the portable form written to IDE files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilePath {
    /// `jar://...!/` for archives, `file://...` otherwise
    pub url: String,
    /// Path with path variables substituted, e.g. `$MODULE_DIR$/libs/a.jar`
    pub path: String,
    /// Absolute path on this machine
    pub canonical: PathBuf,
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A library made of a single classpath entry plus optional attachments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SingleEntryLibrary {
    pub class_path: FilePath,
    pub javadoc: Vec<FilePath>,
    pub sources: Vec<FilePath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_version: Option<ModuleVersionId>,
}

impl SingleEntryLibrary {
    /// Library with no attachments.
    pub fn plain(class_path: FilePath) -> Self {
        Self {
            class_path,
            javadoc: Vec::new(),
            sources: Vec::new(),
            module_version: None,
        }
    }
}

/// Kind-specific payload of an emitted dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum IdeDependency {
    /// Dependency on another IDE module
    Module { name: String },
    /// Dependency on a library entry
    Library(SingleEntryLibrary),
}

impl fmt::Display for IdeDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdeDependency::Module { name } => write!(f, "module {name}"),
            IdeDependency::Library(library) => match &library.module_version {
                Some(id) => write!(f, "library {id}"),
                None => write!(f, "library {}", library.class_path.path),
            },
        }
    }
}

/// One dependency emitted under one scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedDependency {
    pub identity: DependencyIdentity,
    pub scope: IdeaScope,
    pub dependency: IdeDependency,
}

/// Insertion-ordered set of resolved dependencies.
///
/// `Display` groups the records by scope label, one `SCOPE: [..]` line per scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedDependencies {
    entries: IndexSet<ResolvedDependency>,
}

impl ResolvedDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning false when an identical record is already present.
    pub fn insert(&mut self, dependency: ResolvedDependency) -> bool {
        self.entries.insert(dependency)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedDependency> {
        self.entries.iter()
    }

    /// Records for one identity, in insertion order.
    pub fn for_identity<'a>(
        &'a self,
        identity: &'a DependencyIdentity,
    ) -> impl Iterator<Item = &'a ResolvedDependency> + 'a {
        self.entries.iter().filter(move |dep| &dep.identity == identity)
    }

    /// Scopes emitted for one identity.
    pub fn scopes_of(&self, identity: &DependencyIdentity) -> Vec<IdeaScope> {
        self.for_identity(identity).map(|dep| dep.scope).collect()
    }

    /// Keep only records with the given scope.
    #[must_use]
    pub fn filter_scope(self, scope: IdeaScope) -> Self {
        Self {
            entries: self.entries.into_iter().filter(|dep| dep.scope == scope).collect(),
        }
    }

    /// Records grouped by scope, scopes in first-seen order.
    pub fn by_scope(&self) -> IndexMap<IdeaScope, Vec<&ResolvedDependency>> {
        let mut grouped: IndexMap<IdeaScope, Vec<&ResolvedDependency>> = IndexMap::new();
        for dep in &self.entries {
            grouped.entry(dep.scope).or_default().push(dep);
        }
        grouped
    }
}

impl Extend<ResolvedDependency> for ResolvedDependencies {
    fn extend<T: IntoIterator<Item = ResolvedDependency>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl FromIterator<ResolvedDependency> for ResolvedDependencies {
    fn from_iter<T: IntoIterator<Item = ResolvedDependency>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResolvedDependencies {
    type Item = ResolvedDependency;
    type IntoIter = indexmap::set::IntoIter<ResolvedDependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for ResolvedDependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (scope, deps) in self.by_scope() {
            let rendered: Vec<String> = deps.iter().map(|dep| dep.dependency.to_string()).collect();
            writeln!(f, "{scope}: [{}]", rendered.join(", "))?;
        }
        Ok(())
    }
}
