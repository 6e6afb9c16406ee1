//! Module descriptor: everything about one IDE module that steers resolution.
//!
//! A [`ModuleDescriptor`] carries the module's flags (`offline`, `download_sources`,
//! `download_javadoc`), the user's per-scope plus/minus bucket overrides, explicit
//! directory libraries keyed by scope, the role-to-bucket-name table, and the
//! [`PathFactory`] used to write portable paths.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::core::{GeneratedScope, IdeaScope};
use crate::utils::paths::PathFactory;

/// Conventional bucket roles the default scope rules are written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketRole {
    CompileClasspath,
    RuntimeClasspath,
    TestCompileClasspath,
    TestRuntimeClasspath,
    CompileOnly,
    Implementation,
    ApiElements,
}

impl fmt::Display for BucketRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BucketRole::CompileClasspath => "compile-classpath",
            BucketRole::RuntimeClasspath => "runtime-classpath",
            BucketRole::TestCompileClasspath => "test-compile-classpath",
            BucketRole::TestRuntimeClasspath => "test-runtime-classpath",
            BucketRole::CompileOnly => "compile-only",
            BucketRole::Implementation => "implementation",
            BucketRole::ApiElements => "api-elements",
        };
        f.write_str(name)
    }
}

/// Concrete bucket name for each role.
///
/// Defaults follow the Gradle Java plugin naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BucketRoles {
    pub compile_classpath: String,
    pub runtime_classpath: String,
    pub test_compile_classpath: String,
    pub test_runtime_classpath: String,
    pub compile_only: String,
    pub implementation: String,
    pub api_elements: String,
}

impl Default for BucketRoles {
    fn default() -> Self {
        Self {
            compile_classpath: "compileClasspath".to_string(),
            runtime_classpath: "runtimeClasspath".to_string(),
            test_compile_classpath: "testCompileClasspath".to_string(),
            test_runtime_classpath: "testRuntimeClasspath".to_string(),
            compile_only: "compileOnly".to_string(),
            implementation: "implementation".to_string(),
            api_elements: "apiElements".to_string(),
        }
    }
}

impl BucketRoles {
    /// Bucket name playing `role`.
    pub fn name(&self, role: BucketRole) -> &str {
        match role {
            BucketRole::CompileClasspath => &self.compile_classpath,
            BucketRole::RuntimeClasspath => &self.runtime_classpath,
            BucketRole::TestCompileClasspath => &self.test_compile_classpath,
            BucketRole::TestRuntimeClasspath => &self.test_runtime_classpath,
            BucketRole::CompileOnly => &self.compile_only,
            BucketRole::Implementation => &self.implementation,
            BucketRole::ApiElements => &self.api_elements,
        }
    }
}

/// User-supplied bucket names added to a scope's default rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeOverride {
    #[serde(default)]
    pub plus: Vec<String>,
    #[serde(default)]
    pub minus: Vec<String>,
}

impl ScopeOverride {
    pub fn new<P, M>(plus: P, minus: M) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            plus: plus.into_iter().map(Into::into).collect(),
            minus: minus.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything about one module that steers resolution.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    /// IDE module name
    pub name: String,
    /// Name of the project at path `:`
    pub root_project: String,
    /// Skip repository artifacts entirely
    pub offline: bool,
    pub download_sources: bool,
    pub download_javadoc: bool,
    /// Per-scope plus/minus additions; keys may be legacy aliases
    pub scopes: IndexMap<GeneratedScope, ScopeOverride>,
    /// Directories added as libraries without any matching
    pub single_entry_libraries: IndexMap<IdeaScope, Vec<PathBuf>>,
    pub roles: BucketRoles,
    pub path_factory: PathFactory,
}

impl ModuleDescriptor {
    /// Descriptor with default roles, no overrides, and sources download enabled.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            root_project: name.clone(),
            name,
            offline: false,
            download_sources: true,
            download_javadoc: false,
            scopes: IndexMap::new(),
            single_entry_libraries: IndexMap::new(),
            roles: BucketRoles::default(),
            path_factory: PathFactory::new(),
        }
    }

    #[must_use]
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    #[must_use]
    pub fn download_sources(mut self, enabled: bool) -> Self {
        self.download_sources = enabled;
        self
    }

    #[must_use]
    pub fn download_javadoc(mut self, enabled: bool) -> Self {
        self.download_javadoc = enabled;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: GeneratedScope, overrides: ScopeOverride) -> Self {
        self.scopes.insert(scope, overrides);
        self
    }

    #[must_use]
    pub fn with_library(mut self, scope: IdeaScope, dir: impl Into<PathBuf>) -> Self {
        self.single_entry_libraries.entry(scope).or_default().push(dir.into());
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: BucketRoles) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn with_path_factory(mut self, factory: PathFactory) -> Self {
        self.path_factory = factory;
        self
    }

    /// User override for a scope, if any.
    pub fn scope_override(&self, scope: GeneratedScope) -> Option<&ScopeOverride> {
        self.scopes.get(&scope)
    }
}
