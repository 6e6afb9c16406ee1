//! Project descriptor loading.
//!
//! A module is described by an `ideadeps.toml` file:
//!
//! ```toml
//! [module]
//! name = "app"
//! root-project = "app"      # module name of the `:` project path, defaults to name
//! offline = false
//! download-sources = true
//! download-javadoc = false
//! repository = "repo"       # Maven-layout repository, relative to this file
//!
//! [roles]                   # optional renames of the conventional buckets
//! compile-classpath = "compileClasspath"
//!
//! [buckets.implementation]
//! projects = [":core"]
//! artifacts = ["com.google.guava:guava:31.1-jre"]
//! files = ["libs/tool.jar"]
//!
//! [buckets.compileClasspath]
//! extends = ["implementation"]
//!
//! [buckets.frozen]
//! snapshot-of = "compileClasspath"
//!
//! [scopes.TEST]
//! plus = ["integrationTest"]
//! minus = []
//!
//! [libraries]
//! PROVIDED = ["generated/classes"]
//! ```
//!
//! Paths may use `~` and environment variables; relative paths are anchored at the
//! directory holding the descriptor. Setting `IDEADEPS_OFFLINE=1` forces offline mode.
//!
//! # Modules
//!
//! - `parser` - TOML reading with typed errors

pub mod parser;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{GeneratedScope, IdeDepsError, IdeaScope};
use crate::extractor::{FileRepository, RegistryExtractor};
use crate::models::{ArtifactCoordinate, Declaration};
use crate::module::{BucketRoles, ModuleDescriptor, ScopeOverride};
use crate::registry::{BucketRegistry, InMemoryRegistry, RegistryBuilder};
use crate::utils::paths::{PathFactory, resolve_path};

/// Default descriptor file name.
pub const DESCRIPTOR_FILE: &str = "ideadeps.toml";

/// Environment variable forcing offline mode.
pub const OFFLINE_ENV: &str = "IDEADEPS_OFFLINE";

/// Parsed `ideadeps.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectConfig {
    pub module: ModuleSection,
    #[serde(default)]
    pub roles: BucketRoles,
    #[serde(default)]
    pub buckets: IndexMap<String, BucketConfig>,
    /// Keyed by generated scope name, aliases included
    #[serde(default)]
    pub scopes: IndexMap<String, ScopeOverride>,
    /// Keyed by scope label
    #[serde(default)]
    pub libraries: IndexMap<String, Vec<String>>,
}

/// The `[module]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ModuleSection {
    pub name: String,
    pub root_project: Option<String>,
    #[serde(default)]
    pub offline: bool,
    #[serde(default = "default_true")]
    pub download_sources: bool,
    #[serde(default)]
    pub download_javadoc: bool,
    pub repository: Option<String>,
}

const fn default_true() -> bool {
    true
}

/// One `[buckets.<name>]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BucketConfig {
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub artifacts: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    pub snapshot_of: Option<String>,
}

impl BucketConfig {
    fn has_contents(&self) -> bool {
        !(self.extends.is_empty()
            && self.projects.is_empty()
            && self.artifacts.is_empty()
            && self.files.is_empty())
    }
}

impl ProjectConfig {
    /// Load and validate a descriptor.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = parser::parse_config(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks that do not need the registry.
    pub fn validate(&self) -> Result<(), IdeDepsError> {
        if self.module.name.trim().is_empty() {
            return Err(IdeDepsError::ConfigValidationError {
                reason: "module.name must not be empty".to_string(),
            });
        }
        for (name, bucket) in &self.buckets {
            if bucket.snapshot_of.is_some() && bucket.has_contents() {
                return Err(IdeDepsError::ConfigValidationError {
                    reason: format!(
                        "bucket '{name}' is a snapshot and cannot declare its own contents"
                    ),
                });
            }
        }
        for key in self.scopes.keys() {
            key.parse::<GeneratedScope>()?;
        }
        for key in self.libraries.keys() {
            key.parse::<IdeaScope>()?;
        }
        Ok(())
    }

    /// Build the bucket registry; file paths are anchored at `base_dir`.
    pub fn registry(&self, base_dir: &Path) -> Result<InMemoryRegistry> {
        let mut builder = RegistryBuilder::new();
        for (name, bucket) in &self.buckets {
            if let Some(of) = &bucket.snapshot_of {
                builder = builder.snapshot(name.as_str(), of.as_str());
                continue;
            }

            let mut declarations = Vec::new();
            declarations.extend(bucket.projects.iter().cloned().map(Declaration::Project));
            for raw in &bucket.artifacts {
                let coordinate: ArtifactCoordinate = raw.parse()?;
                declarations.push(Declaration::Artifact(coordinate));
            }
            for raw in &bucket.files {
                declarations.push(Declaration::File(resolve_path(raw, base_dir)?));
            }
            builder = builder.bucket(name.as_str(), bucket.extends.iter().cloned(), declarations);
        }
        Ok(builder.build()?)
    }

    /// Build the module descriptor; `force_offline` overrides `module.offline`.
    pub fn module_descriptor(&self, base_dir: &Path, force_offline: bool) -> Result<ModuleDescriptor> {
        let section = &self.module;
        let mut module = ModuleDescriptor::new(section.name.as_str())
            .offline(section.offline || force_offline)
            .download_sources(section.download_sources)
            .download_javadoc(section.download_javadoc)
            .with_roles(self.roles.clone())
            .with_path_factory(PathFactory::for_module(base_dir));
        if let Some(root) = &section.root_project {
            module.root_project = root.clone();
        }

        for (key, overrides) in &self.scopes {
            module = module.with_scope(key.parse()?, overrides.clone());
        }
        for (key, dirs) in &self.libraries {
            let scope: IdeaScope = key.parse()?;
            for raw in dirs {
                module = module.with_library(scope, resolve_path(raw, base_dir)?);
            }
        }
        Ok(module)
    }

    /// Repository configured for the module, if any.
    pub fn repository(&self, base_dir: &Path) -> Result<Option<FileRepository>> {
        self.module
            .repository
            .as_deref()
            .map(|raw| resolve_path(raw, base_dir).map(FileRepository::new))
            .transpose()
    }
}

/// Everything needed to resolve one module.
#[derive(Debug)]
pub struct LoadedProject {
    pub registry: InMemoryRegistry,
    pub module: ModuleDescriptor,
    pub repository: Option<FileRepository>,
    /// Directory holding the descriptor
    pub module_dir: PathBuf,
}

impl LoadedProject {
    /// Load the descriptor at `path` and build its registry and module.
    ///
    /// Offline mode is on when the descriptor says so, when `force_offline` is set, or
    /// when `IDEADEPS_OFFLINE` holds a truthy value.
    pub fn load(path: &Path, force_offline: bool) -> Result<Self> {
        let config = ProjectConfig::load(path)?;
        let module_dir = descriptor_dir(path)?;
        let offline = force_offline || offline_flag(std::env::var(OFFLINE_ENV).ok().as_deref());

        let registry = config
            .registry(&module_dir)
            .with_context(|| format!("Invalid buckets in {}", path.display()))?;
        let module = config.module_descriptor(&module_dir, offline)?;
        let repository = config.repository(&module_dir)?;

        let snapshots = registry.buckets().iter().filter(|bucket| bucket.is_snapshot()).count();
        debug!(
            "Loaded module '{}' with {} buckets ({} snapshots) from {}",
            module.name,
            config.buckets.len(),
            snapshots,
            path.display()
        );
        Ok(Self {
            registry,
            module,
            repository,
            module_dir,
        })
    }

    /// Extractor reading this project's registry and repository.
    pub fn extractor(&self) -> RegistryExtractor<'_, InMemoryRegistry> {
        let extractor = RegistryExtractor::new(
            &self.registry,
            self.module_dir.clone(),
            self.module.root_project.clone(),
        );
        match &self.repository {
            Some(repository) => extractor.with_repository(repository.clone()),
            None => extractor,
        }
    }
}

fn descriptor_dir(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to determine the current directory")?
            .join(path)
    };
    Ok(crate::utils::paths::normalize_path(
        absolute.parent().unwrap_or_else(|| Path::new("/")),
    ))
}

/// Interpret an `IDEADEPS_OFFLINE` value.
pub fn offline_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}
