//! ideadeps - IDE dependency scope resolution
//!
//! A build unit declares its dependencies in named buckets (`compileClasspath`,
//! `runtimeClasspath`, `testCompileClasspath`, ...). An IDE module has no buckets, only
//! four scopes: PROVIDED, COMPILE, TEST and RUNTIME. This crate decides which scope each
//! distinct dependency is reported under.
//!
//! # Architecture Overview
//!
//! 1. A [`registry::BucketRegistry`] exposes the buckets and their inheritance.
//! 2. [`resolver::rules`] turns each scope into plus/minus bucket sets: the default
//!    table for the scope, unioned with user overrides.
//! 3. [`resolver::index`] extracts every referenced bucket once through a
//!    [`extractor::DependencyExtractor`] and records which buckets hold each identity.
//! 4. [`resolver::matcher`] matches identities against the rules, resolves scope
//!    conflicts (PROVIDED beats COMPILE, COMPILE beats RUNTIME) and builds the IDE
//!    payloads.
//! 5. [`resolver::explicit`] adds directory libraries configured per scope, and
//!    [`resolver::unresolved`] reports artifacts the repository could not supply.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface (`resolve`, `unresolved`, `buckets`)
//! - [`config`] - `ideadeps.toml` project descriptor loading
//! - [`core`] - Error types and scope labels
//! - [`extractor`] - Extraction seam and the Maven-layout repository
//! - [`models`] - Buckets, identities, and emitted records
//! - [`module`] - Module descriptor with flags, overrides, and bucket roles
//! - [`registry`] - Bucket registry with hierarchy validation
//! - [`resolver`] - The resolution pass
//! - [`utils`] - Path normalization and portable IDE paths
//!
//! # Project Descriptor (ideadeps.toml)
//!
//! ```toml
//! [module]
//! name = "app"
//! repository = "~/.m2/repository"
//!
//! [buckets.implementation]
//! projects = [":core"]
//! artifacts = ["com.google.guava:guava:31.1-jre"]
//!
//! [buckets.compileOnly]
//! artifacts = ["org.projectlombok:lombok:1.18.30"]
//!
//! [buckets.compileClasspath]
//! extends = ["implementation", "compileOnly"]
//!
//! [buckets.runtimeClasspath]
//! extends = ["implementation"]
//! ```
//!
//! With the default rules, `:core` and guava end up in COMPILE and lombok in
//! PROVIDED.
//!
//! # Command-Line Usage
//!
//! ```bash
//! ideadeps resolve                    # Scopes of every dependency
//! ideadeps resolve --format json      # Same, as JSON
//! ideadeps unresolved                 # Artifacts missing from the repository
//! ideadeps buckets                    # Effective plus/minus buckets per scope
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod extractor;
pub mod models;
pub mod module;
pub mod registry;
pub mod resolver;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
