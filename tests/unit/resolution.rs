use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use ideadeps_cli::core::{GeneratedScope, IdeaScope};
use ideadeps_cli::extractor::{DependencyExtractor, FileRepository, RegistryExtractor};
use ideadeps_cli::models::{
    ArtifactCoordinate, Bucket, Declaration, DependencyIdentity, IdeDependency,
    LocalFileDependency, ProjectDependency, RepoArtifactDependency, UnresolvedDependency,
};
use ideadeps_cli::module::{ModuleDescriptor, ScopeOverride};
use ideadeps_cli::registry::{BucketRegistry, InMemoryRegistry, RegistryBuilder};
use ideadeps_cli::resolver::{DependenciesProvider, resolve_conflicts};

/// Delegates to a real extractor and counts calls per bucket name.
struct Recording<'r> {
    inner: RegistryExtractor<'r, InMemoryRegistry>,
    calls: RefCell<HashMap<String, usize>>,
}

impl<'r> Recording<'r> {
    fn new(inner: RegistryExtractor<'r, InMemoryRegistry>) -> Self {
        Self {
            inner,
            calls: RefCell::new(HashMap::new()),
        }
    }

    fn record(&self, bucket: &Bucket) {
        *self.calls.borrow_mut().entry(bucket.name.clone()).or_default() += 1;
    }

    fn calls(&self, bucket: &str) -> usize {
        self.calls.borrow().get(bucket).copied().unwrap_or_default()
    }
}

impl DependencyExtractor for Recording<'_> {
    fn extract_project_references(&self, bucket: &Bucket) -> Result<Vec<ProjectDependency>> {
        self.record(bucket);
        self.inner.extract_project_references(bucket)
    }

    fn extract_repo_artifacts(
        &self,
        bucket: &Bucket,
        download_sources: bool,
        download_javadoc: bool,
    ) -> Result<Vec<RepoArtifactDependency>> {
        self.record(bucket);
        self.inner.extract_repo_artifacts(bucket, download_sources, download_javadoc)
    }

    fn extract_local_files(&self, bucket: &Bucket) -> Result<Vec<LocalFileDependency>> {
        self.record(bucket);
        self.inner.extract_local_files(bucket)
    }

    fn extract_unresolved_artifacts(&self, bucket: &Bucket) -> Result<Vec<UnresolvedDependency>> {
        self.inner.extract_unresolved_artifacts(bucket)
    }
}

fn publish(root: &Path, group: &str, name: &str, version: &str, attachments: &[&str]) {
    let dir = root.join(group.replace('.', "/")).join(name).join(version);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{name}-{version}.jar")), b"PK").unwrap();
    for attachment in attachments {
        fs::write(dir.join(format!("{name}-{version}-{attachment}.jar")), b"PK").unwrap();
    }
}

fn artifact(raw: &str) -> Declaration {
    Declaration::Artifact(raw.parse().unwrap())
}

fn artifact_identity(raw: &str, sources: bool, javadoc: bool) -> DependencyIdentity {
    DependencyIdentity::Artifact {
        coordinate: raw.parse().unwrap(),
        sources,
        javadoc,
    }
}

fn project(path: &str) -> DependencyIdentity {
    DependencyIdentity::Project {
        path: path.to_string(),
    }
}

/// Gradle-like registry: `lombok` is compile-only, `guava` is an implementation
/// dependency, `h2` is runtime-only and `junit` is a test dependency.
fn java_registry() -> InMemoryRegistry {
    RegistryBuilder::new()
        .bucket(
            "implementation",
            Vec::<String>::new(),
            vec![Declaration::Project(":core".into()), artifact("com.google.guava:guava:31.1")],
        )
        .bucket("compileOnly", Vec::<String>::new(), vec![artifact("org.projectlombok:lombok:1.18")])
        .bucket("runtimeOnly", Vec::<String>::new(), vec![artifact("com.h2database:h2:2.2")])
        .bucket("compileClasspath", ["implementation", "compileOnly"], vec![])
        .bucket("runtimeClasspath", ["implementation", "runtimeOnly"], vec![])
        .bucket(
            "testCompileClasspath",
            ["compileClasspath"],
            vec![artifact("junit:junit:4.13")],
        )
        .bucket(
            "testRuntimeClasspath",
            ["testCompileClasspath", "runtimeClasspath"],
            vec![],
        )
        .build()
        .unwrap()
}

fn java_repository(temp: &TempDir) -> FileRepository {
    let root = temp.path().join("repo");
    publish(&root, "com.google.guava", "guava", "31.1", &["sources", "javadoc"]);
    publish(&root, "org.projectlombok", "lombok", "1.18", &[]);
    publish(&root, "com.h2database", "h2", "2.2", &[]);
    publish(&root, "junit", "junit", "4.13", &["sources"]);
    FileRepository::new(root)
}

#[test]
fn test_java_module_scopes() {
    let temp = TempDir::new().unwrap();
    let registry = java_registry();
    let extractor =
        RegistryExtractor::new(&registry, temp.path(), "app").with_repository(java_repository(&temp));
    let provider = DependenciesProvider::new(&registry, &extractor);

    let resolved = provider.provide(&ModuleDescriptor::new("app")).unwrap();

    assert_eq!(resolved.scopes_of(&project(":core")), vec![IdeaScope::Compile]);
    assert_eq!(
        resolved.scopes_of(&artifact_identity("com.google.guava:guava:31.1", true, false)),
        vec![IdeaScope::Compile]
    );
    // compile-only ends up PROVIDED for main code and TEST for tests
    assert_eq!(
        resolved.scopes_of(&artifact_identity("org.projectlombok:lombok:1.18", true, false)),
        vec![IdeaScope::Provided, IdeaScope::Test]
    );
    assert_eq!(
        resolved.scopes_of(&artifact_identity("com.h2database:h2:2.2", true, false)),
        vec![IdeaScope::Runtime]
    );
    assert_eq!(
        resolved.scopes_of(&artifact_identity("junit:junit:4.13", true, false)),
        vec![IdeaScope::Test]
    );
    assert_eq!(resolved.len(), 6);
}

#[test]
fn test_every_emitted_scope_set_is_conflict_free() {
    let temp = TempDir::new().unwrap();
    let registry = java_registry();
    let extractor =
        RegistryExtractor::new(&registry, temp.path(), "app").with_repository(java_repository(&temp));
    let provider = DependenciesProvider::new(&registry, &extractor);
    let resolved = provider.provide(&ModuleDescriptor::new("app")).unwrap();

    for dep in resolved.iter() {
        let scopes = resolved.scopes_of(&dep.identity);
        assert!(
            !(scopes.contains(&IdeaScope::Provided) && scopes.contains(&IdeaScope::Compile)),
            "{} is both PROVIDED and COMPILE",
            dep.identity
        );
        assert!(
            !(scopes.contains(&IdeaScope::Compile) && scopes.contains(&IdeaScope::Runtime)),
            "{} is both COMPILE and RUNTIME",
            dep.identity
        );
    }
}

#[test]
fn test_conflicts_apply_in_order() {
    let all = [IdeaScope::Provided, IdeaScope::Compile, IdeaScope::Runtime]
        .into_iter()
        .collect();
    let kept: Vec<_> = resolve_conflicts(all).into_iter().collect();
    assert_eq!(kept, vec![IdeaScope::Provided, IdeaScope::Runtime]);

    let compile_runtime = [IdeaScope::Compile, IdeaScope::Runtime].into_iter().collect();
    let kept: Vec<_> = resolve_conflicts(compile_runtime).into_iter().collect();
    assert_eq!(kept, vec![IdeaScope::Compile]);
}

#[test]
fn test_artifact_attachments_follow_module_flags() {
    let temp = TempDir::new().unwrap();
    let registry = java_registry();
    let extractor =
        RegistryExtractor::new(&registry, temp.path(), "app").with_repository(java_repository(&temp));
    let provider = DependenciesProvider::new(&registry, &extractor);

    let module = ModuleDescriptor::new("app").download_sources(false).download_javadoc(true);
    let resolved = provider.provide(&module).unwrap();

    let guava = artifact_identity("com.google.guava:guava:31.1", false, true);
    let dep = resolved.for_identity(&guava).next().unwrap();
    match &dep.dependency {
        IdeDependency::Library(library) => {
            assert!(library.sources.is_empty());
            assert_eq!(library.javadoc.len(), 1);
            assert_eq!(
                library.module_version.as_ref().map(ToString::to_string).as_deref(),
                Some("com.google.guava:guava:31.1")
            );
        }
        other => panic!("expected a library, got {other}"),
    }
}

#[test]
fn test_offline_module_has_no_artifacts() {
    let temp = TempDir::new().unwrap();
    let registry = java_registry();
    let extractor = Recording::new(
        RegistryExtractor::new(&registry, temp.path(), "app").with_repository(java_repository(&temp)),
    );
    let provider = DependenciesProvider::new(&registry, &extractor);

    let resolved = provider.provide(&ModuleDescriptor::new("app").offline(true)).unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved.scopes_of(&project(":core")), vec![IdeaScope::Compile]);
}

#[test]
fn test_each_bucket_extracted_once_per_kind() {
    let temp = TempDir::new().unwrap();
    let registry = java_registry();
    let extractor = Recording::new(
        RegistryExtractor::new(&registry, temp.path(), "app").with_repository(java_repository(&temp)),
    );
    let provider = DependenciesProvider::new(&registry, &extractor);
    provider.provide(&ModuleDescriptor::new("app")).unwrap();

    // projects, artifacts and files
    for bucket in [
        "implementation",
        "compileOnly",
        "compileClasspath",
        "runtimeClasspath",
        "testCompileClasspath",
        "testRuntimeClasspath",
    ] {
        assert_eq!(extractor.calls(bucket), 3, "{bucket}");
    }
    assert_eq!(extractor.calls("runtimeOnly"), 0);
}

#[test]
fn test_user_overrides_extend_defaults() {
    let temp = TempDir::new().unwrap();
    let registry = RegistryBuilder::new()
        .bucket("compileClasspath", Vec::<String>::new(), vec![Declaration::Project(":a".into())])
        .bucket("integrationTest", Vec::<String>::new(), vec![Declaration::Project(":it".into())])
        .build()
        .unwrap();
    let extractor = RegistryExtractor::new(&registry, temp.path(), "app");
    let provider = DependenciesProvider::new(&registry, &extractor);

    let module = ModuleDescriptor::new("app").with_scope(
        GeneratedScope::Test,
        ScopeOverride::new(["integrationTest", "undefined"], Vec::<String>::new()),
    );
    let rules = provider.effective_rules(&module);
    let test = rules.get(GeneratedScope::Test).unwrap();
    assert_eq!(test.plus.len(), 1);

    let resolved = provider.provide(&module).unwrap();
    assert_eq!(resolved.scopes_of(&project(":a")), vec![IdeaScope::Compile]);
    assert_eq!(resolved.scopes_of(&project(":it")), vec![IdeaScope::Test]);
}

#[test]
fn test_minus_bucket_removes_from_scope() {
    let temp = TempDir::new().unwrap();
    let registry = RegistryBuilder::new()
        .bucket(
            "compileClasspath",
            Vec::<String>::new(),
            vec![Declaration::Project(":a".into()), Declaration::Project(":shaded".into())],
        )
        .bucket("shadow", Vec::<String>::new(), vec![Declaration::Project(":shaded".into())])
        .build()
        .unwrap();
    let extractor = RegistryExtractor::new(&registry, temp.path(), "app");
    let provider = DependenciesProvider::new(&registry, &extractor);

    let module = ModuleDescriptor::new("app")
        .with_scope(GeneratedScope::Compile, ScopeOverride::new(Vec::<String>::new(), ["shadow"]));
    let resolved = provider.provide(&module).unwrap();

    assert_eq!(resolved.scopes_of(&project(":a")), vec![IdeaScope::Compile]);
    assert!(resolved.scopes_of(&project(":shaded")).is_empty());
}

#[test]
fn test_snapshot_bucket_keeps_source_contents() {
    let temp = TempDir::new().unwrap();
    let registry = RegistryBuilder::new()
        .bucket("implementation", Vec::<String>::new(), vec![Declaration::Project(":a".into())])
        .snapshot("compileClasspath", "implementation")
        .build()
        .unwrap();
    let extractor = RegistryExtractor::new(&registry, temp.path(), "app");
    let provider = DependenciesProvider::new(&registry, &extractor);

    let resolved = provider.provide(&ModuleDescriptor::new("app")).unwrap();
    assert_eq!(resolved.scopes_of(&project(":a")), vec![IdeaScope::Compile]);
    assert!(registry.find_bucket("compileClasspath").unwrap().is_snapshot());
}

#[test]
fn test_unresolved_artifacts_sorted_by_name() {
    let temp = TempDir::new().unwrap();
    let registry = RegistryBuilder::new()
        .bucket(
            "compileClasspath",
            Vec::<String>::new(),
            vec![artifact("org.zeta:z:1"), artifact("com.google.guava:guava:31.1")],
        )
        .bucket("runtimeClasspath", ["compileClasspath"], vec![artifact("org.alpha:a:1")])
        .build()
        .unwrap();
    let extractor =
        RegistryExtractor::new(&registry, temp.path(), "app").with_repository(java_repository(&temp));
    let provider = DependenciesProvider::new(&registry, &extractor);

    let unresolved = provider.unresolved_dependencies(&ModuleDescriptor::new("app")).unwrap();
    let names: Vec<_> = unresolved.iter().map(UnresolvedDependency::display_name).collect();
    assert_eq!(names, vec!["org.alpha:a:1".to_string(), "org.zeta:z:1".to_string()]);
    assert_eq!(
        unresolved[0].coordinate,
        ArtifactCoordinate::new("org.alpha", "a", "1")
    );
}
