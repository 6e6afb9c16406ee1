use std::fs;
use tempfile::TempDir;

use ideadeps_cli::config::{LoadedProject, ProjectConfig, offline_flag};
use ideadeps_cli::core::{IdeDepsError, IdeaScope, user_friendly_error};
use ideadeps_cli::models::DependencyIdentity;
use ideadeps_cli::registry::BucketRegistry;
use ideadeps_cli::resolver::DependenciesProvider;

const DESCRIPTOR: &str = r#"
[module]
name = "web"
download-javadoc = true

[roles]
compile-classpath = "mainClasspath"

[buckets.mainClasspath]
projects = [":shared:model"]
files = ["lib/legacy.jar"]

[buckets.frozen]
snapshot-of = "mainClasspath"

[libraries]
RUNTIME = ["build/resources"]
"#;

fn write(temp: &TempDir, content: &str) -> std::path::PathBuf {
    let path = temp.path().join("ideadeps.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_loaded_project_resolves_with_renamed_roles() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("build/resources")).unwrap();
    let path = write(&temp, DESCRIPTOR);

    let project = LoadedProject::load(&path, false).unwrap();
    assert!(project.module.download_javadoc);
    assert!(project.registry.find_bucket("frozen").unwrap().is_snapshot());
    assert!(project.repository.is_none());

    let extractor = project.extractor();
    let provider = DependenciesProvider::new(&project.registry, &extractor);
    let resolved = provider.provide(&project.module).unwrap();

    let first = resolved.iter().next().unwrap();
    assert_eq!(first.scope, IdeaScope::Runtime);

    let model = DependencyIdentity::Project {
        path: ":shared:model".to_string(),
    };
    assert_eq!(resolved.scopes_of(&model), vec![IdeaScope::Compile]);
    let legacy = DependencyIdentity::LocalFile {
        path: temp.path().join("lib/legacy.jar"),
    };
    assert_eq!(resolved.scopes_of(&legacy), vec![IdeaScope::Compile]);
    assert_eq!(resolved.len(), 3);
}

#[test]
fn test_force_offline_overrides_descriptor() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, DESCRIPTOR);

    let project = LoadedProject::load(&path, true).unwrap();
    assert!(project.module.offline);
}

#[test]
fn test_missing_descriptor_error() {
    let temp = TempDir::new().unwrap();
    let error = LoadedProject::load(&temp.path().join("ideadeps.toml"), false).unwrap_err();
    let ctx = user_friendly_error(error);
    assert!(matches!(ctx.error, IdeDepsError::ConfigNotFound { .. }));
    assert!(ctx.suggestion.is_some());
}

#[test]
fn test_unknown_field_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "[module]\nname = \"web\"\nofline = true\n");

    let error = ProjectConfig::load(&path).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<IdeDepsError>(),
        Some(IdeDepsError::ConfigParseError { .. })
    ));
}

#[test]
fn test_empty_module_name_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "[module]\nname = \"  \"\n");

    let error = ProjectConfig::load(&path).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<IdeDepsError>(),
        Some(IdeDepsError::ConfigValidationError { .. })
    ));
}

#[test]
fn test_offline_env_values() {
    assert!(offline_flag(Some("yes")));
    assert!(!offline_flag(Some("no")));
    assert!(!offline_flag(Some("")));
    assert!(!offline_flag(None));
}
