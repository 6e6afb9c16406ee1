use predicates::prelude::*;
use serde_json::Value;

use crate::common::TestProject;

#[test]
fn test_resolve_reports_each_scope() {
    let project = TestProject::gradle().unwrap();

    let output = project.command().arg("resolve").assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    assert!(stdout.contains("  module core\n"));
    assert!(stdout.contains("com.example:lib:1.0 ($MODULE_DIR$/repo/com/example/lib/1.0/lib-1.0.jar)"));
    assert!(stdout.contains("junit:junit:4.13.2 ($MODULE_DIR$/repo/junit/junit/4.13.2/junit-4.13.2.jar) +sources"));
    assert!(stdout.contains("  $MODULE_DIR$/libs/tool.jar\n"));
    assert!(!stdout.contains("missing-lib"));
    // core, lib, annotations twice, tool, junit
    assert!(stdout.ends_with("Total: 6 dependencies\n"));
}

#[test]
fn test_resolve_scope_filter() {
    let project = TestProject::gradle().unwrap();

    project
        .command()
        .args(["resolve", "--scope", "test"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("TEST:\n"))
        .stdout(predicate::str::contains("com.example:annotations:2.0"))
        .stdout(predicate::str::contains("junit:junit:4.13.2"))
        .stdout(predicate::str::contains("module core").not())
        .stdout(predicate::str::contains("Total: 2 dependencies"));
}

#[test]
fn test_resolve_json_conflicts() {
    let project = TestProject::gradle().unwrap();

    let output = project
        .command()
        .args(["resolve", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let records: Vec<Value> = serde_json::from_slice(&output).unwrap();
    assert_eq!(records.len(), 6);

    let scopes_of = |name: &str| -> Vec<String> {
        records
            .iter()
            .filter(|record| {
                record["identity"]["coordinate"]["name"] == name
                    || record["identity"]["path"] == name
            })
            .map(|record| record["scope"].as_str().unwrap().to_string())
            .collect()
    };

    assert_eq!(scopes_of(":core"), vec!["COMPILE"]);
    assert_eq!(scopes_of("lib"), vec!["COMPILE"]);
    assert_eq!(scopes_of("annotations"), vec!["PROVIDED", "TEST"]);
    assert_eq!(scopes_of("junit"), vec!["TEST"]);

    let core = records.iter().find(|record| record["identity"]["path"] == ":core").unwrap();
    assert_eq!(core["identity"]["kind"], "project");
    assert_eq!(core["dependency"]["type"], "module");
    assert_eq!(core["dependency"]["name"], "core");

    let tool = records
        .iter()
        .find(|record| record["identity"]["kind"] == "local-file")
        .unwrap();
    assert_eq!(tool["scope"], "RUNTIME");
    assert_eq!(tool["dependency"]["type"], "library");
}

#[test]
fn test_resolve_offline_skips_artifacts() {
    let project = TestProject::gradle().unwrap();

    project
        .command()
        .args(["--offline", "resolve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("module core"))
        .stdout(predicate::str::contains("libs/tool.jar"))
        .stdout(predicate::str::contains("lib-1.0.jar").not())
        .stdout(predicate::str::contains("Total: 2 dependencies"));

    project
        .command()
        .env("IDEADEPS_OFFLINE", "1")
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("junit").not());
}

#[test]
fn test_resolve_explicit_libraries_first() {
    let project = TestProject::new().unwrap();
    project.create_dir("generated/classes").unwrap();
    project
        .write_descriptor(
            r#"
[module]
name = "app"

[buckets.compileClasspath]
projects = [":core"]

[libraries]
PROVIDED = ["generated/classes", "does/not/exist"]
"#,
        )
        .unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("PROVIDED:\n  $MODULE_DIR$/generated/classes\n"))
        .stdout(predicate::str::contains("does/not/exist").not())
        .stdout(predicate::str::contains("Total: 2 dependencies"));
}

#[test]
fn test_resolve_empty_module() {
    let project = TestProject::new().unwrap();
    project.write_descriptor("[module]\nname = \"empty\"\n").unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .success()
        .stdout("No dependencies resolved for empty\n");
}

#[test]
fn test_resolve_with_config_path() {
    let project = TestProject::gradle().unwrap();
    let elsewhere = tempfile::TempDir::new().unwrap();

    let mut cmd = project.command();
    cmd.current_dir(elsewhere.path())
        .arg("--config")
        .arg(project.path().join("ideadeps.toml"))
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("lib-1.0.jar"));
}
