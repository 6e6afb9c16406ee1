use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_missing_descriptor() {
    let project = TestProject::new().unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Project descriptor not found"))
        .stderr(predicate::str::contains("--config"));
}

#[test]
fn test_cyclic_buckets() {
    let project = TestProject::new().unwrap();
    project
        .write_descriptor(
            r#"
[module]
name = "app"

[buckets.a]
extends = ["b"]

[buckets.b]
extends = ["a"]
"#,
        )
        .unwrap();

    project
        .command()
        .arg("buckets")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular bucket hierarchy"));
}

#[test]
fn test_misspelled_parent_suggests_name() {
    let project = TestProject::new().unwrap();
    project
        .write_descriptor(
            r#"
[module]
name = "app"

[buckets.implementation]
projects = [":core"]

[buckets.compileClasspath]
extends = ["implementaton"]
"#,
        )
        .unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'implementaton'"))
        .stderr(predicate::str::contains("Did you mean: implementation?"));
}

#[test]
fn test_invalid_toml() {
    let project = TestProject::new().unwrap();
    project.write_descriptor("[module\nname = \"app\"\n").unwrap();

    project
        .command()
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project descriptor syntax"));
}

#[test]
fn test_unknown_scope_filter_is_rejected() {
    let project = TestProject::gradle().unwrap();

    project.command().args(["resolve", "--scope", "bogus"]).assert().failure();
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let project = TestProject::gradle().unwrap();

    project
        .command()
        .args(["-v", "-q", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
