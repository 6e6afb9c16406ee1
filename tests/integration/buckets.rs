use crate::common::TestProject;

#[test]
fn test_buckets_default_rules() {
    let project = TestProject::gradle().unwrap();

    project.command().arg("buckets").assert().success().stdout(
        "PROVIDED: plus [compileOnly] minus [implementation]\n\
         COMPILE: plus [compileClasspath] minus [-]\n\
         TEST: plus [testCompileClasspath, testRuntimeClasspath] minus [runtimeClasspath]\n\
         RUNTIME: plus [runtimeClasspath] minus [implementation]\n",
    );
}

#[test]
fn test_buckets_include_overrides() {
    let project = TestProject::new().unwrap();
    project
        .write_descriptor(
            r#"
[module]
name = "app"

[buckets.compileClasspath]
[buckets.integrationTest]
[buckets.shaded]

[scopes.TEST]
plus = ["integrationTest", "notDefined"]

[scopes.COMPILE]
minus = ["shaded"]
"#,
        )
        .unwrap();

    project.command().arg("buckets").assert().success().stdout(
        "PROVIDED: plus [-] minus [-]\n\
         COMPILE: plus [compileClasspath] minus [shaded]\n\
         TEST: plus [integrationTest] minus [-]\n\
         RUNTIME: plus [-] minus [-]\n",
    );
}
