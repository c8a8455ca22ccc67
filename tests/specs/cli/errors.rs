//! Error handling specs

use crate::prelude::*;

#[test]
fn missing_runbook_is_reported() {
    Project::empty()
        .convoy()
        .args(&["list"])
        .fails()
        .stderr_has("cannot read runbook");
}

#[test]
fn invalid_toml_is_reported() {
    let temp = Project::empty();
    temp.file("convoy.toml", "not = [valid toml");

    temp.convoy()
        .args(&["list"])
        .fails()
        .stderr_has("invalid runbook");
}

#[test]
fn unknown_pipeline_is_reported() {
    let temp = Project::empty();
    temp.file(
        "convoy.toml",
        r#"
[pipeline.release]

[[pipeline.release.stage]]
name = "build"
run = "true"
"#,
    );

    temp.convoy()
        .args(&["run", "nope"])
        .fails()
        .stderr_has("unknown pipeline: nope");
}

#[test]
fn missing_context_variable_fails_before_any_stage() {
    let temp = Project::empty();
    temp.file(
        "convoy.toml",
        r#"
[pipeline.push]

[[pipeline.push.stage]]
name = "build"
run = "touch built.txt"

[[pipeline.push.stage]]
name = "push"
run = "echo {image_tag}"
"#,
    );

    temp.convoy()
        .args(&["run", "push"])
        .fails()
        .stderr_has("missing context variable: image_tag");

    // Validation happens before execution; the first stage never ran
    assert!(!temp.exists("built.txt"));
}

#[test]
fn missing_declared_input_is_reported() {
    let temp = Project::empty();
    temp.file(
        "convoy.toml",
        r#"
[pipeline.release]
inputs = ["environment"]

[[pipeline.release.stage]]
name = "build"
run = "true"
"#,
    );

    temp.convoy()
        .args(&["run", "release"])
        .fails()
        .stderr_has("missing required input: environment");
}
