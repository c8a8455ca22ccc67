//! Validate and list specs

use crate::prelude::*;

const RUNBOOK: &str = r#"
[pipeline.release]
inputs = ["branch"]

[[pipeline.release.stage]]
name = "build"
run = "true"

[[pipeline.release.stage]]
name = "deploy"
run = "true"

[pipeline.hotfix]

[[pipeline.hotfix.stage]]
name = "patch"
run = "true"
"#;

#[test]
fn validate_accepts_a_well_formed_runbook() {
    let temp = Project::empty();
    temp.file("convoy.toml", RUNBOOK);

    temp.convoy()
        .args(&["validate"])
        .passes()
        .stdout_has("hotfix: ok (1 stages)")
        .stdout_has("release: ok (2 stages)");
}

#[test]
fn validate_rejects_duplicate_stage_names() {
    let temp = Project::empty();
    temp.file(
        "convoy.toml",
        r#"
[pipeline.dup]

[[pipeline.dup.stage]]
name = "build"
run = "true"

[[pipeline.dup.stage]]
name = "build"
run = "true"
"#,
    );

    temp.convoy()
        .args(&["validate"])
        .fails()
        .stderr_has("duplicate stage name: build");
}

#[test]
fn validate_rejects_a_pipeline_without_stages() {
    let temp = Project::empty();
    temp.file("convoy.toml", "[pipeline.empty]\n");

    temp.convoy()
        .args(&["validate"])
        .fails()
        .stderr_has("has no stages");
}

#[test]
fn validate_names_unknown_pipelines() {
    let temp = Project::empty();
    temp.file("convoy.toml", RUNBOOK);

    temp.convoy()
        .args(&["validate", "nope"])
        .fails()
        .stderr_has("unknown pipeline: nope");
}

#[test]
fn validate_fails_on_an_empty_runbook() {
    let temp = Project::empty();
    temp.file("convoy.toml", "");

    temp.convoy()
        .args(&["validate"])
        .fails()
        .stderr_has("runbook defines no pipelines");
}

#[test]
fn list_shows_pipelines_sorted() {
    let temp = Project::empty();
    temp.file("convoy.toml", RUNBOOK);

    let out = temp.convoy().args(&["list"]).passes();
    let hotfix = out.stdout().find("hotfix").unwrap();
    let release = out.stdout().find("release").unwrap();
    assert!(hotfix < release);
}

#[test]
fn list_json_includes_stages_and_inputs() {
    let temp = Project::empty();
    temp.file("convoy.toml", RUNBOOK);

    let out = temp.convoy().args(&["list", "--format", "json"]).passes();
    let entries: serde_json::Value = serde_json::from_str(out.stdout()).expect("valid json");

    assert_eq!(entries[0]["name"], "hotfix");
    assert_eq!(entries[1]["name"], "release");
    assert_eq!(entries[1]["stages"][0], "build");
    assert_eq!(entries[1]["inputs"][0], "branch");
}
