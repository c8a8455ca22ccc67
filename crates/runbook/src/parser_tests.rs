// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::RunDirective;
use convoy_core::{RetentionPolicy, RunCondition};

const RELEASE_RUNBOOK: &str = r##"
[pipeline.release]
inputs = ["branch", "build_number"]

[pipeline.release.defaults]
environment = "staging"

[[pipeline.release.stage]]
name = "checkout"
run = "git clone --depth 1 {repo_url} ."

[[pipeline.release.stage]]
name = "dependency-scan"
run = "scanner --target . --fail-on high --out reports/deps.json"
parallel_group = "scans"
artifacts = [{ path = "reports/deps.json" }]

[[pipeline.release.stage]]
name = "lint-scan"
run = { program = "linter", args = ["--strict", "."] }
parallel_group = "scans"

[[pipeline.release.stage]]
name = "deploy"
run = "kubectl apply -f manifests/ -n {environment}"
when = { var = "branch", equals = "main" }

[[pipeline.release.stage]]
name = "cleanup"
run = "rm -rf .cache"
always_run = true

[notify.webhook]
url = "https://hooks.example.com/T000/B000"
channel = "#deploys"
"##;

#[test]
fn parses_pipeline_with_stages_in_order() {
    let runbook = parse_runbook(RELEASE_RUNBOOK).unwrap();
    let p = runbook.get_pipeline("release").unwrap();

    assert_eq!(p.inputs, vec!["branch", "build_number"]);
    assert_eq!(p.defaults.get("environment").map(String::as_str), Some("staging"));
    assert_eq!(
        p.stage_names(),
        vec![
            "checkout",
            "dependency-scan",
            "lint-scan",
            "deploy",
            "cleanup"
        ]
    );
}

#[test]
fn parses_stage_attributes() {
    let runbook = parse_runbook(RELEASE_RUNBOOK).unwrap();
    let p = runbook.get_pipeline("release").unwrap();

    let scan = p.get_stage("dependency-scan").unwrap();
    assert_eq!(scan.parallel_group.as_deref(), Some("scans"));
    assert_eq!(scan.artifacts.len(), 1);
    assert_eq!(scan.artifacts[0].path, "reports/deps.json");
    assert_eq!(scan.artifacts[0].retention, RetentionPolicy::Keep);

    let lint = p.get_stage("lint-scan").unwrap();
    assert_eq!(
        lint.run,
        RunDirective::Exec {
            program: "linter".to_string(),
            args: vec!["--strict".to_string(), ".".to_string()],
        }
    );

    let deploy = p.get_stage("deploy").unwrap();
    assert_eq!(deploy.condition, RunCondition::equals("branch", "main"));
    assert!(!deploy.always_run);

    let cleanup = p.get_stage("cleanup").unwrap();
    assert!(cleanup.always_run);
    assert_eq!(cleanup.condition, RunCondition::Always);
}

#[test]
fn parses_notify_webhook() {
    let runbook = parse_runbook(RELEASE_RUNBOOK).unwrap();
    let notify = runbook.notify.unwrap();
    assert_eq!(notify.url, "https://hooks.example.com/T000/B000");
    assert_eq!(notify.channel.as_deref(), Some("#deploys"));
}

#[test]
fn stage_without_name_is_rejected() {
    let err = parse_runbook(
        r#"
[[pipeline.bad.stage]]
run = "echo hi"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::MissingField(_)));
}

#[test]
fn stage_without_run_is_rejected() {
    let err = parse_runbook(
        r#"
[[pipeline.bad.stage]]
name = "no-run"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::InvalidFormat(_)));
}

#[test]
fn empty_runbook_parses() {
    let runbook = parse_runbook("").unwrap();
    assert!(runbook.pipelines.is_empty());
    assert!(runbook.notify.is_none());
}

#[test]
fn pipeline_names_are_sorted() {
    let runbook = parse_runbook(
        r#"
[pipeline.zeta]
[pipeline.alpha]
"#,
    )
    .unwrap();
    assert_eq!(runbook.pipeline_names(), vec!["alpha", "zeta"]);
}
