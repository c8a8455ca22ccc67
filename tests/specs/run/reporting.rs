//! Run report specs

use crate::prelude::*;

const RUNBOOK: &str = r#"
[pipeline.release]

[[pipeline.release.stage]]
name = "checkout"
run = "true"

[[pipeline.release.stage]]
name = "scan"
run = "false"

[[pipeline.release.stage]]
name = "cleanup"
run = "true"
always_run = true
"#;

#[test]
fn text_report_summarizes_every_stage() {
    let temp = Project::empty();
    temp.file("convoy.toml", RUNBOOK);

    temp.convoy()
        .args(&["run", "release"])
        .fails()
        .stdout_has("pipeline release: failed (3 stages,")
        .stdout_has("checkout")
        .stdout_has("scan")
        .stdout_has("cleanup")
        .stdout_has("(exit code 1)");
}

#[test]
fn json_report_is_machine_readable() {
    let temp = Project::empty();
    temp.file("convoy.toml", RUNBOOK);

    let out = temp
        .convoy()
        .args(&["run", "release", "--format", "json"])
        .fails();

    let report: serde_json::Value = serde_json::from_str(out.stdout()).expect("valid json");
    assert_eq!(report["pipeline"], "release");
    assert_eq!(report["overall_status"], "failed");

    let stages = report["stages"].as_array().expect("stages array");
    assert_eq!(stages.len(), 3);
    assert_eq!(stages[0]["stage_name"], "checkout");
    assert_eq!(stages[0]["status"], "success");
    assert_eq!(stages[1]["status"], "failed");
    assert_eq!(stages[1]["error_detail"], "exit code 1");
    assert_eq!(stages[2]["stage_name"], "cleanup");
}

#[test]
fn successful_run_exits_zero() {
    let temp = Project::empty();
    temp.file(
        "convoy.toml",
        r#"
[pipeline.ok]

[[pipeline.ok.stage]]
name = "build"
run = "true"
"#,
    );

    temp.convoy()
        .args(&["run", "ok"])
        .passes()
        .stdout_has("pipeline ok: success");
}
