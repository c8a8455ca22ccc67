//! Pipeline execution specs
//!
//! Each runbook writes files into the project directory so the tests
//! can verify which stages actually ran.

use crate::prelude::*;

const RELEASE_RUNBOOK: &str = r#"
[pipeline.release]
inputs = ["branch"]

[[pipeline.release.stage]]
name = "checkout"
run = "echo checkout >> steps.log"

[[pipeline.release.stage]]
name = "scan"
run = "echo scan >> steps.log"

[[pipeline.release.stage]]
name = "deploy"
run = "echo deploy >> steps.log && touch deployed"
when = { var = "branch", equals = "main" }

[[pipeline.release.stage]]
name = "cleanup"
run = "echo cleanup >> steps.log"
always_run = true
"#;

#[test]
fn stages_run_in_declaration_order() {
    let temp = Project::empty();
    temp.file("convoy.toml", RELEASE_RUNBOOK);

    temp.convoy()
        .args(&["run", "release", "--branch", "main"])
        .passes();

    assert_eq!(temp.read("steps.log"), "checkout\nscan\ndeploy\ncleanup\n");
}

#[test]
fn false_condition_skips_the_stage() {
    let temp = Project::empty();
    temp.file("convoy.toml", RELEASE_RUNBOOK);

    temp.convoy()
        .args(&["run", "release", "--branch", "develop"])
        .passes()
        .stdout_has("skipped");

    assert!(!temp.exists("deployed"));
    assert_eq!(temp.read("steps.log"), "checkout\nscan\ncleanup\n");
}

#[test]
fn failure_halts_later_stages_but_cleanup_runs() {
    let temp = Project::empty();
    temp.file(
        "convoy.toml",
        r#"
[pipeline.release]

[[pipeline.release.stage]]
name = "checkout"
run = "echo checkout >> steps.log"

[[pipeline.release.stage]]
name = "scan"
run = "false"

[[pipeline.release.stage]]
name = "deploy"
run = "touch deployed"

[[pipeline.release.stage]]
name = "cleanup"
run = "touch cleaned"
always_run = true
"#,
    );

    temp.convoy()
        .args(&["run", "release"])
        .fails()
        .stdout_has("failed");

    assert!(!temp.exists("deployed"));
    assert!(temp.exists("cleaned"));
}

#[test]
fn parallel_group_members_all_run() {
    let temp = Project::empty();
    temp.file(
        "convoy.toml",
        r#"
[pipeline.scans]

[[pipeline.scans.stage]]
name = "dep-scan"
run = "touch dep-scan.done"
parallel_group = "scans"

[[pipeline.scans.stage]]
name = "lint-scan"
run = "touch lint-scan.done"
parallel_group = "scans"

[[pipeline.scans.stage]]
name = "build"
run = "touch build.done"
"#,
    );

    let out = temp.convoy().args(&["run", "scans"]).passes();

    assert!(temp.exists("dep-scan.done"));
    assert!(temp.exists("lint-scan.done"));
    assert!(temp.exists("build.done"));

    // Report lists members in declaration order regardless of which
    // finished first
    let stdout = out.stdout();
    let dep = stdout.find("dep-scan").unwrap();
    let lint = stdout.find("lint-scan").unwrap();
    let build = stdout.find("build").unwrap();
    assert!(dep < lint && lint < build);
}

#[test]
fn context_variables_reach_commands_and_env() {
    let temp = Project::empty();
    temp.file(
        "convoy.toml",
        r#"
[pipeline.tagged]
defaults = { environment = "staging" }

[[pipeline.tagged.stage]]
name = "tag"
run = "printf %s {build_number} > build.txt"

[[pipeline.tagged.stage]]
name = "env"
run = "printf %s \"$TARGET_ENV\" > env.txt"
env = { TARGET_ENV = "{environment}" }
"#,
    );

    temp.convoy()
        .args(&["run", "tagged", "--build-number", "42"])
        .passes();

    assert_eq!(temp.read("build.txt"), "42");
    assert_eq!(temp.read("env.txt"), "staging");
}

#[test]
fn build_number_is_generated_when_not_supplied() {
    let temp = Project::empty();
    temp.file(
        "convoy.toml",
        r#"
[pipeline.tagged]

[[pipeline.tagged.stage]]
name = "tag"
run = "printf %s {build_number} > build.txt"
"#,
    );

    temp.convoy().args(&["run", "tagged"]).passes();
    assert!(!temp.read("build.txt").is_empty());
}

#[test]
fn no_fail_fast_keeps_running_but_still_fails() {
    let temp = Project::empty();
    temp.file(
        "convoy.toml",
        r#"
[pipeline.tolerant]

[[pipeline.tolerant.stage]]
name = "scan"
run = "false"

[[pipeline.tolerant.stage]]
name = "build"
run = "touch build.done"
"#,
    );

    temp.convoy()
        .args(&["run", "tolerant", "--no-fail-fast"])
        .fails();

    assert!(temp.exists("build.done"));
}
