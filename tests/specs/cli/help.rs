//! Help and version specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    Project::empty()
        .convoy()
        .args(&["--help"])
        .passes()
        .stdout_has("run")
        .stdout_has("validate")
        .stdout_has("list")
        .stdout_has("completions");
}

#[test]
fn version_prints_binary_name() {
    Project::empty()
        .convoy()
        .args(&["--version"])
        .passes()
        .stdout_has("convoy");
}

#[test]
fn run_help_shows_context_flags() {
    Project::empty()
        .convoy()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--var")
        .stdout_has("--branch")
        .stdout_has("--build-number")
        .stdout_has("--timeout")
        .stdout_has("--no-fail-fast")
        .stdout_has("--format");
}

#[test]
fn completions_generate_without_a_runbook() {
    // Completions must not require a runbook on disk
    Project::empty()
        .convoy()
        .args(&["completions", "bash"])
        .passes()
        .stdout_has("convoy");
}
